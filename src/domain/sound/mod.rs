//! Sound value objects: requests, resolved sounds, outcomes

pub mod chime;
pub mod outcome;
pub mod request;
pub mod resolved;
pub mod volume;

pub use chime::ChimeSpec;
pub use outcome::{PlaybackErrorKind, PlaybackOutcome};
pub use request::{PlaybackRequest, SoundSource};
pub use resolved::{Resolution, ResolvedSound, SoundOrigin};
pub use volume::Volume;
