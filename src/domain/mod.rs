//! Domain layer - Core value objects and errors
//!
//! Contains requests, resolved sounds, outcomes, configuration records
//! and domain errors. This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod sound;

// Re-export common types
pub use config::{AppConfig, ServerConfig, Timeout};
pub use error::*;
pub use sound::{
    PlaybackErrorKind, PlaybackOutcome, PlaybackRequest, Resolution, ResolvedSound, SoundOrigin,
    SoundSource, Volume,
};
