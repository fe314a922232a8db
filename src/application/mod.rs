//! Application layer - Use cases and port interfaces
//!
//! Contains the notification use cases and the trait definitions
//! for audio rendering, device control, validation and config storage.

pub mod notify;
pub mod player;
pub mod ports;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

// Re-export use cases
pub use notify::{AudioStatus, DeviceListing, NotificationService};
pub use player::DeviceScopedPlayer;
pub use resolver::{ResolveError, ResolveRule, SoundResolver};
