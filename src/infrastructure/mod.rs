//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces, integrating
//! with rodio, command-line players, platform device utilities and the
//! file system.

pub mod assets;
pub mod config;
pub mod detect;
pub mod device;
pub mod home;
pub mod render;
pub mod validation;

// Re-export adapters
pub use assets::{builtin_default_sound_path, ensure_default_sound, expand_default_sound_path};
pub use config::{EnvConfigSource, XdgConfigStore};
pub use device::{create_device_control, DeviceTool, DeviceToolPreference};
pub use render::{create_renderer, BackendPreference, RodioRenderer};
pub use validation::FsSoundValidator;
