//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod device;
pub mod renderer;
pub mod validator;

// Re-export common types
pub use config::ConfigStore;
pub use device::{AudioDeviceControl, DeviceError};
pub use renderer::{CancelFlag, RenderError, SoundRenderer};
pub use validator::{InvalidSound, SoundValidator};
