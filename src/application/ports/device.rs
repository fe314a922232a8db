//! Output device control port

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Device control errors
#[derive(Debug, Clone, Error)]
pub enum DeviceError {
    /// Device operations are not supported here at all
    #[error("device control unavailable: {0}")]
    Unavailable(String),

    /// The named device does not exist
    #[error("output device not found: {0}")]
    NotFound(String),

    /// The platform utility ran but failed
    #[error("device command failed: {0}")]
    CommandFailed(String),

    /// The utility did not answer within the allowed time
    #[error("{operation} did not finish within {after:?}")]
    TimedOut {
        operation: &'static str,
        after: Duration,
    },
}

impl DeviceError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Port for enumerating and switching the system output device.
///
/// Implementations query the OS every time; nothing is cached.
#[async_trait]
pub trait AudioDeviceControl: Send + Sync {
    /// Adapter name for logs and status
    fn name(&self) -> String;

    /// Names of the available output devices
    async fn list_devices(&self) -> Result<Vec<String>, DeviceError>;

    /// Name of the currently active output device
    async fn current_device(&self) -> Result<String, DeviceError>;

    /// Make `name` the active output device
    async fn set_device(&self, name: &str) -> Result<(), DeviceError>;
}

/// Blanket implementation for boxed device control types
#[async_trait]
impl AudioDeviceControl for Box<dyn AudioDeviceControl> {
    fn name(&self) -> String {
        self.as_ref().name()
    }

    async fn list_devices(&self) -> Result<Vec<String>, DeviceError> {
        self.as_ref().list_devices().await
    }

    async fn current_device(&self) -> Result<String, DeviceError> {
        self.as_ref().current_device().await
    }

    async fn set_device(&self, name: &str) -> Result<(), DeviceError> {
        self.as_ref().set_device(name).await
    }
}
