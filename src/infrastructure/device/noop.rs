//! No-op device control (when device switching is disabled)

use async_trait::async_trait;

use crate::application::ports::{AudioDeviceControl, DeviceError};

/// Device control that reports every operation as unavailable
pub struct NoDeviceControl;

impl NoDeviceControl {
    pub fn new() -> Self {
        Self
    }

    fn unavailable() -> DeviceError {
        DeviceError::Unavailable("device control disabled".to_string())
    }
}

impl Default for NoDeviceControl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioDeviceControl for NoDeviceControl {
    fn name(&self) -> String {
        "none".to_string()
    }

    async fn list_devices(&self) -> Result<Vec<String>, DeviceError> {
        Err(Self::unavailable())
    }

    async fn current_device(&self) -> Result<String, DeviceError> {
        Err(Self::unavailable())
    }

    async fn set_device(&self, _name: &str) -> Result<(), DeviceError> {
        Err(Self::unavailable())
    }
}
