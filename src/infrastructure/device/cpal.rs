//! Read-only device control using cpal
//!
//! cpal can enumerate outputs and report the default one, but it cannot
//! change the system default, so switching reports unavailability.

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait};

use crate::application::ports::{AudioDeviceControl, DeviceError};

/// Device enumeration through the platform audio host
pub struct CpalDeviceControl;

impl CpalDeviceControl {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CpalDeviceControl {
    fn default() -> Self {
        Self::new()
    }
}

fn list_output_devices() -> Result<Vec<String>, DeviceError> {
    let host = cpal::default_host();
    let devices = host
        .output_devices()
        .map_err(|e| DeviceError::CommandFailed(e.to_string()))?;
    Ok(devices.filter_map(|device| device.name().ok()).collect())
}

fn default_output_device() -> Result<String, DeviceError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| DeviceError::CommandFailed("no default output device".to_string()))?;
    device
        .name()
        .map_err(|e| DeviceError::CommandFailed(e.to_string()))
}

/// Run a blocking host query off the async runtime
async fn query<T, F>(f: F) -> Result<T, DeviceError>
where
    F: FnOnce() -> Result<T, DeviceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DeviceError::CommandFailed(format!("Task join error: {}", e)))?
}

#[async_trait]
impl AudioDeviceControl for CpalDeviceControl {
    fn name(&self) -> String {
        "cpal".to_string()
    }

    async fn list_devices(&self) -> Result<Vec<String>, DeviceError> {
        query(list_output_devices).await
    }

    async fn current_device(&self) -> Result<String, DeviceError> {
        query(default_output_device).await
    }

    async fn set_device(&self, _name: &str) -> Result<(), DeviceError> {
        Err(DeviceError::Unavailable(
            "cpal cannot change the system output device".to_string(),
        ))
    }
}
