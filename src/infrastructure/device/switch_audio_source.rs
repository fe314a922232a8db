//! macOS device control via `SwitchAudioSource`

use async_trait::async_trait;

use crate::application::ports::{AudioDeviceControl, DeviceError};

use super::tool::{lines, run_tool};

const PROGRAM: &str = "SwitchAudioSource";

/// Switches the system output with `SwitchAudioSource` (switchaudio-osx)
pub struct SwitchAudioSourceControl;

impl SwitchAudioSourceControl {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SwitchAudioSourceControl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioDeviceControl for SwitchAudioSourceControl {
    fn name(&self) -> String {
        PROGRAM.to_string()
    }

    async fn list_devices(&self) -> Result<Vec<String>, DeviceError> {
        let output = run_tool(PROGRAM, &["-a", "-t", "output"]).await?;
        Ok(lines(&output))
    }

    async fn current_device(&self) -> Result<String, DeviceError> {
        let current = run_tool(PROGRAM, &["-c", "-t", "output"]).await?;
        if current.is_empty() {
            return Err(DeviceError::CommandFailed(
                "SwitchAudioSource reported no current output".to_string(),
            ));
        }
        Ok(current)
    }

    async fn set_device(&self, name: &str) -> Result<(), DeviceError> {
        if !self.list_devices().await?.iter().any(|d| d == name) {
            return Err(DeviceError::NotFound(name.to_string()));
        }
        run_tool(PROGRAM, &["-s", name, "-t", "output"]).await?;
        Ok(())
    }
}
