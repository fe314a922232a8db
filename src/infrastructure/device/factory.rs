//! Device control factory with automatic detection

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::application::ports::AudioDeviceControl;
use crate::infrastructure::detect::is_command_available;

use super::cpal::CpalDeviceControl;
use super::noop::NoDeviceControl;
use super::pactl::PactlDeviceControl;
use super::switch_audio_source::SwitchAudioSourceControl;

/// Available device control tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceTool {
    /// Linux: PulseAudio / PipeWire
    Pactl,
    /// macOS: switchaudio-osx
    SwitchAudioSource,
    /// Enumeration only
    Cpal,
    /// Disabled
    None,
}

impl fmt::Display for DeviceTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceTool::Pactl => write!(f, "pactl"),
            DeviceTool::SwitchAudioSource => write!(f, "switch-audio-source"),
            DeviceTool::Cpal => write!(f, "cpal"),
            DeviceTool::None => write!(f, "none"),
        }
    }
}

/// User preference for device control selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceToolPreference {
    /// Detect the best tool for this platform
    #[default]
    Auto,
    Only(DeviceTool),
}

/// Error type for parsing device tool preference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDeviceToolError {
    pub value: String,
}

impl fmt::Display for ParseDeviceToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid device tool '{}'. Valid options: auto, pactl, switch-audio-source, cpal, none",
            self.value
        )
    }
}

impl std::error::Error for ParseDeviceToolError {}

impl FromStr for DeviceToolPreference {
    type Err = ParseDeviceToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(DeviceToolPreference::Auto),
            "pactl" => Ok(DeviceToolPreference::Only(DeviceTool::Pactl)),
            "switch-audio-source" => Ok(DeviceToolPreference::Only(DeviceTool::SwitchAudioSource)),
            "cpal" => Ok(DeviceToolPreference::Only(DeviceTool::Cpal)),
            "none" => Ok(DeviceToolPreference::Only(DeviceTool::None)),
            _ => Err(ParseDeviceToolError {
                value: s.to_string(),
            }),
        }
    }
}

/// Detect the best available device tool
///
/// macOS: SwitchAudioSource → cpal
/// Linux: pactl → cpal
/// Elsewhere: cpal
pub async fn detect_device_tool() -> DeviceTool {
    if cfg!(target_os = "macos") && is_command_available("SwitchAudioSource").await {
        return DeviceTool::SwitchAudioSource;
    }
    if cfg!(target_os = "linux") && is_command_available("pactl").await {
        return DeviceTool::Pactl;
    }
    DeviceTool::Cpal
}

/// Create a device control adapter for the given preference.
///
/// A specific tool is used even if it is not installed; its operations then
/// report unavailability, which playback treats as a warning.
pub async fn create_device_control(
    preference: DeviceToolPreference,
) -> (Box<dyn AudioDeviceControl>, DeviceTool) {
    let tool = match preference {
        DeviceToolPreference::Auto => detect_device_tool().await,
        DeviceToolPreference::Only(tool) => tool,
    };
    debug!(%tool, "device control selected");

    let control: Box<dyn AudioDeviceControl> = match tool {
        DeviceTool::Pactl => Box::new(PactlDeviceControl::new()),
        DeviceTool::SwitchAudioSource => Box::new(SwitchAudioSourceControl::new()),
        DeviceTool::Cpal => Box::new(CpalDeviceControl::new()),
        DeviceTool::None => Box::new(NoDeviceControl::new()),
    };
    (control, tool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_tool_display() {
        assert_eq!(DeviceTool::Pactl.to_string(), "pactl");
        assert_eq!(DeviceTool::SwitchAudioSource.to_string(), "switch-audio-source");
        assert_eq!(DeviceTool::Cpal.to_string(), "cpal");
        assert_eq!(DeviceTool::None.to_string(), "none");
    }

    #[test]
    fn device_tool_preference_from_str() {
        assert_eq!(
            "AUTO".parse::<DeviceToolPreference>().unwrap(),
            DeviceToolPreference::Auto
        );
        assert_eq!(
            "switch-audio-source".parse::<DeviceToolPreference>().unwrap(),
            DeviceToolPreference::Only(DeviceTool::SwitchAudioSource)
        );
        assert_eq!(
            "none".parse::<DeviceToolPreference>().unwrap(),
            DeviceToolPreference::Only(DeviceTool::None)
        );
    }

    #[test]
    fn device_tool_preference_from_str_invalid() {
        let err = "alsamixer".parse::<DeviceToolPreference>().unwrap_err();
        assert_eq!(err.value, "alsamixer");
    }

    #[tokio::test]
    async fn explicit_none_is_respected() {
        let (control, tool) =
            create_device_control(DeviceToolPreference::Only(DeviceTool::None)).await;
        assert_eq!(tool, DeviceTool::None);
        assert_eq!(control.name(), "none");
    }
}
