//! Playback request value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidSourceError;

use super::volume::Volume;

/// Which sound the caller asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundSource {
    /// The bundled default chime
    Default,
    /// The configured custom sound, which must pass validation
    Custom,
    /// Custom when one is configured, default otherwise
    #[default]
    Auto,
}

impl SoundSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Custom => "custom",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for SoundSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoundSource {
    type Err = InvalidSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "custom" => Ok(Self::Custom),
            "auto" => Ok(Self::Auto),
            _ => Err(InvalidSourceError {
                input: s.to_string(),
            }),
        }
    }
}

/// A single "play a notification" invocation.
///
/// `message` is only logged; it never changes what is played.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackRequest {
    #[serde(default)]
    pub source: SoundSource,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub volume: Option<Volume>,
}

impl PlaybackRequest {
    pub fn new(source: SoundSource) -> Self {
        Self {
            source,
            ..Default::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    pub fn with_volume(mut self, volume: Volume) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Requested device, ignoring blank names
    pub fn device_name(&self) -> Option<&str> {
        self.device
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_parses_case_insensitive() {
        assert_eq!("Custom".parse::<SoundSource>().unwrap(), SoundSource::Custom);
        assert_eq!(" default ".parse::<SoundSource>().unwrap(), SoundSource::Default);
        assert!("loud".parse::<SoundSource>().is_err());
    }

    #[test]
    fn request_defaults_to_auto() {
        let request = PlaybackRequest::default();
        assert_eq!(request.source, SoundSource::Auto);
        assert!(request.volume.is_none());
    }

    #[test]
    fn blank_device_is_ignored() {
        let request = PlaybackRequest::default().with_device("   ");
        assert_eq!(request.device_name(), None);

        let request = PlaybackRequest::default().with_device(" Speakers ");
        assert_eq!(request.device_name(), Some("Speakers"));
    }

    #[test]
    fn deserializes_partial_json() {
        let request: PlaybackRequest =
            serde_json::from_str(r#"{"source":"custom","volume":0.3}"#).unwrap();
        assert_eq!(request.source, SoundSource::Custom);
        assert_eq!(request.volume.map(|v| v.level()), Some(0.3));
        assert!(request.message.is_none());
    }
}
