//! Layered configuration record (file, environment, CLI)

use serde::{Deserialize, Serialize};

use super::server_config::{
    DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_BACKEND, DEFAULT_DEVICE_TOOL, DEFAULT_MAX_FILE_SIZE_MB,
};
use super::timeout::Timeout;
use crate::domain::sound::volume::DEFAULT_VOLUME;

/// Application configuration layer.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub custom_sound_path: Option<String>,
    pub default_sound_path: Option<String>,
    pub volume: Option<f32>,
    pub enable_fallback: Option<bool>,
    pub max_file_size_mb: Option<u64>,
    pub allowed_extensions: Option<Vec<String>>,
    pub playback_timeout: Option<String>,
    pub restrict_to_user_home: Option<bool>,
    pub device: Option<String>,
    pub backend: Option<String>,
    pub device_tool: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            custom_sound_path: None,
            default_sound_path: None,
            volume: Some(DEFAULT_VOLUME),
            enable_fallback: Some(true),
            max_file_size_mb: Some(DEFAULT_MAX_FILE_SIZE_MB),
            allowed_extensions: Some(
                DEFAULT_ALLOWED_EXTENSIONS
                    .iter()
                    .map(|ext| ext.to_string())
                    .collect(),
            ),
            playback_timeout: Some(Timeout::default_timeout().to_string()),
            restrict_to_user_home: Some(true),
            device: None,
            backend: Some(DEFAULT_BACKEND.to_string()),
            device_tool: Some(DEFAULT_DEVICE_TOOL.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            custom_sound_path: other.custom_sound_path.or(self.custom_sound_path),
            default_sound_path: other.default_sound_path.or(self.default_sound_path),
            volume: other.volume.or(self.volume),
            enable_fallback: other.enable_fallback.or(self.enable_fallback),
            max_file_size_mb: other.max_file_size_mb.or(self.max_file_size_mb),
            allowed_extensions: other.allowed_extensions.or(self.allowed_extensions),
            playback_timeout: other.playback_timeout.or(self.playback_timeout),
            restrict_to_user_home: other.restrict_to_user_home.or(self.restrict_to_user_home),
            device: other.device.or(self.device),
            backend: other.backend.or(self.backend),
            device_tool: other.device_tool.or(self.device_tool),
        }
    }
}
