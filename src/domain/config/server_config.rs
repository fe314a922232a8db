//! Immutable runtime settings built once at startup

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Serialize, Serializer};

use super::app_config::AppConfig;
use super::timeout::Timeout;
use crate::domain::error::ConfigError;
use crate::domain::sound::Volume;

/// Default maximum custom sound size (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 10;

/// Audio file extensions accepted for custom sounds
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "flac", "aiff", "m4a"];

/// Render backend preferences
pub const VALID_BACKENDS: &[&str] = &["auto", "rodio", "afplay", "paplay", "aplay"];
pub const DEFAULT_BACKEND: &str = "auto";

/// Device control preferences
pub const VALID_DEVICE_TOOLS: &[&str] = &["auto", "pactl", "switch-audio-source", "cpal", "none"];
pub const DEFAULT_DEVICE_TOOL: &str = "auto";

const MIB: u64 = 1024 * 1024;

/// Settings shared read-only by the resolver and the player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerConfig {
    pub custom_sound_path: Option<PathBuf>,
    pub default_sound_path: PathBuf,
    /// True when `default_sound_path` is the bundled chime location
    pub default_sound_is_builtin: bool,
    pub volume: Volume,
    pub enable_fallback: bool,
    pub max_file_size_bytes: u64,
    pub allowed_extensions: BTreeSet<String>,
    #[serde(serialize_with = "serialize_timeout")]
    pub playback_timeout: Timeout,
    pub restrict_to_user_home: bool,
    /// Output device used when a request names none
    pub device: Option<String>,
    pub backend: String,
    pub device_tool: String,
}

impl ServerConfig {
    /// Build settings from a merged config layer.
    ///
    /// `builtin_default` is where the bundled chime lives when no
    /// `default_sound_path` is configured.
    pub fn from_app_config(
        config: &AppConfig,
        builtin_default: PathBuf,
    ) -> Result<Self, ConfigError> {
        let defaults = AppConfig::defaults();

        let volume_level = config.volume.or(defaults.volume).unwrap_or_default();
        let volume = Volume::new(volume_level)
            .map_err(|e| ConfigError::invalid("volume", e.to_string()))?;

        let timeout = match config.playback_timeout.as_deref() {
            Some(s) => s
                .parse::<Timeout>()
                .map_err(|e| ConfigError::invalid("playback_timeout", e.to_string()))?,
            None => Timeout::default_timeout(),
        };

        let max_file_size_mb = config.max_file_size_mb.unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);
        if max_file_size_mb == 0 {
            return Err(ConfigError::invalid(
                "max_file_size_mb",
                "must be at least 1",
            ));
        }

        let allowed_extensions = normalize_extensions(
            config
                .allowed_extensions
                .as_deref()
                .or(defaults.allowed_extensions.as_deref())
                .unwrap_or_default(),
        );
        if allowed_extensions.is_empty() {
            return Err(ConfigError::invalid(
                "allowed_extensions",
                "at least one extension is required",
            ));
        }

        let backend = validated_choice("backend", config.backend.as_deref(), VALID_BACKENDS)?
            .unwrap_or_else(|| DEFAULT_BACKEND.to_string());
        let device_tool =
            validated_choice("device_tool", config.device_tool.as_deref(), VALID_DEVICE_TOOLS)?
                .unwrap_or_else(|| DEFAULT_DEVICE_TOOL.to_string());

        let configured_default = non_blank(config.default_sound_path.as_deref()).map(PathBuf::from);
        let default_sound_is_builtin = configured_default.is_none();

        Ok(Self {
            custom_sound_path: non_blank(config.custom_sound_path.as_deref()).map(PathBuf::from),
            default_sound_path: configured_default.unwrap_or(builtin_default),
            default_sound_is_builtin,
            volume,
            enable_fallback: config.enable_fallback.unwrap_or(true),
            max_file_size_bytes: max_file_size_mb.saturating_mul(MIB),
            allowed_extensions,
            playback_timeout: timeout,
            restrict_to_user_home: config.restrict_to_user_home.unwrap_or(true),
            device: non_blank(config.device.as_deref()).map(str::to_string),
            backend,
            device_tool,
        })
    }

    /// Whether a file extension (with or without dot) is allowed
    pub fn allows_extension(&self, extension: &str) -> bool {
        let ext = extension.trim_start_matches('.').to_lowercase();
        self.allowed_extensions.contains(&ext)
    }
}

/// Lowercase, strip leading dots, drop blanks
pub fn normalize_extensions<S: AsRef<str>>(extensions: &[S]) -> BTreeSet<String> {
    extensions
        .iter()
        .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn validated_choice(
    key: &str,
    value: Option<&str>,
    valid: &[&str],
) -> Result<Option<String>, ConfigError> {
    match value {
        None => Ok(None),
        Some(v) => {
            let lower = v.trim().to_lowercase();
            if valid.contains(&lower.as_str()) {
                Ok(Some(lower))
            } else {
                Err(ConfigError::invalid(
                    key,
                    format!("Invalid value '{}'. Valid options: {}", v, valid.join(", ")),
                ))
            }
        }
    }
}

fn serialize_timeout<S: Serializer>(timeout: &Timeout, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(timeout)
}
