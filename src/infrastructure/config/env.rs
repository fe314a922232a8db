//! Environment variable config source

use std::env;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

pub const CUSTOM_SOUND_PATH: &str = "CUSTOM_SOUND_PATH";
pub const DEFAULT_SOUND_PATH: &str = "DEFAULT_SOUND_PATH";
pub const VOLUME_LEVEL: &str = "VOLUME_LEVEL";
pub const ENABLE_FALLBACK: &str = "ENABLE_FALLBACK";
pub const MAX_FILE_SIZE_MB: &str = "MAX_FILE_SIZE_MB";
pub const ALLOWED_EXTENSIONS: &str = "ALLOWED_EXTENSIONS";
pub const PLAYBACK_TIMEOUT_SECONDS: &str = "PLAYBACK_TIMEOUT_SECONDS";
pub const RESTRICT_TO_USER_HOME: &str = "RESTRICT_TO_USER_HOME";
pub const AUDIO_DEVICE: &str = "AUDIO_DEVICE";
pub const AUDIO_BACKEND: &str = "AUDIO_BACKEND";
pub const AUDIO_DEVICE_TOOL: &str = "AUDIO_DEVICE_TOOL";

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads the environment layer of the configuration
pub struct EnvConfigSource {
    lookup: Lookup,
}

impl EnvConfigSource {
    /// Source backed by the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Source backed by an arbitrary lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            lookup: Box::new(lookup),
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        self.get(key).map(|v| parse_bool(key, &v)).transpose()
    }

    /// Build the environment layer; unset or blank variables stay `None`
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let volume = self
            .get(VOLUME_LEVEL)
            .map(|v| {
                v.parse::<f32>().map_err(|_| {
                    ConfigError::invalid(VOLUME_LEVEL, format!("'{}' is not a number", v))
                })
            })
            .transpose()?;

        let max_file_size_mb = self
            .get(MAX_FILE_SIZE_MB)
            .map(|v| {
                v.parse::<u64>().map_err(|_| {
                    ConfigError::invalid(
                        MAX_FILE_SIZE_MB,
                        format!("'{}' is not a whole number of megabytes", v),
                    )
                })
            })
            .transpose()?;

        let allowed_extensions = self.get(ALLOWED_EXTENSIONS).map(|v| {
            v.split(',')
                .map(|ext| ext.trim().to_string())
                .filter(|ext| !ext.is_empty())
                .collect()
        });

        Ok(AppConfig {
            custom_sound_path: self.get(CUSTOM_SOUND_PATH),
            default_sound_path: self.get(DEFAULT_SOUND_PATH),
            volume,
            enable_fallback: self.get_bool(ENABLE_FALLBACK)?,
            max_file_size_mb,
            allowed_extensions,
            playback_timeout: self.get(PLAYBACK_TIMEOUT_SECONDS),
            restrict_to_user_home: self.get_bool(RESTRICT_TO_USER_HOME)?,
            device: self.get(AUDIO_DEVICE),
            backend: self.get(AUDIO_BACKEND),
            device_tool: self.get(AUDIO_DEVICE_TOOL),
        })
    }
}

/// Parse a boolean config value (true/false, 1/0, yes/no, on/off)
pub fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(
            key,
            format!("'{}' is not a boolean (use true or false)", value),
        )),
    }
}
