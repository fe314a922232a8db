//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, ServerConfig};
use crate::domain::error::ConfigError;
use crate::domain::{Timeout, Volume};
use crate::infrastructure::config::parse_bool;
use crate::infrastructure::{builtin_default_sound_path, BackendPreference, DeviceToolPreference};

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_config_value(&mut config, key, value)?;

    // The stored layer must still build a valid runtime config
    ServerConfig::from_app_config(
        &AppConfig::defaults().merge(config.clone()),
        builtin_default_sound_path(),
    )?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match config_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &config_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            key,
            format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        ))
    }
}

/// Optional text value; an empty string clears the key
fn text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Validate `value` for `key` and store it in `config`
fn apply_config_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::invalid(key, message);

    match key {
        "custom_sound_path" => config.custom_sound_path = text(value),
        "default_sound_path" => config.default_sound_path = text(value),
        "device" => config.device = text(value),
        "volume" => {
            let volume = value
                .parse::<Volume>()
                .map_err(|e| invalid(e.to_string()))?;
            config.volume = Some(volume.level());
        }
        "enable_fallback" => config.enable_fallback = Some(parse_bool(key, value)?),
        "restrict_to_user_home" => config.restrict_to_user_home = Some(parse_bool(key, value)?),
        "max_file_size_mb" => {
            let mb = value
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid(format!("'{}' is not a whole number of megabytes", value)))?;
            config.max_file_size_mb = Some(mb);
        }
        "allowed_extensions" => {
            config.allowed_extensions = Some(
                value
                    .split(',')
                    .map(|ext| ext.trim().to_string())
                    .filter(|ext| !ext.is_empty())
                    .collect(),
            )
        }
        "playback_timeout" => {
            value
                .parse::<Timeout>()
                .map_err(|e| invalid(e.to_string()))?;
            config.playback_timeout = Some(value.trim().to_string());
        }
        "backend" => {
            let backend = value
                .parse::<BackendPreference>()
                .map_err(|e| invalid(e.to_string()))?;
            config.backend = Some(backend.to_string());
        }
        "device_tool" => {
            value
                .parse::<DeviceToolPreference>()
                .map_err(|e| invalid(e.to_string()))?;
            config.device_tool = Some(value.trim().to_lowercase());
        }
        _ => return Err(invalid("Unknown key".to_string())),
    }
    Ok(())
}

/// Display form of a stored value
fn config_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "custom_sound_path" => config.custom_sound_path.clone(),
        "default_sound_path" => config.default_sound_path.clone(),
        "volume" => config.volume.map(|v| v.to_string()),
        "enable_fallback" => config.enable_fallback.map(|b| b.to_string()),
        "max_file_size_mb" => config.max_file_size_mb.map(|mb| mb.to_string()),
        "allowed_extensions" => config.allowed_extensions.as_ref().map(|exts| exts.join(",")),
        "playback_timeout" => config.playback_timeout.clone(),
        "restrict_to_user_home" => config.restrict_to_user_home.map(|b| b.to_string()),
        "device" => config.device.clone(),
        "backend" => config.backend.clone(),
        "device_tool" => config.device_tool.clone(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied(key: &str, value: &str) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::empty();
        apply_config_value(&mut config, key, value).map(|_| config)
    }

    #[test]
    fn every_key_round_trips_through_get() {
        let samples = [
            ("custom_sound_path", "~/ding.wav"),
            ("default_sound_path", "/opt/chime.wav"),
            ("volume", "0.5"),
            ("enable_fallback", "false"),
            ("max_file_size_mb", "5"),
            ("allowed_extensions", "wav,ogg"),
            ("playback_timeout", "10s"),
            ("restrict_to_user_home", "true"),
            ("device", "Headphones"),
            ("backend", "rodio"),
            ("device_tool", "pactl"),
        ];
        assert_eq!(samples.len(), VALID_CONFIG_KEYS.len());

        for (key, value) in samples {
            let config = applied(key, value).unwrap();
            assert_eq!(config_value(&config, key).as_deref(), Some(value), "{key}");
        }
    }

    #[test]
    fn empty_text_clears_value() {
        let mut config = AppConfig {
            device: Some("Headphones".to_string()),
            ..Default::default()
        };
        apply_config_value(&mut config, "device", "").unwrap();
        assert!(config.device.is_none());
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(applied("volume", "2.0").is_err());
        assert!(applied("enable_fallback", "maybe").is_err());
        assert!(applied("max_file_size_mb", "ten").is_err());
        assert!(applied("playback_timeout", "forever").is_err());
        assert!(applied("backend", "vlc").is_err());
        assert!(applied("device_tool", "alsamixer").is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = check_key("api_key").unwrap_err();
        assert!(err.to_string().contains("Unknown key"));
    }
}
