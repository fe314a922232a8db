//! Bundled default sound installation

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::info;

use crate::domain::sound::ChimeSpec;
use crate::domain::{ServerConfig, StartupError};

use super::home::expand_tilde;

const DEFAULT_SOUND_FILE: &str = "notification.wav";

/// Where the bundled chime lives: `$XDG_DATA_HOME/notify-chime/notification.wav`
pub fn builtin_default_sound_path() -> PathBuf {
    dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .unwrap_or_else(std::env::temp_dir)
        .join("notify-chime")
        .join(DEFAULT_SOUND_FILE)
}

/// Write the chime as a mono 16-bit WAV file, creating parent directories
pub fn write_chime(path: &Path, chime: &ChimeSpec) -> Result<(), StartupError> {
    let failed = |reason: String| StartupError::InstallFailed {
        path: path.display().to_string(),
        reason,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| failed(e.to_string()))?;
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: chime.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).map_err(|e| failed(e.to_string()))?;
    for sample in chime.samples() {
        writer
            .write_sample(sample)
            .map_err(|e| failed(e.to_string()))?;
    }
    writer.finalize().map_err(|e| failed(e.to_string()))?;
    Ok(())
}

/// Expand a leading `~` in a configured default sound path
pub fn expand_default_sound_path(
    mut config: ServerConfig,
    home: Option<&Path>,
) -> Result<ServerConfig, StartupError> {
    config.default_sound_path = expand_tilde(&config.default_sound_path, home).ok_or_else(|| {
        StartupError::MissingDefaultAsset {
            path: config.default_sound_path.display().to_string(),
        }
    })?;
    Ok(config)
}

/// Make sure the default sound exists before serving requests.
///
/// The built-in location is populated on first run; a configured default
/// path must already exist.
pub fn ensure_default_sound(config: &ServerConfig) -> Result<(), StartupError> {
    let path = &config.default_sound_path;

    if config.default_sound_is_builtin && !path.exists() {
        info!(path = %path.display(), "installing bundled notification sound");
        write_chime(path, &ChimeSpec::default())?;
    }

    if path.is_file() {
        Ok(())
    } else {
        Err(StartupError::MissingDefaultAsset {
            path: path.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AppConfig;

    fn config(default_path: Option<&Path>, builtin: PathBuf) -> ServerConfig {
        let app = AppConfig {
            default_sound_path: default_path.map(|p| p.display().to_string()),
            ..AppConfig::defaults()
        };
        ServerConfig::from_app_config(&app, builtin).unwrap()
    }

    #[test]
    fn builtin_path_is_namespaced() {
        let path = builtin_default_sound_path();
        assert!(path.ends_with("notify-chime/notification.wav"));
    }

    #[test]
    fn writes_readable_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chime.wav");
        let chime = ChimeSpec::default();

        write_chime(&path, &chime).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44_100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len() as usize, chime.sample_count());
    }

    #[test]
    fn installs_missing_builtin_sound() {
        let dir = tempfile::tempdir().unwrap();
        let builtin = dir.path().join("notify-chime").join("notification.wav");
        let config = config(None, builtin.clone());

        ensure_default_sound(&config).unwrap();
        assert!(builtin.is_file());

        // Second run leaves the file alone
        let before = std::fs::metadata(&builtin).unwrap().len();
        ensure_default_sound(&config).unwrap();
        assert_eq!(std::fs::metadata(&builtin).unwrap().len(), before);
    }

    #[test]
    fn missing_configured_default_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let configured = dir.path().join("gone.wav");
        let config = config(Some(&configured), dir.path().join("builtin.wav"));

        let err = ensure_default_sound(&config).unwrap_err();
        assert!(matches!(err, StartupError::MissingDefaultAsset { .. }));
        assert!(!configured.exists());
    }

    #[test]
    fn configured_default_under_home_is_expanded() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join("chime.wav"), b"RIFF").unwrap();
        let app = AppConfig {
            default_sound_path: Some("~/chime.wav".to_string()),
            ..AppConfig::defaults()
        };
        let config =
            ServerConfig::from_app_config(&app, home.path().join("builtin.wav")).unwrap();

        let config = expand_default_sound_path(config, Some(home.path())).unwrap();

        assert_eq!(config.default_sound_path, home.path().join("chime.wav"));
        ensure_default_sound(&config).unwrap();
    }

    #[test]
    fn tilde_default_without_home_is_missing() {
        let app = AppConfig {
            default_sound_path: Some("~/chime.wav".to_string()),
            ..AppConfig::defaults()
        };
        let config = ServerConfig::from_app_config(&app, PathBuf::from("/builtin.wav")).unwrap();

        let err = expand_default_sound_path(config, None).unwrap_err();
        assert!(matches!(err, StartupError::MissingDefaultAsset { .. }));
    }
}
