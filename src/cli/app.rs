//! Application runners: configuration loading, wiring and one-shot commands

use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::application::ports::{
    AudioDeviceControl, ConfigStore, RenderError, SoundRenderer,
};
use crate::application::NotificationService;
use crate::domain::config::{AppConfig, ServerConfig};
use crate::domain::error::{ConfigError, StartupError};
use crate::domain::PlaybackRequest;
use crate::infrastructure::{
    builtin_default_sound_path, create_device_control, create_renderer, ensure_default_sound,
    expand_default_sound_path, BackendPreference, DeviceToolPreference, EnvConfigSource,
    FsSoundValidator, XdgConfigStore,
};

use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Notification service wired with the runtime adapters
pub type AppService =
    NotificationService<Box<dyn SoundRenderer>, Box<dyn AudioDeviceControl>, FsSoundValidator>;

/// Errors that stop the process before any notification is played
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Startup(#[from] StartupError),

    #[error("No usable audio backend: {0}")]
    Renderer(#[from] RenderError),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => EXIT_USAGE_ERROR,
            AppError::Startup(_) | AppError::Renderer(_) => EXIT_ERROR,
        }
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> Result<AppConfig, ConfigError> {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|e| {
        warn!(path = %store.path().display(), error = %e, "ignoring unreadable config file");
        AppConfig::empty()
    });

    let env_config = EnvConfigSource::from_env().load()?;

    // Merge: defaults < file < env < cli
    Ok(AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config))
}

/// Build the immutable runtime configuration
pub async fn load_server_config(cli_config: AppConfig) -> Result<ServerConfig, AppError> {
    let merged = load_merged_config(cli_config).await?;
    let config = ServerConfig::from_app_config(&merged, builtin_default_sound_path())?;
    let config = expand_default_sound_path(config, dirs::home_dir().as_deref())?;
    ensure_default_sound(&config)?;
    Ok(config)
}

/// Wire the notification service from configuration
pub async fn build_service(cli_config: AppConfig) -> Result<AppService, AppError> {
    let config = load_server_config(cli_config).await?;

    let backend = config
        .backend
        .parse::<BackendPreference>()
        .map_err(|e| ConfigError::invalid("backend", e.to_string()))?;
    let device_tool = config
        .device_tool
        .parse::<DeviceToolPreference>()
        .map_err(|e| ConfigError::invalid("device_tool", e.to_string()))?;

    let renderer = create_renderer(backend).await?;
    let (devices, tool) = create_device_control(device_tool).await;
    info!(renderer = %renderer.name(), device_tool = %tool, "audio adapters ready");

    Ok(NotificationService::new(
        Arc::new(config),
        renderer,
        devices,
        FsSoundValidator::new(),
    ))
}

async fn service_or_exit(cli_config: AppConfig, presenter: &Presenter) -> Result<AppService, ExitCode> {
    build_service(cli_config).await.map_err(|e| {
        presenter.error(&e.to_string());
        ExitCode::from(e.exit_code())
    })
}

fn outcome_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Play one notification
pub async fn run_play(cli_config: AppConfig, request: PlaybackRequest) -> ExitCode {
    let mut presenter = Presenter::new();
    let service = match service_or_exit(cli_config, &presenter).await {
        Ok(service) => service,
        Err(code) => return code,
    };

    presenter.start_spinner("Playing notification...");
    let outcome = service.play(&request).await;
    presenter.outcome(&outcome);

    outcome_exit_code(outcome.success)
}

/// Play the default or custom sound as a test
pub async fn run_test(cli_config: AppConfig, use_custom: bool) -> ExitCode {
    let mut presenter = Presenter::new();
    let service = match service_or_exit(cli_config, &presenter).await {
        Ok(service) => service,
        Err(code) => return code,
    };

    let which = if use_custom { "custom" } else { "default" };
    presenter.start_spinner(&format!("Testing {} sound...", which));
    let outcome = service.test_playback(use_custom).await;
    presenter.outcome(&outcome);

    outcome_exit_code(outcome.success)
}

/// Print audio status
pub async fn run_status(cli_config: AppConfig, json: bool) -> ExitCode {
    let presenter = Presenter::new();
    let service = match service_or_exit(cli_config, &presenter).await {
        Ok(service) => service,
        Err(code) => return code,
    };

    let status = service.status().await;
    if json {
        match serde_json::to_string_pretty(&status) {
            Ok(text) => presenter.output(&text),
            Err(e) => {
                presenter.error(&format!("Failed to encode status: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        presenter.status(&status);
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// List output devices
pub async fn run_devices(cli_config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();
    let service = match service_or_exit(cli_config, &presenter).await {
        Ok(service) => service,
        Err(code) => return code,
    };

    let listing = service.devices().await;
    presenter.devices(&listing);

    if listing.devices.is_empty() && listing.current.is_none() {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_usage_errors() {
        let err = AppError::from(ConfigError::invalid("volume", "too loud"));
        assert_eq!(err.exit_code(), EXIT_USAGE_ERROR);

        let err = AppError::from(StartupError::MissingDefaultAsset {
            path: "/x.wav".to_string(),
        });
        assert_eq!(err.exit_code(), EXIT_ERROR);
        assert_eq!(AppError::from(RenderError::NoBackends).exit_code(), EXIT_ERROR);
    }
}
