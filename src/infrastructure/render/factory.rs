//! Render backend factory with automatic detection

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::application::ports::{RenderError, SoundRenderer};
use crate::infrastructure::detect::is_command_available;

use super::chain::ChainRenderer;
use super::command::{CommandPlayer, CommandRenderer};
use super::rodio::RodioRenderer;

/// Available render backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderBackend {
    Rodio,
    Command(CommandPlayer),
}

impl fmt::Display for RenderBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderBackend::Rodio => write!(f, "rodio"),
            RenderBackend::Command(player) => write!(f, "{}", player),
        }
    }
}

/// User preference for render backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendPreference {
    /// Try every available backend in platform order
    #[default]
    Auto,
    Only(RenderBackend),
}

impl fmt::Display for BackendPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendPreference::Auto => write!(f, "auto"),
            BackendPreference::Only(backend) => write!(f, "{}", backend),
        }
    }
}

/// Error type for parsing backend preference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBackendError {
    pub value: String,
}

impl fmt::Display for ParseBackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid audio backend '{}'. Valid options: auto, rodio, afplay, paplay, aplay",
            self.value
        )
    }
}

impl std::error::Error for ParseBackendError {}

impl FromStr for BackendPreference {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(BackendPreference::Auto),
            "rodio" => Ok(BackendPreference::Only(RenderBackend::Rodio)),
            "afplay" => Ok(BackendPreference::Only(RenderBackend::Command(CommandPlayer::Afplay))),
            "paplay" => Ok(BackendPreference::Only(RenderBackend::Command(CommandPlayer::Paplay))),
            "aplay" => Ok(BackendPreference::Only(RenderBackend::Command(CommandPlayer::Aplay))),
            _ => Err(ParseBackendError {
                value: s.to_string(),
            }),
        }
    }
}

/// Backends tried by `auto`, best first
pub fn platform_backends() -> Vec<RenderBackend> {
    if cfg!(target_os = "macos") {
        vec![
            RenderBackend::Command(CommandPlayer::Afplay),
            RenderBackend::Rodio,
        ]
    } else if cfg!(target_os = "linux") {
        vec![
            RenderBackend::Rodio,
            RenderBackend::Command(CommandPlayer::Paplay),
            RenderBackend::Command(CommandPlayer::Aplay),
        ]
    } else {
        vec![RenderBackend::Rodio]
    }
}

async fn is_backend_available(backend: RenderBackend) -> bool {
    match backend {
        RenderBackend::Rodio => true,
        RenderBackend::Command(player) => is_command_available(player.program()).await,
    }
}

fn build(backend: RenderBackend) -> Box<dyn SoundRenderer> {
    match backend {
        RenderBackend::Rodio => Box::new(RodioRenderer::new()),
        RenderBackend::Command(player) => Box::new(CommandRenderer::new(player)),
    }
}

/// Create a renderer for the given preference.
///
/// `Auto` chains every available platform backend; a specific command
/// backend must be installed.
pub async fn create_renderer(
    preference: BackendPreference,
) -> Result<Box<dyn SoundRenderer>, RenderError> {
    match preference {
        BackendPreference::Auto => {
            let mut renderers = Vec::new();
            for backend in platform_backends() {
                if is_backend_available(backend).await {
                    renderers.push(build(backend));
                } else {
                    debug!(%backend, "render backend not available");
                }
            }
            let chain = ChainRenderer::new(renderers);
            if chain.is_empty() {
                return Err(RenderError::NoBackends);
            }
            Ok(Box::new(chain))
        }
        BackendPreference::Only(backend) => {
            if is_backend_available(backend).await {
                Ok(build(backend))
            } else {
                Err(RenderError::Unavailable {
                    backend: backend.to_string(),
                    reason: format!("{} not found in PATH", backend),
                })
            }
        }
    }
}
