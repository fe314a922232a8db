//! Render capability port
//!
//! Plays one sound file on the active output device. The caller bounds the
//! call with a timeout and raises the cancel flag when it expires.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Volume;

/// Errors that can occur while rendering a sound
#[derive(Error, Debug, Clone)]
pub enum RenderError {
    /// The backend cannot run on this system (binary missing, no output stream)
    #[error("{backend} unavailable: {reason}")]
    Unavailable { backend: String, reason: String },

    /// The file could not be opened or decoded
    #[error("{backend} could not decode sound: {reason}")]
    Decode { backend: String, reason: String },

    /// Playback started but failed
    #[error("{backend} playback failed: {reason}")]
    Playback { backend: String, reason: String },

    /// Playback was stopped through the cancel flag
    #[error("playback cancelled")]
    Cancelled,

    /// No backend is configured
    #[error("no audio backends available")]
    NoBackends,
}

/// Shared flag used to abandon a render in progress
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Port trait for sound rendering
#[async_trait]
pub trait SoundRenderer: Send + Sync {
    /// Backend name for logs and status
    fn name(&self) -> String;

    /// Render `path` at `volume`, returning once playback has finished.
    async fn render(&self, path: &Path, volume: Volume, cancel: CancelFlag)
        -> Result<(), RenderError>;
}

/// Blanket implementation for boxed renderer types
#[async_trait]
impl SoundRenderer for Box<dyn SoundRenderer> {
    fn name(&self) -> String {
        self.as_ref().name()
    }

    async fn render(
        &self,
        path: &Path,
        volume: Volume,
        cancel: CancelFlag,
    ) -> Result<(), RenderError> {
        self.as_ref().render(path, volume, cancel).await
    }
}
