//! Renderer that tries several backends in order

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::ports::{CancelFlag, RenderError, SoundRenderer};
use crate::domain::Volume;

/// Tries each backend until one plays the file.
///
/// Cancellation stops the chain immediately.
pub struct ChainRenderer {
    renderers: Vec<Box<dyn SoundRenderer>>,
}

impl ChainRenderer {
    pub fn new(renderers: Vec<Box<dyn SoundRenderer>>) -> Self {
        Self { renderers }
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

#[async_trait]
impl SoundRenderer for ChainRenderer {
    fn name(&self) -> String {
        self.renderers
            .iter()
            .map(|r| r.name())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    async fn render(
        &self,
        path: &Path,
        volume: Volume,
        cancel: CancelFlag,
    ) -> Result<(), RenderError> {
        let mut last_error = RenderError::NoBackends;

        for renderer in &self.renderers {
            if cancel.is_cancelled() {
                return Err(RenderError::Cancelled);
            }
            match renderer.render(path, volume, cancel.clone()).await {
                Ok(()) => {
                    debug!(backend = %renderer.name(), "rendered");
                    return Ok(());
                }
                Err(RenderError::Cancelled) => return Err(RenderError::Cancelled),
                Err(e) => {
                    warn!(backend = %renderer.name(), error = %e, "backend failed, trying next");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}
