//! Rodio-based sound renderer
//!
//! Decodes the file and plays it on the default output stream.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};

use crate::application::ports::{CancelFlag, RenderError, SoundRenderer};
use crate::domain::Volume;

const BACKEND: &str = "rodio";

/// How often the playback thread checks for completion or cancellation
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Renderer implementation using rodio
pub struct RodioRenderer;

impl RodioRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SoundRenderer for RodioRenderer {
    fn name(&self) -> String {
        BACKEND.to_string()
    }

    async fn render(
        &self,
        path: &Path,
        volume: Volume,
        cancel: CancelFlag,
    ) -> Result<(), RenderError> {
        let path = path.to_path_buf();
        let level = volume.level();

        // Run audio playback in blocking thread to avoid blocking the async runtime
        tokio::task::spawn_blocking(move || render_sync(path, level, cancel))
            .await
            .map_err(|e| playback(format!("Task join error: {}", e)))?
    }
}

/// Play a file synchronously (called from spawn_blocking)
fn render_sync(path: PathBuf, volume: f32, cancel: CancelFlag) -> Result<(), RenderError> {
    let file = File::open(&path).map_err(|e| decode(format!("{}: {}", path.display(), e)))?;
    let source = Decoder::new(BufReader::new(file)).map_err(|e| decode(e.to_string()))?;

    let (_stream, stream_handle) = OutputStream::try_default().map_err(|e| {
        RenderError::Unavailable {
            backend: BACKEND.to_string(),
            reason: e.to_string(),
        }
    })?;
    let sink = Sink::try_new(&stream_handle).map_err(|e| playback(e.to_string()))?;

    sink.set_volume(volume);
    sink.append(source);

    while !sink.empty() {
        if cancel.is_cancelled() {
            sink.stop();
            return Err(RenderError::Cancelled);
        }
        std::thread::sleep(POLL_INTERVAL);
    }

    Ok(())
}

fn decode(reason: String) -> RenderError {
    RenderError::Decode {
        backend: BACKEND.to_string(),
        reason,
    }
}

fn playback(reason: String) -> RenderError {
    RenderError::Playback {
        backend: BACKEND.to_string(),
        reason,
    }
}
