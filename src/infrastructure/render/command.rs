//! Command-line player adapters (afplay, paplay, aplay)

use std::fmt;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::{Child, Command};

use crate::application::ports::{CancelFlag, RenderError, SoundRenderer};
use crate::domain::Volume;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Supported command-line players
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandPlayer {
    /// macOS built-in player
    Afplay,
    /// PulseAudio / PipeWire player
    Paplay,
    /// ALSA player (no volume control)
    Aplay,
}

impl CommandPlayer {
    pub const fn program(&self) -> &'static str {
        match self {
            Self::Afplay => "afplay",
            Self::Paplay => "paplay",
            Self::Aplay => "aplay",
        }
    }

    /// Arguments that play `path` at `volume`
    pub fn args(&self, path: &Path, volume: Volume) -> Vec<String> {
        let file = path.to_string_lossy().to_string();
        match self {
            Self::Afplay => vec!["-v".to_string(), format!("{:.2}", volume.level()), file],
            // paplay volume is linear, 65536 = 100%
            Self::Paplay => vec![
                format!("--volume={}", (volume.level() * 65536.0).round() as u32),
                file,
            ],
            Self::Aplay => vec!["-q".to_string(), file],
        }
    }
}

impl fmt::Display for CommandPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Renders by running a command-line player as a child process.
///
/// The child is killed when the cancel flag is raised or the render
/// future is dropped.
pub struct CommandRenderer {
    player: CommandPlayer,
}

impl CommandRenderer {
    pub fn new(player: CommandPlayer) -> Self {
        Self { player }
    }

    fn spawn(&self, path: &Path, volume: Volume) -> Result<Child, RenderError> {
        Command::new(self.player.program())
            .args(self.player.args(path, volume))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RenderError::Unavailable {
                        backend: self.name(),
                        reason: format!("{} not found in PATH", self.player.program()),
                    }
                } else {
                    self.failed(e.to_string())
                }
            })
    }

    fn failed(&self, reason: String) -> RenderError {
        RenderError::Playback {
            backend: self.name(),
            reason,
        }
    }

    fn check_status(&self, status: ExitStatus) -> Result<(), RenderError> {
        if status.success() {
            Ok(())
        } else {
            Err(self.failed(format!(
                "{} exited with status: {}",
                self.player.program(),
                status
            )))
        }
    }
}

#[async_trait]
impl SoundRenderer for CommandRenderer {
    fn name(&self) -> String {
        self.player.to_string()
    }

    async fn render(
        &self,
        path: &Path,
        volume: Volume,
        cancel: CancelFlag,
    ) -> Result<(), RenderError> {
        let mut child = self.spawn(path, volume)?;

        loop {
            tokio::select! {
                status = child.wait() => {
                    let status = status.map_err(|e| self.failed(e.to_string()))?;
                    return self.check_status(status);
                }
                _ = tokio::time::sleep(POLL_INTERVAL) => {
                    if cancel.is_cancelled() {
                        let _ = child.kill().await;
                        return Err(RenderError::Cancelled);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn afplay_args_carry_volume() {
        let args = CommandPlayer::Afplay.args(Path::new("/s/ding.wav"), Volume::new(0.5).unwrap());
        assert_eq!(args, vec!["-v", "0.50", "/s/ding.wav"]);
    }

    #[test]
    fn paplay_volume_is_scaled() {
        let args = CommandPlayer::Paplay.args(Path::new("/s/ding.wav"), Volume::new(0.5).unwrap());
        assert_eq!(args, vec!["--volume=32768", "/s/ding.wav"]);

        let args = CommandPlayer::Paplay.args(Path::new("/s/ding.wav"), Volume::full());
        assert_eq!(args[0], "--volume=65536");
    }

    #[test]
    fn aplay_ignores_volume() {
        let args = CommandPlayer::Aplay.args(Path::new("/s/ding.wav"), Volume::new(0.1).unwrap());
        assert_eq!(args, vec!["-q", "/s/ding.wav"]);
    }

    #[test]
    fn renderer_name_is_program() {
        assert_eq!(CommandRenderer::new(CommandPlayer::Paplay).name(), "paplay");
    }
}
