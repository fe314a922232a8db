//! Device-scoped player
//!
//! Runs "switch device → render → restore device" as one guarded sequence.
//! Device handling is best effort: every device error becomes a warning on
//! the outcome, and only the render decides success.

use std::future::Future;
use std::path::Path;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{PlaybackErrorKind, PlaybackOutcome, Resolution, SoundOrigin, Volume};

use super::ports::{AudioDeviceControl, CancelFlag, DeviceError, SoundRenderer};

/// Upper bound for a single device query or switch
pub const DEVICE_OP_LIMIT: Duration = Duration::from_secs(2);

/// Device state captured before rendering
#[derive(Debug, Default)]
struct Redirect {
    /// Device the sound is rendered on, when known
    device_used: Option<String>,
    /// Device to switch back to afterwards
    restore_to: Option<String>,
}

/// Renders resolved sounds with optional output-device redirection
pub struct DeviceScopedPlayer<R, D>
where
    R: SoundRenderer,
    D: AudioDeviceControl,
{
    renderer: R,
    devices: D,
    device_limit: Duration,
    /// Held for switch + render + restore
    sequence: Mutex<()>,
}

impl<R, D> DeviceScopedPlayer<R, D>
where
    R: SoundRenderer,
    D: AudioDeviceControl,
{
    pub fn new(renderer: R, devices: D) -> Self {
        Self {
            renderer,
            devices,
            device_limit: DEVICE_OP_LIMIT,
            sequence: Mutex::new(()),
        }
    }

    /// Override the per-operation limit for device calls
    pub fn with_device_limit(mut self, limit: Duration) -> Self {
        self.device_limit = limit;
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn devices(&self) -> &D {
        &self.devices
    }

    /// Names of the available output devices, bounded by the device limit
    pub async fn list_devices(&self) -> Result<Vec<String>, DeviceError> {
        bounded("list_devices", self.device_limit, self.devices.list_devices()).await
    }

    /// Active output device, bounded by the device limit
    pub async fn current_device(&self) -> Result<String, DeviceError> {
        bounded("current_device", self.device_limit, self.devices.current_device()).await
    }

    /// Play `resolution` on `device` (or the active device).
    ///
    /// Switching and rendering share the `timeout` budget, counted from the
    /// moment the sequence lock is held. When a custom sound fails to render
    /// and `retry_with` names the default sound, the default is rendered once
    /// in the remaining budget on the same device. Restore runs exactly once
    /// afterwards, bounded by the device limit.
    pub async fn play_scoped(
        &self,
        resolution: &Resolution,
        retry_with: Option<&Path>,
        device: Option<&str>,
        volume: Volume,
        timeout: Duration,
    ) -> PlaybackOutcome {
        let started = Instant::now();
        let _sequence = self.sequence.lock().await;
        let deadline = Instant::now() + timeout;
        let mut warnings = Vec::new();

        let redirect = self.redirect(device, deadline, &mut warnings).await;

        let mut played = resolution.clone();
        let mut rendered = self
            .render_bounded(&played.sound.path, volume, remaining(deadline))
            .await;

        let retry = match (&rendered, retry_with) {
            (Err((PlaybackErrorKind::RenderFailure, reason)), Some(default))
                if played.sound.origin == SoundOrigin::Custom =>
            {
                Some((default, reason.clone()))
            }
            _ => None,
        };
        if let Some((default, reason)) = retry {
            let left = remaining(deadline);
            if !left.is_zero() {
                warn!(%reason, ?left, "custom sound failed, retrying with default sound");
                played = Resolution::fallback(
                    default,
                    format!("custom sound failed to play ({})", reason),
                );
                rendered = self.render_bounded(default, volume, left).await;
            }
        }

        if let Some(previous) = redirect.restore_to.as_deref() {
            self.restore(previous, &mut warnings).await;
        }

        let (error_kind, reason) = match rendered {
            Ok(()) => (None, played.rejection.clone()),
            Err((kind, reason)) => {
                let reason = match &played.rejection {
                    Some(rejection) => format!("{}; {}", rejection, reason),
                    None => reason,
                };
                (Some(kind), Some(reason))
            }
        };

        PlaybackOutcome {
            success: error_kind.is_none(),
            origin_used: played.sound.origin,
            sound_path: Some(played.sound.path.clone()),
            device_used: redirect.device_used,
            fallback_occurred: played.fallback_occurred,
            error_kind,
            detail: None,
            warnings,
            duration_ms: elapsed_ms(started),
        }
        .with_detail(reason)
    }

    /// Per-call device limit, never past the sequence deadline
    fn device_budget(&self, deadline: Instant) -> Duration {
        self.device_limit.min(remaining(deadline))
    }

    async fn redirect(
        &self,
        device: Option<&str>,
        deadline: Instant,
        warnings: &mut Vec<String>,
    ) -> Redirect {
        let Some(target) = device.map(str::trim).filter(|d| !d.is_empty()) else {
            return Redirect::default();
        };

        let current = match bounded(
            "current_device",
            self.device_budget(deadline),
            self.devices.current_device(),
        )
        .await
        {
            Ok(current) => Some(current),
            Err(e) if e.is_unavailable() => {
                warn!(error = %e, "device control unavailable, playing on current output");
                warnings.push(format!(
                    "{}: {}; playing on the current output device",
                    PlaybackErrorKind::NoDeviceCapability,
                    e
                ));
                return Redirect::default();
            }
            Err(e) => {
                warn!(error = %e, "could not query current output device");
                None
            }
        };

        if current.as_deref() == Some(target) {
            debug!(device = target, "requested device already active");
            return Redirect {
                device_used: current,
                restore_to: None,
            };
        }

        match bounded(
            "set_device",
            self.device_budget(deadline),
            self.devices.set_device(target),
        )
        .await
        {
            Ok(()) => {
                info!(device = target, previous = ?current, "switched output device");
                if current.is_none() {
                    warnings.push(format!(
                        "previous output device unknown; '{}' stays active after playback",
                        target
                    ));
                }
                Redirect {
                    device_used: Some(target.to_string()),
                    restore_to: current,
                }
            }
            Err(e) => {
                warn!(device = target, error = %e, "device switch failed, playing on current output");
                warnings.push(format!(
                    "could not switch to '{}' ({}); played on the current output device",
                    target, e
                ));
                Redirect {
                    device_used: current,
                    restore_to: None,
                }
            }
        }
    }

    async fn render_bounded(
        &self,
        path: &Path,
        volume: Volume,
        timeout: Duration,
    ) -> Result<(), (PlaybackErrorKind, String)> {
        let cancel = CancelFlag::new();
        debug!(path = %path.display(), volume = volume.level(), ?timeout, "rendering");

        match tokio::time::timeout(timeout, self.renderer.render(path, volume, cancel.clone()))
            .await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                warn!(error = %e, "render failed");
                Err((PlaybackErrorKind::RenderFailure, e.to_string()))
            }
            Err(_) => {
                cancel.cancel();
                warn!(?timeout, "render timed out, abandoning playback");
                Err((
                    PlaybackErrorKind::PlaybackTimeout,
                    format!(
                        "playback timed out after {:.1}s",
                        timeout.as_secs_f64()
                    ),
                ))
            }
        }
    }

    async fn restore(&self, previous: &str, warnings: &mut Vec<String>) {
        match bounded(
            "set_device",
            self.device_limit,
            self.devices.set_device(previous),
        )
        .await
        {
            Ok(()) => info!(device = previous, "restored output device"),
            Err(e) => {
                warn!(device = previous, error = %e, "failed to restore output device");
                warnings.push(format!(
                    "failed to restore output device '{}' ({})",
                    previous, e
                ));
            }
        }
    }
}

/// Run a device call, turning an expired limit into `DeviceError::TimedOut`
async fn bounded<T>(
    operation: &'static str,
    limit: Duration,
    call: impl Future<Output = Result<T, DeviceError>>,
) -> Result<T, DeviceError> {
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or(Err(DeviceError::TimedOut {
            operation,
            after: limit,
        }))
}

fn remaining(deadline: Instant) -> Duration {
    deadline.saturating_duration_since(Instant::now())
}

/// Milliseconds since `started`, saturating
pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
