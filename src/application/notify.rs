//! Notification use case
//!
//! Ties the resolver and the device-scoped player together, applies the
//! per-call overrides and keeps the last outcome for status queries.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::{
    PlaybackErrorKind, PlaybackOutcome, PlaybackRequest, Resolution, ServerConfig, SoundOrigin,
    SoundSource,
};

use super::player::{elapsed_ms, DeviceScopedPlayer};
use super::ports::{AudioDeviceControl, SoundRenderer, SoundValidator};
use super::resolver::{ResolveError, SoundResolver};

/// Output devices as reported by the device capability
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceListing {
    pub current: Option<String>,
    pub devices: Vec<String>,
    /// Set when enumeration or the current-device query failed
    pub warning: Option<String>,
}

/// Snapshot returned by the status query
#[derive(Debug, Clone, Serialize)]
pub struct AudioStatus {
    pub renderer: String,
    pub device_control: String,
    pub current_device: Option<String>,
    pub available_devices: Vec<String>,
    pub device_warning: Option<String>,
    pub config: ServerConfig,
    pub last_outcome: Option<PlaybackOutcome>,
}

/// Plays notification sounds for requests
pub struct NotificationService<R, D, V>
where
    R: SoundRenderer,
    D: AudioDeviceControl,
    V: SoundValidator,
{
    config: Arc<ServerConfig>,
    resolver: SoundResolver<V>,
    player: DeviceScopedPlayer<R, D>,
    last_outcome: Mutex<Option<PlaybackOutcome>>,
}

impl<R, D, V> NotificationService<R, D, V>
where
    R: SoundRenderer,
    D: AudioDeviceControl,
    V: SoundValidator,
{
    pub fn new(config: Arc<ServerConfig>, renderer: R, devices: D, validator: V) -> Self {
        Self {
            config,
            resolver: SoundResolver::new(validator),
            player: DeviceScopedPlayer::new(renderer, devices),
            last_outcome: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Play the notification sound for `request`.
    ///
    /// Never fails: every problem is reported through the outcome.
    pub async fn play(&self, request: &PlaybackRequest) -> PlaybackOutcome {
        let started = Instant::now();
        if let Some(message) = request.message.as_deref() {
            info!(text = message, "notification received");
        }

        let outcome = match self.resolver.resolve(request, &self.config) {
            Ok(resolution) => self.play_resolved(request, resolution, started).await,
            Err(ResolveError::InvalidCustomSound(reason)) => PlaybackOutcome::rejected(
                PlaybackErrorKind::InvalidCustomSound,
                reason.to_string(),
                elapsed_ms(started),
            ),
        };

        info!(
            success = outcome.success,
            origin = %outcome.origin_used,
            fallback = outcome.fallback_occurred,
            duration_ms = outcome.duration_ms,
            "notification finished"
        );
        *self.last_outcome.lock().await = Some(outcome.clone());
        outcome
    }

    /// Play the default sound, or the custom sound when `use_custom` is set
    pub async fn test_playback(&self, use_custom: bool) -> PlaybackOutcome {
        let source = if use_custom {
            SoundSource::Custom
        } else {
            SoundSource::Default
        };
        self.play(&PlaybackRequest::new(source).with_message("Audio test"))
            .await
    }

    async fn play_resolved(
        &self,
        request: &PlaybackRequest,
        resolution: Resolution,
        started: Instant,
    ) -> PlaybackOutcome {
        let volume = request.volume.unwrap_or(self.config.volume);
        let device = request
            .device_name()
            .or(self.config.device.as_deref());
        let retry_with = (resolution.sound.origin == SoundOrigin::Custom
            && self.config.enable_fallback)
            .then(|| self.config.default_sound_path.as_path());

        let outcome = self
            .player
            .play_scoped(
                &resolution,
                retry_with,
                device,
                volume,
                self.config.playback_timeout.as_std(),
            )
            .await;

        PlaybackOutcome {
            duration_ms: elapsed_ms(started),
            ..outcome
        }
    }

    /// Last outcome, configuration and devices
    pub async fn status(&self) -> AudioStatus {
        let listing = self.devices().await;
        AudioStatus {
            renderer: self.player.renderer().name(),
            device_control: self.player.devices().name(),
            current_device: listing.current,
            available_devices: listing.devices,
            device_warning: listing.warning,
            config: (*self.config).clone(),
            last_outcome: self.last_outcome.lock().await.clone(),
        }
    }

    /// Available output devices and the active one, queried fresh
    pub async fn devices(&self) -> DeviceListing {
        let mut problems = Vec::new();

        let devices = self.player.list_devices().await.unwrap_or_else(|e| {
            problems.push(e.to_string());
            Vec::new()
        });
        let current = match self.player.current_device().await {
            Ok(current) => Some(current),
            Err(e) => {
                problems.push(e.to_string());
                None
            }
        };

        problems.dedup();
        DeviceListing {
            current,
            devices,
            warning: (!problems.is_empty()).then(|| problems.join("; ")),
        }
    }
}
