//! Notification scenarios through the public library API

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use notify_chime::application::ports::{
    AudioDeviceControl, CancelFlag, DeviceError, RenderError, SoundRenderer,
};
use notify_chime::application::NotificationService;
use notify_chime::domain::{
    AppConfig, PlaybackErrorKind, PlaybackRequest, ServerConfig, SoundOrigin, SoundSource,
};
use notify_chime::infrastructure::FsSoundValidator;

/// Renderer that records what it played
#[derive(Clone, Default)]
struct RecordingRenderer {
    played: Arc<Mutex<Vec<PathBuf>>>,
    hang: bool,
}

#[async_trait]
impl SoundRenderer for RecordingRenderer {
    fn name(&self) -> String {
        "recording".to_string()
    }

    async fn render(
        &self,
        path: &Path,
        _volume: notify_chime::domain::Volume,
        cancel: CancelFlag,
    ) -> Result<(), RenderError> {
        self.played.lock().unwrap().push(path.to_path_buf());
        if self.hang {
            while !cancel.is_cancelled() {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            }
            return Err(RenderError::Cancelled);
        }
        Ok(())
    }
}

/// Device control over an in-memory device list
#[derive(Clone)]
struct MemoryDevices {
    active: Arc<Mutex<String>>,
    available: Vec<String>,
    switches: Arc<Mutex<Vec<String>>>,
}

impl MemoryDevices {
    fn new(active: &str, available: &[&str]) -> Self {
        Self {
            active: Arc::new(Mutex::new(active.to_string())),
            available: available.iter().map(|d| d.to_string()).collect(),
            switches: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl AudioDeviceControl for MemoryDevices {
    fn name(&self) -> String {
        "memory".to_string()
    }

    async fn list_devices(&self) -> Result<Vec<String>, DeviceError> {
        Ok(self.available.clone())
    }

    async fn current_device(&self) -> Result<String, DeviceError> {
        Ok(self.active.lock().unwrap().clone())
    }

    async fn set_device(&self, name: &str) -> Result<(), DeviceError> {
        if !self.available.iter().any(|d| d == name) {
            return Err(DeviceError::NotFound(name.to_string()));
        }
        self.switches.lock().unwrap().push(name.to_string());
        *self.active.lock().unwrap() = name.to_string();
        Ok(())
    }
}

struct Fixture {
    home: TempDir,
    default_sound: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let default_sound = home.path().join("notification.wav");
        std::fs::write(&default_sound, b"RIFF").unwrap();
        Self {
            home,
            default_sound,
        }
    }

    fn sound(&self, name: &str, bytes: usize) -> PathBuf {
        let path = self.home.path().join(name);
        std::fs::write(&path, vec![0u8; bytes]).unwrap();
        path
    }

    fn service(
        &self,
        layer: AppConfig,
        renderer: RecordingRenderer,
        devices: MemoryDevices,
    ) -> NotificationService<RecordingRenderer, MemoryDevices, FsSoundValidator> {
        let config = ServerConfig::from_app_config(
            &AppConfig::defaults().merge(layer),
            self.default_sound.clone(),
        )
        .unwrap();
        NotificationService::new(
            Arc::new(config),
            renderer,
            devices,
            FsSoundValidator::with_home(self.home.path()),
        )
    }
}

#[tokio::test]
async fn auto_prefers_a_valid_custom_sound() {
    let fixture = Fixture::new();
    let custom = fixture.sound("ding.wav", 1024);
    let renderer = RecordingRenderer::default();
    let service = fixture.service(
        AppConfig {
            custom_sound_path: Some(custom.display().to_string()),
            ..Default::default()
        },
        renderer.clone(),
        MemoryDevices::new("Speakers", &["Speakers"]),
    );

    let outcome = service.play(&PlaybackRequest::new(SoundSource::Auto)).await;

    assert!(outcome.success);
    assert_eq!(outcome.origin_used, SoundOrigin::Custom);
    assert!(!outcome.fallback_occurred);
    let played = renderer.played.lock().unwrap().clone();
    assert_eq!(played, vec![custom.canonicalize().unwrap()]);
}

#[tokio::test]
async fn disallowed_extension_falls_back_to_default() {
    let fixture = Fixture::new();
    let custom = fixture.sound("ding.exe", 16);
    let renderer = RecordingRenderer::default();
    let service = fixture.service(
        AppConfig {
            custom_sound_path: Some(custom.display().to_string()),
            ..Default::default()
        },
        renderer.clone(),
        MemoryDevices::new("Speakers", &["Speakers"]),
    );

    let outcome = service.play(&PlaybackRequest::new(SoundSource::Custom)).await;

    assert!(outcome.success);
    assert!(outcome.fallback_occurred);
    assert_eq!(outcome.origin_used, SoundOrigin::Default);
    assert!(outcome.detail.unwrap_or_default().contains("exe"));
    assert_eq!(
        renderer.played.lock().unwrap().clone(),
        vec![fixture.default_sound.clone()]
    );
}

#[tokio::test]
async fn missing_custom_sound_without_fallback_fails() {
    let fixture = Fixture::new();
    let renderer = RecordingRenderer::default();
    let service = fixture.service(
        AppConfig {
            custom_sound_path: Some(
                fixture.home.path().join("gone.wav").display().to_string(),
            ),
            enable_fallback: Some(false),
            ..Default::default()
        },
        renderer.clone(),
        MemoryDevices::new("Speakers", &["Speakers"]),
    );

    let outcome = service.play(&PlaybackRequest::new(SoundSource::Custom)).await;

    assert!(!outcome.success);
    assert_eq!(outcome.error_kind, Some(PlaybackErrorKind::InvalidCustomSound));
    assert!(renderer.played.lock().unwrap().is_empty());
}

#[tokio::test]
async fn requested_device_is_restored_after_playback() {
    let fixture = Fixture::new();
    let devices = MemoryDevices::new("Speakers", &["Speakers", "Headphones"]);
    let service = fixture.service(
        AppConfig::empty(),
        RecordingRenderer::default(),
        devices.clone(),
    );

    let request = PlaybackRequest::new(SoundSource::Default).with_device("Headphones");
    let outcome = service.play(&request).await;

    assert!(outcome.success);
    assert_eq!(outcome.device_used.as_deref(), Some("Headphones"));
    assert_eq!(
        devices.switches.lock().unwrap().clone(),
        vec!["Headphones".to_string(), "Speakers".to_string()]
    );
    assert_eq!(*devices.active.lock().unwrap(), "Speakers");
}

#[tokio::test]
async fn timeout_stops_playback_and_restores_device() {
    let fixture = Fixture::new();
    let devices = MemoryDevices::new("Speakers", &["Speakers", "Headphones"]);
    let service = fixture.service(
        AppConfig {
            playback_timeout: Some("100ms".to_string()),
            ..Default::default()
        },
        RecordingRenderer {
            hang: true,
            ..Default::default()
        },
        devices.clone(),
    );

    let request = PlaybackRequest::new(SoundSource::Default).with_device("Headphones");
    let outcome = service.play(&request).await;

    assert!(!outcome.success);
    assert_eq!(outcome.error_kind, Some(PlaybackErrorKind::PlaybackTimeout));
    assert_eq!(*devices.active.lock().unwrap(), "Speakers");
}

#[tokio::test]
async fn status_reports_last_outcome() {
    let fixture = Fixture::new();
    let service = fixture.service(
        AppConfig::empty(),
        RecordingRenderer::default(),
        MemoryDevices::new("Speakers", &["Speakers", "Headphones"]),
    );

    assert!(service.status().await.last_outcome.is_none());
    service.play(&PlaybackRequest::new(SoundSource::Default)).await;

    let status = service.status().await;
    assert_eq!(status.renderer, "recording");
    assert_eq!(status.current_device.as_deref(), Some("Speakers"));
    assert_eq!(status.available_devices.len(), 2);
    assert!(status.last_outcome.map(|o| o.success).unwrap_or(false));
}
