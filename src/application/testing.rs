//! Fake adapters shared by the application tests

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{AppConfig, ServerConfig, Volume};

use super::ports::{AudioDeviceControl, CancelFlag, DeviceError, RenderError, SoundRenderer};

pub const DEFAULT_SOUND: &str = "/assets/notification.wav";

pub fn config_with(config: AppConfig) -> ServerConfig {
    ServerConfig::from_app_config(&AppConfig::defaults().merge(config), PathBuf::from(DEFAULT_SOUND))
        .unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Succeed,
    Fail,
    /// Fail for every path except the default sound
    FailCustom,
    /// Never return until cancelled
    Hang,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderCall {
    pub path: PathBuf,
    pub volume: f32,
    pub device: Option<String>,
}

#[derive(Clone)]
pub struct FakeRenderer {
    pub mode: RenderMode,
    pub delay: Duration,
    pub calls: Arc<Mutex<Vec<RenderCall>>>,
    pub devices: Option<FakeDevices>,
}

impl FakeRenderer {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
            devices: None,
        }
    }

    /// Record which device was active whenever a render starts
    pub fn observing(mut self, devices: &FakeDevices) -> Self {
        self.devices = Some(devices.clone());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SoundRenderer for FakeRenderer {
    fn name(&self) -> String {
        "fake".to_string()
    }

    async fn render(
        &self,
        path: &Path,
        volume: Volume,
        _cancel: CancelFlag,
    ) -> Result<(), RenderError> {
        let device = self.devices.as_ref().map(|d| d.active());
        self.calls.lock().unwrap().push(RenderCall {
            path: path.to_path_buf(),
            volume: volume.level(),
            device,
        });

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let failed = RenderError::Playback {
            backend: "fake".to_string(),
            reason: "device busy".to_string(),
        };
        match self.mode {
            RenderMode::Succeed => Ok(()),
            RenderMode::Fail => Err(failed),
            RenderMode::FailCustom if path == Path::new(DEFAULT_SOUND) => Ok(()),
            RenderMode::FailCustom => Err(failed),
            RenderMode::Hang => std::future::pending::<Result<(), RenderError>>().await,
        }
    }
}

#[derive(Debug, Default)]
pub struct DeviceState {
    pub active: String,
    pub available: Vec<String>,
    pub set_calls: Vec<String>,
    pub fail_current: bool,
    /// Names whose `set_device` call fails even though they exist
    pub fail_set_to: Vec<String>,
    pub unavailable: bool,
    /// `list_devices` and `current_device` never answer
    pub hang_queries: bool,
    /// Names whose `set_device` call never answers
    pub hang_set_to: Vec<String>,
}

#[derive(Clone)]
pub struct FakeDevices {
    pub state: Arc<Mutex<DeviceState>>,
}

impl FakeDevices {
    pub fn new(active: &str, available: &[&str]) -> Self {
        Self {
            state: Arc::new(Mutex::new(DeviceState {
                active: active.to_string(),
                available: available.iter().map(|d| d.to_string()).collect(),
                ..Default::default()
            })),
        }
    }

    pub fn update(self, f: impl FnOnce(&mut DeviceState)) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn active(&self) -> String {
        self.state.lock().unwrap().active.clone()
    }

    pub fn set_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().set_calls.clone()
    }
}

#[async_trait]
impl AudioDeviceControl for FakeDevices {
    fn name(&self) -> String {
        "fake".to_string()
    }

    async fn list_devices(&self) -> Result<Vec<String>, DeviceError> {
        let hang = self.state.lock().unwrap().hang_queries;
        if hang {
            return std::future::pending().await;
        }
        let state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(DeviceError::Unavailable("fake".to_string()));
        }
        Ok(state.available.clone())
    }

    async fn current_device(&self) -> Result<String, DeviceError> {
        let hang = self.state.lock().unwrap().hang_queries;
        if hang {
            return std::future::pending().await;
        }
        let state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(DeviceError::Unavailable("fake".to_string()));
        }
        if state.fail_current {
            return Err(DeviceError::CommandFailed("query failed".to_string()));
        }
        Ok(state.active.clone())
    }

    async fn set_device(&self, name: &str) -> Result<(), DeviceError> {
        // Yield so concurrent callers would interleave without the player lock
        tokio::task::yield_now().await;
        let hang = self.state.lock().unwrap().hang_set_to.iter().any(|d| d == name);
        if hang {
            self.state.lock().unwrap().set_calls.push(name.to_string());
            return std::future::pending().await;
        }
        let mut state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(DeviceError::Unavailable("fake".to_string()));
        }
        state.set_calls.push(name.to_string());
        if !state.available.iter().any(|d| d == name) {
            return Err(DeviceError::NotFound(name.to_string()));
        }
        if state.fail_set_to.iter().any(|d| d == name) {
            return Err(DeviceError::CommandFailed(format!("cannot select {}", name)));
        }
        state.active = name.to_string();
        Ok(())
    }
}
