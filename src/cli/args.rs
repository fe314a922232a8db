//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::AppConfig;
use crate::domain::{PlaybackRequest, SoundSource, Timeout, Volume};

/// notify-chime - notification sounds on the output device of your choice
#[derive(Parser, Debug)]
#[command(name = "notify-chime")]
#[command(version)]
#[command(about = "Play a notification sound, optionally on a specific output device")]
#[command(long_about = None)]
pub struct Cli {
    /// Which sound to play
    #[arg(short = 's', long, value_name = "SOURCE")]
    pub source: Option<SourceArg>,

    /// Message logged with the notification
    #[arg(short = 'm', long, value_name = "TEXT")]
    pub message: Option<String>,

    /// Output device to play on (restored afterwards)
    #[arg(short = 'd', long, value_name = "DEVICE")]
    pub device: Option<String>,

    /// Playback volume between 0.0 and 1.0
    #[arg(long, value_name = "LEVEL", value_parser = parse_volume)]
    pub volume: Option<Volume>,

    /// Custom sound file (overrides config and environment)
    #[arg(long, value_name = "PATH", global = true)]
    pub custom_sound: Option<String>,

    /// Playback timeout (e.g., 10, 500ms, 30s, 1m)
    #[arg(long, value_name = "TIME", value_parser = parse_timeout, global = true)]
    pub timeout: Option<Timeout>,

    /// Render backend (auto, rodio, afplay, paplay, aplay)
    #[arg(long, value_name = "BACKEND", global = true)]
    pub backend: Option<String>,

    /// Device control tool (auto, pactl, switch-audio-source, cpal, none)
    #[arg(long, value_name = "TOOL", global = true)]
    pub device_tool: Option<String>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show audio status, configuration and last outcome
    Status {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// List output devices
    Devices,
    /// Play a test sound
    Test {
        /// Test the custom sound instead of the default
        #[arg(long)]
        custom: bool,
    },
    /// Serve notification tools over stdio (JSON-RPC)
    Serve,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Sound source argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Default,
    Custom,
    Auto,
}

impl From<SourceArg> for SoundSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Default => SoundSource::Default,
            SourceArg::Custom => SoundSource::Custom,
            SourceArg::Auto => SoundSource::Auto,
        }
    }
}

impl Cli {
    /// Configuration layer contributed by command-line flags
    pub fn config_layer(&self) -> AppConfig {
        AppConfig {
            custom_sound_path: self.custom_sound.clone(),
            playback_timeout: self.timeout.map(|t| t.to_string()),
            backend: self.backend.clone(),
            device_tool: self.device_tool.clone(),
            ..Default::default()
        }
    }

    /// Playback request described by the top-level flags
    pub fn playback_request(&self) -> PlaybackRequest {
        let mut request = PlaybackRequest::new(self.source.map(Into::into).unwrap_or_default());
        if let Some(message) = &self.message {
            request = request.with_message(message.clone());
        }
        if let Some(device) = &self.device {
            request = request.with_device(device.clone());
        }
        if let Some(volume) = self.volume {
            request = request.with_volume(volume);
        }
        request
    }
}

fn parse_volume(s: &str) -> Result<Volume, String> {
    s.parse::<Volume>().map_err(|e| e.to_string())
}

fn parse_timeout(s: &str) -> Result<Timeout, String> {
    s.parse::<Timeout>().map_err(|e| e.to_string())
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "custom_sound_path",
    "default_sound_path",
    "volume",
    "enable_fallback",
    "max_file_size_mb",
    "allowed_extensions",
    "playback_timeout",
    "restrict_to_user_home",
    "device",
    "backend",
    "device_tool",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
