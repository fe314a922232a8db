//! CLI presenter for output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::{AudioStatus, DeviceListing};
use crate::domain::PlaybackOutcome;

const NOT_SET: &str = "(not set)";

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list and status)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Finish the playback spinner with the outcome summary
    pub fn outcome(&mut self, outcome: &PlaybackOutcome) {
        let summary = outcome.summary();
        if self.spinner.is_none() {
            if outcome.success {
                self.success(&summary);
            } else {
                self.error(&summary);
            }
            return;
        }
        if outcome.success {
            self.spinner_success(&summary);
        } else {
            self.spinner_fail(&summary);
        }
    }

    /// Print the device listing, marking the active device
    pub fn devices(&self, listing: &DeviceListing) {
        for device in &listing.devices {
            if listing.current.as_deref() == Some(device.as_str()) {
                println!("{} {}", "●".green(), device.bold());
            } else {
                println!("  {}", device);
            }
        }
        if let Some(current) = &listing.current {
            if !listing.devices.contains(current) {
                println!("{} {}", "●".green(), current.bold());
            }
        }
        if let Some(warning) = &listing.warning {
            self.warn(warning);
        }
    }

    /// Print a human-readable status report
    pub fn status(&self, status: &AudioStatus) {
        let config = &status.config;
        self.key_value("renderer", &status.renderer);
        self.key_value("device_control", &status.device_control);
        self.key_value(
            "current_device",
            status.current_device.as_deref().unwrap_or("(unknown)"),
        );
        self.key_value(
            "available_devices",
            &format!("{}", status.available_devices.len()),
        );
        self.key_value(
            "custom_sound_path",
            &config
                .custom_sound_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| NOT_SET.to_string()),
        );
        self.key_value(
            "default_sound_path",
            &config.default_sound_path.display().to_string(),
        );
        self.key_value("volume", &config.volume.to_string());
        self.key_value("enable_fallback", &config.enable_fallback.to_string());
        self.key_value("playback_timeout", &config.playback_timeout.to_string());
        self.key_value(
            "device",
            config.device.as_deref().unwrap_or(NOT_SET),
        );
        if let Some(warning) = &status.device_warning {
            self.warn(warning);
        }
        match &status.last_outcome {
            Some(outcome) => self.key_value("last_outcome", &outcome.summary()),
            None => self.key_value("last_outcome", "(none)"),
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
