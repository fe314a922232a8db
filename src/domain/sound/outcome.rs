//! Playback outcome returned to callers

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::resolved::SoundOrigin;

/// Classified failure of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackErrorKind {
    /// Custom sound missing, unreadable, oversized, disallowed or outside home
    InvalidCustomSound,
    /// Rendering did not finish within the configured timeout
    PlaybackTimeout,
    /// The audio backend failed for a reason other than timeout
    RenderFailure,
    /// Device control is entirely unavailable (never fatal)
    NoDeviceCapability,
    /// The bundled default sound is gone (startup only)
    MissingDefaultAsset,
}

impl PlaybackErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCustomSound => "invalid_custom_sound",
            Self::PlaybackTimeout => "playback_timeout",
            Self::RenderFailure => "render_failure",
            Self::NoDeviceCapability => "no_device_capability",
            Self::MissingDefaultAsset => "missing_default_asset",
        }
    }
}

impl fmt::Display for PlaybackErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured result of one notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackOutcome {
    pub success: bool,
    pub origin_used: SoundOrigin,
    pub sound_path: Option<PathBuf>,
    pub device_used: Option<String>,
    pub fallback_occurred: bool,
    pub error_kind: Option<PlaybackErrorKind>,
    /// Failure reason and non-fatal warnings, human readable
    pub detail: Option<String>,
    pub warnings: Vec<String>,
    pub duration_ms: u64,
}

impl PlaybackOutcome {
    /// Failure before anything was rendered
    pub fn rejected(kind: PlaybackErrorKind, detail: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            success: false,
            origin_used: SoundOrigin::Custom,
            sound_path: None,
            device_used: None,
            fallback_occurred: false,
            error_kind: Some(kind),
            detail: Some(detail.into()),
            warnings: Vec::new(),
            duration_ms,
        }
    }

    /// Rebuild `detail` from the error reason and the collected warnings
    pub(crate) fn with_detail(mut self, reason: Option<String>) -> Self {
        let mut parts: Vec<String> = reason.into_iter().collect();
        parts.extend(self.warnings.iter().cloned());
        self.detail = if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        };
        self
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        let device = self
            .device_used
            .as_deref()
            .map(|d| format!(" on '{}'", d))
            .unwrap_or_default();

        let mut text = if self.success && self.fallback_occurred {
            format!("Played default sound{} (custom sound unavailable)", device)
        } else if self.success {
            format!("Played {} sound{}", self.origin_used, device)
        } else {
            let kind = self
                .error_kind
                .map(|k| k.to_string())
                .unwrap_or_else(|| "unknown_error".to_string());
            format!("Notification failed ({})", kind)
        };

        if let Some(detail) = &self.detail {
            text.push_str(": ");
            text.push_str(detail);
        }
        text.push_str(&format!(" [{}ms]", self.duration_ms));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played() -> PlaybackOutcome {
        PlaybackOutcome {
            success: true,
            origin_used: SoundOrigin::Default,
            sound_path: None,
            device_used: Some("Speakers".to_string()),
            fallback_occurred: false,
            error_kind: None,
            detail: None,
            warnings: Vec::new(),
            duration_ms: 600,
        }
    }

    #[test]
    fn summary_for_success() {
        assert_eq!(played().summary(), "Played default sound on 'Speakers' [600ms]");
    }

    #[test]
    fn summary_for_fallback_includes_reason() {
        let outcome = PlaybackOutcome {
            fallback_occurred: true,
            ..played()
        }
        .with_detail(Some("file too large".to_string()));
        let summary = outcome.summary();
        assert!(summary.contains("custom sound unavailable"));
        assert!(summary.contains("file too large"));
    }

    #[test]
    fn summary_for_failure_names_kind() {
        let outcome = PlaybackOutcome::rejected(PlaybackErrorKind::InvalidCustomSound, "nope", 1);
        assert!(outcome.summary().starts_with("Notification failed (invalid_custom_sound): nope"));
    }

    #[test]
    fn detail_joins_reason_and_warnings() {
        let mut outcome = played();
        outcome.warnings.push("switch failed".to_string());
        let outcome = outcome.with_detail(Some("render failed".to_string()));
        assert_eq!(outcome.detail.as_deref(), Some("render failed; switch failed"));

        let outcome = played().with_detail(None);
        assert!(outcome.detail.is_none());
    }

    #[test]
    fn error_kind_serializes_snake_case() {
        let json = serde_json::to_string(&PlaybackErrorKind::PlaybackTimeout).unwrap();
        assert_eq!(json, "\"playback_timeout\"");
    }
}
