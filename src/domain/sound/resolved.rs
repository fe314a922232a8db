//! Resolved sound value object

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the rendered sound came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundOrigin {
    Default,
    Custom,
}

impl fmt::Display for SoundOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Custom => f.write_str("custom"),
        }
    }
}

/// The file that will actually be rendered for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSound {
    pub path: PathBuf,
    pub origin: SoundOrigin,
    /// True only when the custom-sound validation policy accepted the file
    pub validated: bool,
}

impl ResolvedSound {
    /// The bundled default sound (trusted, not validated per request)
    pub fn default_sound(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            origin: SoundOrigin::Default,
            validated: false,
        }
    }

    /// A custom sound that passed validation
    pub fn validated_custom(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            origin: SoundOrigin::Custom,
            validated: true,
        }
    }
}

/// Result of the resolver: the sound plus how it was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub sound: ResolvedSound,
    /// The default replaced a custom sound that could not be used
    pub fallback_occurred: bool,
    /// Why the custom sound was rejected, when it was
    pub rejection: Option<String>,
}

impl Resolution {
    pub fn direct(sound: ResolvedSound) -> Self {
        Self {
            sound,
            fallback_occurred: false,
            rejection: None,
        }
    }

    /// Default sound standing in for a rejected or failed custom sound
    pub fn fallback(default_path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            sound: ResolvedSound::default_sound(default_path),
            fallback_occurred: true,
            rejection: Some(reason.into()),
        }
    }
}
