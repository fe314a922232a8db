//! Volume value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::VolumeError;

/// Default playback volume
pub const DEFAULT_VOLUME: f32 = 0.8;

/// Linear playback gain in the closed range 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Volume(f32);

impl Volume {
    pub fn new(level: f32) -> Result<Self, VolumeError> {
        if level.is_finite() && (0.0..=1.0).contains(&level) {
            Ok(Self(level))
        } else {
            Err(VolumeError {
                input: level.to_string(),
            })
        }
    }

    pub const fn full() -> Self {
        Self(1.0)
    }

    pub const fn level(&self) -> f32 {
        self.0
    }

    pub fn is_full(&self) -> bool {
        (self.0 - 1.0).abs() < f32::EPSILON
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}

impl TryFrom<f32> for Volume {
    type Error = VolumeError;

    fn try_from(level: f32) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Volume> for f32 {
    fn from(volume: Volume) -> Self {
        volume.0
    }
}

impl FromStr for Volume {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level: f32 = s.trim().parse().map_err(|_| VolumeError {
            input: s.to_string(),
        })?;
        Self::new(level).map_err(|_| VolumeError {
            input: s.to_string(),
        })
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(Volume::new(0.0).is_ok());
        assert!(Volume::new(1.0).is_ok());
        assert!(Volume::full().is_full());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Volume::new(-0.1).is_err());
        assert!(Volume::new(1.01).is_err());
        assert!(Volume::new(f32::NAN).is_err());
    }

    #[test]
    fn parses_from_str() {
        let v: Volume = "0.5".parse().unwrap();
        assert_eq!(v.level(), 0.5);
        assert!("loud".parse::<Volume>().is_err());
        assert!("2".parse::<Volume>().is_err());
    }

    #[test]
    fn default_is_point_eight() {
        assert_eq!(Volume::default().level(), 0.8);
        assert_eq!(Volume::default().to_string(), "0.80");
    }

    #[test]
    fn deserialize_validates() {
        let ok: Volume = serde_json::from_str("0.25").unwrap();
        assert_eq!(ok.level(), 0.25);
        assert!(serde_json::from_str::<Volume>("1.5").is_err());
    }
}
