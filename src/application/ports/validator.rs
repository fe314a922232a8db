//! Custom sound validation port
//!
//! A pass/fail predicate over a configured path. It reads file metadata but
//! never modifies anything.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::ServerConfig;

/// Why a custom sound cannot be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSound {
    #[error("no custom sound path is configured")]
    NotConfigured,

    #[error("sound file not found: {0}")]
    NotFound(String),

    #[error("not a regular file: {0}")]
    NotAFile(String),

    #[error("sound file is not readable: {0}")]
    Unreadable(String),

    #[error("extension '{extension}' is not allowed (allowed: {allowed})")]
    DisallowedExtension { extension: String, allowed: String },

    #[error("sound file is {size} bytes, larger than the {max} byte limit")]
    TooLarge { size: u64, max: u64 },

    #[error("sound file {0} is outside the user's home directory")]
    OutsideHome(String),

    #[error("cannot determine the user's home directory")]
    HomeUnknown,
}

/// Port for custom sound validation
pub trait SoundValidator: Send + Sync {
    /// Accept or reject `path` under the policy in `config`.
    ///
    /// On success returns the canonical path that should be rendered.
    fn validate(&self, path: &Path, config: &ServerConfig) -> Result<PathBuf, InvalidSound>;
}

impl SoundValidator for Box<dyn SoundValidator> {
    fn validate(&self, path: &Path, config: &ServerConfig) -> Result<PathBuf, InvalidSound> {
        self.as_ref().validate(path, config)
    }
}
