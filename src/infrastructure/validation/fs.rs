//! File-system validator for custom sounds

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::ports::{InvalidSound, SoundValidator};
use crate::domain::ServerConfig;
use crate::infrastructure::home::expand_tilde;

/// Checks custom sound files against the configured policy
pub struct FsSoundValidator {
    home: Option<PathBuf>,
}

impl FsSoundValidator {
    /// Validator using the current user's home directory
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    /// Validator with an explicit home directory
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    /// Expand a leading `~` to the home directory
    fn expand_tilde(&self, path: &Path) -> Result<PathBuf, InvalidSound> {
        expand_tilde(path, self.home.as_deref()).ok_or(InvalidSound::HomeUnknown)
    }

    fn check_inside_home(&self, canonical: &Path) -> Result<(), InvalidSound> {
        let home = self.home.as_ref().ok_or(InvalidSound::HomeUnknown)?;
        let home = home.canonicalize().unwrap_or_else(|_| home.clone());
        if canonical.starts_with(&home) {
            Ok(())
        } else {
            Err(InvalidSound::OutsideHome(canonical.display().to_string()))
        }
    }
}

impl Default for FsSoundValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundValidator for FsSoundValidator {
    fn validate(&self, path: &Path, config: &ServerConfig) -> Result<PathBuf, InvalidSound> {
        let expanded = self.expand_tilde(path)?;
        let shown = expanded.display().to_string();

        // Resolves relative components and symlinks
        let canonical = expanded.canonicalize().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => InvalidSound::NotFound(shown.clone()),
            _ => InvalidSound::Unreadable(format!("{}: {}", shown, e)),
        })?;

        if config.restrict_to_user_home {
            self.check_inside_home(&canonical)?;
        }

        let metadata = canonical
            .metadata()
            .map_err(|e| InvalidSound::Unreadable(format!("{}: {}", shown, e)))?;
        if !metadata.is_file() {
            return Err(InvalidSound::NotAFile(shown));
        }

        let extension = canonical
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !config.allows_extension(&extension) {
            return Err(InvalidSound::DisallowedExtension {
                extension: if extension.is_empty() {
                    "(none)".to_string()
                } else {
                    extension
                },
                allowed: config
                    .allowed_extensions
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        if metadata.len() > config.max_file_size_bytes {
            return Err(InvalidSound::TooLarge {
                size: metadata.len(),
                max: config.max_file_size_bytes,
            });
        }

        File::open(&canonical)
            .map_err(|e| InvalidSound::Unreadable(format!("{}: {}", shown, e)))?;

        debug!(path = %canonical.display(), "custom sound accepted");
        Ok(canonical)
    }
}
