//! Sound resolver use case
//!
//! Decides which file a request will render. Resolution is a single
//! deterministic pass over an explicit decision table; it never retries and
//! never mutates configuration.

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{PlaybackRequest, Resolution, ResolvedSound, ServerConfig, SoundSource};

use super::ports::{InvalidSound, SoundValidator};

/// Errors from sound resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Custom sound rejected and fallback disabled
    #[error("Invalid custom sound: {0}")]
    InvalidCustomSound(#[from] InvalidSound),
}

/// One row of the resolution decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveRule {
    /// Validate the configured custom sound, falling back if allowed
    ValidateCustom,
    /// Use the bundled default without validation
    UseDefault,
}

impl ResolveRule {
    /// First matching row wins:
    ///
    /// | requested | custom configured | rule           |
    /// |-----------|-------------------|----------------|
    /// | custom    | any               | ValidateCustom |
    /// | default   | any               | UseDefault     |
    /// | auto      | yes               | ValidateCustom |
    /// | auto      | no                | UseDefault     |
    pub const fn select(source: SoundSource, custom_configured: bool) -> Self {
        match (source, custom_configured) {
            (SoundSource::Custom, _) => Self::ValidateCustom,
            (SoundSource::Default, _) => Self::UseDefault,
            (SoundSource::Auto, true) => Self::ValidateCustom,
            (SoundSource::Auto, false) => Self::UseDefault,
        }
    }
}

/// Resolves requests against the immutable server configuration
pub struct SoundResolver<V: SoundValidator> {
    validator: V,
}

impl<V: SoundValidator> SoundResolver<V> {
    pub fn new(validator: V) -> Self {
        Self { validator }
    }

    pub fn resolve(
        &self,
        request: &PlaybackRequest,
        config: &ServerConfig,
    ) -> Result<Resolution, ResolveError> {
        let rule = ResolveRule::select(request.source, config.custom_sound_path.is_some());
        debug!(source = %request.source, ?rule, "resolving notification sound");

        match rule {
            ResolveRule::UseDefault => Ok(Resolution::direct(ResolvedSound::default_sound(
                &config.default_sound_path,
            ))),
            ResolveRule::ValidateCustom => self.resolve_custom(config),
        }
    }

    fn resolve_custom(&self, config: &ServerConfig) -> Result<Resolution, ResolveError> {
        let checked = match config.custom_sound_path.as_deref() {
            Some(path) => self.validator.validate(path, config),
            None => Err(InvalidSound::NotConfigured),
        };

        match checked {
            Ok(path) => Ok(Resolution::direct(ResolvedSound::validated_custom(path))),
            Err(reason) if config.enable_fallback => {
                warn!(%reason, "custom sound rejected, falling back to default");
                Ok(Resolution::fallback(
                    &config.default_sound_path,
                    reason.to_string(),
                ))
            }
            Err(reason) => {
                warn!(%reason, "custom sound rejected and fallback disabled");
                Err(ResolveError::InvalidCustomSound(reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::application::testing::config_with;
    use crate::domain::{AppConfig, SoundOrigin};

    /// Accepts everything or nothing
    struct StubValidator {
        verdict: Result<(), InvalidSound>,
    }

    impl SoundValidator for StubValidator {
        fn validate(&self, path: &Path, _config: &ServerConfig) -> Result<PathBuf, InvalidSound> {
            self.verdict.clone().map(|_| path.to_path_buf())
        }
    }

    fn accepting() -> SoundResolver<StubValidator> {
        SoundResolver::new(StubValidator { verdict: Ok(()) })
    }

    fn rejecting() -> SoundResolver<StubValidator> {
        SoundResolver::new(StubValidator {
            verdict: Err(InvalidSound::TooLarge { size: 50, max: 10 }),
        })
    }

    fn with_custom(fallback: bool) -> ServerConfig {
        config_with(AppConfig {
            custom_sound_path: Some("/home/user/ding.wav".to_string()),
            enable_fallback: Some(fallback),
            ..Default::default()
        })
    }

    #[test]
    fn decision_table_rows() {
        use ResolveRule::*;
        assert_eq!(ResolveRule::select(SoundSource::Custom, true), ValidateCustom);
        assert_eq!(ResolveRule::select(SoundSource::Custom, false), ValidateCustom);
        assert_eq!(ResolveRule::select(SoundSource::Default, true), UseDefault);
        assert_eq!(ResolveRule::select(SoundSource::Default, false), UseDefault);
        assert_eq!(ResolveRule::select(SoundSource::Auto, true), ValidateCustom);
        assert_eq!(ResolveRule::select(SoundSource::Auto, false), UseDefault);
    }

    #[test]
    fn auto_without_custom_uses_default() {
        let config = config_with(AppConfig::empty());
        let resolution = accepting()
            .resolve(&PlaybackRequest::new(SoundSource::Auto), &config)
            .unwrap();
        assert_eq!(resolution.sound.origin, SoundOrigin::Default);
        assert_eq!(resolution.sound.path, config.default_sound_path);
        assert!(!resolution.fallback_occurred);
    }

    #[test]
    fn auto_with_valid_custom_uses_custom() {
        let config = with_custom(true);
        let resolution = accepting()
            .resolve(&PlaybackRequest::new(SoundSource::Auto), &config)
            .unwrap();
        assert_eq!(resolution.sound.origin, SoundOrigin::Custom);
        assert!(resolution.sound.validated);
        assert_eq!(resolution.sound.path, PathBuf::from("/home/user/ding.wav"));
    }

    #[test]
    fn explicit_default_ignores_custom() {
        let config = with_custom(true);
        let resolution = rejecting()
            .resolve(&PlaybackRequest::new(SoundSource::Default), &config)
            .unwrap();
        assert_eq!(resolution.sound.origin, SoundOrigin::Default);
        assert!(!resolution.fallback_occurred);
        assert!(resolution.rejection.is_none());
    }

    #[test]
    fn invalid_custom_falls_back_when_enabled() {
        let config = with_custom(true);
        let resolution = rejecting()
            .resolve(&PlaybackRequest::new(SoundSource::Custom), &config)
            .unwrap();
        assert!(resolution.fallback_occurred);
        assert_eq!(resolution.sound.origin, SoundOrigin::Default);
        assert!(resolution.rejection.unwrap().contains("larger than"));
    }

    #[test]
    fn invalid_custom_fails_when_fallback_disabled() {
        let config = with_custom(false);
        let err = rejecting()
            .resolve(&PlaybackRequest::new(SoundSource::Custom), &config)
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::InvalidCustomSound(InvalidSound::TooLarge { .. })
        ));
    }

    #[test]
    fn custom_requested_but_not_configured() {
        let config = config_with(AppConfig {
            enable_fallback: Some(false),
            ..Default::default()
        });
        let err = accepting()
            .resolve(&PlaybackRequest::new(SoundSource::Custom), &config)
            .unwrap_err();
        assert_eq!(err, ResolveError::InvalidCustomSound(InvalidSound::NotConfigured));

        let config = config_with(AppConfig::empty());
        let resolution = accepting()
            .resolve(&PlaybackRequest::new(SoundSource::Custom), &config)
            .unwrap();
        assert!(resolution.fallback_occurred);
    }

    #[test]
    fn resolution_is_idempotent() {
        let config = with_custom(true);
        let resolver = rejecting();
        let request = PlaybackRequest::new(SoundSource::Auto);
        let first = resolver.resolve(&request, &config).unwrap();
        let second = resolver.resolve(&request, &config).unwrap();
        assert_eq!(first, second);
    }
}
