//! notify-chime - notification sounds for automated assistants
//!
//! Plays a short notification sound when a task finishes, optionally on a
//! named output device which is restored afterwards. Usable as a one-shot
//! CLI or as a stdio tool server.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Requests, resolved sounds, outcomes, configuration and errors
//! - **Application**: Sound resolution, device-scoped playback and port traits
//! - **Infrastructure**: Adapters (rodio, command players, pactl, cpal, file system)
//! - **CLI**: Argument parsing, presentation, logging and the stdio server

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
