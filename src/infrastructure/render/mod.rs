//! Sound rendering infrastructure adapters
//!
//! Plays a sound file through rodio or a platform command-line player.

mod chain;
mod command;
mod factory;
mod rodio;

pub use chain::ChainRenderer;
pub use command::{CommandPlayer, CommandRenderer};
pub use factory::{create_renderer, platform_backends, BackendPreference, RenderBackend};
pub use self::rodio::RodioRenderer;
