//! Configuration sources: TOML file and environment

mod env;
mod xdg;

pub use env::{parse_bool, EnvConfigSource};
pub use xdg::XdgConfigStore;
