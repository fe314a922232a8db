//! Configuration value objects

mod app_config;
mod server_config;
mod timeout;

pub use app_config::AppConfig;
pub use server_config::{
    normalize_extensions, ServerConfig, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_BACKEND,
    DEFAULT_DEVICE_TOOL, DEFAULT_MAX_FILE_SIZE_MB, VALID_BACKENDS, VALID_DEVICE_TOOLS,
};
pub use timeout::{Timeout, DEFAULT_TIMEOUT_SECS};
