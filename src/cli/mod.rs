//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, logging setup,
//! the stdio tool server and the application runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod logging;
pub mod presenter;
pub mod serve;

// Re-export commonly used types
pub use app::{
    build_service, run_devices, run_play, run_status, run_test, AppError, AppService, EXIT_ERROR,
    EXIT_SUCCESS, EXIT_USAGE_ERROR,
};
pub use args::{Cli, Commands, ConfigAction};
pub use config_cmd::handle_config_command;
pub use logging::init_logging;
pub use presenter::Presenter;
pub use serve::{run_serve, serve, ToolServer};
