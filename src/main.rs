//! notify-chime CLI entry point

use std::process::ExitCode;

use clap::Parser;

use notify_chime::cli::{
    handle_config_command, init_logging, run_devices, run_play, run_serve, run_status, run_test,
    Cli, Commands, Presenter, EXIT_ERROR, EXIT_USAGE_ERROR,
};
use notify_chime::domain::error::ConfigError;
use notify_chime::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let serving = matches!(cli.command, Some(Commands::Serve));
    init_logging(cli.verbose, serving);

    let cli_config = cli.config_layer();
    let request = cli.playback_request();

    match cli.command {
        Some(Commands::Config { action }) => {
            let presenter = Presenter::new();
            let store = XdgConfigStore::new();
            match handle_config_command(action, &store, &presenter).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    presenter.error(&e.to_string());
                    match e {
                        ConfigError::ValidationError { .. } => ExitCode::from(EXIT_USAGE_ERROR),
                        _ => ExitCode::from(EXIT_ERROR),
                    }
                }
            }
        }
        Some(Commands::Status { json }) => run_status(cli_config, json).await,
        Some(Commands::Devices) => run_devices(cli_config).await,
        Some(Commands::Test { custom }) => run_test(cli_config, custom).await,
        Some(Commands::Serve) => run_serve(cli_config).await,
        None => run_play(cli_config, request).await,
    }
}
