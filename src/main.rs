//! Voice Recorder CLI entry point

use std::process::ExitCode;

use clap::Parser;

use voice_recorder::cli::{
    app::{load_default_config, run_oneshot, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    init_logging,
    presenter::Presenter,
    RecordOptions,
};
use voice_recorder::domain::config::AppConfig;
use voice_recorder::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();
    let presenter = Presenter::new();

    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    let cli_config = AppConfig {
        duration: cli.duration,
        output_dir: cli.output_dir,
        format: cli.format,
    };

    // Merge config: defaults < file < cli
    let config = load_default_config(cli_config).await;

    // Parse duration before touching the audio device
    let duration = match config.duration_or_default() {
        Ok(d) => d,
        Err(e) => {
            presenter.error(&format!("Invalid duration: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let options = RecordOptions {
        duration,
        output_dir: config.output_dir_or_default(),
        format: config.format_or_default().to_string(),
    };

    run_oneshot(options).await
}
