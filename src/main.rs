//! Hold notice CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use hold_notice::cli::{
    app::{cli_overrides, load_merged_config, run_config},
    args::{Cli, Commands},
    run_action, run_delete, run_info, run_play, run_record_dialog,
};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .init();

    let config = load_merged_config(cli_overrides(cli.storage_dir, cli.notify)).await;

    match cli.command {
        Commands::Record => run_record_dialog(&config).await,
        Commands::Play => run_play(&config).await,
        Commands::Info { json } => run_info(&config, json),
        Commands::Delete => run_delete(&config).await,
        Commands::Action { action } => run_action(&config, &action).await,
        Commands::Config { action } => run_config(action).await,
    }
}
