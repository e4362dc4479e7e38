mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod service;
mod settings_store;
mod ui;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use crate::settings_store::SettingsStore;
use crate::ui::{UiHandle, UiManager};
use clap::Parser;
use tokio::task;
use tracing::{debug, error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run_app().await {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_app() -> Result<()> {
    let (ui_manager, ui_sender, shutdown_sender) = UiManager::new();
    let ui_handle = task::spawn(ui_manager.run());

    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    let command_result = async {
        info!("rnadesign CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
        debug!("Full CLI arguments parsed: {:?}", &cli);

        let store = SettingsStore::new(cli.settings.clone())?;
        let ui = UiHandle::new(ui_sender);

        match cli.command {
            Commands::Browse(args) => {
                info!("Dispatching to 'browse' command.");
                commands::browse::run(args, &store).await
            }
            Commands::Check(args) => {
                info!("Dispatching to 'check' command.");
                commands::check::run(args).await
            }
            Commands::Mark(args) => {
                info!("Dispatching to 'mark' command.");
                commands::mark::run(args, &store).await
            }
            Commands::Columns(args) => {
                info!("Dispatching to 'columns' command.");
                commands::columns::run(args, &store).await
            }
            Commands::Watch(args) => {
                info!("Dispatching to 'watch' command.");
                commands::watch::run(args, &store, ui).await
            }
            Commands::Vote(args) => {
                info!("Dispatching to 'vote' command.");
                commands::vote::run(args, &store, ui).await
            }
            Commands::Delete(args) => {
                info!("Dispatching to 'delete' command.");
                commands::delete::run(args, &store, ui).await
            }
        }
    }
    .await;

    match &command_result {
        Ok(_) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }

    if shutdown_sender.send(true).is_err() {
        warn!("UI manager may have already exited before shutdown signal.");
    }

    ui_handle
        .await
        .map_err(|e| CliError::Other(anyhow::anyhow!("UI manager task failed: {}", e)))?;

    command_result
}
