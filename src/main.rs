// Copyright (c) 2026 Tiledeck. All rights reserved.

mod cli_messages;
mod config;
mod consts;
mod error_classifier;
mod events;
mod host;
mod logging;
mod panel;
mod runtime;
mod session;
mod ui;
mod workers;

use crate::config::{Config, clear_saved_config, get_config_path};
use crate::consts::cli_consts::http;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the panel
    Start {
        /// Panel device ID as registered with the host
        #[arg(long, value_name = "DEVICE_ID")]
        device_id: Option<String>,

        /// Host base URL, e.g. http://192.168.1.10:8093
        #[arg(long, value_name = "URL")]
        host: Option<String>,

        /// Run without the terminal UI, logging events to the console
        #[arg(long)]
        headless: bool,
    },
    /// Render a local layout file without connecting to a host
    Preview {
        /// Path to a JSON layout file
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },
    /// Clear the saved panel configuration
    Forget,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Start {
            device_id,
            host,
            headless,
        } => start(device_id, host, headless, &config_path).await,
        Command::Preview { file } => preview(&file).await,
        Command::Forget => {
            clear_saved_config(&config_path)?;
            crate::print_cmd_success!("Forget", "Saved panel configuration cleared");
            Ok(())
        }
    }
}

/// Starts a live panel session.
///
/// Flags win over the saved configuration, the saved configuration over
/// defaults. The resolved pair is saved back once the device binding
/// succeeds, so the next start needs no flags.
async fn start(
    device_id: Option<String>,
    host: Option<String>,
    headless: bool,
    config_path: &Path,
) -> Result<(), Box<dyn Error>> {
    let saved = Config::load_from_file(config_path).ok();

    let device_id = device_id
        .or_else(|| saved.as_ref().map(|c| c.device_id.clone()))
        .ok_or("No device ID. Pass --device-id, or start once with it to save one.")?;
    let host_url = host
        .or_else(|| saved.as_ref().map(|c| c.host_url.clone()))
        .unwrap_or_else(|| http::DEFAULT_HOST_URL.to_string());

    let config = Config::new(device_id, host_url);
    let session = match session::setup_session(config.clone()).await {
        Ok(session) => session,
        Err(e) => {
            crate::print_cmd_error!("Start failed", &e.to_string());
            return Err(e);
        }
    };

    // The binding worked, so this pair is worth keeping for next time.
    if let Err(e) = config.save(config_path) {
        crate::print_cmd_warn!("Config", "Failed to save configuration: {}", e);
    }

    if headless {
        session::run_headless_mode(session).await
    } else {
        session::run_tui_mode(session).await
    }
}

/// Renders a local layout file in the terminal UI, no host required.
async fn preview(file: &Path) -> Result<(), Box<dyn Error>> {
    crate::print_cmd_info!("Preview", "Rendering layout file {}", file.display());
    let session = session::setup_preview_session(file)?;
    session::run_tui_mode(session).await
}
