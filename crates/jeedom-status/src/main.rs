//! jeedom-status
//!
//! Prints a one-line summary of a Jeedom hub for a status bar (xbar/BitBar
//! on macOS, i3blocks, i3status-rust or plain text), followed by the bar's
//! secondary block.

mod app;
mod cli;
mod settings;
mod version_check;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::cli::Cli;
use crate::settings::Settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // stdout belongs to the status bar
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.debug { "debug" } else { "warn" }));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // bars read stdout through a pipe, colours must not depend on a tty
    colored::control::set_override(true);

    let settings = match Settings::load(cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e:#}");
            return Ok(ExitCode::FAILURE);
        }
    };
    if settings.debug {
        println!("Used settings:\n{settings:#?}");
    }

    match app::run(&settings).await {
        Ok(report) => {
            println!("{report}");
            Ok(if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Err(e) => {
            eprintln!("{e:#}");
            Ok(ExitCode::FAILURE)
        }
    }
}
