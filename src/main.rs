// Wi-Fi Roaming - Main Entry Point
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Wi-Fi Roaming
//!
//! A background daemon that keeps a wireless station associated with the
//! highest-priority configured network in range, re-associating through
//! `wpa_cli` when a better network appears.
//!
//! The process stays in the foreground so a service manager can supervise
//! it; decisions are reported through the log stream only.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

mod controller;
mod logging;
mod models;
mod parser;
mod pidfile;
mod services;

use controller::WpaCli;
use logging::{Logger, TracingLogger};
use models::{AppConfig, APP_NAME};
use pidfile::PidFile;
use services::{RoamingEngine, RoamingService};

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print version information and exit.
fn print_version() {
    println!("{} {}", APP_NAME, VERSION);
    println!("Copyright (C) 2026 Christos A. Daggas");
    println!("License: MIT");
}

/// Print help information and exit.
fn print_help() {
    println!("Usage: {} [OPTIONS]", env::args().next().unwrap_or_else(|| APP_NAME.to_string()));
    println!();
    println!("Keeps the wireless station on the highest-priority network in range.");
    println!();
    println!("Options:");
    println!("  -c, --config <FILE>  Read settings from FILE");
    println!("  -d, --debug          Enable debug logging");
    println!("  -h, --help           Show this help message and exit");
    println!("  -v, --version        Show version information and exit");
    println!();
    println!("Settings are looked up in:");
    for path in AppConfig::search_paths() {
        println!("  {}", path.display());
    }
    println!();
    println!("Environment variables:");
    println!("  RUST_LOG             Set log level (trace, debug, info, warn, error)");
}

/// Parsed command-line options.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    config_path: Option<PathBuf>,
    debug: bool,
}

/// What the command line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-v" | "--version" => return Ok(Command::Version),
            "-d" | "--debug" => options.debug = true,
            "-c" | "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| format!("Option '{}' requires a file argument", arg))?;
                options.config_path = Some(PathBuf::from(path));
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
    }

    Ok(Command::Run(options))
}

/// Wait for SIGINT or SIGTERM.
async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => info!("Received SIGINT, shutting down"),
                    _ = terminate.recv() => info!("Received SIGTERM, shutting down"),
                }
                return;
            }
            Err(e) => warn!("Failed to install SIGTERM handler: {}", e),
        }
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT, shutting down"),
        Err(e) => {
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

async fn run(config: AppConfig) -> models::Result<()> {
    let pid_file = PidFile::create(&config.pid_file)?;
    info!("PID file {}", pid_file.path().display());

    let controller = WpaCli::from_config(&config);
    if let Some(path) = controller.config_file() {
        info!("Reading configured networks from {}", path.display());
    }
    let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
    let engine = tokio::task::block_in_place(|| {
        RoamingEngine::new(controller, logger, config.ignore_wait())
    });
    let service = RoamingService::new(engine, config.scan_wait());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let signal = async move {
        wait_for_shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    };

    tokio::join!(service.run(shutdown_rx), signal);
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Command::Help) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            print_version();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Run(options)) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Try '--help' for more information.");
            return ExitCode::FAILURE;
        }
    };

    let (config, config_path) = match AppConfig::load(options.config_path.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    // Initialize logging with appropriate level
    let log_level = if options.debug {
        tracing::Level::DEBUG
    } else {
        logging::parse_level(&config.log_level).unwrap_or(tracing::Level::INFO)
    };
    logging::init(log_level);

    info!("Starting {} v{}", APP_NAME, VERSION);
    match &config_path {
        Some(path) => info!("Loaded settings from {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }
    info!(
        "Interface {}, configured networks from {}",
        config.interface,
        config.network_source.as_str()
    );

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create Tokio runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(config)) {
        Ok(()) => {
            info!("{} stopped", APP_NAME);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
