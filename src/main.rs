//! Playbill - theatre site server
//!
//! Serves the embedded site together with its JSON endpoints (shows,
//! gallery, funding stats, contact autoreply), and checks content files.
//!
//! # Usage
//!
//! ```bash
//! # Serve with the platform config (~/.config/Playbill/config.toml)
//! playbill serve
//!
//! # Override the listener and content directory
//! playbill serve --port 8080 --content ./content
//!
//! # Check shows.toml and gallery.toml
//! playbill validate --content ./content
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playbill::config::Config;
use playbill::constants::{APP_BINARY_NAME, APP_NAME};
use playbill::services::ContentService;
use playbill::web;

/// Playbill - theatre site server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the site and its API
    Serve(ServeArgs),
    /// Check the content files and report problems
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Host to bind to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Content directory with shows.toml and gallery.toml (overrides config)
    #[arg(short, long, value_name = "DIR")]
    content: Option<PathBuf>,

    /// Config file to use instead of the platform config
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Content directory (defaults to the configured one)
    #[arg(short, long, value_name = "DIR")]
    content: Option<PathBuf>,

    /// Config file to use instead of the platform config
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn validate(args: &ValidateArgs) -> anyhow::Result<bool> {
    let config = load_config(args.config.as_ref())?;
    let dir = args.content.clone().unwrap_or(config.content.dir);
    let service = ContentService::new(&dir);

    let problems = service.validate();
    if problems.is_empty() {
        println!("✓ Content in {} is valid", dir.display());
        return Ok(true);
    }

    eprintln!("✗ Found {} problem(s) in {}:", problems.len(), dir.display());
    for problem in &problems {
        eprintln!("  - {problem}");
    }
    Ok(false)
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_ref())?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(content) = args.content {
        config.content.dir = content;
    }
    config.validate().context("Invalid configuration")?;

    info!("Content directory: {}", config.content.dir.display());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    web::run_server(config, addr).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = match cli.command {
        Command::Serve(args) => serve(args).await.map(|()| true),
        Command::Validate(args) => validate(&args),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{APP_NAME}: {e:#}");
            eprintln!("Run '{APP_BINARY_NAME} --help' for usage.");
            ExitCode::FAILURE
        }
    }
}
