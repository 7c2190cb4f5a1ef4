mod client;
mod commands;
mod config;
mod form;
mod models;
mod page;
mod slots;
#[cfg(test)]
mod test_support;
mod web;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use client::{BackendClient, InterviewApi};
use form::{Field, Level};
use models::{Config, ServerConfig};

/// Interview scheduler: browse interview availability and request an interview.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print detailed API responses
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the schedule page server
    Serve {
        /// Path to config file
        #[arg(short = 'c', long, default_value = "config.toml")]
        config: PathBuf,

        /// Listen address (e.g. "0.0.0.0:3009"), overrides config
        #[arg(short = 'a', long)]
        addr: Option<String>,

        /// Override backend base URL from config
        #[arg(long)]
        backend_url: Option<String>,
    },

    /// List available interview slots for a field and level
    ///
    /// Example:
    ///   slots --field backend --level mid
    Slots {
        #[arg(short = 'f', long, value_enum)]
        field: Field,

        #[arg(short = 'l', long, value_enum)]
        level: Level,

        /// Path to config file
        #[arg(short = 'c', long, default_value = "config.toml")]
        config: PathBuf,

        /// Override backend base URL from config
        #[arg(long)]
        backend_url: Option<String>,
    },

    /// Request an interview in one of the available slots
    ///
    /// Example:
    ///   request --field backend --level mid --slot s1 --title "Backend interview"
    Request {
        #[arg(short = 'f', long, value_enum)]
        field: Field,

        #[arg(short = 'l', long, value_enum)]
        level: Level,

        /// Slot ID as shown by `slots`
        #[arg(short = 's', long)]
        slot: String,

        /// Interview title
        #[arg(short = 't', long)]
        title: String,

        /// Optional notes for the interviewer
        #[arg(short = 'n', long, default_value = "")]
        notes: String,

        /// Path to config file
        #[arg(short = 'c', long, default_value = "config.toml")]
        config: PathBuf,

        /// Override backend base URL from config
        #[arg(long)]
        backend_url: Option<String>,
    },
}

fn backend(cfg: Option<&Config>, backend_url: Option<&str>) -> Result<Arc<dyn InterviewApi>> {
    let backend = config::resolve_backend(cfg, backend_url)?;
    Ok(Arc::new(BackendClient::new(&backend)?))
}

fn backend_from(path: &Path, backend_url: Option<&str>) -> Result<Arc<dyn InterviewApi>> {
    let cfg = config::load_optional(path, backend_url)?;
    backend(cfg.as_ref(), backend_url)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Command::Serve {
            config,
            addr,
            backend_url,
        } => {
            let cfg = config::load_optional(&config, backend_url.as_deref())?;
            let addr = addr
                .or_else(|| cfg.as_ref().map(|c| c.server.addr.clone()))
                .unwrap_or_else(|| ServerConfig::default().addr);
            let api = backend(cfg.as_ref(), backend_url.as_deref())?;
            web::serve(api, &addr).await?;
        }
        Command::Slots {
            field,
            level,
            config,
            backend_url,
        } => {
            let api = backend_from(&config, backend_url.as_deref())?;
            commands::run_slots(api, field, level).await?;
        }
        Command::Request {
            field,
            level,
            slot,
            title,
            notes,
            config,
            backend_url,
        } => {
            let api = backend_from(&config, backend_url.as_deref())?;
            commands::run_request(
                api,
                commands::InterviewArgs {
                    field,
                    level,
                    slot,
                    title,
                    notes,
                },
            )
            .await?;
        }
    }

    Ok(())
}
