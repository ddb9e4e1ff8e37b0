//! Plinth CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "plinth")]
#[command(version)]
#[command(about = "Static landing page build tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site once
    Build {
        /// Site root directory (defaults to the current directory)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Build the site, serve it, and rebuild on change
    Serve {
        /// Site root directory (defaults to the current directory)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Port to listen on (defaults to the PORT environment variable,
        /// then 5173)
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Serve only, without rebuilding on change
        #[arg(long)]
        no_watch: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plinth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { root } => commands::build::execute(commands::build::BuildArgs { root }),
        Commands::Serve {
            root,
            port,
            host,
            no_watch,
        } => commands::serve::execute(commands::serve::ServeArgs {
            root,
            port,
            host,
            no_watch,
        }),
    }
}
