//! Plinth CLI - prerender static pages from a component catalog.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use plinth_components::RawValue;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "plinth")]
#[command(about = "Prerender static pages from a component catalog")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to plinth.toml config file
    #[arg(short, long, default_value = "plinth.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default plinth.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,
    },

    /// Prerender every configured page
    Build {
        /// Write to the local directory instead of remote storage
        #[arg(short, long, conflicts_with = "remote")]
        debug: bool,

        /// Upload to remote storage even when the config sets `debug`
        #[arg(long)]
        remote: bool,

        /// Local output root (defaults to config or "wwwroot")
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Keep going when a page fails
        #[arg(long)]
        continue_on_error: bool,
    },

    /// Render one component to stdout
    Render {
        /// Simple or fully-qualified component name
        component: String,

        /// Component argument, KEY=VALUE (repeatable)
        #[arg(short, long = "arg", value_parser = commands::render::parse_arg)]
        args: Vec<(String, RawValue)>,

        /// Base URL for links (defaults to config)
        #[arg(long)]
        base_url: Option<String>,

        /// Wrap each component in boundary comments
        #[arg(long)]
        annotate: bool,
    },

    /// List registered components and their parameters
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for rendered output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Build {
            debug,
            remote,
            root,
            continue_on_error,
        } => {
            let debug = if remote {
                Some(false)
            } else if debug {
                Some(true)
            } else {
                None
            };
            commands::build::run(&cli.config, debug, root, continue_on_error).await?;
        }
        Commands::Render {
            component,
            args,
            base_url,
            annotate,
        } => {
            commands::render::run(&cli.config, &component, args, base_url, annotate).await?;
        }
        Commands::List => {
            commands::list::run();
        }
    }

    Ok(())
}
