//! Bad Chef recipe CLI.

mod commands;
mod config;
mod handlers;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{auth, fav, rate, recipe};
use tracing_subscriber::EnvFilter;

/// Bad Chef recipe platform CLI
#[derive(Parser)]
#[command(name = "badchef")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "plain")]
    format: output::OutputFormat,

    /// Backend base URL
    #[arg(long, global = true, env = "BADCHEF_BACKEND_URL")]
    backend: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage authentication
    Auth {
        #[command(subcommand)]
        action: auth::AuthAction,
    },

    /// Recipe operations
    #[command(alias = "r")]
    Recipe {
        #[command(subcommand)]
        action: recipe::RecipeAction,
    },

    /// Favorite operations
    #[command(alias = "f")]
    Fav {
        #[command(subcommand)]
        action: fav::FavAction,
    },

    /// Rating operations
    Rate {
        #[command(subcommand)]
        action: rate::RateAction,
    },

    /// Show or change configuration
    Config {
        /// Save this backend URL to the config file
        #[arg(long)]
        set_backend: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let backend = cli.backend.as_deref();

    match cli.command {
        Commands::Auth { action } => auth::handle(action, backend, cli.format).await,
        Commands::Recipe { action } => {
            recipe::handle(action, backend, cli.format, cli.verbose).await
        }
        Commands::Fav { action } => fav::handle(action, backend, cli.format).await,
        Commands::Rate { action } => rate::handle(action, backend, cli.format).await,
        Commands::Config { set_backend } => show_config(backend, set_backend),
    }
}

fn show_config(backend: Option<&str>, set_backend: Option<String>) -> Result<()> {
    let mut cfg = config::load_config()?;

    if let Some(url) = set_backend {
        cfg.backend_url = Some(url);
        config::save_config(&cfg)?;
        println!("Saved backend URL");
    }

    let client = config::build_client(backend)?;
    println!("Config file: {}", config::config_path()?.display());
    println!("Session file: {}", config::session_path()?.display());
    println!("Backend: {}", cfg.resolve_backend(backend));
    println!("Session stored: {}", client.is_authenticated());
    Ok(())
}
