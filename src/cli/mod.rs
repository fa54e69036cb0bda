//! CLI adapter for custlookup
//!
//! Drives the core flows from the command line: account setup,
//! session management, customer search and live suggestions.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |     core/        |
//! |  (domain logic)  |
//! +--------+---------+
//!          |
//!          v
//! +------------------+
//! |      cli/        |
//! | (clap adapter)   |
//! +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// custlookup - customer lookup client
///
/// Log in against the customer backend, then search customers by
/// name, email or account number.
#[derive(Parser, Debug)]
#[command(name = "custlookup")]
#[command(author = "RHOBIMD HEALTH")]
#[command(version)]
#[command(about = "Customer lookup client", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account on the backend
    Register(commands::RegisterArgs),

    /// Log in and store the session token
    Login(commands::LoginArgs),

    /// Drop the stored session
    Logout(commands::LogoutArgs),

    /// Search customers by name, email or account number
    Search(commands::SearchArgs),

    /// Live suggestions for input read line by line from stdin
    ///
    /// Each line is treated as the field's new value after a keystroke.
    Suggest(commands::SuggestArgs),

    /// Show where a page request lands after route gating
    Navigate(commands::NavigateArgs),

    /// Show the state of every session view
    Status(commands::StatusArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  custlookup completions bash > ~/.local/share/bash-completion/completions/custlookup
    ///   zsh:   custlookup completions zsh > ~/.zfunc/_custlookup
    ///   fish:  custlookup completions fish > ~/.config/fish/completions/custlookup.fish
    Completions(commands::CompletionsArgs),
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins over `--verbose` when set. JSON output gets JSON
/// log lines so both streams stay machine-readable.
pub fn init_tracing(verbose: bool, format: OutputFormat) {
    let default = if verbose {
        "custlookup=debug"
    } else {
        "custlookup=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        OutputFormat::Human => builder.try_init(),
        OutputFormat::Json => builder.json().try_init(),
    };
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    init_tracing(cli.verbose, cli.format);

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let xdg = XdgDirs::new();
    xdg.log_paths();

    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    let services = Arc::new(Services::new(config)?);

    match cli.command {
        Commands::Register(args) => commands::auth::execute_register(args, &services, cli.format).await,
        Commands::Login(args) => commands::auth::execute_login(args, &services, cli.format).await,
        Commands::Logout(args) => commands::auth::execute_logout(args, &services, cli.format),
        Commands::Search(args) => commands::search::execute(args, &services, cli.format).await,
        Commands::Suggest(args) => commands::suggest::execute(args, &services, cli.format).await,
        Commands::Navigate(args) => commands::navigate::execute(args, &services, cli.format),
        Commands::Status(args) => commands::status::execute(args, &services, cli.format),
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format),
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
