//! CLI command definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::markdown::MarkdownMode;
use crate::theme::Theme;
use crate::view::SortOrder;

/// folio - build a themed GitHub profile dashboard page
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Override config file location
    #[arg(long, global = true, env = "FOLIO_CONFIG", hide_env = true)]
    pub config: Option<PathBuf>,

    /// Override the directory holding persisted theme, token and cache slots
    #[arg(long, global = true, env = "FOLIO_STORE_DIR", hide_env = true)]
    pub store_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, env = "FOLIO_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch (or reuse cached) profile data and write the dashboard page
    Build(BuildArgs),

    /// Show or change the page theme
    #[command(subcommand)]
    Theme(ThemeCommands),

    /// Manage the GitHub token sent with API requests
    #[command(subcommand)]
    Token(TokenCommands),

    /// Inspect or clear the cached dashboard data
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Display version information
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// GitHub username
    #[arg(long, short, env = "FOLIO_USERNAME", hide_env = true)]
    pub username: Option<String>,

    /// Repository order
    #[arg(long, short, value_enum, default_value_t = SortOrder::Updated)]
    pub sort: SortOrder,

    /// README conversion strategy
    #[arg(long, value_enum, env = "FOLIO_MARKDOWN", hide_env = true)]
    pub markdown: Option<MarkdownMode>,

    /// Output file
    #[arg(long, short, env = "FOLIO_OUTPUT", hide_env = true)]
    pub output: Option<PathBuf>,

    /// API base URL
    #[arg(long, env = "FOLIO_API_BASE", hide_env = true)]
    pub api_base: Option<String>,

    /// Ignore cached data and fetch again
    #[arg(long)]
    pub refresh: bool,
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set the theme explicitly
    Set {
        #[arg(value_enum)]
        theme: Theme,
    },
}

#[derive(Subcommand, Debug)]
pub enum TokenCommands {
    /// Save a token for future requests
    Set { token: String },
    /// Remove the saved token
    Clear,
    /// Show which token is in use (masked)
    Show,
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show the cached entry's age and contents summary
    Show,
    /// Remove the cached entry
    Clear,
}
