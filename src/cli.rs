use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// wikidoc - parse wiki articles into structured rich-message documents
#[derive(Parser)]
#[command(name = "wikidoc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse every article and report the ones that fail
    Check {
        /// Article directories to check [default: articles.root from config]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Parse without emoji and channel substitutions
        #[arg(long)]
        freestanding: bool,
    },

    /// Parse a single article without registering it
    Preview {
        /// Article file, or `-` for stdin
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Parse without emoji and channel substitutions
        #[arg(long)]
        freestanding: bool,
    },

    /// Show a loaded article by name or alias
    Show {
        /// Article name or alias
        name: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// View wikidoc configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Get a config value
    Get {
        /// The key to get (e.g., articles.root, channels.resources)
        key: String,
    },

    /// List all config values
    List,

    /// Print path to config file
    Path,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON
    Json,
}
