//! CLI module — Clap argument parser, output helpers, and command implementations.
//!
//! The binary is a thin operator tool over the library: it loads
//! `Settings`, builds a store through the factory, and calls the
//! `SecretStore` contract.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::errors::Result;
use crate::vault::SecretStore;

/// keystash CLI: local encrypted secret vault.
#[derive(Parser)]
#[command(name = "keystash", about = "Local encrypted secret vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault base directory (default: ~/.keystash)
    #[arg(long, env = "KEYSTASH_HOME", global = true)]
    pub base_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Store a secret (add or overwrite)
    Set {
        /// Secret name (e.g. api_token)
        name: String,
        /// Secret value (omit for interactive prompt)
        value: Option<String>,
    },

    /// Print a secret's value
    Get {
        /// Secret name
        name: String,
    },

    /// Delete a secret
    Delete {
        /// Secret name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Replace the master key (destroys every stored secret)
    ResetKey {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show backend, paths, and number of stored secrets
    Status,

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` picks the level.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A second init (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Resolve the vault base directory from `--base-dir`, `KEYSTASH_HOME`,
/// or the default under the home directory.
pub fn base_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.base_dir {
        Some(dir) => Ok(dir.clone()),
        None => crate::factory::default_base_dir(),
    }
}

/// Load settings and build the configured store.
pub fn open_store(cli: &Cli) -> Result<Box<dyn SecretStore>> {
    let base = base_dir(cli)?;
    let settings = Settings::load(&base)?;
    crate::factory::create_store(&base, &settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["keystash", "get", "api_token", "--base-dir", "/tmp/v", "-vv"]);
        assert_eq!(cli.base_dir, Some(PathBuf::from("/tmp/v")));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Get { ref name } if name == "api_token"));
    }

    #[test]
    fn explicit_base_dir_wins() {
        let cli = Cli::parse_from(["keystash", "--base-dir", "/srv/vault", "status"]);
        assert_eq!(base_dir(&cli).unwrap(), PathBuf::from("/srv/vault"));
    }

    #[test]
    fn completions_takes_a_known_shell() {
        let cli = Cli::parse_from(["keystash", "completions", "zsh"]);
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Zsh }));
        assert!(Cli::try_parse_from(["keystash", "completions", "csh"]).is_err());
    }
}
