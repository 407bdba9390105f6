//! CLI routing and command dispatch.

use crate::core::audit_log::{self, AuditEvent};
use crate::core::paths::StorePaths;
use crate::core::store::CredentialStore;
use crate::models::config::ConfigFile;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, warn};

pub mod audit;
pub mod find;
pub mod generate;
pub mod prompt;
pub mod verify;

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub paths: StorePaths,
    pub non_interactive: bool,
    pub config: ConfigFile,
}

impl CliContext {
    pub fn open_store(&self) -> Result<CredentialStore> {
        CredentialStore::open_with_lock(&self.paths.store, &self.paths.store_lock)
            .with_context(|| format!("open store {}", self.paths.store.display()))
    }

    /// Append an audit entry if auditing is enabled. Failures only warn.
    pub fn audit(&self, event: AuditEvent) {
        if !self.config.policy.audit {
            return;
        }
        if let Err(e) = audit_log::record(&self.paths, event) {
            warn!("audit log failed: {:#}", e);
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "passkeep", version, about = "Password generator and local credential keeper")]
pub struct Cli {
    /// Store file (default: $PASSKEEP_STORE, else ./passwords.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Config file (default: $PASSKEEP_CONFIG, else passkeep.toml next to the store)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Read prompt answers from stdin, one line each
    #[arg(long, global = true, env = "PASSKEEP_NON_INTERACTIVE")]
    pub non_interactive: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let paths = StorePaths::resolve(self.store, self.config);
        debug!(%paths, config = %paths.config.display(), "resolved paths");

        let config = crate::core::config::load(&paths.config)?;

        let ctx = CliContext {
            paths,
            non_interactive: self.non_interactive,
            config,
        };

        match self.command {
            Commands::Generate(args) => generate::run(&ctx, args),
            Commands::Find(args) => find::run(&ctx, args),
            Commands::Verify(args) => verify::run(&ctx, args),
            Commands::Audit { command } => audit::run(&ctx, command),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a password, optionally saving it to the store
    Generate(generate::GenerateArgs),
    /// Find stored services by name
    Find(find::FindArgs),
    /// Check a password against the stored one
    Verify(verify::VerifyArgs),
    /// View or verify the audit trail
    Audit {
        #[command(subcommand)]
        command: audit::AuditCommand,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "passkeep",
            "generate",
            "--length",
            "20",
            "--no-special",
            "--save",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.length, Some(20));
                assert!(args.no_special);
                assert!(!args.no_digits);
                assert!(args.save);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_store_after_subcommand() {
        let cli =
            Cli::try_parse_from(["passkeep", "find", "git", "--store", "/tmp/s.json", "-vv"]).unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["passkeep", "doctor"]).is_err());
    }

    #[test]
    fn test_verify_requires_service() {
        assert!(Cli::try_parse_from(["passkeep", "verify"]).is_err());
    }
}
