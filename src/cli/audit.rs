//! Audit trail viewer and chain verifier.

use crate::cli::CliContext;
use crate::core::audit_log::{self, AuditEntry};
use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};

#[derive(Subcommand, Debug)]
pub enum AuditCommand {
    /// Show recent audit entries
    Show(AuditShowArgs),
    /// Verify the hash chain of the audit log
    Verify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuditFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct AuditShowArgs {
    /// Show only the last N entries
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = AuditFormat::Text)]
    pub format: AuditFormat,
}

pub fn run(ctx: &CliContext, cmd: AuditCommand) -> Result<()> {
    match cmd {
        AuditCommand::Show(args) => show(ctx, args),
        AuditCommand::Verify => verify(ctx),
    }
}

fn show(ctx: &CliContext, args: AuditShowArgs) -> Result<()> {
    let entries = audit_log::read_log(&ctx.paths, args.limit)?;

    if args.format == AuditFormat::Json {
        let json = serde_json::to_string_pretty(&entries).context("serialize audit entries")?;
        println!("{}", json);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No audit entries ({})", ctx.paths.audit_log.display());
        return Ok(());
    }
    for entry in &entries {
        println!("{}", format_entry(entry));
    }
    Ok(())
}

fn format_entry(entry: &AuditEntry) -> String {
    let status = if entry.success { "ok" } else { "FAILED" };
    let mut line = format!(
        "{} {:<7} {:<6} {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.action,
        status,
        entry.actor
    );
    if let Some(service) = &entry.service {
        line.push_str(&format!(" service={}", service));
    }
    if let Some(error) = &entry.error {
        line.push_str(&format!(" error=\"{}\"", error));
    }
    line
}

fn verify(ctx: &CliContext) -> Result<()> {
    let (total, errors) = audit_log::verify_chain(&ctx.paths)?;
    if errors.is_empty() {
        println!("Audit chain OK: {} entries", total);
        return Ok(());
    }
    for e in &errors {
        println!("  [FAIL] {}", e);
    }
    bail!("audit chain broken: {} problem(s) in {} entries", errors.len(), total);
}
