//! Check a password against the stored digest.

use crate::cli::{prompt, CliContext};
use crate::core::audit_log::AuditEvent;
use crate::core::store::CredentialStore;
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Service name (exact match)
    pub service: String,
}

pub fn run(ctx: &CliContext, args: VerifyArgs) -> Result<()> {
    let store = ctx.open_store()?;
    let matched = check(ctx.non_interactive, &store, &args.service)?;

    if matched {
        ctx.audit(AuditEvent::ok("verify", &args.service));
        println!("Password is correct!");
        Ok(())
    } else {
        ctx.audit(AuditEvent::failed("verify", &args.service, "mismatch"));
        println!("Password is incorrect!");
        std::process::exit(1);
    }
}

/// Prompt for the candidate and master password. Both are zeroed on return,
/// before the caller can exit.
fn check(non_interactive: bool, store: &CredentialStore, service: &str) -> Result<bool> {
    let password = prompt::secret(non_interactive, "Password to verify")?;
    let master = prompt::secret(non_interactive, "Master password")?;
    Ok(store.verify(service, &password, &master))
}
