use crate::cli::{prompt, CliContext};
use crate::core::audit_log::AuditEvent;
use crate::core::generator::GeneratorOptions;
use crate::core::{config, strength};
use crate::error::Error;
use crate::models::config::GeneratorSection;
use crate::models::policy::PolicySection;
use anyhow::{bail, Context, Result};
use clap::Args;
use zeroize::Zeroizing;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Password length (default: 12, or generator.length from config)
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Leave out uppercase letters
    #[arg(long)]
    pub no_uppercase: bool,

    /// Leave out digits
    #[arg(long)]
    pub no_digits: bool,

    /// Leave out special symbols
    #[arg(long)]
    pub no_special: bool,

    /// Save the password to the store (prompts for service, username, master password)
    #[arg(long)]
    pub save: bool,
}

impl GenerateArgs {
    /// Merge flags over the config defaults. Flags can only disable classes.
    fn options(&self, defaults: &GeneratorSection) -> GeneratorOptions {
        GeneratorOptions {
            length: self.length.unwrap_or(defaults.length),
            uppercase: defaults.uppercase && !self.no_uppercase,
            digits: defaults.digits && !self.no_digits,
            special: defaults.special && !self.no_special,
        }
    }
}

fn validate_length(length: usize, policy: &PolicySection) -> Result<()> {
    if !policy.is_length_allowed(length) {
        bail!(
            "password length must be between {} and {} characters (got {})",
            policy.min_length,
            policy.max_length,
            length
        );
    }
    Ok(())
}

/// Lines shown after generating a password.
pub fn report(password: &str) -> Vec<String> {
    vec![
        format!("Password: {}", password),
        format!("Length: {}", password.chars().count()),
        format!("Strength: {}", strength::score(password)),
    ]
}

pub fn run(ctx: &CliContext, args: GenerateArgs) -> Result<()> {
    let options = args.options(&ctx.config.generator);
    validate_length(options.length, &ctx.config.policy)?;

    let generator = config::generator(&ctx.config)?;
    let password = Zeroizing::new(generator.generate(&options)?);

    for line in report(&password) {
        println!("{}", line);
    }

    if args.save {
        save(ctx, &password)?;
    }
    Ok(())
}

fn save(ctx: &CliContext, password: &str) -> Result<()> {
    let service = prompt::text(ctx.non_interactive, "Service name")?;
    let username = prompt::text(ctx.non_interactive, "Username")?;
    let master = prompt::secret(ctx.non_interactive, "Master password")?;

    let mut store = ctx.open_store()?;
    match store.store(&service, &username, password, &master) {
        Ok(()) => {
            ctx.audit(AuditEvent::ok("store", &service));
            println!("Password for {} saved!", service);
            Ok(())
        }
        Err(e) => {
            ctx.audit(AuditEvent::failed("store", &service, e.to_string()));
            match e {
                Error::WrongMasterSecret => bail!("save failed: wrong master password"),
                Error::ServiceAlreadyExists(name) => {
                    bail!("save failed: service '{}' already exists", name)
                }
                other => Err(other).context("save failed"),
            }
        }
    }
}
