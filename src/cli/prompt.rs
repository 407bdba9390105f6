//! Reading service names and secrets from the terminal or stdin.
//!
//! In non-interactive mode each prompt consumes one line of stdin, so
//! automation can pipe answers in prompt order.

use crate::constants;
use anyhow::{bail, Context, Result};
use dialoguer::{Input, Password};
use std::io::BufRead;
use zeroize::Zeroizing;

pub fn text(non_interactive: bool, prompt: &str) -> Result<String> {
    let value = if non_interactive {
        read_line(prompt)?.to_string()
    } else {
        Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("read {}", prompt.to_lowercase()))?
    };
    let value = value.trim().to_string();
    if value.is_empty() {
        bail!("{} cannot be empty", prompt.to_lowercase());
    }
    Ok(value)
}

pub fn secret(non_interactive: bool, prompt: &str) -> Result<Zeroizing<String>> {
    let value = if non_interactive {
        read_line(prompt)?
    } else {
        Zeroizing::new(
            Password::new()
                .with_prompt(prompt)
                .allow_empty_password(false)
                .interact()
                .with_context(|| format!("read {}", prompt.to_lowercase()))?,
        )
    };
    if value.len() > constants::MAX_SECRET_SIZE {
        bail!(
            "{} exceeds maximum size ({} bytes, max {} bytes)",
            prompt.to_lowercase(),
            value.len(),
            constants::MAX_SECRET_SIZE
        );
    }
    Ok(value)
}

fn read_line(prompt: &str) -> Result<Zeroizing<String>> {
    let mut buf = Zeroizing::new(String::new());
    let read = std::io::stdin()
        .lock()
        .read_line(&mut buf)
        .with_context(|| format!("read {} from stdin", prompt.to_lowercase()))?;
    if read == 0 {
        bail!("stdin closed before {} was provided", prompt.to_lowercase());
    }
    let trimmed_len = buf.trim_end_matches(['\r', '\n']).len();
    buf.truncate(trimmed_len);
    Ok(buf)
}
