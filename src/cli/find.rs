use crate::cli::CliContext;
use crate::core::audit_log::AuditEvent;
use crate::models::credential::ServiceRecord;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FindFormat {
    Text,
    Json,
    Table,
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Service name or part of it (case-insensitive)
    pub service: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = FindFormat::Text)]
    pub format: FindFormat,
}

#[derive(Serialize)]
struct FoundItem<'a> {
    service: &'a str,
    username: &'a str,
}

pub fn run(ctx: &CliContext, args: FindArgs) -> Result<()> {
    let store = ctx.open_store()?;
    let results = store.find_by_service_substring(&args.service);
    ctx.audit(AuditEvent::ok("find", &args.service));

    match args.format {
        FindFormat::Text => {
            for line in render_text(&results) {
                println!("{}", line);
            }
        }
        FindFormat::Json => {
            let items: Vec<_> = results
                .iter()
                .map(|(service, record)| FoundItem {
                    service,
                    username: &record.username,
                })
                .collect();
            let json = serde_json::to_string_pretty(&items).context("serialize results")?;
            println!("{}", json);
        }
        FindFormat::Table => {
            if results.is_empty() {
                println!("No services found");
                return Ok(());
            }
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec![
                Cell::new("Service").add_attribute(Attribute::Bold),
                Cell::new("Username").add_attribute(Attribute::Bold),
            ]);
            for (service, record) in &results {
                table.add_row(vec![service.as_str(), record.username.as_str()]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

/// `service: username` lines under a count header, or a not-found message.
pub fn render_text(results: &BTreeMap<String, ServiceRecord>) -> Vec<String> {
    if results.is_empty() {
        return vec!["No services found".to_string()];
    }
    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(format!("Found {} services:", results.len()));
    for (service, record) in results {
        lines.push(format!("  {}: {}", service, record.username));
    }
    lines
}
