//! Append-only, hash-chained audit trail of store operations.
//!
//! Entries record what was attempted and whether it succeeded. They never
//! contain passwords, master secrets, or their digests.

use crate::constants;
use crate::core::file_lock::FileLock;
use crate::core::paths::StorePaths;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::warn;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

const HASH_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub actor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_version: Option<u8>,
}

/// One operation to be recorded.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub action: &'static str,
    pub service: Option<String>,
    pub success: bool,
    pub error: Option<String>,
}

impl AuditEvent {
    pub fn ok(action: &'static str, service: impl Into<String>) -> Self {
        Self {
            action,
            service: Some(service.into()),
            success: true,
            error: None,
        }
    }

    pub fn failed(action: &'static str, service: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            action,
            service: Some(service.into()),
            success: false,
            error: Some(error.into()),
        }
    }
}

fn detect_actor() -> String {
    if let Ok(user) = std::env::var("SUDO_USER") {
        if !user.is_empty() {
            return format!("{}(sudo)", user);
        }
    }
    std::env::var("USER").unwrap_or_else(|_| "unknown".to_string())
}

/// Record an event with the actor taken from the environment.
pub fn record(paths: &StorePaths, event: AuditEvent) -> Result<()> {
    record_as(paths, event, &detect_actor())
}

pub fn record_as(paths: &StorePaths, event: AuditEvent, actor: &str) -> Result<()> {
    let _lock = FileLock::exclusive(&paths.audit_lock)
        .with_context(|| format!("lock audit log {}", paths.audit_lock.display()))?;
    let prev_hash = last_entry_hash(&paths.audit_log)?;

    let mut entry = AuditEntry {
        timestamp: Utc::now(),
        action: event.action.to_string(),
        actor: actor.to_string(),
        service: event.service,
        success: event.success,
        error: event.error,
        prev_hash,
        entry_hash: None,
        hash_version: Some(HASH_VERSION),
    };
    entry.entry_hash = Some(compute_entry_hash(&entry)?);

    let line = serde_json::to_string(&entry).context("serialize audit entry")?;
    append_line(&paths.audit_log, &line)
}

/// SHA-256 over canonical JSON of the entry without its own hash.
fn compute_entry_hash(entry: &AuditEntry) -> Result<String> {
    let mut value = serde_json::to_value(entry).context("serialize for hash")?;
    if let Some(obj) = value.as_object_mut() {
        obj.remove("entry_hash");
    }
    let canonical = serde_json::to_string(&canonicalize_value(&value))
        .context("serialize canonical json")?;
    Ok(format!("{:064x}", Sha256::digest(canonical.as_bytes())))
}

/// Recursively sort object keys so hashing does not depend on field order.
fn canonicalize_value(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = serde_json::Map::new();
            for k in keys {
                out.insert(k.clone(), canonicalize_value(&map[k]));
            }
            serde_json::Value::Object(out)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(canonicalize_value).collect())
        }
        other => other.clone(),
    }
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open audit log {}", path.display()))?;
    writeln!(file, "{}", line).context("write audit entry")?;

    #[cfg(unix)]
    {
        let perm = fs::Permissions::from_mode(constants::AUDIT_LOG_MODE);
        fs::set_permissions(path, perm).context("set audit log permissions")?;
    }
    Ok(())
}

fn last_entry_hash(path: &Path) -> Result<Option<String>> {
    let entries = read_entries(path)?;
    Ok(entries.last().and_then(|e| e.entry_hash.clone()))
}

fn read_entries(path: &Path) -> Result<Vec<AuditEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = fs::File::open(path).with_context(|| format!("open audit log {}", path.display()))?;
    let mut entries = Vec::new();
    let mut malformed = 0usize;
    for line in BufReader::new(file).lines() {
        let line = line.context("read audit log line")?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<AuditEntry>(trimmed) {
            Ok(entry) => entries.push(entry),
            Err(_) => malformed += 1,
        }
    }
    if malformed > 0 {
        warn!(malformed, path = %path.display(), "skipped malformed audit entries");
    }
    Ok(entries)
}

/// Read audit entries, keeping only the newest `limit` if given.
pub fn read_log(paths: &StorePaths, limit: Option<usize>) -> Result<Vec<AuditEntry>> {
    let mut entries = read_entries(&paths.audit_log)?;
    if let Some(limit) = limit {
        if entries.len() > limit {
            entries = entries.split_off(entries.len() - limit);
        }
    }
    Ok(entries)
}

/// Check every entry's hash and its link to the previous entry.
/// Returns the entry count and one message per problem found.
pub fn verify_chain(paths: &StorePaths) -> Result<(usize, Vec<String>)> {
    let entries = read_entries(&paths.audit_log)?;
    let mut errors = Vec::new();
    let mut prev: Option<&String> = None;

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 && entry.prev_hash.as_ref() != prev {
            errors.push(format!(
                "entry {}: prev_hash mismatch (expected {:?}, got {:?})",
                i + 1,
                prev,
                entry.prev_hash
            ));
        }
        match &entry.entry_hash {
            Some(stored) => {
                let computed = compute_entry_hash(entry)?;
                if &computed != stored {
                    errors.push(format!("entry {}: entry_hash mismatch (tampered?)", i + 1));
                }
            }
            None => errors.push(format!("entry {}: missing entry_hash", i + 1)),
        }
        prev = entry.entry_hash.as_ref();
    }

    Ok((entries.len(), errors))
}
