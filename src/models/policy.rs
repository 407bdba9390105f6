//! Policy configuration for CLI operations.

use crate::constants;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicySection {
    /// Shortest password `generate` will produce.
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Longest password `generate` will produce.
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Append store/verify/find events to the audit log.
    #[serde(default = "default_audit")]
    pub audit: bool,
}

impl Default for PolicySection {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            audit: default_audit(),
        }
    }
}

impl PolicySection {
    pub fn is_length_allowed(&self, length: usize) -> bool {
        (self.min_length..=self.max_length).contains(&length)
    }
}

fn default_min_length() -> usize {
    constants::MIN_CLI_LENGTH
}

fn default_max_length() -> usize {
    constants::MAX_CLI_LENGTH
}

fn default_audit() -> bool {
    true
}
