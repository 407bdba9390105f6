//! `passkeep.toml` configuration model.

use crate::constants;
use crate::models::policy::PolicySection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub generator: GeneratorSection,
    #[serde(default)]
    pub policy: PolicySection,
}

/// Defaults for `generate`; CLI flags override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSection {
    #[serde(default = "default_length")]
    pub length: usize,
    #[serde(default = "enabled")]
    pub uppercase: bool,
    #[serde(default = "enabled")]
    pub digits: bool,
    #[serde(default = "enabled")]
    pub special: bool,
    /// Replaces the built-in special symbol set.
    #[serde(default)]
    pub special_chars: Option<String>,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            length: default_length(),
            uppercase: true,
            digits: true,
            special: true,
            special_chars: None,
        }
    }
}

fn default_length() -> usize {
    constants::DEFAULT_LENGTH
}

fn enabled() -> bool {
    true
}
