use crate::core::generator::{CharacterSets, Generator};
use crate::models::config::ConfigFile;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn load(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let config: ConfigFile =
        toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))?;
    if config.policy.min_length > config.policy.max_length {
        anyhow::bail!(
            "invalid config {}: policy.min_length {} exceeds policy.max_length {}",
            path.display(),
            config.policy.min_length,
            config.policy.max_length
        );
    }
    Ok(config)
}

/// Build the generator described by the `[generator]` section.
pub fn generator(config: &ConfigFile) -> Result<Generator> {
    let sets = match config.generator.special_chars.as_deref() {
        Some(special) => CharacterSets::with_special(special).context("generator.special_chars")?,
        None => CharacterSets::default(),
    };
    Ok(Generator::new(sets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        let cfg = load(&dir.path().join("passkeep.toml")).unwrap();
        assert_eq!(cfg.generator.length, 12);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passkeep.toml");
        fs::write(&path, "[generator]\nspecial_chars = \"#$\"\n").unwrap();
        let cfg = load(&path).unwrap();
        let gen = generator(&cfg).unwrap();
        assert_eq!(gen.sets().special(), &['#', '$']);
    }

    #[test]
    fn test_inverted_length_range_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passkeep.toml");
        fs::write(&path, "[policy]\nmin_length = 30\nmax_length = 10\n").unwrap();
        assert!(load(&path).is_err());
    }

    #[test]
    fn test_empty_special_chars_rejected() {
        let mut cfg = ConfigFile::default();
        cfg.generator.special_chars = Some(String::new());
        assert!(generator(&cfg).is_err());
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passkeep.toml");
        fs::write(&path, "[generator\n").unwrap();
        let err = load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("passkeep.toml"));
    }
}
