//! Store, lock, audit, and config path resolution.

use crate::constants;
use crate::core::file_lock::FileLock;
use crate::core::store_file::parent_dir;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct StorePaths {
    pub store: PathBuf,
    pub store_lock: PathBuf,
    pub audit_log: PathBuf,
    pub audit_lock: PathBuf,
    pub config: PathBuf,
}

impl StorePaths {
    /// Resolve paths from CLI args, then env vars, then defaults.
    ///
    /// The store defaults to `passwords.json` in the working directory; the
    /// config and audit log live beside the store unless overridden.
    pub fn resolve(store_arg: Option<PathBuf>, config_arg: Option<PathBuf>) -> Self {
        let store = store_arg
            .or_else(|| env::var_os(constants::STORE_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_STORE_FILE));
        let mut paths = Self::from_store(store);
        if let Some(config) =
            config_arg.or_else(|| env::var_os(constants::CONFIG_ENV).map(PathBuf::from))
        {
            paths.config = config;
        }
        paths
    }

    pub fn from_store(store: PathBuf) -> Self {
        let dir = parent_dir(&store).to_path_buf();
        let audit_log = dir.join(constants::AUDIT_LOG_NAME);
        Self {
            store_lock: FileLock::lock_path_for(&store),
            audit_lock: FileLock::lock_path_for(&audit_log),
            config: dir.join(constants::CONFIG_FILE_NAME),
            audit_log,
            store,
        }
    }
}

impl std::fmt::Display for StorePaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "store@{}", self.store.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_store() {
        let paths = StorePaths::from_store(PathBuf::from("/data/passwords.json"));
        assert_eq!(paths.store, PathBuf::from("/data/passwords.json"));
        assert_eq!(paths.store_lock, PathBuf::from("/data/passwords.json.lock"));
        assert_eq!(paths.audit_log, PathBuf::from("/data/passkeep-audit.log"));
        assert_eq!(paths.audit_lock, PathBuf::from("/data/passkeep-audit.log.lock"));
        assert_eq!(paths.config, PathBuf::from("/data/passkeep.toml"));
    }

    #[test]
    fn test_bare_store_name_uses_working_directory() {
        let paths = StorePaths::from_store(PathBuf::from("passwords.json"));
        assert_eq!(paths.config, PathBuf::from("./passkeep.toml"));
    }

    #[test]
    fn test_explicit_args_win() {
        let paths = StorePaths::resolve(
            Some(PathBuf::from("/a/store.json")),
            Some(PathBuf::from("/b/custom.toml")),
        );
        assert_eq!(paths.store, PathBuf::from("/a/store.json"));
        assert_eq!(paths.config, PathBuf::from("/b/custom.toml"));
        assert_eq!(paths.audit_log, PathBuf::from("/a/passkeep-audit.log"));
    }

    #[test]
    fn test_display() {
        let paths = StorePaths::from_store(PathBuf::from("/data/passwords.json"));
        assert_eq!(paths.to_string(), "store@/data/passwords.json");
    }
}
