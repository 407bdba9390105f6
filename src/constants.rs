//! Centralized constants for defaults, permissions, and limits.

/// Default store file, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "passwords.json";

/// Config file name, looked up next to the store file.
pub const CONFIG_FILE_NAME: &str = "passkeep.toml";

/// Audit log file name, kept next to the store file.
pub const AUDIT_LOG_NAME: &str = "passkeep-audit.log";

/// Environment variable overriding the store path.
pub const STORE_ENV: &str = "PASSKEEP_STORE";

/// Environment variable overriding the config path.
pub const CONFIG_ENV: &str = "PASSKEEP_CONFIG";

/// Permission mode for the store file.
pub const STORE_FILE_MODE: u32 = 0o600;

/// Permission mode for the audit log.
pub const AUDIT_LOG_MODE: u32 = 0o600;

/// Default generated password length.
pub const DEFAULT_LENGTH: usize = 12;

/// Shortest length the CLI accepts for `generate`.
pub const MIN_CLI_LENGTH: usize = 8;

/// Longest length the CLI accepts for `generate`.
pub const MAX_CLI_LENGTH: usize = 50;

/// Maximum secret size accepted from a prompt or stdin (64 KiB).
pub const MAX_SECRET_SIZE: usize = 65_536;

pub const LOWERCASE_CHARS: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGIT_CHARS: &str = "0123456789";
pub const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";
