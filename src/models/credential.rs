use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stored credential for one service. Only the password digest is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub username: String,
    pub password_hash: String,
}

/// On-disk layout of the store file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_hash: Option<String>,
    #[serde(default)]
    pub passwords: BTreeMap<String, ServiceRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_parses() {
        let file: StoreFile = serde_json::from_str("{}").unwrap();
        assert!(file.master_hash.is_none());
        assert!(file.passwords.is_empty());
    }

    #[test]
    fn test_unbound_store_omits_master_hash() {
        let json = serde_json::to_string(&StoreFile::default()).unwrap();
        assert_eq!(json, r#"{"passwords":{}}"#);
    }

    #[test]
    fn test_parses_reference_layout() {
        let json = r#"{
          "master_hash": "aa",
          "passwords": {
            "github": { "username": "bob", "password_hash": "bb" }
          }
        }"#;
        let file: StoreFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.master_hash.as_deref(), Some("aa"));
        assert_eq!(file.passwords["github"].username, "bob");
        assert_eq!(file.passwords["github"].password_hash, "bb");
    }
}
