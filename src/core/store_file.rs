//! Reading and atomically replacing the JSON store file.

use crate::constants;
use crate::error::PersistenceError;
use crate::models::credential::StoreFile;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Load the store file; a missing file is an empty store.
pub fn load(path: &Path) -> Result<StoreFile, PersistenceError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StoreFile::default()),
        Err(e) => return Err(PersistenceError::io("read store", path, e)),
    };
    serde_json::from_str(&content).map_err(|source| PersistenceError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the whole record set to a temp file beside `path`, then rename over it.
pub fn save(path: &Path, store: &StoreFile) -> Result<(), PersistenceError> {
    let mut content = serde_json::to_string_pretty(store)?;
    content.push('\n');

    let parent = parent_dir(path);
    fs::create_dir_all(parent).map_err(|e| PersistenceError::io("create dir", parent, e))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".passkeep-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| PersistenceError::io("create temp file in", parent, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| PersistenceError::io("write temp store", tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| PersistenceError::io("sync temp store", tmp.path(), e))?;

    #[cfg(unix)]
    {
        let perm = fs::Permissions::from_mode(constants::STORE_FILE_MODE);
        tmp.as_file()
            .set_permissions(perm)
            .map_err(|e| PersistenceError::io("set permissions on", tmp.path(), e))?;
    }

    tmp.persist(path)
        .map_err(|e| PersistenceError::io("replace store", path, e.error))?;
    Ok(())
}

/// Directory holding `path`; `.` for a bare file name.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::credential::ServiceRecord;
    use tempfile::TempDir;

    fn sample() -> StoreFile {
        let mut store = StoreFile {
            master_hash: Some("m".repeat(64)),
            ..Default::default()
        };
        store.passwords.insert(
            "github".into(),
            ServiceRecord {
                username: "bob".into(),
                password_hash: "p".repeat(64),
            },
        );
        store
    }

    #[test]
    fn test_load_missing_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(store, StoreFile::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passwords.json");
        save(&path, &sample()).unwrap();
        assert_eq!(load(&path).unwrap(), sample());
    }

    #[test]
    fn test_save_creates_parent_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("passwords.json");
        save(&path, &sample()).unwrap();
        let names: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["passwords.json".to_string()]);
    }

    #[test]
    fn test_saved_layout_is_pretty_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passwords.json");
        save(&path, &sample()).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("{\n  \"master_hash\""));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["passwords"]["github"]["username"], "bob");
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passwords.json");
        save(&path, &sample()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, constants::STORE_FILE_MODE);
    }

    #[test]
    fn test_load_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passwords.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load(&path), Err(PersistenceError::Malformed { .. })));
    }

    #[test]
    fn test_parent_dir_of_bare_name() {
        assert_eq!(parent_dir(Path::new("passwords.json")), Path::new("."));
        assert_eq!(parent_dir(Path::new("/a/b.json")), Path::new("/a"));
    }
}
