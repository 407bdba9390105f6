//! Advisory flock(2) locks guarding read-modify-write of shared files.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// An exclusive lock on a sidecar `.lock` file. Released on drop.
#[derive(Debug)]
pub struct FileLock {
    _file: File,
}

impl FileLock {
    /// Lock file path used for `target`: the target path with `.lock` appended.
    pub fn lock_path_for(target: &Path) -> PathBuf {
        let mut name = target.as_os_str().to_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Block until the lock at `path` is held.
    pub fn exclusive(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
        file.lock_exclusive()?;
        Ok(Self { _file: file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn is_locked_elsewhere(path: &Path) -> bool {
        let other = OpenOptions::new().write(true).open(path).unwrap();
        match other.try_lock_exclusive() {
            Ok(()) => {
                other.unlock().unwrap();
                false
            }
            Err(_) => true,
        }
    }

    #[test]
    fn test_lock_path_appends_suffix() {
        assert_eq!(
            FileLock::lock_path_for(Path::new("/data/passwords.json")),
            PathBuf::from("/data/passwords.json.lock")
        );
    }

    #[test]
    fn test_exclusive_creates_lock_file() {
        let dir = TempDir::new().unwrap();
        let lock_path = dir.path().join("store.lock");
        let _lock = FileLock::exclusive(&lock_path).unwrap();
        assert!(lock_path.exists());
    }

    #[test]
    fn test_held_then_released_on_drop() {
        let dir = TempDir::new().unwrap();
        let lock_path = dir.path().join("store.lock");
        let lock = FileLock::exclusive(&lock_path).unwrap();
        assert!(is_locked_elsewhere(&lock_path));
        drop(lock);
        assert!(!is_locked_elsewhere(&lock_path));
    }
}
