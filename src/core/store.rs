//! Master-secret gated credential store backed by one JSON file.

use crate::core::digest::digest;
use crate::core::file_lock::FileLock;
use crate::core::store_file;
use crate::error::{Error, PersistenceError, Result};
use crate::models::credential::{ServiceRecord, StoreFile};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Credential records for one store file.
///
/// The first successful [`store`](Self::store) binds the master secret; every
/// later `store` and `verify` must present the same secret.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    lock_path: PathBuf,
    data: StoreFile,
}

impl CredentialStore {
    /// Load the store at `path`. A missing file opens an empty, unbound store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let lock_path = FileLock::lock_path_for(&path);
        Self::open_with_lock(path, lock_path)
    }

    /// Like [`open`](Self::open), but writers serialize on `lock_path`.
    pub fn open_with_lock(
        path: impl Into<PathBuf>,
        lock_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let path = path.into();
        let lock_path = lock_path.into();
        let data = store_file::load(&path)?;
        debug!(
            path = %path.display(),
            lock = %lock_path.display(),
            services = data.passwords.len(),
            bound = data.master_hash.is_some(),
            "opened credential store"
        );
        Ok(Self {
            path,
            lock_path,
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a master secret has been bound.
    pub fn is_bound(&self) -> bool {
        self.data.master_hash.is_some()
    }

    pub fn len(&self) -> usize {
        self.data.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.passwords.is_empty()
    }

    /// Store a new service record and persist the store before returning.
    ///
    /// Fails with [`Error::WrongMasterSecret`] if a different master secret is
    /// bound, and [`Error::ServiceAlreadyExists`] if `service` is already
    /// stored. On any error the store is left unchanged.
    pub fn store(
        &mut self,
        service: &str,
        username: &str,
        password: &str,
        master_secret: &str,
    ) -> Result<()> {
        let dir = store_file::parent_dir(&self.path);
        fs::create_dir_all(dir).map_err(|e| PersistenceError::io("create dir", dir, e))?;
        let _lock = FileLock::exclusive(&self.lock_path)
            .map_err(|e| PersistenceError::io("acquire lock", &self.lock_path, e))?;

        // Another process may have written since open.
        let on_disk = store_file::load(&self.path)?;

        let master_hash = digest(master_secret);
        if matches!(&on_disk.master_hash, Some(bound) if *bound != master_hash) {
            warn!(service, "store rejected: wrong master secret");
            self.data = on_disk;
            return Err(Error::WrongMasterSecret);
        }
        if on_disk.passwords.contains_key(service) {
            warn!(service, "store rejected: service already exists");
            self.data = on_disk;
            return Err(Error::ServiceAlreadyExists(service.to_string()));
        }

        // Binding only happens together with a record that gets saved.
        let mut next = on_disk;
        if next.master_hash.is_none() {
            info!(path = %self.path.display(), "binding master secret");
            next.master_hash = Some(master_hash);
        }
        next.passwords.insert(
            service.to_string(),
            ServiceRecord {
                username: username.to_string(),
                password_hash: digest(password),
            },
        );
        store_file::save(&self.path, &next)?;
        self.data = next;

        info!(service, services = self.data.passwords.len(), "stored credential");
        Ok(())
    }

    /// True only if the master secret matches and `password` is the stored one.
    pub fn verify(&self, service: &str, password: &str, master_secret: &str) -> bool {
        let Some(bound) = &self.data.master_hash else {
            debug!(service, "verify: no master secret bound");
            return false;
        };
        if *bound != digest(master_secret) {
            debug!(service, "verify: wrong master secret");
            return false;
        }
        match self.data.passwords.get(service) {
            Some(record) => record.password_hash == digest(password),
            None => {
                debug!(service, "verify: service not found");
                false
            }
        }
    }

    /// Services whose name contains `query`, ignoring case.
    pub fn find_by_service_substring(&self, query: &str) -> BTreeMap<String, ServiceRecord> {
        let needle = query.to_lowercase();
        self.data
            .passwords
            .iter()
            .filter(|(name, _)| name.to_lowercase().contains(&needle))
            .map(|(name, record)| (name.clone(), record.clone()))
            .collect()
    }
}
