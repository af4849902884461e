// # File Domain Store
//
// File-based implementation of DomainStore with crash recovery.
//
// ## Purpose
//
// Migration progress must survive process restarts: a crashed or failed
// run resumes at the last persisted phase. Each mutation is written
// through to disk before the engine advances.
//
// ## Crash Recovery
//
// - Atomic writes: write-then-rename
// - Corruption detection: JSON validation on load
// - Automatic backup: keeps .backup of last known good state
// - Recovery: falls back to backup if corruption detected
//
// ## File Format
//
// ```json
// {
//   "version": "1.0",
//   "domains": {
//     "example.com": {
//       "domain": "example.com",
//       "registrar": "godaddy",
//       "status": "ns_updated",
//       "zone_id": "abc123",
//       ...
//     }
//   }
// }
// ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::Error;
use crate::domain::{DomainRecord, MigrationStatus};
use crate::traits::domain_store::DomainStore;

/// Store file format version
/// Used for future migration if format changes
const STORE_FILE_VERSION: &str = "1.0";

/// File-based domain store with crash recovery
///
/// Persists records to a JSON file with atomic writes and automatic
/// corruption recovery from a `.backup` sibling.
#[derive(Debug)]
pub struct FileDomainStore {
    path: PathBuf,
    state: Arc<RwLock<FileState>>,
}

/// Internal state for the file-based store
#[derive(Debug)]
struct FileState {
    domains: HashMap<String, DomainRecord>,
    dirty: bool,
}

/// Serializable store file format
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct StoreFileFormat {
    version: String,
    domains: HashMap<String, DomainRecord>,
}

impl FileDomainStore {
    /// Create or load a file domain store
    ///
    /// This will:
    /// 1. Try to load the existing store file
    /// 2. If corruption is detected, try to load from backup
    /// 3. If both fail, start with empty state
    /// 4. Create parent directories if needed
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    Error::config(format!(
                        "Failed to create store directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let domains = Self::load_with_recovery(&path).await?;

        Ok(Self {
            path,
            state: Arc::new(RwLock::new(FileState {
                domains,
                dirty: false,
            })),
        })
    }

    /// Load records from file with automatic recovery
    ///
    /// Recovery strategy:
    /// 1. Try to load the main store file
    /// 2. On a JSON parse error, try the backup
    /// 3. If the backup also fails, start with empty state
    async fn load_with_recovery(path: &Path) -> Result<HashMap<String, DomainRecord>, Error> {
        match Self::load(path).await {
            Ok(domains) => {
                tracing::debug!("Loaded domain store: {} records", domains.len());
                Ok(domains)
            }
            Err(e) => {
                let error_str = e.to_string().to_lowercase();
                let looks_corrupt = error_str.contains("json")
                    || error_str.contains("parse")
                    || error_str.contains("expected value");
                if !looks_corrupt {
                    return Err(e);
                }

                tracing::warn!(
                    "Domain store appears corrupted: {}. Attempting recovery from backup.",
                    e
                );

                let backup_path = Self::backup_path(path);
                if !backup_path.exists() {
                    tracing::warn!("No backup file found. Starting with empty store.");
                    return Ok(HashMap::new());
                }

                match Self::load(&backup_path).await {
                    Ok(domains) => {
                        tracing::info!("Recovered domain store from backup: {} records", domains.len());
                        if let Err(restore_err) = fs::copy(&backup_path, path).await {
                            tracing::error!(
                                "Failed to restore store file from backup: {}",
                                restore_err
                            );
                        }
                        Ok(domains)
                    }
                    Err(backup_err) => {
                        tracing::error!(
                            "Backup also corrupted: {}. Starting with empty store.",
                            backup_err
                        );
                        Ok(HashMap::new())
                    }
                }
            }
        }
    }

    /// Load records from a file
    async fn load(path: &Path) -> Result<HashMap<String, DomainRecord>, Error> {
        if !path.exists() {
            tracing::debug!("Store file does not exist: {}", path.display());
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::domain_store(format!(
                "Failed to read store file {}: {}",
                path.display(),
                e
            ))
        })?;

        let store_file: StoreFileFormat = serde_json::from_str(&content).map_err(|e| {
            Error::domain_store(format!(
                "Failed to parse store file {}: {}. \
                File may be corrupted. Try restoring from backup.",
                path.display(),
                e
            ))
        })?;

        if store_file.version != STORE_FILE_VERSION {
            tracing::warn!(
                "Store file version mismatch: expected {}, got {}. \
                Attempting to load anyway.",
                STORE_FILE_VERSION,
                store_file.version
            );
        }

        Ok(store_file.domains)
    }

    /// Write all records to file atomically
    async fn write_state(&self) -> Result<(), Error> {
        let state_guard = self.state.read().await;

        let store_file = StoreFileFormat {
            version: STORE_FILE_VERSION.to_string(),
            domains: state_guard.domains.clone(),
        };

        let json = serde_json::to_string_pretty(&store_file)
            .map_err(|e| Error::domain_store(format!("Failed to serialize store: {}", e)))?;

        // Write to temporary file first
        let temp_path = self.temp_path();
        {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                Error::domain_store(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(json.as_bytes()).await.map_err(|e| {
                Error::domain_store(format!(
                    "Failed to write to temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.flush().await.map_err(|e| {
                Error::domain_store(format!(
                    "Failed to flush temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        // Create backup of current file (if it exists)
        if self.path.exists() {
            let backup_path = Self::backup_path(&self.path);
            if let Err(e) = fs::copy(&self.path, &backup_path).await {
                tracing::warn!("Failed to create backup: {}", e);
            }
        }

        // Atomic rename (temp -> actual)
        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::domain_store(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        drop(state_guard);
        {
            let mut state_guard = self.state.write().await;
            state_guard.dirty = false;
        }

        tracing::trace!("Domain store written to file: {}", self.path.display());
        Ok(())
    }

    /// Get path to temporary file for atomic writes
    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }

    /// Get path to backup file
    fn backup_path(path: &Path) -> PathBuf {
        let mut backup = path.to_path_buf();
        backup.set_extension("backup");
        backup
    }
}

#[async_trait]
impl DomainStore for FileDomainStore {
    async fn get(&self, domain: &str) -> Result<Option<DomainRecord>, Error> {
        let state_guard = self.state.read().await;
        Ok(state_guard.domains.get(domain).cloned())
    }

    async fn insert(&self, record: &DomainRecord) -> Result<(), Error> {
        {
            let mut state_guard = self.state.write().await;
            if state_guard.domains.contains_key(&record.domain) {
                return Err(Error::invalid_input(format!(
                    "Domain already tracked: {}",
                    record.domain
                )));
            }
            state_guard
                .domains
                .insert(record.domain.clone(), record.clone());
            state_guard.dirty = true;
        }

        // Immediate write for durability
        self.write_state().await
    }

    async fn update(&self, record: &DomainRecord) -> Result<(), Error> {
        {
            let mut state_guard = self.state.write().await;
            if !state_guard.domains.contains_key(&record.domain) {
                return Err(Error::not_found(format!(
                    "Domain not tracked: {}",
                    record.domain
                )));
            }
            state_guard
                .domains
                .insert(record.domain.clone(), record.clone());
            state_guard.dirty = true;
        }

        // Immediate write for durability
        self.write_state().await
    }

    async fn list(&self) -> Result<Vec<DomainRecord>, Error> {
        let state_guard = self.state.read().await;
        let mut records: Vec<DomainRecord> = state_guard.domains.values().cloned().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }

    async fn list_by_status(
        &self,
        statuses: &[MigrationStatus],
    ) -> Result<Vec<DomainRecord>, Error> {
        let records = self.list().await?;
        Ok(records
            .into_iter()
            .filter(|r| statuses.contains(&r.status))
            .collect())
    }

    async fn flush(&self) -> Result<(), Error> {
        let state_guard = self.state.read().await;
        if state_guard.dirty {
            drop(state_guard);
            self.write_state().await
        } else {
            Ok(())
        }
    }
}
