// # Memory Domain Store
//
// In-memory implementation of DomainStore.
//
// ## Purpose
//
// Fast store with no persistence across invocations. Useful for tests,
// dry-run experiments, and one-shot runs where losing migration progress
// is acceptable.
//
// ## Crash Behavior
//
// - All state is lost on process exit
// - A re-run starts every domain from `pending` again

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use async_trait::async_trait;

use crate::Error;
use crate::domain::{DomainRecord, MigrationStatus};
use crate::traits::domain_store::DomainStore;

/// In-memory domain store implementation
///
/// Records live in a HashMap behind a RwLock; no persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryDomainStore {
    inner: Arc<RwLock<HashMap<String, DomainRecord>>>,
}

impl MemoryDomainStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of records in the store
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl DomainStore for MemoryDomainStore {
    async fn get(&self, domain: &str) -> Result<Option<DomainRecord>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.get(domain).cloned())
    }

    async fn insert(&self, record: &DomainRecord) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        if guard.contains_key(&record.domain) {
            return Err(Error::invalid_input(format!(
                "Domain already tracked: {}",
                record.domain
            )));
        }
        guard.insert(record.domain.clone(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &DomainRecord) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        if !guard.contains_key(&record.domain) {
            return Err(Error::not_found(format!(
                "Domain not tracked: {}",
                record.domain
            )));
        }
        guard.insert(record.domain.clone(), record.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<DomainRecord>, Error> {
        let guard = self.inner.read().await;
        let mut records: Vec<DomainRecord> = guard.values().cloned().collect();
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
        // No-op for memory store
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RegistrarKind;

    #[tokio::test]
    async fn test_memory_store_basic() {
        let store = MemoryDomainStore::new();
        assert!(store.is_empty().await);

        let record = DomainRecord::new("example.com", RegistrarKind::GoDaddy);
        store.insert(&record).await.unwrap();
        assert_eq!(store.len().await, 1);

        let retrieved = store.get("example.com").await.unwrap().unwrap();
        assert_eq!(retrieved.status, MigrationStatus::Pending);
    }

    #[tokio::test]
    async fn test_memory_store_duplicate_insert_rejected() {
        let store = MemoryDomainStore::new();
        let record = DomainRecord::new("example.com", RegistrarKind::GoDaddy);
        store.insert(&record).await.unwrap();

        let result = store.insert(&record).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_memory_store_update_requires_existing() {
        let store = MemoryDomainStore::new();
        let mut record = DomainRecord::new("example.com", RegistrarKind::GoDaddy);

        let result = store.update(&record).await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        store.insert(&record).await.unwrap();
        record.status = MigrationStatus::AddedToProvider;
        store.update(&record).await.unwrap();

        let retrieved = store.get("example.com").await.unwrap().unwrap();
        assert_eq!(retrieved.status, MigrationStatus::AddedToProvider);
    }

    #[tokio::test]
    async fn test_memory_store_status_filter() {
        let store = MemoryDomainStore::new();

        let pending = DomainRecord::new("a.com", RegistrarKind::GoDaddy);
        let mut done = DomainRecord::new("b.com", RegistrarKind::GoDaddy);
        done.status = MigrationStatus::SslConfigured;

        store.insert(&pending).await.unwrap();
        store.insert(&done).await.unwrap();

        let pending_only = store
            .list_by_status(&[MigrationStatus::Pending])
            .await
            .unwrap();
        assert_eq!(pending_only.len(), 1);
        assert_eq!(pending_only[0].domain, "a.com");
    }
}
