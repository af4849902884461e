// # Domain Store Trait
//
// Durable per-domain migration state. The engine persists a record after
// every phase commit, so a crash between phases leaves the record at the
// last completed phase.
//
// ## Implementations
//
// - File: `crate::store::FileDomainStore` (JSON, atomic writes, backup)
// - Memory: `crate::store::MemoryDomainStore` (tests, throwaway runs)

use async_trait::async_trait;

use crate::domain::{DomainRecord, MigrationStatus};

/// Trait for domain record store implementations
///
/// # Thread Safety
///
/// Implementations must be thread-safe. Within one process run the engine
/// accesses the store strictly sequentially; durability of each `update`
/// is the sole cross-invocation correctness mechanism.
#[async_trait]
pub trait DomainStore: Send + Sync {
    /// Fetch a record by domain name
    async fn get(&self, domain: &str) -> Result<Option<DomainRecord>, crate::Error>;

    /// Insert a new record
    ///
    /// # Errors
    ///
    /// `InvalidInput` if a record for the same domain already exists.
    async fn insert(&self, record: &DomainRecord) -> Result<(), crate::Error>;

    /// Persist a mutation to an existing record
    ///
    /// # Errors
    ///
    /// `NotFound` if no record exists for the domain.
    async fn update(&self, record: &DomainRecord) -> Result<(), crate::Error>;

    /// List all records
    async fn list(&self) -> Result<Vec<DomainRecord>, crate::Error>;

    /// List records whose status is in the given set
    async fn list_by_status(
        &self,
        statuses: &[MigrationStatus],
    ) -> Result<Vec<DomainRecord>, crate::Error>;

    /// Flush any buffered state to durable storage
    async fn flush(&self) -> Result<(), crate::Error>;
}

/// Helper trait for constructing domain stores from configuration
#[async_trait]
pub trait DomainStoreFactory: Send + Sync {
    /// Create a DomainStore instance from configuration
    async fn create(
        &self,
        config: &crate::config::StoreConfig,
    ) -> Result<Box<dyn DomainStore>, crate::Error>;
}
