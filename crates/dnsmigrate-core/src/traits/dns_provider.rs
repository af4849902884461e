// # DNS Provider Trait
//
// Defines the interface for the DNS provider side of a migration: zone
// creation, assigned-nameserver lookup, record upserts, and TLS mode.
//
// ## Implementations
//
// - Cloudflare: `dnsmigrate-provider-cloudflare` crate
//
// ## Contract
//
// Every operation here is idempotent: `ensure_zone` returns an existing
// zone instead of erroring, `upsert_record` re-applied with the same data
// is a no-op, and `set_tls_mode` overwrites. Implementations perform
// single-shot API calls; retry and backoff belong to the engine.

use async_trait::async_trait;

use crate::domain::TlsMode;

/// A zone at the DNS provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneInfo {
    /// Provider-assigned zone identifier
    pub id: String,
    /// Nameservers the provider expects the registrar to point at
    pub nameservers: Vec<String>,
    /// Whether this call created the zone (false: it already existed)
    pub created: bool,
}

/// DNS record type used for baseline provisioning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    A,
    Cname,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Cname => "CNAME",
        }
    }
}

/// A DNS record to upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub record_type: RecordType,
    /// Fully-qualified record name
    pub name: String,
    /// Record content (IP for A, target hostname for CNAME)
    pub content: String,
    pub ttl: u32,
    /// Whether traffic is proxied through the provider's edge
    pub proxied: bool,
}

/// Result of an upsert operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Record did not exist and was created
    Created,
    /// Record existed with different data and was rewritten
    Updated,
    /// Record already matched (no-op)
    Unchanged,
}

/// Metadata about an existing DNS record, as reported by the provider
#[derive(Debug, Clone)]
pub struct RecordMetadata {
    /// Provider-assigned record ID
    pub id: String,
    /// Record type (provider's spelling, e.g. "A", "CNAME")
    pub record_type: String,
    /// Fully-qualified record name
    pub name: String,
    /// Record content
    pub content: String,
    pub ttl: Option<u32>,
    pub proxied: Option<bool>,
}

/// Trait for DNS provider implementations
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Create the zone for a domain, or return the existing one
    ///
    /// # Idempotency
    ///
    /// Calling this again for a domain that already has a zone returns the
    /// existing zone with `created = false`, never a duplicate.
    async fn ensure_zone(&self, domain: &str) -> Result<ZoneInfo, crate::Error>;

    /// Look up a domain's zone without creating one
    async fn find_zone(&self, domain: &str) -> Result<Option<ZoneInfo>, crate::Error>;

    /// Read the nameservers the provider assigned to a zone
    async fn zone_nameservers(&self, zone_id: &str) -> Result<Vec<String>, crate::Error>;

    /// Create or update a DNS record
    ///
    /// # Idempotency
    ///
    /// Re-applying the same record returns `UpsertOutcome::Unchanged` and
    /// never produces a duplicate.
    async fn upsert_record(
        &self,
        zone_id: &str,
        record: &DnsRecord,
    ) -> Result<UpsertOutcome, crate::Error>;

    /// List the zone's DNS records
    async fn list_records(&self, zone_id: &str) -> Result<Vec<RecordMetadata>, crate::Error>;

    /// Delete a single DNS record by its provider-assigned ID
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<(), crate::Error>;

    /// Set the zone's edge TLS mode
    async fn set_tls_mode(&self, zone_id: &str, mode: TlsMode) -> Result<(), crate::Error>;

    /// Read the zone's current edge TLS mode
    async fn get_tls_mode(&self, zone_id: &str) -> Result<TlsMode, crate::Error>;

    /// Cheap authenticated probe to verify credentials
    async fn validate_credentials(&self) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing DNS providers from configuration
pub trait DnsProviderFactory: Send + Sync {
    /// Create a DnsProvider instance from configuration
    fn create(
        &self,
        config: &crate::config::DnsProviderConfig,
    ) -> Result<Box<dyn DnsProvider>, crate::Error>;
}
