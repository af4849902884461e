// # Registrar Trait
//
// Defines the interface for reading and rewriting a domain's authoritative
// nameservers at its registrar.
//
// ## Implementations
//
// - GoDaddy: `dnsmigrate-registrar-godaddy` crate
//
// ## Contract
//
// Implementations perform single-shot API calls and classify their own
// failures (authentication and not-found are fatal; network faults and
// 5xx/429 are transient). Retry and backoff belong to the engine, never
// to the adapter.

use async_trait::async_trait;

/// Trait for registrar implementations
///
/// `set_nameservers` mutates state outside this system and must be
/// idempotent from the caller's perspective: writing the same target list
/// twice is safe.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait Registrar: Send + Sync {
    /// Read the domain's current authoritative nameservers
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<String>)`: ordered nameserver hostnames
    /// - `Err(Error)`: `NotFound` if the registrar does not know the domain,
    ///   `Authentication` on credential failure
    async fn get_nameservers(&self, domain: &str) -> Result<Vec<String>, crate::Error>;

    /// Rewrite the domain's authoritative nameservers
    ///
    /// # Idempotency
    ///
    /// Calling this twice with the same target list must be safe.
    async fn set_nameservers(
        &self,
        domain: &str,
        nameservers: &[String],
    ) -> Result<(), crate::Error>;

    /// List all domains in the registrar account
    ///
    /// Used by the `import` operation to seed the domain store.
    async fn list_domains(&self) -> Result<Vec<String>, crate::Error>;

    /// Cheap authenticated probe to verify credentials
    async fn validate_credentials(&self) -> Result<(), crate::Error>;

    /// Get the registrar name (for logging and tag dispatch)
    fn registrar_name(&self) -> &'static str;
}

/// Helper trait for constructing registrars from configuration
pub trait RegistrarFactory: Send + Sync {
    /// Create a Registrar instance from configuration
    fn create(
        &self,
        config: &crate::config::RegistrarConfig,
    ) -> Result<Box<dyn Registrar>, crate::Error>;
}
