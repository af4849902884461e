//! Plugin-based adapter registry
//!
//! The registry lets registrar adapters, DNS providers, and domain stores
//! be registered at runtime and instantiated from tagged configuration,
//! avoiding hardcoded if-else chains in the binary.
//!
//! ## Registration
//!
//! Adapter crates register themselves during initialization:
//!
//! ```rust,ignore
//! // In dnsmigrate-registrar-godaddy
//! pub fn register(registry: &AdapterRegistry) {
//!     registry.register_registrar("godaddy", Box::new(GoDaddyFactory));
//! }
//! ```

use crate::config::{DnsProviderConfig, RegistrarConfig, StoreConfig};
use crate::error::{Error, Result};
use crate::traits::{DnsProvider, DomainStore, Registrar};
use crate::traits::{DnsProviderFactory, DomainStoreFactory, RegistrarFactory};
use std::collections::HashMap;
use std::sync::RwLock;

/// Adapter registry for config-driven construction
///
/// Maps type names (the `type` tag of the config enums) to factory
/// objects.
///
/// ## Thread Safety
///
/// Uses interior mutability with RwLock, allowing concurrent reads and
/// exclusive writes.
#[derive(Default)]
pub struct AdapterRegistry {
    /// Registered registrar factories
    registrars: RwLock<HashMap<String, Box<dyn RegistrarFactory>>>,

    /// Registered DNS provider factories
    providers: RwLock<HashMap<String, Box<dyn DnsProviderFactory>>>,

    /// Registered domain store factories
    stores: RwLock<HashMap<String, std::sync::Arc<dyn DomainStoreFactory>>>,
}

impl AdapterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a registrar factory
    pub fn register_registrar(&self, name: impl Into<String>, factory: Box<dyn RegistrarFactory>) {
        let name = name.into();
        let mut registrars = self.registrars.write().unwrap();
        registrars.insert(name, factory);
    }

    /// Register a DNS provider factory
    pub fn register_provider(&self, name: impl Into<String>, factory: Box<dyn DnsProviderFactory>) {
        let name = name.into();
        let mut providers = self.providers.write().unwrap();
        providers.insert(name, factory);
    }

    /// Register a domain store factory
    pub fn register_store(&self, name: impl Into<String>, factory: Box<dyn DomainStoreFactory>) {
        let name = name.into();
        let mut stores = self.stores.write().unwrap();
        stores.insert(name, std::sync::Arc::from(factory));
    }

    /// Create a registrar adapter from configuration
    pub fn create_registrar(&self, config: &RegistrarConfig) -> Result<Box<dyn Registrar>> {
        let registrar_type = config.type_name();
        let registrars = self.registrars.read().unwrap();

        let factory = registrars.get(registrar_type).ok_or_else(|| {
            Error::config(format!("Unknown registrar type: {}", registrar_type))
        })?;

        factory.create(config)
    }

    /// Create a DNS provider from configuration
    pub fn create_provider(&self, config: &DnsProviderConfig) -> Result<Box<dyn DnsProvider>> {
        let provider_type = config.type_name();
        let providers = self.providers.read().unwrap();

        let factory = providers
            .get(provider_type)
            .ok_or_else(|| Error::config(format!("Unknown provider type: {}", provider_type)))?;

        factory.create(config)
    }

    /// Create a domain store from configuration
    pub async fn create_store(&self, config: &StoreConfig) -> Result<Box<dyn DomainStore>> {
        let store_type = match config {
            StoreConfig::File { .. } => "file",
            StoreConfig::Memory => "memory",
            StoreConfig::Custom { factory, .. } => factory,
        };

        let factory = {
            let stores = self.stores.read().unwrap();
            stores
                .get(store_type)
                .ok_or_else(|| Error::config(format!("Unknown store type: {}", store_type)))?
                .clone()
            // Lock released here; create() is async
        };

        factory.create(config).await
    }

    /// List all registered registrar types
    pub fn list_registrars(&self) -> Vec<String> {
        let registrars = self.registrars.read().unwrap();
        registrars.keys().cloned().collect()
    }

    /// List all registered provider types
    pub fn list_providers(&self) -> Vec<String> {
        let providers = self.providers.read().unwrap();
        providers.keys().cloned().collect()
    }

    /// Check if a registrar type is registered
    pub fn has_registrar(&self, name: &str) -> bool {
        let registrars = self.registrars.read().unwrap();
        registrars.contains_key(name)
    }

    /// Check if a provider type is registered
    pub fn has_provider(&self, name: &str) -> bool {
        let providers = self.providers.read().unwrap();
        providers.contains_key(name)
    }
}

/// Factory for the built-in domain stores (`file` and `memory`)
pub struct BuiltinStoreFactory;

#[async_trait::async_trait]
impl DomainStoreFactory for BuiltinStoreFactory {
    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn DomainStore>> {
        match config {
            StoreConfig::File { path } => {
                let store = crate::store::FileDomainStore::new(path).await?;
                Ok(Box::new(store))
            }
            StoreConfig::Memory => Ok(Box::new(crate::store::MemoryDomainStore::new())),
            StoreConfig::Custom { factory, .. } => Err(Error::config(format!(
                "Custom store '{}' has no builtin factory",
                factory
            ))),
        }
    }
}

/// Register the built-in store factories under "file" and "memory"
pub fn register_builtin_stores(registry: &AdapterRegistry) {
    registry.register_store("file", Box::new(BuiltinStoreFactory));
    registry.register_store("memory", Box::new(BuiltinStoreFactory));
}
