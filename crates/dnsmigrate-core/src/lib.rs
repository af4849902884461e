// # dnsmigrate-core
//
// Core library for the DNS migration orchestration engine.
//
// ## Architecture Overview
//
// This library automates moving a domain's authoritative DNS from a
// registrar to a DNS provider through a four-phase state machine:
//
// - **Registrar**: trait for reading/rewriting nameservers at the registrar
// - **DnsProvider**: trait for zones, records, and TLS mode at the provider
// - **DomainStore**: durable per-domain migration state
// - **MigrationEngine**: the orchestrator driving the state machine
// - **Sync reconciler**: batch variant with per-domain outcome reporting
// - **AdapterRegistry**: config-driven construction of adapters and stores
//
// ## Design Principles
//
// 1. **Persist before advancing**: each phase commits its record mutation
//    before the next phase runs
// 2. **Idempotent phases**: zone reuse, record upsert, and idempotent NS
//    writes make resume-after-failure safe
// 3. **Engine-owned retry**: adapters classify failures, never retry
// 4. **Sequential by design**: one domain advances (or fails) at a time

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod reconciler;
pub mod registry;
pub mod retry;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use config::{EngineConfig, MigrationConfig};
pub use domain::{DomainRecord, MigrationStatus, RegistrarKind, TlsMode};
pub use engine::{
    DeleteOptions, DeleteReport, MigrateOptions, MigrationDisposition, MigrationEngine,
    MigrationOutcome, Phase, RefreshOutcome, RefreshReport, ZoneDetails,
};
pub use error::{Error, Result};
pub use reconciler::{SyncOptions, SyncOutcome, SyncReport};
pub use registry::AdapterRegistry;
pub use retry::RetryPolicy;
pub use store::{FileDomainStore, MemoryDomainStore};
pub use traits::{ConfirmationGate, DnsProvider, DomainStore, Registrar};
