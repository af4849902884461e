//! Core traits for the migration engine
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`Registrar`]: get/set authoritative nameservers at the registrar
//! - [`DnsProvider`]: zone creation, record upserts, TLS mode at the DNS provider
//! - [`DomainStore`]: durable per-domain migration state
//! - [`ConfirmationGate`]: human approval before mutating registrar state

pub mod confirm;
pub mod dns_provider;
pub mod domain_store;
pub mod registrar;

pub use confirm::{AutoApprove, ConfirmationGate};
pub use dns_provider::{
    DnsProvider, DnsProviderFactory, DnsRecord, RecordType, UpsertOutcome, ZoneInfo,
};
pub use domain_store::{DomainStore, DomainStoreFactory};
pub use registrar::{Registrar, RegistrarFactory};
