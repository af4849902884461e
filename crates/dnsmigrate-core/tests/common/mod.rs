//! Test doubles and common utilities for migration contract tests
//!
//! The mocks here track call counts and let tests script a number of
//! transient failures per operation, so contract tests can pin down retry
//! behavior and phase idempotency without any real API.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dnsmigrate_core::config::EngineConfig;
use dnsmigrate_core::domain::{DomainRecord, MigrationStatus, TlsMode};
use dnsmigrate_core::error::{Error, Result};
use dnsmigrate_core::store::MemoryDomainStore;
use dnsmigrate_core::traits::dns_provider::RecordMetadata;
use dnsmigrate_core::traits::{
    ConfirmationGate, DnsProvider, DnsRecord, DomainStore, Registrar, UpsertOutcome, ZoneInfo,
};
use dnsmigrate_core::{MigrationEngine, Phase};

/// Take one scripted failure from the counter, if any remain
fn take_failure(failures: &AtomicUsize) -> bool {
    failures
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

/// A mock registrar with scriptable transient failures
#[derive(Clone)]
pub struct MockRegistrar {
    /// Current nameservers at the registrar
    nameservers: Arc<std::sync::Mutex<Vec<String>>>,
    /// Every nameserver list ever written
    writes: Arc<std::sync::Mutex<Vec<Vec<String>>>>,
    /// Domains in the account (for list_domains)
    account_domains: Arc<std::sync::Mutex<Vec<String>>>,

    get_calls: Arc<AtomicUsize>,
    set_calls: Arc<AtomicUsize>,

    /// Upcoming set_nameservers calls that fail transiently
    set_failures: Arc<AtomicUsize>,
    /// Upcoming get_nameservers calls that fail transiently
    get_failures: Arc<AtomicUsize>,
}

impl MockRegistrar {
    pub fn new() -> Self {
        Self {
            nameservers: Arc::new(std::sync::Mutex::new(vec![
                "ns1.registrar-parking.net".to_string(),
                "ns2.registrar-parking.net".to_string(),
            ])),
            writes: Arc::new(std::sync::Mutex::new(Vec::new())),
            account_domains: Arc::new(std::sync::Mutex::new(Vec::new())),
            get_calls: Arc::new(AtomicUsize::new(0)),
            set_calls: Arc::new(AtomicUsize::new(0)),
            set_failures: Arc::new(AtomicUsize::new(0)),
            get_failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_account_domains(self, domains: &[&str]) -> Self {
        *self.account_domains.lock().unwrap() =
            domains.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Make the next `n` set_nameservers calls fail transiently
    pub fn fail_next_sets(&self, n: usize) {
        self.set_failures.store(n, Ordering::SeqCst);
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    pub fn current_nameservers(&self) -> Vec<String> {
        self.nameservers.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Vec<String>> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Registrar for MockRegistrar {
    async fn get_nameservers(&self, _domain: &str) -> Result<Vec<String>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.get_failures) {
            return Err(Error::http("503 simulated registrar outage"));
        }
        Ok(self.nameservers.lock().unwrap().clone())
    }

    async fn set_nameservers(&self, _domain: &str, nameservers: &[String]) -> Result<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.set_failures) {
            return Err(Error::http("503 simulated registrar outage"));
        }
        *self.nameservers.lock().unwrap() = nameservers.to_vec();
        self.writes.lock().unwrap().push(nameservers.to_vec());
        Ok(())
    }

    async fn list_domains(&self) -> Result<Vec<String>> {
        Ok(self.account_domains.lock().unwrap().clone())
    }

    async fn validate_credentials(&self) -> Result<()> {
        Ok(())
    }

    fn registrar_name(&self) -> &'static str {
        "godaddy"
    }
}

/// A mock DNS provider with an in-memory zone and scriptable failures
#[derive(Clone)]
pub struct MockProvider {
    /// The single zone this mock manages, once created
    zone: Arc<std::sync::Mutex<Option<ZoneInfo>>>,
    /// Records in the zone, deduplicated by (type, name)
    records: Arc<std::sync::Mutex<Vec<DnsRecord>>>,
    /// Seeded records of types the engine never provisions (MX, TXT, ...)
    extra_records: Arc<std::sync::Mutex<Vec<RecordMetadata>>>,
    tls_mode: Arc<std::sync::Mutex<Option<TlsMode>>>,

    ensure_zone_calls: Arc<AtomicUsize>,
    find_zone_calls: Arc<AtomicUsize>,
    upsert_calls: Arc<AtomicUsize>,
    delete_calls: Arc<AtomicUsize>,
    set_tls_calls: Arc<AtomicUsize>,

    ensure_zone_failures: Arc<AtomicUsize>,
    find_zone_failures: Arc<AtomicUsize>,
    zone_ns_failures: Arc<AtomicUsize>,
    upsert_failures: Arc<AtomicUsize>,
    delete_failures: Arc<AtomicUsize>,
    set_tls_failures: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            zone: Arc::new(std::sync::Mutex::new(None)),
            records: Arc::new(std::sync::Mutex::new(Vec::new())),
            extra_records: Arc::new(std::sync::Mutex::new(Vec::new())),
            tls_mode: Arc::new(std::sync::Mutex::new(None)),
            ensure_zone_calls: Arc::new(AtomicUsize::new(0)),
            find_zone_calls: Arc::new(AtomicUsize::new(0)),
            upsert_calls: Arc::new(AtomicUsize::new(0)),
            delete_calls: Arc::new(AtomicUsize::new(0)),
            set_tls_calls: Arc::new(AtomicUsize::new(0)),
            ensure_zone_failures: Arc::new(AtomicUsize::new(0)),
            find_zone_failures: Arc::new(AtomicUsize::new(0)),
            zone_ns_failures: Arc::new(AtomicUsize::new(0)),
            upsert_failures: Arc::new(AtomicUsize::new(0)),
            delete_failures: Arc::new(AtomicUsize::new(0)),
            set_tls_failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create the zone directly, as if it were added out of band
    pub fn seed_zone(&self, domain: &str) {
        *self.zone.lock().unwrap() = Some(ZoneInfo {
            id: format!("{MOCK_ZONE_ID}-{domain}"),
            nameservers: mock_nameservers(),
            created: false,
        });
    }

    /// Remove the zone, as if it were deleted out of band
    pub fn drop_zone(&self) {
        *self.zone.lock().unwrap() = None;
    }

    /// Seed a record of a type the engine never provisions
    pub fn seed_record(&self, record_type: &str, name: &str, content: &str) {
        self.extra_records.lock().unwrap().push(RecordMetadata {
            id: format!("{record_type}-{name}"),
            record_type: record_type.to_string(),
            name: name.to_string(),
            content: content.to_string(),
            ttl: Some(3600),
            proxied: Some(false),
        });
    }

    /// Make the next `n` zone_nameservers calls fail transiently
    pub fn fail_next_zone_ns(&self, n: usize) {
        self.zone_ns_failures.store(n, Ordering::SeqCst);
    }

    pub fn fail_next_ensure_zone(&self, n: usize) {
        self.ensure_zone_failures.store(n, Ordering::SeqCst);
    }

    pub fn fail_next_upserts(&self, n: usize) {
        self.upsert_failures.store(n, Ordering::SeqCst);
    }

    pub fn fail_next_set_tls(&self, n: usize) {
        self.set_tls_failures.store(n, Ordering::SeqCst);
    }

    pub fn fail_next_find_zone(&self, n: usize) {
        self.find_zone_failures.store(n, Ordering::SeqCst);
    }

    pub fn fail_next_deletes(&self, n: usize) {
        self.delete_failures.store(n, Ordering::SeqCst);
    }

    pub fn ensure_zone_calls(&self) -> usize {
        self.ensure_zone_calls.load(Ordering::SeqCst)
    }

    pub fn find_zone_calls(&self) -> usize {
        self.find_zone_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    pub fn set_tls_calls(&self) -> usize {
        self.set_tls_calls.load(Ordering::SeqCst)
    }

    pub fn records(&self) -> Vec<DnsRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn tls_mode(&self) -> Option<TlsMode> {
        *self.tls_mode.lock().unwrap()
    }
}

const MOCK_ZONE_ID: &str = "zone-mock-1";

fn mock_nameservers() -> Vec<String> {
    vec![
        "ada.ns.cloudflare-test.com".to_string(),
        "bob.ns.cloudflare-test.com".to_string(),
    ]
}

#[async_trait::async_trait]
impl DnsProvider for MockProvider {
    async fn ensure_zone(&self, domain: &str) -> Result<ZoneInfo> {
        self.ensure_zone_calls.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.ensure_zone_failures) {
            return Err(Error::http("502 simulated provider outage"));
        }

        let mut zone = self.zone.lock().unwrap();
        match zone.as_ref() {
            Some(existing) => Ok(ZoneInfo {
                created: false,
                ..existing.clone()
            }),
            None => {
                let info = ZoneInfo {
                    id: format!("{MOCK_ZONE_ID}-{domain}"),
                    nameservers: mock_nameservers(),
                    created: true,
                };
                *zone = Some(info.clone());
                Ok(info)
            }
        }
    }

    async fn find_zone(&self, domain: &str) -> Result<Option<ZoneInfo>> {
        self.find_zone_calls.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.find_zone_failures) {
            return Err(Error::http("502 simulated provider outage"));
        }

        let zone = self.zone.lock().unwrap();
        Ok(zone
            .as_ref()
            .filter(|z| z.id == format!("{MOCK_ZONE_ID}-{domain}"))
            .map(|z| ZoneInfo {
                created: false,
                ..z.clone()
            }))
    }

    async fn zone_nameservers(&self, _zone_id: &str) -> Result<Vec<String>> {
        if take_failure(&self.zone_ns_failures) {
            return Err(Error::http("502 simulated provider outage"));
        }
        Ok(mock_nameservers())
    }

    async fn upsert_record(&self, _zone_id: &str, record: &DnsRecord) -> Result<UpsertOutcome> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.upsert_failures) {
            return Err(Error::http("502 simulated provider outage"));
        }

        let mut records = self.records.lock().unwrap();
        match records
            .iter_mut()
            .find(|r| r.record_type == record.record_type && r.name == record.name)
        {
            Some(existing) if existing == record => Ok(UpsertOutcome::Unchanged),
            Some(existing) => {
                *existing = record.clone();
                Ok(UpsertOutcome::Updated)
            }
            None => {
                records.push(record.clone());
                Ok(UpsertOutcome::Created)
            }
        }
    }

    async fn list_records(&self, _zone_id: &str) -> Result<Vec<RecordMetadata>> {
        let records = self.records.lock().unwrap();
        let mut listed: Vec<RecordMetadata> = records
            .iter()
            .map(|r| RecordMetadata {
                id: format!("{}-{}", r.record_type.as_str(), r.name),
                record_type: r.record_type.as_str().to_string(),
                name: r.name.clone(),
                content: r.content.clone(),
                ttl: Some(r.ttl),
                proxied: Some(r.proxied),
            })
            .collect();
        listed.extend(self.extra_records.lock().unwrap().iter().cloned());
        Ok(listed)
    }

    async fn delete_record(&self, _zone_id: &str, record_id: &str) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.delete_failures) {
            return Err(Error::http("502 simulated provider outage"));
        }

        let mut records = self.records.lock().unwrap();
        if let Some(pos) = records
            .iter()
            .position(|r| format!("{}-{}", r.record_type.as_str(), r.name) == record_id)
        {
            records.remove(pos);
            return Ok(());
        }

        let mut extra = self.extra_records.lock().unwrap();
        if let Some(pos) = extra.iter().position(|r| r.id == record_id) {
            extra.remove(pos);
            return Ok(());
        }

        Err(Error::not_found(format!("No record with ID {record_id}")))
    }

    async fn set_tls_mode(&self, _zone_id: &str, mode: TlsMode) -> Result<()> {
        self.set_tls_calls.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.set_tls_failures) {
            return Err(Error::http("502 simulated provider outage"));
        }
        *self.tls_mode.lock().unwrap() = Some(mode);
        Ok(())
    }

    async fn get_tls_mode(&self, _zone_id: &str) -> Result<TlsMode> {
        Ok(self.tls_mode.lock().unwrap().unwrap_or_default())
    }

    async fn validate_credentials(&self) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}

/// Store wrapper that counts mutations, for dry-run contracts
#[derive(Clone)]
pub struct CountingStore {
    inner: MemoryDomainStore,
    insert_calls: Arc<AtomicUsize>,
    update_calls: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryDomainStore::new(),
            insert_calls: Arc::new(AtomicUsize::new(0)),
            update_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn mutation_count(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst) + self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DomainStore for CountingStore {
    async fn get(&self, domain: &str) -> Result<Option<DomainRecord>> {
        self.inner.get(domain).await
    }

    async fn insert(&self, record: &DomainRecord) -> Result<()> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(record).await
    }

    async fn update(&self, record: &DomainRecord) -> Result<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.update(record).await
    }

    async fn list(&self) -> Result<Vec<DomainRecord>> {
        self.inner.list().await
    }

    async fn list_by_status(&self, statuses: &[MigrationStatus]) -> Result<Vec<DomainRecord>> {
        self.inner.list_by_status(statuses).await
    }

    async fn flush(&self) -> Result<()> {
        self.inner.flush().await
    }
}

/// A confirmation gate with a fixed answer and a call counter
#[derive(Clone)]
pub struct ScriptedGate {
    approve: bool,
    calls: Arc<AtomicUsize>,
}

impl ScriptedGate {
    pub fn approving() -> Self {
        Self {
            approve: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn denying() -> Self {
        Self {
            approve: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ConfirmationGate for ScriptedGate {
    async fn confirm(&self, _prompt: &str) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.approve)
    }
}

/// Engine config with zero backoff and no settle delays, for fast tests
pub fn fast_engine_config() -> EngineConfig {
    EngineConfig {
        max_retry_attempts: 3,
        retry_base_delay_secs: 0,
        retry_max_delay_secs: 0,
        ns_update_timeout_secs: 0,
        ns_verification_delay_secs: 0,
        ..EngineConfig::default()
    }
}

/// Build an engine around the given mocks
pub fn build_engine(
    registrar: MockRegistrar,
    provider: MockProvider,
    store: CountingStore,
    gate: ScriptedGate,
    config: EngineConfig,
) -> MigrationEngine {
    MigrationEngine::new(
        Box::new(registrar),
        Box::new(provider),
        Box::new(store),
        Box::new(gate),
        config,
    )
    .expect("engine config should be valid")
}

/// Names of the phases in a plan, for assertion messages
pub fn phase_names(phases: &[Phase]) -> Vec<&'static str> {
    phases.iter().map(|p| p.as_str()).collect()
}
