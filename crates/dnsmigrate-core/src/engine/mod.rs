//! Migration orchestrator
//!
//! The MigrationEngine drives a single domain through the four-phase
//! state machine:
//!
//! ```text
//! pending ──add-to-provider──▶ added_to_provider ──update-ns──▶ ns_updated
//!     ──provision-dns──▶ dns_configured ──set-tls──▶ ssl_configured
//! ```
//!
//! `failed` is reachable from any non-terminal state when a phase exhausts
//! its retries or hits a fatal error; the next `migrate` invocation resumes
//! at the first unfinished phase. Phase idempotency (zone reuse, record
//! upsert, idempotent NS writes) makes the resume safe.
//!
//! ## Persistence discipline
//!
//! Each phase commits its record mutation before the next phase starts, so
//! a crash between phases leaves the record at the last completed phase.
//! A failure inside a phase touches only `status` and `last_error`; prior
//! phase outputs (`zone_id`, `original_nameservers`, `assigned_nameservers`)
//! are never rolled back.

mod maintenance;

pub use maintenance::{DeleteOptions, DeleteReport, RefreshEntry, RefreshOutcome, RefreshReport};

use chrono::Utc;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::domain::{
    DomainRecord, MigrationStatus, RegistrarKind, TlsMode, normalize_domain, validate_domain,
    validate_nameservers,
};
use crate::error::{Error, Result};
use crate::retry::RetryPolicy;
use crate::traits::{ConfirmationGate, DnsProvider, DnsRecord, DomainStore, RecordType, Registrar};

/// One of the four ordered migration steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Create (or reuse) the zone at the DNS provider
    AddToProvider,
    /// Point the registrar's nameservers at the provider
    UpdateNameservers,
    /// Provision baseline DNS records
    ProvisionDns,
    /// Apply the edge TLS mode
    SetTlsMode,
}

impl Phase {
    /// All phases, in pipeline order
    pub const ALL: [Phase; 4] = [
        Phase::AddToProvider,
        Phase::UpdateNameservers,
        Phase::ProvisionDns,
        Phase::SetTlsMode,
    ];

    fn index(&self) -> usize {
        match self {
            Phase::AddToProvider => 0,
            Phase::UpdateNameservers => 1,
            Phase::ProvisionDns => 2,
            Phase::SetTlsMode => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::AddToProvider => "zone-add",
            Phase::UpdateNameservers => "ns-update",
            Phase::ProvisionDns => "dns-provision",
            Phase::SetTlsMode => "tls-set",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-invocation migration options
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    /// Target IP for baseline A records; falls back to the configured
    /// default, and to apex CNAME records when neither is set
    pub target_ip: Option<IpAddr>,

    /// TLS mode for the final phase; falls back to the configured default
    pub tls_mode: Option<TlsMode>,

    /// Bypass the confirmation gate for this invocation
    pub skip_confirm: bool,

    /// Override `auto_update_nameservers` for this invocation
    pub update_nameservers: Option<bool>,
}

/// How a migration invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationDisposition {
    /// Reached terminal success (`ssl_configured`)
    Completed,
    /// Stopped without error before terminal success: the confirmation
    /// gate denied the nameserver write, or nameserver updates are
    /// disabled for this run
    Halted,
    /// A phase failed; the record is at `failed` with `last_error` set
    Failed,
}

/// Outcome of one `migrate` (or `update-ns`) invocation
#[derive(Debug, Clone)]
pub struct MigrationOutcome {
    pub domain: String,
    pub status: MigrationStatus,
    pub disposition: MigrationDisposition,
    /// Phases completed during this invocation
    pub completed_phases: Vec<Phase>,
    /// The phase that failed, when disposition is `Failed`
    pub failed_phase: Option<Phase>,
    pub error: Option<String>,
}

/// Per-phase progress for `migration-status`
#[derive(Debug, Clone)]
pub struct MigrationReport {
    pub record: DomainRecord,
    /// Each phase and whether its output is already in place
    pub phases: Vec<(Phase, bool)>,
}

/// What currently lives at the provider for a domain's zone
#[derive(Debug, Clone)]
pub struct ZoneDetails {
    pub zone_id: String,
    pub records: Vec<crate::traits::dns_provider::RecordMetadata>,
    pub tls_mode: TlsMode,
}

/// Result of probing one set of adapter credentials
#[derive(Debug, Clone)]
pub struct CredentialCheck {
    pub service: String,
    pub ok: bool,
    pub error: Option<String>,
}

/// Summary of an `import` run
#[derive(Debug, Clone)]
pub struct ImportSummary {
    /// Domains newly added to the store
    pub imported: Vec<String>,
    /// Domains already tracked
    pub already_tracked: usize,
    /// Domains skipped because their name failed validation
    pub invalid: usize,
}

enum PhaseRun {
    Completed,
    Halted,
}

/// Migration orchestrator
///
/// Owns the two adapters, the domain store, the confirmation gate, and the
/// engine configuration. All adapter calls that cross a network boundary go
/// through the retry policy. Domains are processed strictly one at a time.
pub struct MigrationEngine {
    registrar: Box<dyn Registrar>,
    provider: Box<dyn DnsProvider>,
    store: Box<dyn DomainStore>,
    gate: Box<dyn ConfirmationGate>,
    retry: RetryPolicy,
    config: EngineConfig,
}

impl MigrationEngine {
    /// Create a new migration engine
    pub fn new(
        registrar: Box<dyn Registrar>,
        provider: Box<dyn DnsProvider>,
        store: Box<dyn DomainStore>,
        gate: Box<dyn ConfirmationGate>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let retry = RetryPolicy::from_config(&config);

        Ok(Self {
            registrar,
            provider,
            store,
            gate,
            retry,
            config,
        })
    }

    /// The first phase whose output is not yet in place
    ///
    /// For a `failed` record this is derived from the persisted artifacts
    /// (`zone_id`, `ns_updated_at`) rather than the status, so a retry
    /// resumes where the failure happened instead of starting over.
    /// Returns `None` for a record at terminal success.
    pub fn first_unfinished_phase(record: &DomainRecord) -> Option<Phase> {
        match record.status {
            MigrationStatus::SslConfigured => None,
            MigrationStatus::DnsConfigured => Some(Phase::SetTlsMode),
            MigrationStatus::NsUpdated => Some(Phase::ProvisionDns),
            MigrationStatus::AddedToProvider => Some(Phase::UpdateNameservers),
            MigrationStatus::Pending => Some(Phase::AddToProvider),
            MigrationStatus::Failed => {
                if record.zone_id.is_none() {
                    Some(Phase::AddToProvider)
                } else if record.ns_updated_at.is_none() {
                    Some(Phase::UpdateNameservers)
                } else {
                    // Record provisioning leaves no dedicated artifact, so a
                    // post-NS failure re-runs the (idempotent) DNS phase.
                    Some(Phase::ProvisionDns)
                }
            }
        }
    }

    /// Plan the phases a migration of `record` would execute
    ///
    /// Used by the reconciler's dry-run. Returns the phase list and whether
    /// the confirmation gate would fire. Performs no adapter call and no
    /// store mutation.
    pub fn plan(&self, record: &DomainRecord, opts: &MigrateOptions) -> (Vec<Phase>, bool) {
        let Some(first) = Self::first_unfinished_phase(record) else {
            return (Vec::new(), false);
        };

        let update_ns = opts
            .update_nameservers
            .unwrap_or(self.config.auto_update_nameservers);

        let mut phases = Vec::new();
        for phase in Phase::ALL {
            if phase.index() < first.index() {
                continue;
            }
            if phase == Phase::UpdateNameservers && !update_ns {
                // Everything after the NS cutover is blocked too
                break;
            }
            phases.push(phase);
        }

        let would_confirm = self.config.confirm_ns_update
            && !opts.skip_confirm
            && phases.contains(&Phase::UpdateNameservers);

        (phases, would_confirm)
    }

    /// Migrate a single domain, resuming at the first unfinished phase
    ///
    /// A domain not yet tracked is created in `pending` state first. Phase
    /// failures are recorded (status `failed`, `last_error` set) and
    /// reported through the outcome; only store and validation errors
    /// surface as `Err`.
    pub async fn migrate(&self, domain: &str, opts: &MigrateOptions) -> Result<MigrationOutcome> {
        let domain = normalize_domain(domain);
        validate_domain(&domain)?;

        let mut record = match self.store.get(&domain).await? {
            Some(record) => record,
            None => {
                let kind: RegistrarKind = self.registrar.registrar_name().parse()?;
                let record = DomainRecord::new(&domain, kind);
                self.store.insert(&record).await?;
                info!(domain = %domain, "Tracking new domain");
                record
            }
        };

        if record.status.is_terminal_success() {
            info!(domain = %domain, "Already migrated, nothing to do");
            return Ok(MigrationOutcome {
                domain,
                status: record.status,
                disposition: MigrationDisposition::Completed,
                completed_phases: Vec::new(),
                failed_phase: None,
                error: None,
            });
        }

        let (phases, _) = self.plan(&record, opts);
        info!(
            domain = %domain,
            resume_at = %phases.first().map(|p| p.as_str()).unwrap_or("-"),
            "Starting migration"
        );

        let mut completed = Vec::new();
        for phase in phases {
            match self.run_phase(phase, &mut record, opts).await {
                Ok(PhaseRun::Completed) => {
                    debug!(domain = %record.domain, phase = %phase, "Phase complete");
                    completed.push(phase);
                }
                Ok(PhaseRun::Halted) => {
                    return Ok(MigrationOutcome {
                        domain: record.domain,
                        status: record.status,
                        disposition: MigrationDisposition::Halted,
                        completed_phases: completed,
                        failed_phase: None,
                        error: None,
                    });
                }
                Err(e) => {
                    error!(domain = %record.domain, phase = %phase, error = %e, "Phase failed");
                    record.mark_failed(e.to_string());
                    self.store.update(&record).await?;
                    return Ok(MigrationOutcome {
                        domain: record.domain,
                        status: MigrationStatus::Failed,
                        disposition: MigrationDisposition::Failed,
                        completed_phases: completed,
                        failed_phase: Some(phase),
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        // The NS phase was excluded from the plan: stop without error
        let disposition = if record.status.is_terminal_success() {
            MigrationDisposition::Completed
        } else {
            MigrationDisposition::Halted
        };

        Ok(MigrationOutcome {
            domain: record.domain,
            status: record.status,
            disposition,
            completed_phases: completed,
            failed_phase: None,
            error: None,
        })
    }

    /// Run the nameserver cutover in isolation
    ///
    /// Valid for a domain at `added_to_provider` or later. When the
    /// nameservers were already rewritten, `force` re-runs the cutover
    /// anyway (refreshing `assigned_nameservers` and `ns_updated_at`).
    pub async fn update_nameservers(
        &self,
        domain: &str,
        force: bool,
        skip_confirm: bool,
    ) -> Result<MigrationOutcome> {
        let domain = normalize_domain(domain);
        let mut record = self
            .store
            .get(&domain)
            .await?
            .ok_or_else(|| Error::not_found(format!("Domain not tracked: {domain}")))?;

        if record.zone_id.is_none() {
            return Err(Error::invalid_input(format!(
                "Domain {domain} has no zone yet; run migrate first"
            )));
        }

        if record.ns_updated_at.is_some() && !force {
            info!(domain = %domain, "Nameservers already updated, skipping (use force to re-run)");
            return Ok(MigrationOutcome {
                domain,
                status: record.status,
                disposition: MigrationDisposition::Halted,
                completed_phases: Vec::new(),
                failed_phase: None,
                error: None,
            });
        }

        match self.phase_update_ns(&mut record, skip_confirm).await {
            Ok(PhaseRun::Completed) => Ok(MigrationOutcome {
                domain: record.domain,
                status: record.status,
                disposition: MigrationDisposition::Completed,
                completed_phases: vec![Phase::UpdateNameservers],
                failed_phase: None,
                error: None,
            }),
            Ok(PhaseRun::Halted) => Ok(MigrationOutcome {
                domain: record.domain,
                status: record.status,
                disposition: MigrationDisposition::Halted,
                completed_phases: Vec::new(),
                failed_phase: None,
                error: None,
            }),
            Err(e) => {
                error!(domain = %record.domain, error = %e, "Nameserver update failed");
                record.mark_failed(e.to_string());
                self.store.update(&record).await?;
                Ok(MigrationOutcome {
                    domain: record.domain,
                    status: MigrationStatus::Failed,
                    disposition: MigrationDisposition::Failed,
                    completed_phases: Vec::new(),
                    failed_phase: Some(Phase::UpdateNameservers),
                    error: Some(e.to_string()),
                })
            }
        }
    }

    /// Track a new domain without migrating it
    pub async fn add_domain(&self, domain: &str, registrar: RegistrarKind) -> Result<DomainRecord> {
        let domain = normalize_domain(domain);
        validate_domain(&domain)?;

        let record = DomainRecord::new(&domain, registrar);
        self.store.insert(&record).await?;
        info!(domain = %domain, registrar = %registrar, "Domain added");
        Ok(record)
    }

    /// Per-phase progress for a tracked domain
    pub async fn migration_status(&self, domain: &str) -> Result<MigrationReport> {
        let domain = normalize_domain(domain);
        let record = self
            .store
            .get(&domain)
            .await?
            .ok_or_else(|| Error::not_found(format!("Domain not tracked: {domain}")))?;

        let phases = Phase::ALL
            .iter()
            .map(|&phase| {
                let done = match phase {
                    Phase::AddToProvider => record.zone_id.is_some(),
                    Phase::UpdateNameservers => record.ns_updated_at.is_some(),
                    Phase::ProvisionDns => matches!(
                        record.status,
                        MigrationStatus::DnsConfigured | MigrationStatus::SslConfigured
                    ),
                    Phase::SetTlsMode => record.status.is_terminal_success(),
                };
                (phase, done)
            })
            .collect();

        Ok(MigrationReport { record, phases })
    }

    /// All tracked domains, in creation order
    pub async fn list_domains(&self) -> Result<Vec<DomainRecord>> {
        self.store.list().await
    }

    /// Per-status domain counts, in pipeline order
    pub async fn stats(&self) -> Result<Vec<(MigrationStatus, usize)>> {
        let records = self.store.list().await?;
        Ok(MigrationStatus::ALL
            .iter()
            .map(|&status| {
                let count = records.iter().filter(|r| r.status == status).count();
                (status, count)
            })
            .collect())
    }

    /// Pull the registrar's domain list into the store
    pub async fn import_domains(&self) -> Result<ImportSummary> {
        let registrar = self.registrar.as_ref();
        let domains = self
            .retry
            .run("list registrar domains", || registrar.list_domains())
            .await?;

        let kind: RegistrarKind = self.registrar.registrar_name().parse()?;
        let mut summary = ImportSummary {
            imported: Vec::new(),
            already_tracked: 0,
            invalid: 0,
        };

        for name in domains {
            let domain = normalize_domain(&name);
            if validate_domain(&domain).is_err() {
                warn!(domain = %name, "Skipping invalid domain name from registrar");
                summary.invalid += 1;
                continue;
            }
            if self.store.get(&domain).await?.is_some() {
                summary.already_tracked += 1;
                continue;
            }
            let record = DomainRecord::new(&domain, kind);
            self.store.insert(&record).await?;
            summary.imported.push(domain);
        }

        info!(
            imported = summary.imported.len(),
            already_tracked = summary.already_tracked,
            invalid = summary.invalid,
            "Import finished"
        );
        Ok(summary)
    }

    /// Records and TLS mode currently at the provider for a domain's zone
    pub async fn zone_details(&self, domain: &str) -> Result<ZoneDetails> {
        let domain = normalize_domain(domain);
        let record = self
            .store
            .get(&domain)
            .await?
            .ok_or_else(|| Error::not_found(format!("Domain not tracked: {domain}")))?;

        let zone_id = record
            .zone_id
            .ok_or_else(|| Error::invalid_input(format!("Domain {domain} has no zone yet")))?;

        let provider = self.provider.as_ref();
        let records = self
            .retry
            .run("list records", || provider.list_records(&zone_id))
            .await?;
        let tls_mode = self
            .retry
            .run("read TLS mode", || provider.get_tls_mode(&zone_id))
            .await?;

        Ok(ZoneDetails {
            zone_id,
            records,
            tls_mode,
        })
    }

    /// Probe both adapters' credentials
    pub async fn validate_credentials(&self) -> Vec<CredentialCheck> {
        let mut checks = Vec::with_capacity(2);

        let registrar_result = self.registrar.validate_credentials().await;
        checks.push(CredentialCheck {
            service: self.registrar.registrar_name().to_string(),
            ok: registrar_result.is_ok(),
            error: registrar_result.err().map(|e| e.to_string()),
        });

        let provider_result = self.provider.validate_credentials().await;
        checks.push(CredentialCheck {
            service: self.provider.provider_name().to_string(),
            ok: provider_result.is_ok(),
            error: provider_result.err().map(|e| e.to_string()),
        });

        checks
    }

    /// Access to the underlying store (read paths for the CLI)
    pub fn store(&self) -> &dyn DomainStore {
        self.store.as_ref()
    }

    async fn run_phase(
        &self,
        phase: Phase,
        record: &mut DomainRecord,
        opts: &MigrateOptions,
    ) -> Result<PhaseRun> {
        match phase {
            Phase::AddToProvider => {
                self.phase_add_zone(record).await?;
                Ok(PhaseRun::Completed)
            }
            Phase::UpdateNameservers => self.phase_update_ns(record, opts.skip_confirm).await,
            Phase::ProvisionDns => {
                let target_ip = opts.target_ip.or(self.config.default_target_ip);
                self.phase_provision_dns(record, target_ip).await?;
                Ok(PhaseRun::Completed)
            }
            Phase::SetTlsMode => {
                let mode = opts.tls_mode.unwrap_or(self.config.default_tls_mode);
                self.phase_set_tls(record, mode).await?;
                Ok(PhaseRun::Completed)
            }
        }
    }

    /// Phase 1: create (or reuse) the zone and persist its ID
    async fn phase_add_zone(&self, record: &mut DomainRecord) -> Result<()> {
        let provider = self.provider.as_ref();
        let domain = record.domain.clone();

        let zone = self
            .retry
            .run("create zone", || provider.ensure_zone(&domain))
            .await?;

        if zone.created {
            info!(domain = %domain, zone_id = %zone.id, "Zone created");
        } else {
            info!(domain = %domain, zone_id = %zone.id, "Zone already exists, reusing");
        }

        // zone_id is set once; a retry after failure keeps the original
        if record.zone_id.is_none() {
            record.zone_id = Some(zone.id);
        }
        record.status = MigrationStatus::AddedToProvider;
        record.last_error = None;
        record.touch();
        self.store.update(record).await
    }

    /// Phase 2: back up the registrar's nameservers, then cut over
    async fn phase_update_ns(
        &self,
        record: &mut DomainRecord,
        skip_confirm: bool,
    ) -> Result<PhaseRun> {
        if record.registrar.as_str() != self.registrar.registrar_name() {
            return Err(Error::config(format!(
                "No registrar adapter configured for '{}'",
                record.registrar
            )));
        }

        let zone_id = record
            .zone_id
            .clone()
            .ok_or_else(|| Error::invalid_input("Zone must exist before the nameserver cutover"))?;

        let provider = self.provider.as_ref();
        let registrar = self.registrar.as_ref();
        let domain = record.domain.clone();

        let assigned = self
            .retry
            .run("list assigned nameservers", || {
                provider.zone_nameservers(&zone_id)
            })
            .await?;
        validate_nameservers(&assigned)?;

        // Back up the registrar's nameservers exactly once, and persist the
        // backup before the first write so a crash cannot lose it
        if record.original_nameservers.is_none() {
            let original = self
                .retry
                .run("read registrar nameservers", || {
                    registrar.get_nameservers(&domain)
                })
                .await?;
            info!(domain = %domain, original = ?original, "Backed up original nameservers");
            record.original_nameservers = Some(original);
            record.touch();
            self.store.update(record).await?;
        }

        if self.config.confirm_ns_update && !skip_confirm {
            let prompt = format!(
                "Rewrite nameservers for {} to [{}]?",
                domain,
                assigned.join(", ")
            );
            if !self.gate.confirm(&prompt).await? {
                info!(domain = %domain, "Nameserver update declined by operator");
                return Ok(PhaseRun::Halted);
            }
        }

        let write_timeout = Duration::from_secs(self.config.ns_update_timeout_secs);
        self.retry
            .run("set nameservers", || async {
                if write_timeout.is_zero() {
                    registrar.set_nameservers(&domain, &assigned).await
                } else {
                    match tokio::time::timeout(
                        write_timeout,
                        registrar.set_nameservers(&domain, &assigned),
                    )
                    .await
                    {
                        Ok(result) => result,
                        Err(_) => Err(Error::http(format!(
                            "Nameserver update timed out after {}s",
                            write_timeout.as_secs()
                        ))),
                    }
                }
            })
            .await?;

        if self.config.ns_verification_delay_secs > 0 {
            debug!(
                delay_secs = self.config.ns_verification_delay_secs,
                "Waiting for nameserver change to settle"
            );
            tokio::time::sleep(Duration::from_secs(self.config.ns_verification_delay_secs)).await;
        }

        info!(domain = %domain, nameservers = ?assigned, "Nameservers updated");
        record.assigned_nameservers = assigned;
        record.ns_updated_at = Some(Utc::now());
        // Do not regress a record that already progressed past the cutover
        if matches!(
            record.status,
            MigrationStatus::Pending | MigrationStatus::AddedToProvider | MigrationStatus::Failed
        ) {
            record.status = MigrationStatus::NsUpdated;
        }
        record.last_error = None;
        record.touch();
        self.store.update(record).await?;

        Ok(PhaseRun::Completed)
    }

    /// Phase 3: provision baseline apex and www records
    async fn phase_provision_dns(
        &self,
        record: &mut DomainRecord,
        target_ip: Option<IpAddr>,
    ) -> Result<()> {
        let zone_id = record
            .zone_id
            .clone()
            .ok_or_else(|| Error::invalid_input("Zone must exist before provisioning records"))?;

        let provider = self.provider.as_ref();
        let records = baseline_records(&record.domain, target_ip);

        for dns_record in &records {
            let outcome = self
                .retry
                .run("upsert record", || provider.upsert_record(&zone_id, dns_record))
                .await?;
            debug!(
                name = %dns_record.name,
                record_type = dns_record.record_type.as_str(),
                outcome = ?outcome,
                "Record upserted"
            );
        }

        info!(domain = %record.domain, count = records.len(), "Baseline DNS records provisioned");
        record.status = MigrationStatus::DnsConfigured;
        record.last_error = None;
        record.touch();
        self.store.update(record).await
    }

    /// Phase 4: apply the edge TLS mode
    async fn phase_set_tls(&self, record: &mut DomainRecord, mode: TlsMode) -> Result<()> {
        let zone_id = record
            .zone_id
            .clone()
            .ok_or_else(|| Error::invalid_input("Zone must exist before setting the TLS mode"))?;

        let provider = self.provider.as_ref();
        self.retry
            .run("set TLS mode", || provider.set_tls_mode(&zone_id, mode))
            .await?;

        info!(domain = %record.domain, mode = %mode, "TLS mode applied");
        record.status = MigrationStatus::SslConfigured;
        record.last_error = None;
        record.touch();
        self.store.update(record).await
    }
}

/// Baseline records for a migrated domain: apex plus a mirrored `www`
///
/// With a target IP both are A records; without one both are CNAMEs
/// pointing at the apex. TTL and proxying match what the provider expects
/// for a fresh migration (60 s, proxied).
fn baseline_records(domain: &str, target_ip: Option<IpAddr>) -> Vec<DnsRecord> {
    let www = format!("www.{domain}");
    match target_ip {
        Some(ip) => vec![
            DnsRecord {
                record_type: RecordType::A,
                name: domain.to_string(),
                content: ip.to_string(),
                ttl: 60,
                proxied: true,
            },
            DnsRecord {
                record_type: RecordType::A,
                name: www,
                content: ip.to_string(),
                ttl: 60,
                proxied: true,
            },
        ],
        None => vec![
            DnsRecord {
                record_type: RecordType::Cname,
                name: domain.to_string(),
                content: domain.to_string(),
                ttl: 60,
                proxied: true,
            },
            DnsRecord {
                record_type: RecordType::Cname,
                name: www,
                content: domain.to_string(),
                ttl: 60,
                proxied: true,
            },
        ],
    }
}
