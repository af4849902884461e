//! Sync reconciler
//!
//! Batch variant of the orchestrator: scans the store for domains not yet
//! at terminal success and drives each through `migrate`, sequentially,
//! collecting per-domain outcomes into a report. One domain's failure never
//! aborts the batch.
//!
//! Sequential processing is deliberate: concurrent nameserver writes to the
//! same registrar across domains are not known-safe, and a serial
//! reconciler gives a total ordering for audit logs.

use tracing::{info, warn};

use crate::domain::MigrationStatus;
use crate::engine::{MigrateOptions, MigrationDisposition, MigrationEngine, Phase};
use crate::error::Result;

/// Options for one reconciliation run
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Plan only: list the phases each domain would run, with zero adapter
    /// calls and zero store mutations
    pub dry_run: bool,

    /// Override `auto_update_nameservers` for this run
    pub update_nameservers: Option<bool>,

    /// Bypass the confirmation gate for this run
    pub skip_confirm: bool,

    /// Also re-process domains already at terminal success
    pub include_completed: bool,
}

/// How one domain fared during reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Reached terminal success
    Completed,
    /// Stopped without error before terminal success
    Halted,
    /// A phase failed; the record is at `failed`
    Failed,
    /// Dry-run only: nothing executed
    Planned,
}

/// Per-domain entry in a sync report
#[derive(Debug, Clone)]
pub struct SyncEntry {
    pub domain: String,
    pub outcome: SyncOutcome,
    /// Status after the run (or current status, for a dry-run)
    pub status: MigrationStatus,
    /// Phases that would run (dry-run) or were attempted
    pub planned_phases: Vec<Phase>,
    /// Whether the confirmation gate would fire (dry-run only)
    pub would_confirm: bool,
    pub error: Option<String>,
}

/// Aggregated outcome of a reconciliation run
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub entries: Vec<SyncEntry>,
}

impl SyncReport {
    /// Number of domains that ended in `failed`
    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == SyncOutcome::Failed)
            .count()
    }

    /// True when no domain ended in `failed`
    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0
    }
}

impl MigrationEngine {
    /// Reconcile every domain not yet at terminal success
    pub async fn sync_all(&self, opts: &SyncOptions) -> Result<SyncReport> {
        let candidates: Vec<_> = self
            .store()
            .list()
            .await?
            .into_iter()
            .filter(|r| opts.include_completed || !r.status.is_terminal_success())
            .collect();

        info!(candidates = candidates.len(), dry_run = opts.dry_run, "Starting sync");

        let migrate_opts = MigrateOptions {
            target_ip: None,
            tls_mode: None,
            skip_confirm: opts.skip_confirm,
            update_nameservers: opts.update_nameservers,
        };

        let mut report = SyncReport::default();

        if opts.dry_run {
            for record in candidates {
                let (planned_phases, would_confirm) = self.plan(&record, &migrate_opts);
                report.entries.push(SyncEntry {
                    domain: record.domain,
                    outcome: SyncOutcome::Planned,
                    status: record.status,
                    planned_phases,
                    would_confirm,
                    error: None,
                });
            }
            return Ok(report);
        }

        for record in candidates {
            let domain = record.domain.clone();
            let (planned_phases, _) = self.plan(&record, &migrate_opts);

            match self.migrate(&domain, &migrate_opts).await {
                Ok(outcome) => {
                    let sync_outcome = match outcome.disposition {
                        MigrationDisposition::Completed => SyncOutcome::Completed,
                        MigrationDisposition::Halted => SyncOutcome::Halted,
                        MigrationDisposition::Failed => SyncOutcome::Failed,
                    };
                    report.entries.push(SyncEntry {
                        domain: outcome.domain,
                        outcome: sync_outcome,
                        status: outcome.status,
                        planned_phases,
                        would_confirm: false,
                        error: outcome.error,
                    });
                }
                Err(e) => {
                    // Store-level error for one domain; keep going
                    warn!(domain = %domain, error = %e, "Sync entry errored");
                    report.entries.push(SyncEntry {
                        domain,
                        outcome: SyncOutcome::Failed,
                        status: record.status,
                        planned_phases,
                        would_confirm: false,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        info!(
            total = report.entries.len(),
            failed = report.failed_count(),
            "Sync finished"
        );
        Ok(report)
    }
}
