//! Zone maintenance operations
//!
//! Two operator-facing operations next to the migration pipeline:
//!
//! - `refresh_domains` re-derives each tracked record's provider state from
//!   a live zone lookup: it adopts zones created out of band, repairs stale
//!   zone IDs, and flags domains whose zone vanished at the provider.
//! - `delete_dns_records` clears a zone's records by type, with a dry-run
//!   plan and a confirmation gate. NS, MX, TXT, and SRV records are always
//!   preserved so the zone keeps resolving and receiving mail.

use tracing::{info, warn};

use crate::domain::MigrationStatus;
use crate::error::{Error, Result};
use crate::traits::dns_provider::RecordMetadata;

use super::MigrationEngine;

/// Record types deleted when no explicit filter is given
const DEFAULT_DELETE_TYPES: [&str; 3] = ["A", "AAAA", "CNAME"];

/// Record types never deleted, regardless of the filter
const PROTECTED_RECORD_TYPES: [&str; 4] = ["NS", "MX", "TXT", "SRV"];

/// Record types accepted in a delete filter
const KNOWN_RECORD_TYPES: [&str; 7] = ["A", "AAAA", "CNAME", "MX", "TXT", "SRV", "NS"];

/// How a refresh left one domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The record already matched the provider
    Unchanged,
    /// The record was repaired from live provider state
    Updated,
    /// The record claims a zone the provider no longer has
    ZoneMissing,
    /// The provider lookup itself failed; the record was left untouched
    Failed,
    /// Dry-run only: nothing was checked
    Skipped,
}

/// Per-domain entry in a refresh report
#[derive(Debug, Clone)]
pub struct RefreshEntry {
    pub domain: String,
    pub outcome: RefreshOutcome,
    /// Status after the refresh (or current status, for a dry-run)
    pub status: MigrationStatus,
    pub error: Option<String>,
}

/// Aggregated outcome of a refresh run
#[derive(Debug, Clone, Default)]
pub struct RefreshReport {
    pub entries: Vec<RefreshEntry>,
}

impl RefreshReport {
    /// Number of records repaired from provider state
    pub fn updated_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.outcome,
                    RefreshOutcome::Updated | RefreshOutcome::ZoneMissing
                )
            })
            .count()
    }

    /// Number of domains whose lookup failed
    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == RefreshOutcome::Failed)
            .count()
    }
}

/// Options for a record deletion run
#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    /// Record types to delete (provider spelling); `None` means the default
    /// safe set (A, AAAA, CNAME). Protected types are preserved either way.
    pub record_types: Option<Vec<String>>,

    /// Plan only: list the records that would be deleted
    pub dry_run: bool,

    /// Bypass the confirmation gate
    pub skip_confirm: bool,
}

/// Outcome of one record deletion run
#[derive(Debug, Clone)]
pub struct DeleteReport {
    pub domain: String,
    pub zone_id: String,
    /// Records in the zone before deletion
    pub total_records: usize,
    /// Records matching the filter (the deletion plan)
    pub planned: Vec<RecordMetadata>,
    /// Records left in place (protected or outside the filter)
    pub preserved: usize,
    pub deleted: usize,
    pub failed: usize,
    pub dry_run: bool,
    /// The confirmation gate declined; nothing was deleted
    pub cancelled: bool,
}

/// Split a zone's records into (to delete, preserved count)
///
/// Protected types stay even when the filter names them.
fn partition_records(
    records: Vec<RecordMetadata>,
    delete_types: &[String],
) -> (Vec<RecordMetadata>, usize) {
    let total = records.len();
    let planned: Vec<RecordMetadata> = records
        .into_iter()
        .filter(|r| {
            delete_types.iter().any(|t| t == &r.record_type)
                && !PROTECTED_RECORD_TYPES.contains(&r.record_type.as_str())
        })
        .collect();
    let preserved = total - planned.len();
    (planned, preserved)
}

/// Normalize and validate a delete filter, falling back to the default set
fn resolve_delete_types(requested: Option<&[String]>) -> Result<Vec<String>> {
    match requested {
        None => Ok(DEFAULT_DELETE_TYPES.iter().map(|t| t.to_string()).collect()),
        Some(types) => {
            let normalized: Vec<String> =
                types.iter().map(|t| t.trim().to_uppercase()).collect();
            for t in &normalized {
                if !KNOWN_RECORD_TYPES.contains(&t.as_str()) {
                    return Err(Error::invalid_input(format!(
                        "Unknown record type '{t}', expected one of {}",
                        KNOWN_RECORD_TYPES.join(", ")
                    )));
                }
            }
            Ok(normalized)
        }
    }
}

impl MigrationEngine {
    /// Re-derive every tracked record's state from the provider
    ///
    /// For each domain the zone is looked up by name. A found zone repairs
    /// a missing or stale `zone_id` (and promotes a `pending` record, since
    /// the zone-add phase is evidently done); a vanished zone clears the
    /// stale `zone_id` and marks the record `failed` so the next migration
    /// re-creates it. One domain's lookup failure never aborts the run.
    pub async fn refresh_domains(&self, dry_run: bool) -> Result<RefreshReport> {
        let records = self.store.list().await?;
        info!(candidates = records.len(), dry_run, "Starting refresh");

        let mut report = RefreshReport::default();
        for mut record in records {
            if dry_run {
                report.entries.push(RefreshEntry {
                    domain: record.domain,
                    outcome: RefreshOutcome::Skipped,
                    status: record.status,
                    error: None,
                });
                continue;
            }

            let entry = match self.refresh_one(&mut record).await {
                Ok(outcome) => RefreshEntry {
                    domain: record.domain,
                    outcome,
                    status: record.status,
                    error: record.last_error.clone(),
                },
                Err(e) => {
                    warn!(domain = %record.domain, error = %e, "Refresh entry errored");
                    RefreshEntry {
                        domain: record.domain,
                        outcome: RefreshOutcome::Failed,
                        status: record.status,
                        error: Some(e.to_string()),
                    }
                }
            };
            report.entries.push(entry);
        }

        info!(
            total = report.entries.len(),
            updated = report.updated_count(),
            failed = report.failed_count(),
            "Refresh finished"
        );
        Ok(report)
    }

    async fn refresh_one(&self, record: &mut crate::domain::DomainRecord) -> Result<RefreshOutcome> {
        let provider = self.provider.as_ref();
        let domain = record.domain.clone();

        let live = self
            .retry
            .run("zone lookup", || provider.find_zone(&domain))
            .await?;

        match live {
            Some(zone) => {
                let mut changed = false;

                if record.zone_id.as_deref() != Some(zone.id.as_str()) {
                    info!(domain = %domain, zone_id = %zone.id, "Adopting live zone");
                    record.zone_id = Some(zone.id);
                    changed = true;
                }
                if record.status == MigrationStatus::Pending {
                    record.status = MigrationStatus::AddedToProvider;
                    changed = true;
                }
                // assigned_nameservers are otherwise only written by the NS
                // phase; fill them in when the record has none yet
                if record.assigned_nameservers.is_empty() && !zone.nameservers.is_empty() {
                    record.assigned_nameservers = zone.nameservers;
                    changed = true;
                }

                if changed {
                    record.last_error = None;
                    record.touch();
                    self.store.update(record).await?;
                    Ok(RefreshOutcome::Updated)
                } else {
                    Ok(RefreshOutcome::Unchanged)
                }
            }
            None => {
                if record.zone_id.is_none() {
                    return Ok(RefreshOutcome::Unchanged);
                }
                // The zone this record points at is gone; clear the stale ID
                // so the next migration re-runs zone-add
                warn!(domain = %domain, "Zone no longer exists at the provider");
                record.zone_id = None;
                record.mark_failed("Zone no longer exists at the provider".to_string());
                self.store.update(record).await?;
                Ok(RefreshOutcome::ZoneMissing)
            }
        }
    }

    /// Delete DNS records from a domain's zone
    ///
    /// Deletes the records matching the type filter (default: A, AAAA,
    /// CNAME) while always preserving NS, MX, TXT, and SRV records. The
    /// plan runs through the confirmation gate unless `skip_confirm` is
    /// set; a dry-run returns the plan with zero deletions.
    pub async fn delete_dns_records(
        &self,
        domain: &str,
        opts: &DeleteOptions,
    ) -> Result<DeleteReport> {
        let domain = crate::domain::normalize_domain(domain);
        let record = self
            .store
            .get(&domain)
            .await?
            .ok_or_else(|| Error::not_found(format!("Domain not tracked: {domain}")))?;

        let zone_id = record
            .zone_id
            .ok_or_else(|| Error::invalid_input(format!("Domain {domain} has no zone yet")))?;

        let delete_types = resolve_delete_types(opts.record_types.as_deref())?;

        let provider = self.provider.as_ref();
        let records = self
            .retry
            .run("list records", || provider.list_records(&zone_id))
            .await?;

        let (planned, preserved) = partition_records(records, &delete_types);
        let mut report = DeleteReport {
            domain: domain.clone(),
            zone_id: zone_id.clone(),
            total_records: planned.len() + preserved,
            planned,
            preserved,
            deleted: 0,
            failed: 0,
            dry_run: opts.dry_run,
            cancelled: false,
        };

        if opts.dry_run || report.planned.is_empty() {
            info!(
                domain = %domain,
                planned = report.planned.len(),
                preserved = report.preserved,
                "Deletion planned, nothing executed"
            );
            return Ok(report);
        }

        if !opts.skip_confirm {
            let prompt = format!(
                "Delete {} DNS record(s) from {}? The domain may stop resolving.",
                report.planned.len(),
                domain
            );
            if !self.gate.confirm(&prompt).await? {
                info!(domain = %domain, "Record deletion declined by operator");
                report.cancelled = true;
                return Ok(report);
            }
        }

        let mut deleted = 0;
        let mut failed = 0;
        for target in &report.planned {
            let result = self
                .retry
                .run("delete record", || provider.delete_record(&zone_id, &target.id))
                .await;
            match result {
                Ok(()) => {
                    info!(
                        name = %target.name,
                        record_type = %target.record_type,
                        "Record deleted"
                    );
                    deleted += 1;
                }
                Err(e) => {
                    warn!(
                        name = %target.name,
                        record_type = %target.record_type,
                        error = %e,
                        "Record deletion failed"
                    );
                    failed += 1;
                }
            }
        }
        report.deleted = deleted;
        report.failed = failed;

        info!(
            domain = %domain,
            deleted = report.deleted,
            failed = report.failed,
            preserved = report.preserved,
            "Record deletion finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(record_type: &str, name: &str) -> RecordMetadata {
        RecordMetadata {
            id: format!("{record_type}-{name}"),
            record_type: record_type.to_string(),
            name: name.to_string(),
            content: "content".to_string(),
            ttl: Some(60),
            proxied: Some(false),
        }
    }

    #[test]
    fn default_delete_types_skip_protected_records() {
        let records = vec![
            meta("A", "example.com"),
            meta("CNAME", "www.example.com"),
            meta("MX", "example.com"),
            meta("NS", "example.com"),
        ];
        let types = resolve_delete_types(None).unwrap();
        let (planned, preserved) = partition_records(records, &types);

        assert_eq!(planned.len(), 2);
        assert!(planned.iter().all(|r| r.record_type != "MX"));
        assert_eq!(preserved, 2);
    }

    #[test]
    fn protected_types_survive_an_explicit_filter() {
        let records = vec![meta("MX", "example.com"), meta("A", "example.com")];
        let types = resolve_delete_types(Some(&["MX".to_string()])).unwrap();
        let (planned, preserved) = partition_records(records, &types);

        assert!(planned.is_empty());
        assert_eq!(preserved, 2);
    }

    #[test]
    fn filter_types_are_case_insensitive() {
        let types = resolve_delete_types(Some(&["cname".to_string(), " a ".to_string()]))
            .unwrap();
        assert_eq!(types, vec!["CNAME".to_string(), "A".to_string()]);
    }

    #[test]
    fn unknown_filter_types_are_rejected() {
        let result = resolve_delete_types(Some(&["BOGUS".to_string()]));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
