//! Domain record model
//!
//! The [`DomainRecord`] is the unit of durable state: one record per domain
//! name, advanced through the migration state machine by the engine and
//! persisted by a [`crate::traits::DomainStore`] after every phase commit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Migration status of a single domain
///
/// Progression is monotonic except `Failed`, which is reachable from any
/// non-terminal state and re-enters the pipeline on the next migration
/// attempt. `SslConfigured` is the sole terminal-success state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStatus {
    /// Tracked, nothing done yet
    Pending,
    /// Zone exists at the DNS provider
    AddedToProvider,
    /// Registrar nameservers point at the provider
    NsUpdated,
    /// Baseline DNS records provisioned
    DnsConfigured,
    /// TLS mode applied; migration complete
    SslConfigured,
    /// A phase failed after exhausting retries (or fatally)
    Failed,
}

impl MigrationStatus {
    /// All statuses, in pipeline order (`Failed` last)
    pub const ALL: [MigrationStatus; 6] = [
        MigrationStatus::Pending,
        MigrationStatus::AddedToProvider,
        MigrationStatus::NsUpdated,
        MigrationStatus::DnsConfigured,
        MigrationStatus::SslConfigured,
        MigrationStatus::Failed,
    ];

    /// Whether this status marks a finished migration
    pub fn is_terminal_success(&self) -> bool {
        matches!(self, MigrationStatus::SslConfigured)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationStatus::Pending => "pending",
            MigrationStatus::AddedToProvider => "added_to_provider",
            MigrationStatus::NsUpdated => "ns_updated",
            MigrationStatus::DnsConfigured => "dns_configured",
            MigrationStatus::SslConfigured => "ssl_configured",
            MigrationStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MigrationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(MigrationStatus::Pending),
            "added_to_provider" => Ok(MigrationStatus::AddedToProvider),
            "ns_updated" => Ok(MigrationStatus::NsUpdated),
            "dns_configured" => Ok(MigrationStatus::DnsConfigured),
            "ssl_configured" => Ok(MigrationStatus::SslConfigured),
            "failed" => Ok(MigrationStatus::Failed),
            other => Err(Error::invalid_input(format!(
                "Unknown migration status: {other}"
            ))),
        }
    }
}

/// Registrar owning a domain
///
/// A closed set of tagged variants; the engine dispatches to the matching
/// registrar adapter using this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrarKind {
    GoDaddy,
}

impl RegistrarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrarKind::GoDaddy => "godaddy",
        }
    }
}

impl fmt::Display for RegistrarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrarKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "godaddy" => Ok(RegistrarKind::GoDaddy),
            other => Err(Error::invalid_input(format!("Unknown registrar: {other}"))),
        }
    }
}

/// TLS mode applied at the DNS provider's edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    Off,
    Flexible,
    Full,
    Strict,
}

impl TlsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TlsMode::Off => "off",
            TlsMode::Flexible => "flexible",
            TlsMode::Full => "full",
            TlsMode::Strict => "strict",
        }
    }
}

impl Default for TlsMode {
    fn default() -> Self {
        TlsMode::Flexible
    }
}

impl fmt::Display for TlsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TlsMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "off" => Ok(TlsMode::Off),
            "flexible" => Ok(TlsMode::Flexible),
            "full" => Ok(TlsMode::Full),
            "strict" => Ok(TlsMode::Strict),
            other => Err(Error::invalid_input(format!(
                "Invalid TLS mode '{other}', expected off|flexible|full|strict"
            ))),
        }
    }
}

/// Durable per-domain migration state
///
/// Invariants upheld by the engine:
/// - `zone_id` is set once and retained across failures; a retry reuses the
///   existing zone rather than creating a duplicate.
/// - `original_nameservers` is captured exactly once, immediately before the
///   first nameserver write, and never overwritten.
/// - `assigned_nameservers`, once set, is never empty and is only replaced
///   together with a refresh of `ns_updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Domain name; unique key, immutable after creation
    pub domain: String,

    /// Which registrar adapter owns this domain
    pub registrar: RegistrarKind,

    /// Current position in the migration state machine
    pub status: MigrationStatus,

    /// Provider-assigned zone identifier; absent until `added_to_provider`
    #[serde(default)]
    pub zone_id: Option<String>,

    /// Nameservers assigned by the DNS provider; set at the NS cutover
    #[serde(default)]
    pub assigned_nameservers: Vec<String>,

    /// Registrar nameservers as they were before the first NS write;
    /// write-once rollback backup
    #[serde(default)]
    pub original_nameservers: Option<Vec<String>>,

    /// When the registrar's nameservers were last rewritten
    #[serde(default)]
    pub ns_updated_at: Option<DateTime<Utc>>,

    /// Last failure message; cleared when the failed phase later succeeds
    #[serde(default)]
    pub last_error: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DomainRecord {
    /// Create a fresh record in `pending` state
    pub fn new(domain: impl Into<String>, registrar: RegistrarKind) -> Self {
        let now = Utc::now();
        Self {
            domain: domain.into(),
            registrar,
            status: MigrationStatus::Pending,
            zone_id: None,
            assigned_nameservers: Vec::new(),
            original_nameservers: None,
            ns_updated_at: None,
            last_error: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`; call before persisting any mutation
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Record a phase failure without discarding prior phase outputs
    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.status = MigrationStatus::Failed;
        self.last_error = Some(message.into());
        self.touch();
    }
}

/// Normalize a user-supplied domain name
///
/// Lowercases, strips an `http://`/`https://` prefix and any trailing slash.
pub fn normalize_domain(domain: &str) -> String {
    let mut domain = domain.trim().to_lowercase();
    if let Some(stripped) = domain.strip_prefix("https://") {
        domain = stripped.to_string();
    } else if let Some(stripped) = domain.strip_prefix("http://") {
        domain = stripped.to_string();
    }
    domain.trim_end_matches('/').to_string()
}

/// Validate a domain name (RFC 1035 shape, max 253 characters)
pub fn validate_domain(domain: &str) -> Result<()> {
    if domain.is_empty() || domain.len() > 253 {
        return Err(Error::invalid_input(format!(
            "Invalid domain name: '{domain}'"
        )));
    }

    for label in domain.split('.') {
        let valid = !label.is_empty()
            && label.len() <= 63
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-');
        if !valid {
            return Err(Error::invalid_input(format!(
                "Invalid domain name: '{domain}'"
            )));
        }
    }

    Ok(())
}

/// Validate a nameserver list: non-empty, every entry a valid hostname
pub fn validate_nameservers(nameservers: &[String]) -> Result<()> {
    if nameservers.is_empty() {
        return Err(Error::invalid_input("Nameserver list is empty"));
    }
    for ns in nameservers {
        validate_domain(ns.trim_end_matches('.'))?;
    }
    Ok(())
}
