//! Configuration types for the migration engine
//!
//! This module defines all configuration structures used throughout the
//! crate. Configuration is an explicit value handed to the engine at
//! construction; there is no global config access.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::domain::TlsMode;

/// Main migration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Registrar adapter configuration
    pub registrar: RegistrarConfig,

    /// DNS provider adapter configuration
    pub provider: DnsProviderConfig,

    /// Domain record store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Engine settings (retry policy, confirmation, defaults)
    #[serde(default)]
    pub engine: EngineConfig,
}

impl MigrationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.registrar.validate()?;
        self.provider.validate()?;
        self.engine.validate()?;
        Ok(())
    }
}

/// Registrar adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistrarConfig {
    /// GoDaddy registrar
    #[serde(rename = "godaddy")]
    GoDaddy {
        /// GoDaddy API key
        api_key: String,
        /// GoDaddy API secret
        api_secret: String,
        /// Transport variant; affects only the HTTP client wiring,
        /// never orchestration logic
        #[serde(default)]
        client_variant: ClientVariant,
    },

    /// Custom registrar
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl RegistrarConfig {
    /// Validate the registrar configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            RegistrarConfig::GoDaddy {
                api_key,
                api_secret,
                ..
            } => {
                if api_key.is_empty() || api_secret.is_empty() {
                    return Err(crate::Error::config(
                        "GoDaddy API key and secret cannot be empty",
                    ));
                }
                Ok(())
            }
            RegistrarConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom registrar factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom registrar config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the registrar type name
    pub fn type_name(&self) -> &str {
        match self {
            RegistrarConfig::GoDaddy { .. } => "godaddy",
            RegistrarConfig::Custom { factory, .. } => factory,
        }
    }
}

/// Registrar HTTP transport variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientVariant {
    /// Direct REST client
    #[default]
    New,
    /// Legacy wrapper; kept for config compatibility, shares the same
    /// transport as `New`
    Legacy,
}

/// DNS provider adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DnsProviderConfig {
    /// Cloudflare provider
    Cloudflare {
        /// Cloudflare API token (preferred)
        #[serde(default)]
        api_token: Option<String>,
        /// Legacy global API key (requires `email`)
        #[serde(default)]
        api_key: Option<String>,
        /// Account email for legacy key auth
        #[serde(default)]
        email: Option<String>,
        /// Account ID (optional)
        #[serde(default)]
        account_id: Option<String>,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl DnsProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            DnsProviderConfig::Cloudflare {
                api_token,
                api_key,
                email,
                ..
            } => {
                let has_token = api_token.as_deref().is_some_and(|t| !t.is_empty());
                let has_key_email = api_key.as_deref().is_some_and(|k| !k.is_empty())
                    && email.as_deref().is_some_and(|e| !e.is_empty());
                if !has_token && !has_key_email {
                    return Err(crate::Error::config(
                        "Cloudflare credentials missing: set api_token, or api_key plus email",
                    ));
                }
                Ok(())
            }
            DnsProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom provider config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            DnsProviderConfig::Cloudflare { .. } => "cloudflare",
            DnsProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

/// Domain record store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfig {
    /// File-based store (JSON, atomic writes, backup recovery)
    File {
        /// Path to the store file
        path: String,
    },

    /// In-memory store (not persistent)
    #[default]
    Memory,

    /// Custom store
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum attempts per retried adapter call
    #[serde(default = "default_max_retry_attempts")]
    pub max_retry_attempts: usize,

    /// Base backoff delay in seconds; attempt n waits `base * 2^n`
    #[serde(default = "default_retry_base_delay_secs")]
    pub retry_base_delay_secs: u64,

    /// Upper bound on a single backoff wait, in seconds
    #[serde(default = "default_retry_max_delay_secs")]
    pub retry_max_delay_secs: u64,

    /// Whether migrations rewrite registrar nameservers automatically.
    /// When false, a migration halts after the zone-add phase and waits
    /// for an explicit `update-ns` invocation.
    #[serde(default = "default_auto_update_nameservers")]
    pub auto_update_nameservers: bool,

    /// Whether the confirmation gate fires before the nameserver write
    #[serde(default)]
    pub confirm_ns_update: bool,

    /// Timeout for the registrar's nameserver write, in seconds
    #[serde(default = "default_ns_update_timeout_secs")]
    pub ns_update_timeout_secs: u64,

    /// Settle delay after the nameserver write before the next phase,
    /// in seconds
    #[serde(default = "default_ns_verification_delay_secs")]
    pub ns_verification_delay_secs: u64,

    /// Target IP used for baseline A records when `migrate` is invoked
    /// without an explicit one
    #[serde(default)]
    pub default_target_ip: Option<IpAddr>,

    /// TLS mode applied when `migrate` is invoked without an explicit one
    #[serde(default)]
    pub default_tls_mode: TlsMode,
}

impl EngineConfig {
    /// Validate the engine settings
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.max_retry_attempts == 0 {
            return Err(crate::Error::config("max_retry_attempts must be > 0"));
        }
        if self.retry_base_delay_secs > self.retry_max_delay_secs {
            return Err(crate::Error::config(
                "retry_base_delay_secs cannot exceed retry_max_delay_secs",
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_retry_attempts: default_max_retry_attempts(),
            retry_base_delay_secs: default_retry_base_delay_secs(),
            retry_max_delay_secs: default_retry_max_delay_secs(),
            auto_update_nameservers: default_auto_update_nameservers(),
            confirm_ns_update: false,
            ns_update_timeout_secs: default_ns_update_timeout_secs(),
            ns_verification_delay_secs: default_ns_verification_delay_secs(),
            default_target_ip: None,
            default_tls_mode: TlsMode::default(),
        }
    }
}

fn default_max_retry_attempts() -> usize {
    3
}

fn default_retry_base_delay_secs() -> u64 {
    1
}

fn default_retry_max_delay_secs() -> u64 {
    10
}

fn default_auto_update_nameservers() -> bool {
    true
}

fn default_ns_update_timeout_secs() -> u64 {
    30
}

fn default_ns_verification_delay_secs() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_defaults() {
        let engine = EngineConfig::default();
        assert_eq!(engine.max_retry_attempts, 3);
        assert_eq!(engine.retry_base_delay_secs, 1);
        assert_eq!(engine.retry_max_delay_secs, 10);
        assert!(engine.auto_update_nameservers);
        assert!(!engine.confirm_ns_update);
        assert_eq!(engine.default_tls_mode, TlsMode::Flexible);
    }

    #[test]
    fn godaddy_config_requires_credentials() {
        let config = RegistrarConfig::GoDaddy {
            api_key: String::new(),
            api_secret: "secret".to_string(),
            client_variant: ClientVariant::default(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn cloudflare_accepts_token_or_key_email() {
        let token_only = DnsProviderConfig::Cloudflare {
            api_token: Some("token".to_string()),
            api_key: None,
            email: None,
            account_id: None,
        };
        assert!(token_only.validate().is_ok());

        let key_only = DnsProviderConfig::Cloudflare {
            api_token: None,
            api_key: Some("key".to_string()),
            email: None,
            account_id: None,
        };
        assert!(key_only.validate().is_err());

        let key_email = DnsProviderConfig::Cloudflare {
            api_token: None,
            api_key: Some("key".to_string()),
            email: Some("ops@example.com".to_string()),
            account_id: None,
        };
        assert!(key_email.validate().is_ok());
    }

    #[test]
    fn config_variants_deserialize_from_tagged_json() {
        let json = r#"{"type": "godaddy", "api_key": "k", "api_secret": "s"}"#;
        let config: RegistrarConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.type_name(), "godaddy");

        let json = r#"{"type": "file", "path": "/var/lib/dnsmigrate/domains.json"}"#;
        let store: StoreConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(store, StoreConfig::File { .. }));
    }

    #[test]
    fn retry_bounds_are_checked() {
        let engine = EngineConfig {
            retry_base_delay_secs: 30,
            retry_max_delay_secs: 10,
            ..EngineConfig::default()
        };
        assert!(engine.validate().is_err());
    }
}
