// # GoDaddy Registrar
//
// GoDaddy adapter for the migration engine: reads and rewrites a domain's
// authoritative nameservers and lists the domains in the account.
//
// ## Contract
//
// - Single-shot API calls; retry/backoff is owned by the MigrationEngine
// - `set_nameservers` is a whole-set PUT and therefore naturally idempotent
// - Failures are classified per HTTP status (401/403 auth, 404 not found,
//   429 rate limit, 5xx transient)
// - The API key/secret NEVER appears in logs or Debug output
//
// ## API Reference
//
// - GoDaddy API v1: https://developer.godaddy.com/doc/endpoint/domains
// - Read nameservers: GET `/domains/{domain}/records/NS`
// - Write nameservers: PUT `/domains/{domain}/records/NS`
// - List domains: GET `/domains?limit=...&marker=...`

use async_trait::async_trait;
use dnsmigrate_core::config::RegistrarConfig;
use dnsmigrate_core::traits::{Registrar, RegistrarFactory};
use dnsmigrate_core::{Error, Result};
use serde_json::Value;
use std::time::Duration;

/// GoDaddy API base URL
const GODADDY_API_BASE: &str = "https://api.godaddy.com/v1";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size for domain listing
const LIST_PAGE_SIZE: usize = 100;

/// GoDaddy registrar adapter
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose credentials.
pub struct GoDaddyRegistrar {
    /// ⚠️ NEVER log these values
    api_key: String,
    api_secret: String,

    /// HTTP client for API requests
    client: reqwest::Client,

    base_url: String,
}

impl std::fmt::Debug for GoDaddyRegistrar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoDaddyRegistrar")
            .field("api_key", &"<REDACTED>")
            .field("api_secret", &"<REDACTED>")
            .finish()
    }
}

impl GoDaddyRegistrar {
    /// Create a new GoDaddy registrar adapter
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();
        if api_key.is_empty() || api_secret.is_empty() {
            return Err(Error::config("GoDaddy API key and secret cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            api_secret,
            client,
            base_url: GODADDY_API_BASE.to_string(),
        })
    }

    /// Override the API base URL (test servers, OTE environment)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header(
            "Authorization",
            format!("sso-key {}:{}", self.api_key, self.api_secret),
        )
    }

    /// Send a request, mapping HTTP statuses to classified errors
    async fn send(&self, request: reqwest::RequestBuilder, context: &str) -> Result<reqwest::Response> {
        let response = self
            .authorize(request)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| Error::http(format!("HTTP request failed ({context}): {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return match status.as_u16() {
                401 | 403 => Err(Error::auth(format!(
                    "GoDaddy rejected the credentials ({context}). \
                    Check the API key and secret. Status: {status}"
                ))),
                404 => Err(Error::not_found(format!(
                    "GoDaddy resource not found ({context})"
                ))),
                429 => Err(Error::rate_limited(format!(
                    "GoDaddy rate limit exceeded ({context}). Status: {status}"
                ))),
                500..=599 => Err(Error::http(format!(
                    "GoDaddy server error ({context}): {status} - {error_text}"
                ))),
                _ => Err(Error::registrar(
                    "godaddy",
                    format!("{context} failed: {status} - {error_text}"),
                )),
            };
        }

        Ok(response)
    }

    async fn send_json(&self, request: reqwest::RequestBuilder, context: &str) -> Result<Value> {
        let response = self.send(request, context).await?;
        response
            .json()
            .await
            .map_err(|e| Error::registrar("godaddy", format!("Failed to parse response: {e}")))
    }
}

#[async_trait]
impl Registrar for GoDaddyRegistrar {
    /// Read the domain's current NS records
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /domains/example.com/records/NS
    /// ```
    async fn get_nameservers(&self, domain: &str) -> Result<Vec<String>> {
        let url = format!("{}/domains/{}/records/NS", self.base_url, domain);
        let json = self
            .send_json(self.client.get(&url), "nameserver lookup")
            .await?;

        let records = json.as_array().ok_or_else(|| {
            Error::registrar("godaddy", "Invalid response format: expected an array of records")
        })?;

        let nameservers: Vec<String> = records
            .iter()
            .filter_map(|r| r["data"].as_str())
            .map(str::to_string)
            .collect();

        if nameservers.is_empty() {
            return Err(Error::registrar(
                "godaddy",
                format!("No NS records returned for {domain}"),
            ));
        }

        tracing::debug!(domain, count = nameservers.len(), "Fetched nameservers");
        Ok(nameservers)
    }

    /// Rewrite the domain's NS records
    ///
    /// The PUT replaces the whole NS record set, so re-applying the same
    /// target list is a no-op at the registrar.
    ///
    /// # API Call
    ///
    /// ```http
    /// PUT /domains/example.com/records/NS
    /// [{ "data": "ns1.example-dns.net", "name": "@", "ttl": 3600, "type": "NS" }, ...]
    /// ```
    async fn set_nameservers(&self, domain: &str, nameservers: &[String]) -> Result<()> {
        if nameservers.is_empty() {
            return Err(Error::invalid_input(
                "Refusing to write an empty nameserver list",
            ));
        }

        let payload: Vec<Value> = nameservers
            .iter()
            .map(|ns| {
                serde_json::json!({
                    "data": ns,
                    "name": "@",
                    "ttl": 3600,
                    "type": "NS",
                })
            })
            .collect();

        let url = format!("{}/domains/{}/records/NS", self.base_url, domain);
        self.send(self.client.put(&url).json(&payload), "nameserver update")
            .await?;

        tracing::info!(domain, nameservers = ?nameservers, "Nameservers updated");
        Ok(())
    }

    /// List all active domains in the account
    ///
    /// Paginates with the `marker` cursor until a short page comes back.
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /domains?statuses=ACTIVE&limit=100[&marker=last-domain.com]
    /// ```
    async fn list_domains(&self) -> Result<Vec<String>> {
        let mut domains = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut url = format!(
                "{}/domains?statuses=ACTIVE&limit={}",
                self.base_url, LIST_PAGE_SIZE
            );
            if let Some(m) = &marker {
                url.push_str(&format!("&marker={m}"));
            }

            let json = self.send_json(self.client.get(&url), "domain listing").await?;

            let page = json.as_array().ok_or_else(|| {
                Error::registrar("godaddy", "Invalid response format: expected an array of domains")
            })?;

            let mut page_names: Vec<String> = page
                .iter()
                .filter_map(|d| d["domain"].as_str())
                .map(str::to_string)
                .collect();

            let page_len = page_names.len();
            marker = page_names.last().cloned();
            domains.append(&mut page_names);

            if page_len < LIST_PAGE_SIZE {
                break;
            }
        }

        tracing::debug!(count = domains.len(), "Listed account domains");
        Ok(domains)
    }

    /// Verify the configured credentials with a one-domain listing probe
    async fn validate_credentials(&self) -> Result<()> {
        let url = format!("{}/domains?limit=1", self.base_url);
        self.send(self.client.get(&url), "credential check").await?;
        Ok(())
    }

    fn registrar_name(&self) -> &'static str {
        "godaddy"
    }
}

/// Factory for creating GoDaddy registrars
pub struct GoDaddyFactory;

impl RegistrarFactory for GoDaddyFactory {
    fn create(&self, config: &RegistrarConfig) -> Result<Box<dyn Registrar>> {
        match config {
            RegistrarConfig::GoDaddy {
                api_key,
                api_secret,
                // Variant switches nothing in the transport anymore; both
                // settle on the same REST client
                client_variant: _,
            } => Ok(Box::new(GoDaddyRegistrar::new(api_key, api_secret)?)),
            _ => Err(Error::config("Invalid config for GoDaddy registrar")),
        }
    }
}

/// Register the GoDaddy registrar with a registry
///
/// Call during initialization to make the registrar available under the
/// "godaddy" config tag.
pub fn register(registry: &dnsmigrate_core::AdapterRegistry) {
    registry.register_registrar("godaddy", Box::new(GoDaddyFactory));
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsmigrate_core::config::ClientVariant;

    #[test]
    fn test_factory_creation() {
        let factory = GoDaddyFactory;

        let config = RegistrarConfig::GoDaddy {
            api_key: "test_key".to_string(),
            api_secret: "test_secret".to_string(),
            client_variant: ClientVariant::default(),
        };

        let registrar = factory.create(&config);
        assert!(registrar.is_ok());
        assert_eq!(registrar.unwrap().registrar_name(), "godaddy");
    }

    #[test]
    fn test_factory_accepts_legacy_variant() {
        let factory = GoDaddyFactory;

        let config = RegistrarConfig::GoDaddy {
            api_key: "test_key".to_string(),
            api_secret: "test_secret".to_string(),
            client_variant: ClientVariant::Legacy,
        };

        assert!(factory.create(&config).is_ok());
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(GoDaddyRegistrar::new("", "secret").is_err());
        assert!(GoDaddyRegistrar::new("key", "").is_err());
    }

    #[test]
    fn test_credentials_not_exposed_in_debug() {
        let registrar = GoDaddyRegistrar::new("secret_key_123", "secret_value_456").unwrap();
        let debug_str = format!("{:?}", registrar);
        assert!(!debug_str.contains("secret_key_123"));
        assert!(!debug_str.contains("secret_value_456"));
        assert!(debug_str.contains("GoDaddyRegistrar"));
        assert!(debug_str.contains("<REDACTED>"));
    }
}
