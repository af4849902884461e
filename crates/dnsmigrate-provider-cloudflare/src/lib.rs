// # Cloudflare DNS Provider
//
// Cloudflare adapter for the migration engine: zone creation, assigned
// nameserver lookup, record upserts, and the edge TLS ("ssl") setting.
//
// ## Contract
//
// - Single-shot API calls; retry/backoff is owned by the MigrationEngine
// - Failures are classified per HTTP status (401/403 auth, 404 not found,
//   429 rate limit, 5xx transient)
// - The API token/key NEVER appears in logs or Debug output
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List zones: GET `/zones?name=...`
// - Create zone: POST `/zones`
// - List DNS records: GET `/zones/:zone_id/dns_records?name=...&type=...`
// - Create/update record: POST/PUT `/zones/:zone_id/dns_records[/:id]`
// - Delete record: DELETE `/zones/:zone_id/dns_records/:id`
// - TLS mode: GET/PATCH `/zones/:zone_id/settings/ssl`

use async_trait::async_trait;
use dnsmigrate_core::config::DnsProviderConfig;
use dnsmigrate_core::domain::TlsMode;
use dnsmigrate_core::traits::dns_provider::RecordMetadata;
use dnsmigrate_core::traits::{
    DnsProvider, DnsProviderFactory, DnsRecord, UpsertOutcome, ZoneInfo,
};
use dnsmigrate_core::{Error, Result};
use serde_json::Value;
use std::time::Duration;

/// Cloudflare API base URL
const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Authentication material for the Cloudflare API
#[derive(Clone)]
enum CloudflareAuth {
    /// Scoped API token (preferred)
    Token(String),
    /// Legacy global key plus account email
    KeyEmail { api_key: String, email: String },
}

/// Cloudflare DNS provider
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose credentials.
pub struct CloudflareProvider {
    /// ⚠️ NEVER log this value
    auth: CloudflareAuth,

    /// Account ID (optional, used for zone creation)
    account_id: Option<String>,

    /// HTTP client for API requests
    client: reqwest::Client,

    base_url: String,
}

impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let auth = match self.auth {
            CloudflareAuth::Token(_) => "token <REDACTED>",
            CloudflareAuth::KeyEmail { .. } => "key+email <REDACTED>",
        };
        f.debug_struct("CloudflareProvider")
            .field("auth", &auth)
            .field("account_id", &self.account_id)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a provider authenticated with a scoped API token
    pub fn with_token(api_token: impl Into<String>, account_id: Option<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }
        Self::build(CloudflareAuth::Token(api_token), account_id)
    }

    /// Create a provider authenticated with a legacy global key and email
    pub fn with_key_email(
        api_key: impl Into<String>,
        email: impl Into<String>,
        account_id: Option<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        let email = email.into();
        if api_key.is_empty() || email.is_empty() {
            return Err(Error::config(
                "Cloudflare API key and email cannot be empty",
            ));
        }
        Self::build(CloudflareAuth::KeyEmail { api_key, email }, account_id)
    }

    fn build(auth: CloudflareAuth, account_id: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            auth,
            account_id,
            client,
            base_url: CLOUDFLARE_API_BASE.to_string(),
        })
    }

    /// Override the API base URL (test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            CloudflareAuth::Token(token) => request.bearer_auth(token),
            CloudflareAuth::KeyEmail { api_key, email } => request
                .header("X-Auth-Key", api_key)
                .header("X-Auth-Email", email),
        }
    }

    /// Send a request and parse the v4 envelope, mapping HTTP statuses to
    /// classified errors
    async fn send(&self, request: reqwest::RequestBuilder, context: &str) -> Result<Value> {
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
                    "Cloudflare rejected the credentials ({context}). \
                    Check the API token or key/email. Status: {status}"
                ))),
                404 => Err(Error::not_found(format!(
                    "Cloudflare resource not found ({context})"
                ))),
                429 => Err(Error::rate_limited(format!(
                    "Cloudflare rate limit exceeded ({context}). Status: {status}"
                ))),
                500..=599 => Err(Error::http(format!(
                    "Cloudflare server error ({context}): {status} - {error_text}"
                ))),
                _ => Err(Error::provider(
                    "cloudflare",
                    format!("{context} failed: {status} - {error_text}"),
                )),
            };
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| Error::provider("cloudflare", format!("Failed to parse response: {e}")))?;

        if json["success"] == Value::Bool(false) {
            let message = json["errors"][0]["message"]
                .as_str()
                .unwrap_or("unknown API error");
            return Err(Error::provider(
                "cloudflare",
                format!("{context} failed: {message}"),
            ));
        }

        Ok(json)
    }

    fn parse_zone(zone: &Value, created: bool) -> Result<ZoneInfo> {
        let id = zone["id"]
            .as_str()
            .ok_or_else(|| {
                Error::provider("cloudflare", "Invalid response format: zone.id is not a string")
            })?
            .to_string();

        let nameservers = zone["name_servers"]
            .as_array()
            .map(|ns| {
                ns.iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(ZoneInfo {
            id,
            nameservers,
            created,
        })
    }

    /// Find an existing record by type and name
    async fn find_record(
        &self,
        zone_id: &str,
        record_type: &str,
        name: &str,
    ) -> Result<Option<RecordMetadata>> {
        let url = format!(
            "{}/zones/{}/dns_records?name={}&type={}",
            self.base_url, zone_id, name, record_type
        );
        let json = self.send(self.client.get(&url), "record lookup").await?;

        let records = json["result"].as_array().ok_or_else(|| {
            Error::provider("cloudflare", "Invalid response format: result is not an array")
        })?;

        let Some(record) = records.first() else {
            return Ok(None);
        };

        Ok(Some(Self::parse_record(record)?))
    }

    fn parse_record(record: &Value) -> Result<RecordMetadata> {
        let id = record["id"]
            .as_str()
            .ok_or_else(|| {
                Error::provider("cloudflare", "Invalid response format: record.id is not a string")
            })?
            .to_string();

        Ok(RecordMetadata {
            id,
            record_type: record["type"].as_str().unwrap_or_default().to_string(),
            name: record["name"].as_str().unwrap_or_default().to_string(),
            content: record["content"].as_str().unwrap_or_default().to_string(),
            ttl: record["ttl"].as_u64().map(|t| t as u32),
            proxied: record["proxied"].as_bool(),
        })
    }

    fn record_payload(record: &DnsRecord) -> Value {
        serde_json::json!({
            "type": record.record_type.as_str(),
            "name": record.name,
            "content": record.content,
            "ttl": record.ttl,
            "proxied": record.proxied,
        })
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    /// Create the zone for a domain, or return the existing one
    ///
    /// # API Calls
    ///
    /// ```http
    /// GET /zones?name=example.com
    /// POST /zones        # only when the lookup came back empty
    /// ```
    async fn ensure_zone(&self, domain: &str) -> Result<ZoneInfo> {
        if let Some(zone) = self.find_zone(domain).await? {
            tracing::debug!(domain, zone_id = %zone.id, "Zone already exists");
            return Ok(zone);
        }

        let mut payload = serde_json::json!({
            "name": domain,
            "jump_start": false,
        });
        if let Some(account_id) = &self.account_id {
            payload["account"] = serde_json::json!({ "id": account_id });
        }

        let url = format!("{}/zones", self.base_url);
        let json = self
            .send(self.client.post(&url).json(&payload), "zone creation")
            .await?;

        let zone = Self::parse_zone(&json["result"], true)?;
        tracing::info!(domain, zone_id = %zone.id, "Zone created");
        Ok(zone)
    }

    /// Look up a domain's zone without creating one
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones?name=example.com
    /// ```
    async fn find_zone(&self, domain: &str) -> Result<Option<ZoneInfo>> {
        let url = format!("{}/zones?name={}", self.base_url, domain);
        let json = self.send(self.client.get(&url), "zone lookup").await?;

        let zones = json["result"].as_array().ok_or_else(|| {
            Error::provider("cloudflare", "Invalid response format: result is not an array")
        })?;

        let Some(zone) = zones.first() else {
            return Ok(None);
        };

        Ok(Some(Self::parse_zone(zone, false)?))
    }

    /// Read the nameservers assigned to a zone
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones/:zone_id
    /// ```
    async fn zone_nameservers(&self, zone_id: &str) -> Result<Vec<String>> {
        let url = format!("{}/zones/{}", self.base_url, zone_id);
        let json = self.send(self.client.get(&url), "zone details").await?;

        let zone = Self::parse_zone(&json["result"], false)?;
        if zone.nameservers.is_empty() {
            return Err(Error::provider(
                "cloudflare",
                format!("Zone {zone_id} has no assigned nameservers"),
            ));
        }
        Ok(zone.nameservers)
    }

    /// Create or update a DNS record
    ///
    /// Looks the record up by type and name first; a matching record is a
    /// no-op, a differing one is rewritten in place, a missing one is
    /// created. Never produces duplicates.
    async fn upsert_record(&self, zone_id: &str, record: &DnsRecord) -> Result<UpsertOutcome> {
        let existing = self
            .find_record(zone_id, record.record_type.as_str(), &record.name)
            .await?;

        let payload = Self::record_payload(record);

        match existing {
            Some(current) => {
                let unchanged = current.content == record.content
                    && current.ttl == Some(record.ttl)
                    && current.proxied == Some(record.proxied);
                if unchanged {
                    tracing::debug!(name = %record.name, "Record already matches, skipping");
                    return Ok(UpsertOutcome::Unchanged);
                }

                let url = format!(
                    "{}/zones/{}/dns_records/{}",
                    self.base_url, zone_id, current.id
                );
                self.send(self.client.put(&url).json(&payload), "record update")
                    .await?;
                tracing::info!(name = %record.name, content = %record.content, "Record updated");
                Ok(UpsertOutcome::Updated)
            }
            None => {
                let url = format!("{}/zones/{}/dns_records", self.base_url, zone_id);
                self.send(self.client.post(&url).json(&payload), "record creation")
                    .await?;
                tracing::info!(name = %record.name, content = %record.content, "Record created");
                Ok(UpsertOutcome::Created)
            }
        }
    }

    /// List the zone's DNS records
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones/:zone_id/dns_records?per_page=100
    /// ```
    async fn list_records(&self, zone_id: &str) -> Result<Vec<RecordMetadata>> {
        let url = format!("{}/zones/{}/dns_records?per_page=100", self.base_url, zone_id);
        let json = self.send(self.client.get(&url), "record listing").await?;

        let records = json["result"].as_array().ok_or_else(|| {
            Error::provider("cloudflare", "Invalid response format: result is not an array")
        })?;

        records.iter().map(Self::parse_record).collect()
    }

    /// Delete a single DNS record
    ///
    /// # API Call
    ///
    /// ```http
    /// DELETE /zones/:zone_id/dns_records/:record_id
    /// ```
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let url = format!(
            "{}/zones/{}/dns_records/{}",
            self.base_url, zone_id, record_id
        );
        self.send(self.client.delete(&url), "record deletion").await?;
        tracing::info!(zone_id, record_id, "Record deleted");
        Ok(())
    }

    /// Set the zone's edge TLS mode
    ///
    /// # API Call
    ///
    /// ```http
    /// PATCH /zones/:zone_id/settings/ssl
    /// { "value": "full" }
    /// ```
    async fn set_tls_mode(&self, zone_id: &str, mode: TlsMode) -> Result<()> {
        let url = format!("{}/zones/{}/settings/ssl", self.base_url, zone_id);
        let payload = serde_json::json!({ "value": mode.as_str() });

        self.send(self.client.patch(&url).json(&payload), "TLS mode update")
            .await?;
        tracing::info!(zone_id, mode = %mode, "TLS mode set");
        Ok(())
    }

    /// Read the zone's current edge TLS mode
    async fn get_tls_mode(&self, zone_id: &str) -> Result<TlsMode> {
        let url = format!("{}/zones/{}/settings/ssl", self.base_url, zone_id);
        let json = self.send(self.client.get(&url), "TLS mode lookup").await?;

        let value = json["result"]["value"].as_str().ok_or_else(|| {
            Error::provider("cloudflare", "Invalid response format: ssl value is not a string")
        })?;
        value.parse()
    }

    /// Verify the configured credentials
    ///
    /// Tokens are checked against the token verification endpoint; legacy
    /// key/email auth falls back to reading the user object.
    async fn validate_credentials(&self) -> Result<()> {
        let url = match self.auth {
            CloudflareAuth::Token(_) => format!("{}/user/tokens/verify", self.base_url),
            CloudflareAuth::KeyEmail { .. } => format!("{}/user", self.base_url),
        };
        self.send(self.client.get(&url), "credential check").await?;
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}

/// Factory for creating Cloudflare providers
pub struct CloudflareFactory;

impl DnsProviderFactory for CloudflareFactory {
    fn create(&self, config: &DnsProviderConfig) -> Result<Box<dyn DnsProvider>> {
        match config {
            DnsProviderConfig::Cloudflare {
                api_token,
                api_key,
                email,
                account_id,
            } => {
                if let Some(token) = api_token.as_deref().filter(|t| !t.is_empty()) {
                    return Ok(Box::new(CloudflareProvider::with_token(
                        token,
                        account_id.clone(),
                    )?));
                }

                match (api_key.as_deref(), email.as_deref()) {
                    (Some(key), Some(email)) if !key.is_empty() && !email.is_empty() => {
                        Ok(Box::new(CloudflareProvider::with_key_email(
                            key,
                            email,
                            account_id.clone(),
                        )?))
                    }
                    _ => Err(Error::config(
                        "Cloudflare credentials missing: set api_token, or api_key plus email",
                    )),
                }
            }
            _ => Err(Error::config("Invalid config for Cloudflare provider")),
        }
    }
}

/// Register the Cloudflare provider with a registry
///
/// Call during initialization to make the provider available under the
/// "cloudflare" config tag.
pub fn register(registry: &dnsmigrate_core::AdapterRegistry) {
    registry.register_provider("cloudflare", Box::new(CloudflareFactory));
}
