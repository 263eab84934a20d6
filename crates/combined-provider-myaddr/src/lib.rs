// # myaddr Provider
//
// DNS provider implementation for myaddr (`myaddr.io`, `myaddr.dev`,
// `myaddr.tools`).
//
// myaddr manages one name per registration key. Records are applied by
// POSTing a form to the update endpoint with the key and one of the
// `ip`/`ipv6`/`txt` fields; posting an empty value clears the field.
//
// ## Constraints
//
// - One HTTP request per record, in input order
// - Full error propagation: no retry, no backoff, no suppression
// - No background tasks, no caching
// - The registration key NEVER appears in logs or Debug output
//
// ## API Reference
//
// - Update: POST `https://myaddr.tools/update` with `key=<k>&txt=<v>`

use async_trait::async_trait;
use combined_core::config::ProviderConfig;
use combined_core::registry::ProviderRegistry;
use combined_core::traits::{DnsProvider, DnsProviderFactory, Record};
use combined_core::{Error, Result};
use std::time::Duration;

/// myaddr update endpoint
const MYADDR_API_BASE: &str = "https://myaddr.tools/update";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed identifier this provider registers under
pub const PROVIDER_NAME: &str = "myaddr";

/// myaddr DNS provider
///
/// Stateless and single-shot: every call maps to one update request per
/// record. The registration key identifies the managed name, so the zone
/// and record name only select which value field is written.
pub struct MyaddrProvider {
    /// myaddr registration key
    /// ⚠️ NEVER log this value
    key: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the registration key
impl std::fmt::Debug for MyaddrProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MyaddrProvider")
            .field("key", &"<REDACTED>")
            .finish()
    }
}

impl MyaddrProvider {
    /// Create a new myaddr provider
    ///
    /// Fails fast on an empty key; the credential must be resolved and
    /// non-empty before first use.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::config("myaddr key cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { key, client })
    }

    /// Apply or clear one record
    async fn update(&self, record: &Record, clear: bool) -> Result<()> {
        let mut form = update_form(record, clear)?;
        form.push(("key", self.key.clone()));

        tracing::debug!(name = %record.name, kind = %record.kind, clear, "sending myaddr update");

        let response = self
            .client
            .post(MYADDR_API_BASE)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::provider(PROVIDER_NAME, format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read response body".to_string());
        Err(map_status(status.as_u16(), &body))
    }
}

/// Build the form fields for one record
///
/// `TXT` records map to the `txt` field, `A` to `ip`, `AAAA` to `ipv6`;
/// myaddr supports nothing else. Clearing posts an empty value.
fn update_form(record: &Record, clear: bool) -> Result<Vec<(&'static str, String)>> {
    let value_field = match record.kind.as_str() {
        "TXT" => "txt",
        "A" => "ip",
        "AAAA" => "ipv6",
        other => {
            return Err(Error::provider(
                PROVIDER_NAME,
                format!("unsupported record type '{other}'"),
            ));
        }
    };

    let value = if clear {
        String::new()
    } else {
        record.value.clone()
    };
    Ok(vec![(value_field, value)])
}

/// Map an HTTP error status to a dispatcher error
fn map_status(status: u16, body: &str) -> Error {
    match status {
        400 => Error::provider(
            PROVIDER_NAME,
            format!("invalid update request: {body}"),
        ),
        401 | 403 => Error::auth(format!("myaddr rejected the key (status {status})")),
        404 => Error::not_found("myaddr registration key is unknown"),
        429 => Error::rate_limited(format!("myaddr rate limit (status {status})")),
        500..=599 => Error::provider(
            PROVIDER_NAME,
            format!("myaddr server error (transient): {status} - {body}"),
        ),
        _ => Error::provider(
            PROVIDER_NAME,
            format!("update failed: {status} - {body}"),
        ),
    }
}

#[async_trait]
impl DnsProvider for MyaddrProvider {
    /// Create records by posting their values to the update endpoint
    ///
    /// Records are applied one by one; the first failure aborts the call
    /// and nothing is reported as applied.
    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        tracing::info!(zone, count = records.len(), "appending myaddr records");

        let mut applied = Vec::with_capacity(records.len());
        for record in records {
            self.update(record, false).await?;
            applied.push(record.clone());
        }
        Ok(applied)
    }

    /// Delete records by clearing their values
    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        tracing::info!(zone, count = records.len(), "deleting myaddr records");

        let mut removed = Vec::with_capacity(records.len());
        for record in records {
            self.update(record, true).await?;
            removed.push(record.clone());
        }
        Ok(removed)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Factory for creating myaddr providers from configuration
pub struct MyaddrFactory;

impl DnsProviderFactory for MyaddrFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        match config {
            ProviderConfig::Myaddr { key } => Ok(Box::new(MyaddrProvider::new(key.clone())?)),
            other => Err(Error::config(format!(
                "myaddr factory expects a myaddr configuration, got '{}'",
                other.type_name()
            ))),
        }
    }
}

/// Install the myaddr factory in a registry under [`PROVIDER_NAME`]
pub fn register(registry: &ProviderRegistry) {
    registry.register_provider(PROVIDER_NAME, Box::new(MyaddrFactory));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_the_key() {
        let provider = MyaddrProvider::new("super-secret").unwrap();
        let debug = format!("{provider:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<REDACTED>"));
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(MyaddrProvider::new("").is_err());
    }

    #[test]
    fn factory_rejects_foreign_configurations() {
        let config = ProviderConfig::Duckdns {
            api_token: "tok".to_string(),
        };
        let err = MyaddrFactory.create(&config).err().unwrap();
        assert!(err.to_string().contains("myaddr factory expects"));
    }

    #[test]
    fn txt_records_map_to_the_txt_field() {
        let record = Record::new("_acme-challenge", "TXT", "v1");
        let form = update_form(&record, false).unwrap();
        assert_eq!(form, vec![("txt", "v1".to_string())]);
    }

    #[test]
    fn clearing_posts_an_empty_value() {
        let record = Record::new("myhost", "AAAA", "2001:db8::1");
        let form = update_form(&record, true).unwrap();
        assert_eq!(form, vec![("ipv6", String::new())]);
    }

    #[test]
    fn unsupported_record_types_are_rejected() {
        let record = Record::new("myhost", "CNAME", "example.com");
        assert!(update_form(&record, false).is_err());
    }

    #[test]
    fn status_mapping_distinguishes_error_families() {
        assert!(matches!(map_status(401, ""), Error::Authentication(_)));
        assert!(matches!(map_status(404, ""), Error::NotFound(_)));
        assert!(matches!(map_status(429, ""), Error::RateLimited(_)));
        assert!(matches!(map_status(503, ""), Error::Provider { .. }));
    }
}
