// # DuckDNS Provider
//
// DNS provider implementation for DuckDNS (`*.duckdns.org`).
//
// DuckDNS exposes a single GET update endpoint; a record is applied or
// cleared by calling it with the account token, the target domain, and one
// of the `ip`/`ipv6`/`txt` parameters. The body of a 200 response is `OK`
// or `KO`.
//
// ## Constraints
//
// - One HTTP request per record, in input order
// - Full error propagation: no retry, no backoff, no suppression
// - No background tasks, no caching
// - The account token NEVER appears in logs or Debug output
//
// ## API Reference
//
// - Update: GET `https://www.duckdns.org/update?domains=<d>&token=<t>&txt=<v>`
// - Clear:  same, with `clear=true`

use async_trait::async_trait;
use combined_core::config::ProviderConfig;
use combined_core::registry::ProviderRegistry;
use combined_core::traits::{DnsProvider, DnsProviderFactory, Record};
use combined_core::{Error, Result};
use std::time::Duration;

/// DuckDNS update endpoint
const DUCKDNS_API_BASE: &str = "https://www.duckdns.org/update";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed identifier this provider registers under
pub const PROVIDER_NAME: &str = "duckdns";

/// DuckDNS DNS provider
///
/// Stateless and single-shot: every call maps to one update request per
/// record. DuckDNS stores values per domain, so the record name only
/// selects which `<domain>.duckdns.org` is touched.
pub struct DuckdnsProvider {
    /// DuckDNS account token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the account token
impl std::fmt::Debug for DuckdnsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuckdnsProvider")
            .field("api_token", &"<REDACTED>")
            .finish()
    }
}

impl DuckdnsProvider {
    /// Create a new DuckDNS provider
    ///
    /// Fails fast on an empty token; the credential must be resolved and
    /// non-empty before first use.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("DuckDNS api token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { api_token, client })
    }

    /// Apply or clear one record
    async fn update(&self, record: &Record, clear: bool) -> Result<()> {
        let mut params = update_params(record, clear)?;
        params.push(("token", self.api_token.clone()));

        tracing::debug!(
            domain = %duckdns_domain(&record.name),
            kind = %record.kind,
            clear,
            "sending DuckDNS update"
        );

        let response = self
            .client
            .get(DUCKDNS_API_BASE)
            .query(&params)
            .send()
            .await
            .map_err(|e| Error::provider(PROVIDER_NAME, format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read response body".to_string());

        if !status.is_success() {
            return Err(map_status(status.as_u16(), &body));
        }

        // DuckDNS signals failure in the body of a 200 response
        if body.trim().starts_with("OK") {
            Ok(())
        } else {
            Err(Error::provider(
                PROVIDER_NAME,
                "update rejected (KO): check token and domain",
            ))
        }
    }
}

/// Build the query parameters for one record
///
/// `TXT` records map to the `txt` parameter, `A` to `ip`, `AAAA` to
/// `ipv6`; DuckDNS supports nothing else. Clearing adds `clear=true`.
fn update_params(record: &Record, clear: bool) -> Result<Vec<(&'static str, String)>> {
    let value_param = match record.kind.as_str() {
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

    let mut params = vec![
        ("domains", duckdns_domain(&record.name).to_string()),
        (value_param, record.value.clone()),
    ];
    if clear {
        params.push(("clear", "true".to_string()));
    }
    Ok(params)
}

/// Extract the DuckDNS domain from a record name
///
/// DuckDNS stores one value set per `<domain>.duckdns.org`, so for a
/// relative name like `_acme-challenge.myhost` the target domain is the
/// rightmost label (`myhost`).
fn duckdns_domain(record_name: &str) -> &str {
    let name = record_name.trim_matches('.');
    name.rsplit('.').next().unwrap_or(name)
}

/// Map an HTTP error status to a dispatcher error
fn map_status(status: u16, body: &str) -> Error {
    match status {
        401 | 403 => Error::auth(format!(
            "DuckDNS rejected the token (status {status})"
        )),
        429 => Error::rate_limited(format!("DuckDNS rate limit (status {status})")),
        500..=599 => Error::provider(
            PROVIDER_NAME,
            format!("DuckDNS server error (transient): {status} - {body}"),
        ),
        _ => Error::provider(
            PROVIDER_NAME,
            format!("update failed: {status} - {body}"),
        ),
    }
}

#[async_trait]
impl DnsProvider for DuckdnsProvider {
    /// Create records by pushing their values to the update endpoint
    ///
    /// Records are applied one by one; the first failure aborts the call
    /// and nothing is reported as applied.
    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        tracing::info!(zone, count = records.len(), "appending DuckDNS records");

        let mut applied = Vec::with_capacity(records.len());
        for record in records {
            self.update(record, false).await?;
            applied.push(record.clone());
        }
        Ok(applied)
    }

    /// Delete records by clearing their values
    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        tracing::info!(zone, count = records.len(), "deleting DuckDNS records");

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

/// Factory for creating DuckDNS providers from configuration
pub struct DuckdnsFactory;

impl DnsProviderFactory for DuckdnsFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        match config {
            ProviderConfig::Duckdns { api_token } => {
                Ok(Box::new(DuckdnsProvider::new(api_token.clone())?))
            }
            other => Err(Error::config(format!(
                "duckdns factory expects a duckdns configuration, got '{}'",
                other.type_name()
            ))),
        }
    }
}

/// Install the DuckDNS factory in a registry under [`PROVIDER_NAME`]
pub fn register(registry: &ProviderRegistry) {
    registry.register_provider(PROVIDER_NAME, Box::new(DuckdnsFactory));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_the_token() {
        let provider = DuckdnsProvider::new("super-secret").unwrap();
        let debug = format!("{provider:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<REDACTED>"));
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(DuckdnsProvider::new("").is_err());
    }

    #[test]
    fn factory_rejects_foreign_configurations() {
        let config = ProviderConfig::Myaddr {
            key: "key".to_string(),
        };
        let err = DuckdnsFactory.create(&config).err().unwrap();
        assert!(err.to_string().contains("duckdns factory expects"));
    }

    #[test]
    fn txt_records_map_to_the_txt_parameter() {
        let record = Record::new("_acme-challenge.myhost", "TXT", "v1");
        let params = update_params(&record, false).unwrap();
        assert_eq!(
            params,
            vec![
                ("domains", "myhost".to_string()),
                ("txt", "v1".to_string()),
            ]
        );
    }

    #[test]
    fn clearing_adds_the_clear_flag() {
        let record = Record::new("myhost", "A", "192.0.2.1");
        let params = update_params(&record, true).unwrap();
        assert!(params.contains(&("clear", "true".to_string())));
        assert!(params.contains(&("ip", "192.0.2.1".to_string())));
    }

    #[test]
    fn unsupported_record_types_are_rejected() {
        let record = Record::new("myhost", "MX", "10 mail.example.com");
        assert!(update_params(&record, false).is_err());
    }

    #[test]
    fn status_mapping_distinguishes_auth_and_rate_limit() {
        assert!(matches!(map_status(403, ""), Error::Authentication(_)));
        assert!(matches!(map_status(429, ""), Error::RateLimited(_)));
        assert!(matches!(map_status(502, ""), Error::Provider { .. }));
    }
}
