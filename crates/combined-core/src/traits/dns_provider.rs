// # DNS Provider Trait
//
// Defines the interface for appending and deleting DNS records via
// provider APIs.
//
// ## Implementations
//
// - DuckDNS: `combined-provider-duckdns` crate
// - myaddr: `combined-provider-myaddr` crate
// - Zone router: [`crate::router::CombinedProvider`], which forwards to one
//   of the above based on the zone name

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A DNS resource record.
///
/// Records are opaque to the dispatcher: the router forwards collections of
/// them without inspecting or mutating any field. Interpretation of the
/// fields is owned entirely by the provider that receives them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record name, relative to the zone (e.g. "_acme-challenge.myhost")
    pub name: String,
    /// Record type (e.g. "A", "AAAA", "TXT")
    #[serde(rename = "type")]
    pub kind: String,
    /// Record value (IP address, TXT payload, ...)
    pub value: String,
    /// Time-to-live in seconds, if the provider supports one
    pub ttl: Option<u32>,
}

impl Record {
    /// Create a record with no explicit TTL
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            value: value.into(),
            ttl: None,
        }
    }

    /// Set the TTL in seconds
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// Trait for DNS provider implementations
///
/// Both operations are idempotent from the caller's point of view and
/// return the records that were actually applied or removed, which may be
/// fewer than requested if the provider skipped some.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks. The
/// dispatcher performs no locking of its own; concurrent calls are handed
/// to the provider as-is.
///
/// # Cancellation
///
/// Cancellation is carried by the future itself: dropping an in-flight
/// call abandons it. Implementations must not spawn background tasks that
/// outlive the call.
///
/// # Constraints
///
/// - No retry or backoff logic (a failed call is returned to the caller)
/// - No caching of provider state between calls
/// - One API interaction per record, no batch re-ordering
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Create (or upsert) records in a zone
    ///
    /// # Parameters
    ///
    /// - `zone`: the DNS zone, possibly trailing-dot-terminated
    /// - `records`: non-empty set of records to create
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Record>)`: the records that were actually created
    /// - `Err(Error)`: if the operation failed; no partial results are
    ///   reported in that case
    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>>;

    /// Delete records from a zone
    ///
    /// Deleting a record that does not exist is not an error.
    ///
    /// # Parameters
    ///
    /// - `zone`: the DNS zone, possibly trailing-dot-terminated
    /// - `records`: non-empty set of records to remove
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Record>)`: the records that were actually removed
    /// - `Err(Error)`: if the operation failed
    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>>;

    /// Get the provider name (for logging/debugging)
    ///
    /// # Returns
    ///
    /// A static string identifying the provider (e.g. "duckdns", "myaddr")
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing DNS providers from configuration
///
/// Factories are the unit of registration in
/// [`crate::registry::ProviderRegistry`]: the registry maps a fixed
/// identifier to a factory, and the embedding host instantiates providers
/// by name.
pub trait DnsProviderFactory: Send + Sync {
    /// Create a DnsProvider instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this provider. Factories must
    ///   reject configurations of the wrong variant and configurations with
    ///   empty credentials.
    ///
    /// # Returns
    ///
    /// A boxed DnsProvider trait object
    fn create(&self, config: &crate::config::ProviderConfig) -> Result<Box<dyn DnsProvider>>;
}
