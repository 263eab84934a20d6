//! Zone-routing provider
//!
//! [`CombinedProvider`] wraps two upstream provider handles (DuckDNS and
//! myaddr) behind the single [`DnsProvider`] interface, so it can stand
//! anywhere one provider is expected. Each call is routed to exactly one
//! handle by exact, case-sensitive zone match; on a match the call is
//! forwarded verbatim and the delegate's result (or error) is returned
//! untouched. No retries, no transformation, no shared mutable state.
//!
//! Zones handled:
//!
//! | Zone | Handle |
//! |---|---|
//! | `duckdns.org` | DuckDNS |
//! | `myaddr.io`, `myaddr.dev`, `myaddr.tools` | myaddr |
//!
//! Surrounding dots are trimmed before matching, so `duckdns.org.` routes
//! the same as `duckdns.org`. Any other zone fails with
//! [`Error::UnsupportedZone`] and no provider is invoked.

use async_trait::async_trait;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::registry::ProviderRegistry;
use crate::traits::{DnsProvider, DnsProviderFactory, Record};

/// Zones served by the DuckDNS handle
const DUCKDNS_ZONES: &[&str] = &["duckdns.org"];

/// Zones served by the myaddr handle
const MYADDR_ZONES: &[&str] = &["myaddr.io", "myaddr.dev", "myaddr.tools"];

/// Fixed identifier the router registers under
pub const PROVIDER_NAME: &str = "combined";

/// DNS provider that routes by zone to one of two upstream providers
///
/// The two handles are injected at construction, populated exactly once,
/// and never reassigned. The router itself is stateless per call; it is as
/// thread-safe as its delegates.
pub struct CombinedProvider {
    /// Handle serving the DuckDNS zones
    duckdns: Box<dyn DnsProvider>,
    /// Handle serving the myaddr zones
    myaddr: Box<dyn DnsProvider>,
}

impl CombinedProvider {
    /// Create a router over the two upstream handles
    pub fn new(duckdns: Box<dyn DnsProvider>, myaddr: Box<dyn DnsProvider>) -> Self {
        Self { duckdns, myaddr }
    }

    /// Zones the router will forward, in routing-table order
    pub fn supported_zones() -> impl Iterator<Item = &'static str> {
        DUCKDNS_ZONES.iter().chain(MYADDR_ZONES).copied()
    }

    /// Select the handle responsible for `zone`
    ///
    /// Matching is exact and case-sensitive after trimming `'.'` from both
    /// ends of the zone.
    fn route(&self, zone: &str) -> Result<&dyn DnsProvider> {
        match zone.trim_matches('.') {
            "duckdns.org" => Ok(self.duckdns.as_ref()),
            "myaddr.io" | "myaddr.dev" | "myaddr.tools" => Ok(self.myaddr.as_ref()),
            _ => Err(Error::unsupported_zone(zone)),
        }
    }
}

#[async_trait]
impl DnsProvider for CombinedProvider {
    /// Add records to a zone, returning the records that were added
    ///
    /// The zone is forwarded as the caller passed it (normalization is
    /// only for matching) and the delegate's return value comes back
    /// unchanged.
    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let provider = self.route(zone)?;
        debug!(
            zone,
            provider = provider.provider_name(),
            count = records.len(),
            "routing append_records"
        );
        provider.append_records(zone, records).await
    }

    /// Delete records from a zone, returning the records that were deleted
    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let provider = self.route(zone)?;
        debug!(
            zone,
            provider = provider.provider_name(),
            count = records.len(),
            "routing delete_records"
        );
        provider.delete_records(zone, records).await
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Factory building a [`CombinedProvider`] from [`ProviderConfig::Combined`]
///
/// The factory owns the two inner factories and splits the combined
/// credentials into their per-provider configurations. Empty credentials
/// are rejected before either inner factory runs.
pub struct CombinedFactory {
    duckdns: Box<dyn DnsProviderFactory>,
    myaddr: Box<dyn DnsProviderFactory>,
}

impl CombinedFactory {
    /// Create a factory from the two inner provider factories
    pub fn new(duckdns: Box<dyn DnsProviderFactory>, myaddr: Box<dyn DnsProviderFactory>) -> Self {
        Self { duckdns, myaddr }
    }
}

impl DnsProviderFactory for CombinedFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        config.validate()?;

        match config {
            ProviderConfig::Combined {
                duckdns_token,
                myaddr_key,
            } => {
                let duckdns = self.duckdns.create(&ProviderConfig::Duckdns {
                    api_token: duckdns_token.clone(),
                })?;
                let myaddr = self.myaddr.create(&ProviderConfig::Myaddr {
                    key: myaddr_key.clone(),
                })?;
                Ok(Box::new(CombinedProvider::new(duckdns, myaddr)))
            }
            other => Err(Error::config(format!(
                "combined factory expects a combined configuration, got '{}'",
                other.type_name()
            ))),
        }
    }
}

/// Install the router factory in a registry under [`PROVIDER_NAME`]
///
/// `duckdns` and `myaddr` are the factories for the two upstream
/// providers, normally the ones their crates register themselves.
pub fn register(
    registry: &ProviderRegistry,
    duckdns: Box<dyn DnsProviderFactory>,
    myaddr: Box<dyn DnsProviderFactory>,
) {
    registry.register_provider(PROVIDER_NAME, Box::new(CombinedFactory::new(duckdns, myaddr)));
}
