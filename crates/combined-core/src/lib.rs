// # combined-core
//
// Core library for the combined multi-provider DDNS dispatcher.
//
// ## Architecture Overview
//
// This library provides everything needed to route DNS record operations
// to the upstream provider responsible for a zone:
//
// - **DnsProvider**: Trait for appending/deleting DNS records via provider APIs
// - **CombinedProvider**: Zone router that forwards each call to exactly one
//   of two injected provider handles based on the zone name
// - **ProviderRegistry**: Plugin-based registry mapping provider identifiers
//   to factories, so an embedding host can instantiate providers by name
// - **ProviderConfig / block parser**: Configuration for the providers,
//   including the block-directive syntax used for the combined provider
// - **Replacer**: One-time provisioning substitution of `{env.NAME}`
//   placeholders in credentials
//
// ## Design Principles
//
// 1. **Thin routing**: the router selects a provider and forwards verbatim;
//    it never inspects records, retries, or transforms results
// 2. **Plugin-Based**: providers are registered dynamically, no hard-coded
//    if-else at the embedding seam
// 3. **Fail loud**: every configuration and routing failure returns a
//    descriptive error; delegated errors pass through unmodified

pub mod config;
pub mod error;
pub mod registry;
pub mod replacer;
pub mod router;
pub mod traits;

// Re-export core types for convenience
pub use config::ProviderConfig;
pub use error::{Error, Result};
pub use registry::ProviderRegistry;
pub use replacer::Replacer;
pub use router::{CombinedFactory, CombinedProvider};
pub use traits::{DnsProvider, DnsProviderFactory, Record};
