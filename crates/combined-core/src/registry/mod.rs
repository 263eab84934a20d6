//! Plugin-based provider registry
//!
//! The registry allows DNS providers to be registered dynamically at
//! runtime, so an embedding host can instantiate a provider by its fixed
//! identifier instead of hardcoding constructors.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use combined_core::registry::ProviderRegistry;
//! use combined_core::config::ProviderConfig;
//!
//! // Create a registry and let each provider crate install its factory
//! let registry = ProviderRegistry::new();
//! combined_provider_duckdns::register(&registry);
//! combined_provider_myaddr::register(&registry);
//! combined_core::router::register(
//!     &registry,
//!     Box::new(combined_provider_duckdns::DuckdnsFactory),
//!     Box::new(combined_provider_myaddr::MyaddrFactory),
//! );
//!
//! // Create a provider from config, by name
//! let config = ProviderConfig::Combined { /* ... */ };
//! let provider = registry.create_provider(&config)?;
//! ```
//!
//! ## Registration
//!
//! Implementations register themselves during process-wide initialization:
//!
//! ```rust,ignore
//! // In a provider crate
//! pub fn register(registry: &ProviderRegistry) {
//!     registry.register_provider("duckdns", Box::new(DuckdnsFactory));
//! }
//! ```

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::traits::{DnsProvider, DnsProviderFactory};
use std::collections::HashMap;
use std::sync::RwLock;

/// Provider registry for plugin-based DNS provider creation
///
/// The registry maintains a map of provider type names to factory objects,
/// allowing dynamic instantiation of providers based on configuration.
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes. Registration happens once, sequentially,
/// before any lookups.
#[derive(Default)]
pub struct ProviderRegistry {
    /// Registered DNS provider factories
    providers: RwLock<HashMap<String, Box<dyn DnsProviderFactory>>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a DNS provider factory
    ///
    /// # Parameters
    ///
    /// - `name`: Provider type name (e.g. "duckdns", "myaddr", "combined")
    /// - `factory`: Factory object for creating provider instances
    pub fn register_provider(&self, name: impl Into<String>, factory: Box<dyn DnsProviderFactory>) {
        let name = name.into();
        let mut providers = self.providers.write().unwrap();
        providers.insert(name, factory);
    }

    /// Create a DNS provider from configuration
    ///
    /// The provider type is taken from
    /// [`ProviderConfig::type_name`](crate::config::ProviderConfig::type_name).
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn DnsProvider>)`: Created provider instance
    /// - `Err(Error)`: If provider type is not registered or creation fails
    pub fn create_provider(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        let provider_type = config.type_name();
        let providers = self.providers.read().unwrap();

        let factory = providers
            .get(provider_type)
            .ok_or_else(|| Error::config(format!("Unknown provider type: {}", provider_type)))?;

        factory.create(config)
    }

    /// List all registered provider types
    pub fn list_providers(&self) -> Vec<String> {
        let providers = self.providers.read().unwrap();
        providers.keys().cloned().collect()
    }

    /// Check if a provider type is registered
    pub fn has_provider(&self, name: &str) -> bool {
        let providers = self.providers.read().unwrap();
        providers.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockProviderFactory;

    impl DnsProviderFactory for MockProviderFactory {
        fn create(&self, _config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
            Err(Error::not_found("Mock provider not implemented"))
        }
    }

    #[test]
    fn test_registry_registration() {
        let registry = ProviderRegistry::new();

        // Initially empty
        assert!(!registry.has_provider("mock"));

        // Register
        registry.register_provider("mock", Box::new(MockProviderFactory));

        // Now present
        assert!(registry.has_provider("mock"));
        assert!(registry.list_providers().contains(&"mock".to_string()));
    }

    #[test]
    fn unknown_provider_type_is_a_config_error() {
        let registry = ProviderRegistry::new();
        let config = ProviderConfig::Duckdns {
            api_token: "tok".to_string(),
        };

        let err = registry.create_provider(&config).err().unwrap();
        assert!(err.to_string().contains("Unknown provider type: duckdns"));
    }
}
