//! Configuration types for the combined DDNS dispatcher
//!
//! Credentials move through a strict lifecycle: unset at instantiation,
//! set exactly once by parsing (a repeat assignment is rejected), then
//! resolved exactly once by the provisioning substitution in
//! [`ProviderConfig::provision`]. After that they are read-only for the
//! life of the process.

pub mod block;

pub use block::parse_block;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::replacer::Replacer;

/// DNS provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// DuckDNS provider
    Duckdns {
        /// DuckDNS account token
        api_token: String,
    },

    /// myaddr provider
    Myaddr {
        /// myaddr registration key
        key: String,
    },

    /// Combined zone-routing provider wrapping DuckDNS and myaddr
    Combined {
        /// DuckDNS account token
        duckdns_token: String,
        /// myaddr registration key
        myaddr_key: String,
    },
}

impl ProviderConfig {
    /// Validate the provider configuration
    ///
    /// Every credential must be non-empty before first use.
    pub fn validate(&self) -> Result<()> {
        match self {
            ProviderConfig::Duckdns { api_token } => {
                if api_token.is_empty() {
                    return Err(crate::Error::config("DuckDNS api token cannot be empty"));
                }
                Ok(())
            }
            ProviderConfig::Myaddr { key } => {
                if key.is_empty() {
                    return Err(crate::Error::config("myaddr key cannot be empty"));
                }
                Ok(())
            }
            ProviderConfig::Combined {
                duckdns_token,
                myaddr_key,
            } => {
                if duckdns_token.is_empty() {
                    return Err(crate::Error::config("missing duckdns_token"));
                }
                if myaddr_key.is_empty() {
                    return Err(crate::Error::config("missing myaddr_key"));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    ///
    /// This is the identifier the provider is registered under in the
    /// [`crate::registry::ProviderRegistry`].
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Duckdns { .. } => "duckdns",
            ProviderConfig::Myaddr { .. } => "myaddr",
            ProviderConfig::Combined { .. } => "combined",
        }
    }

    /// Resolve placeholders in every credential
    ///
    /// This is the one-time provisioning step that runs after parsing and
    /// before the configuration is handed to a factory. It applies one
    /// round of `{env.NAME}` substitution; unknown variables resolve to
    /// the empty string, which [`ProviderConfig::validate`] then rejects.
    pub fn provision(&mut self, repl: &Replacer) {
        match self {
            ProviderConfig::Duckdns { api_token } => {
                *api_token = repl.replace_all(api_token, "");
            }
            ProviderConfig::Myaddr { key } => {
                *key = repl.replace_all(key, "");
            }
            ProviderConfig::Combined {
                duckdns_token,
                myaddr_key,
            } => {
                *duckdns_token = repl.replace_all(duckdns_token, "");
                *myaddr_key = repl.replace_all(myaddr_key, "");
            }
        }
    }
}
