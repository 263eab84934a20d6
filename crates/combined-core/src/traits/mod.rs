//! Core traits for the combined DDNS dispatcher
//!
//! This module defines the abstract interfaces that all implementations
//! must follow.
//!
//! - [`DnsProvider`]: Append/delete DNS records via provider APIs
//! - [`DnsProviderFactory`]: Construct providers from configuration

pub mod dns_provider;

pub use dns_provider::{DnsProvider, DnsProviderFactory, Record};
