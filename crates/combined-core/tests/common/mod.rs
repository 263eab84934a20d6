//! Test doubles and common utilities for dispatcher contract tests
//!
//! These doubles verify routing behavior (who was called, with what zone)
//! without talking to any real provider API.

use async_trait::async_trait;
use combined_core::config::ProviderConfig;
use combined_core::error::{Error, Result};
use combined_core::traits::{DnsProvider, DnsProviderFactory, Record};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What a [`RecordingProvider`] returns from both operations
#[derive(Clone)]
pub enum CannedResponse {
    /// Return the input records unchanged
    EchoInput,
    /// Return a fixed set of records
    Records(Vec<Record>),
    /// Fail with a provider error carrying this message
    Fail(String),
}

/// Shared view into a [`RecordingProvider`]'s observations
#[derive(Clone, Default)]
pub struct RecordingHandle {
    append_calls: Arc<AtomicUsize>,
    delete_calls: Arc<AtomicUsize>,
    seen_zones: Arc<Mutex<Vec<String>>>,
}

impl RecordingHandle {
    pub fn append_calls(&self) -> usize {
        self.append_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.append_calls() + self.delete_calls()
    }

    /// Zones exactly as the provider received them (unnormalized)
    pub fn seen_zones(&self) -> Vec<String> {
        self.seen_zones.lock().unwrap().clone()
    }
}

/// A DnsProvider double that counts calls and records zones
pub struct RecordingProvider {
    name: &'static str,
    handle: RecordingHandle,
    response: CannedResponse,
}

impl RecordingProvider {
    /// Create a provider that echoes its input, plus a handle for asserts
    pub fn new(name: &'static str) -> (Box<dyn DnsProvider>, RecordingHandle) {
        Self::with_response(name, CannedResponse::EchoInput)
    }

    /// Create a provider with an explicit canned response
    pub fn with_response(
        name: &'static str,
        response: CannedResponse,
    ) -> (Box<dyn DnsProvider>, RecordingHandle) {
        let handle = RecordingHandle::default();
        let provider = Self {
            name,
            handle: handle.clone(),
            response,
        };
        (Box::new(provider), handle)
    }

    fn respond(&self, records: &[Record]) -> Result<Vec<Record>> {
        match &self.response {
            CannedResponse::EchoInput => Ok(records.to_vec()),
            CannedResponse::Records(records) => Ok(records.clone()),
            CannedResponse::Fail(message) => Err(Error::provider(self.name, message.clone())),
        }
    }
}

#[async_trait]
impl DnsProvider for RecordingProvider {
    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        self.handle.append_calls.fetch_add(1, Ordering::SeqCst);
        self.handle.seen_zones.lock().unwrap().push(zone.to_string());
        self.respond(records)
    }

    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        self.handle.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.handle.seen_zones.lock().unwrap().push(zone.to_string());
        self.respond(records)
    }

    fn provider_name(&self) -> &'static str {
        self.name
    }
}

/// A factory double that records the configs it was asked to build from
pub struct RecordingFactory {
    name: &'static str,
    configs: Arc<Mutex<Vec<ProviderConfig>>>,
}

impl RecordingFactory {
    pub fn new(name: &'static str) -> (Box<dyn DnsProviderFactory>, Arc<Mutex<Vec<ProviderConfig>>>) {
        let configs = Arc::new(Mutex::new(Vec::new()));
        let factory = Self {
            name,
            configs: configs.clone(),
        };
        (Box::new(factory), configs)
    }
}

impl DnsProviderFactory for RecordingFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        self.configs.lock().unwrap().push(config.clone());
        let (provider, _) = RecordingProvider::new(self.name);
        Ok(provider)
    }
}

/// A single TXT record, the shape ACME DNS-01 validation uses
pub fn txt_record(name: &str, value: &str) -> Vec<Record> {
    vec![Record::new(name, "TXT", value)]
}
