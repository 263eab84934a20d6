//! Minimal embedding example for combined-core
//!
//! This example demonstrates using the zone router as a library inside a
//! custom application, with in-memory providers standing in for the real
//! DuckDNS/myaddr clients. It shows the three routing outcomes: DuckDNS
//! zone, myaddr zone, and unsupported zone.

use combined_core::router::CombinedProvider;
use combined_core::traits::{DnsProvider, Record};
use combined_core::Result;
use std::sync::Mutex;

/// In-memory provider for embedded usage
struct EmbeddedProvider {
    name: &'static str,
    store: Mutex<Vec<Record>>,
}

impl EmbeddedProvider {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            store: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for EmbeddedProvider {
    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        println!("[{}] append {} record(s) in {}", self.name, records.len(), zone);
        self.store.lock().unwrap().extend_from_slice(records);
        Ok(records.to_vec())
    }

    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        println!("[{}] delete {} record(s) in {}", self.name, records.len(), zone);
        let mut store = self.store.lock().unwrap();
        store.retain(|r| !records.contains(r));
        Ok(records.to_vec())
    }

    fn provider_name(&self) -> &'static str {
        self.name
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let router = CombinedProvider::new(
        Box::new(EmbeddedProvider::new("duckdns")),
        Box::new(EmbeddedProvider::new("myaddr")),
    );

    let challenge = vec![Record::new("_acme-challenge.myhost", "TXT", "token").with_ttl(60)];

    // Routed to the DuckDNS handle
    let applied = router.append_records("duckdns.org.", &challenge).await?;
    println!("applied to duckdns.org: {applied:?}");

    // Routed to the myaddr handle
    let applied = router.append_records("myaddr.tools", &challenge).await?;
    println!("applied to myaddr.tools: {applied:?}");

    // No rule matches; neither provider is invoked
    match router.append_records("example.com", &challenge).await {
        Err(e) => println!("example.com rejected as expected: {e}"),
        Ok(_) => unreachable!("example.com must not route"),
    }

    router.delete_records("duckdns.org", &challenge).await?;
    Ok(())
}
