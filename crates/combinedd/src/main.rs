// # combinedd - combined DDNS dispatcher CLI
//
// Thin integration layer over `combined-core`: it reads the configuration
// block, provisions credentials, wires the provider registry, and performs
// exactly one append or delete operation. All routing and provider logic
// lives in the library crates.
//
// ## Configuration
//
// - `COMBINED_CONFIG`: path to the configuration block
//   (default: /etc/combined-ddns/combined.conf)
// - `COMBINED_LOG_LEVEL`: trace | debug | info | warn | error
//
// The configuration file holds the combined provider block:
//
// ```text
// combined {
//     duckdns_token {env.DUCKDNS_TOKEN}
//     myaddr_key {env.MYADDR_KEY}
// }
// ```
//
// ## Usage
//
// ```bash
// export DUCKDNS_TOKEN=...
// export MYADDR_KEY=...
//
// combinedd append duckdns.org _acme-challenge.myhost TXT "token-value" 60
// combinedd delete duckdns.org _acme-challenge.myhost TXT "token-value"
// ```

use anyhow::{Context, Result};
use combined_core::config::parse_block;
use combined_core::router;
use combined_core::traits::{DnsProvider, Record};
use combined_core::{ProviderRegistry, Replacer};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Default configuration path
const DEFAULT_CONFIG_PATH: &str = "/etc/combined-ddns/combined.conf";

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Success
/// - 1: Configuration or usage error
/// - 2: Runtime error (operation failed)
#[derive(Debug, Clone, Copy)]
enum CombinedExitCode {
    /// Operation completed
    Success = 0,
    /// Configuration error or bad usage
    ConfigError = 1,
    /// Operation failed at runtime
    RuntimeError = 2,
}

impl From<CombinedExitCode> for ExitCode {
    fn from(code: CombinedExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Which provider operation to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperationKind {
    Append,
    Delete,
}

/// One parsed command-line invocation
#[derive(Debug)]
struct Operation {
    kind: OperationKind,
    zone: String,
    record: Record,
}

impl Operation {
    /// Parse `append|delete <zone> <name> <type> <value> [ttl]`
    fn from_args(args: &[String]) -> Result<Self> {
        let (kind, rest) = match args.split_first() {
            Some((cmd, rest)) if cmd == "append" => (OperationKind::Append, rest),
            Some((cmd, rest)) if cmd == "delete" => (OperationKind::Delete, rest),
            Some((cmd, _)) => anyhow::bail!("unknown command '{cmd}'"),
            None => anyhow::bail!("missing command"),
        };

        let [zone, name, kind_str, value, tail @ ..] = rest else {
            anyhow::bail!("expected <zone> <name> <type> <value> [ttl]");
        };

        let mut record = Record::new(name, kind_str, value);
        match tail {
            [] => {}
            [ttl] => {
                let ttl: u32 = ttl
                    .parse()
                    .with_context(|| format!("invalid ttl '{ttl}'"))?;
                record = record.with_ttl(ttl);
            }
            _ => anyhow::bail!("unexpected arguments after ttl"),
        }

        Ok(Self {
            kind,
            zone: zone.clone(),
            record,
        })
    }
}

/// Settings taken from the environment
struct Settings {
    config_path: String,
    log_level: String,
}

impl Settings {
    fn from_env() -> Self {
        Self {
            config_path: env::var("COMBINED_CONFIG")
                .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
            log_level: env::var("COMBINED_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

fn print_usage() {
    eprintln!(
        "usage: combinedd <append|delete> <zone> <name> <type> <value> [ttl]\n\
         \n\
         environment:\n\
         \x20 COMBINED_CONFIG     configuration file (default {DEFAULT_CONFIG_PATH})\n\
         \x20 COMBINED_LOG_LEVEL  trace|debug|info|warn|error (default info)"
    );
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let operation = match Operation::from_args(&args) {
        Ok(op) => op,
        Err(e) => {
            eprintln!("argument error: {e}");
            print_usage();
            return CombinedExitCode::ConfigError.into();
        }
    };

    let settings = Settings::from_env();

    // Initialize tracing
    let log_level = match settings.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return CombinedExitCode::ConfigError.into();
    }

    // Build the provider before entering the runtime; configuration
    // problems are startup failures, not runtime ones
    let provider = match build_provider(&settings) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Configuration error: {e:#}");
            return CombinedExitCode::ConfigError.into();
        }
    };

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {e}");
            return CombinedExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run_operation(provider.as_ref(), &operation).await {
            Ok(()) => CombinedExitCode::Success,
            Err(e) => {
                error!("Operation failed: {e:#}");
                CombinedExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Load configuration, provision it, and instantiate the combined provider
fn build_provider(settings: &Settings) -> Result<Box<dyn DnsProvider>> {
    let source = std::fs::read_to_string(&settings.config_path)
        .with_context(|| format!("failed to read config file {}", settings.config_path))?;

    let mut config = parse_block(&source)
        .with_context(|| format!("failed to parse config file {}", settings.config_path))?;
    config.provision(&Replacer::new());

    let registry = ProviderRegistry::new();
    combined_provider_duckdns::register(&registry);
    combined_provider_myaddr::register(&registry);
    router::register(
        &registry,
        Box::new(combined_provider_duckdns::DuckdnsFactory),
        Box::new(combined_provider_myaddr::MyaddrFactory),
    );

    info!(
        providers = ?registry.list_providers(),
        config = %settings.config_path,
        "registry initialized"
    );

    let provider = registry.create_provider(&config)?;
    Ok(provider)
}

/// Perform the requested operation and print the applied records
async fn run_operation(provider: &dyn DnsProvider, operation: &Operation) -> Result<()> {
    let records = std::slice::from_ref(&operation.record);

    let applied = match operation.kind {
        OperationKind::Append => provider.append_records(&operation.zone, records).await?,
        OperationKind::Delete => provider.delete_records(&operation.zone, records).await?,
    };

    info!(
        zone = %operation.zone,
        count = applied.len(),
        "operation completed"
    );
    println!("{}", serde_json::to_string_pretty(&applied)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_append_with_ttl() {
        let op = Operation::from_args(&args(&[
            "append",
            "duckdns.org",
            "_acme-challenge.myhost",
            "TXT",
            "v1",
            "60",
        ]))
        .unwrap();

        assert_eq!(op.kind, OperationKind::Append);
        assert_eq!(op.zone, "duckdns.org");
        assert_eq!(op.record.ttl, Some(60));
    }

    #[test]
    fn parses_delete_without_ttl() {
        let op = Operation::from_args(&args(&[
            "delete",
            "myaddr.io",
            "_acme-challenge",
            "TXT",
            "v1",
        ]))
        .unwrap();

        assert_eq!(op.kind, OperationKind::Delete);
        assert_eq!(op.record.ttl, None);
    }

    #[test]
    fn rejects_unknown_commands_and_short_argv() {
        assert!(Operation::from_args(&args(&["update", "z", "n", "t", "v"])).is_err());
        assert!(Operation::from_args(&args(&["append", "zone"])).is_err());
        assert!(Operation::from_args(&[]).is_err());
    }

    #[test]
    fn rejects_bad_ttl() {
        let result = Operation::from_args(&args(&[
            "append",
            "duckdns.org",
            "n",
            "TXT",
            "v",
            "not-a-number",
        ]));
        assert!(result.is_err());
    }
}
