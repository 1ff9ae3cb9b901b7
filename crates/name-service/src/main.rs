//! # Quantum-Chain Name Service
//!
//! Command-line entry point for QC-18 name resolution.
//!
//! ## Startup Sequence
//!
//! 1. Parse command-line flags
//! 2. Load configuration (defaults, env, file, flags)
//! 3. Initialize logging and metrics
//! 4. Wire the JSON-RPC ledger, registry contract and HTTP gateway
//! 5. Run the requested command and print the result as JSON
//!
//! ## Commands
//!
//! ```text
//! name-service resolve foo.eth [--text KEY | --contenthash]
//! name-service find-resolver foo.eth
//! name-service reverse 0xabc...
//! name-service batch 0xabc... --calls calls.json
//! ```

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{debug, info};

use qc_18_name_resolution::adapters::{ContractRegistry, HttpGateway, JsonRpcLedger};
use qc_18_name_resolution::{
    BatchCall, BatchResponse, CallResult, NameResolutionApi, NameResolutionService, RecordQuery,
};
use quantum_telemetry::init_telemetry;
use shared_types::{Address, Name};

use crate::config::{ConfigFile, ServiceConfig};

#[derive(Debug, Parser)]
#[command(name = "name-service", version, about = "Quantum-Chain name resolution")]
struct Cli {
    /// TOML configuration file
    #[arg(long, short, env = "QC_NS_CONFIG")]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint of the ledger
    #[arg(long, env = "QC_NS_RPC_URL")]
    rpc_url: Option<String>,

    /// Address of the name registry contract
    #[arg(long, env = "QC_NS_REGISTRY")]
    registry: Option<Address>,

    /// Block tag or number to read state at
    #[arg(long, default_value = "latest")]
    block: String,

    /// Print Prometheus metrics to stderr before exiting
    #[arg(long)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a record for a name (address by default)
    Resolve {
        name: Name,

        /// Resolve this text record instead
        #[arg(long, conflicts_with = "contenthash")]
        text: Option<String>,

        /// Resolve the content hash instead
        #[arg(long)]
        contenthash: bool,
    },

    /// Show the resolver responsible for a name
    FindResolver { name: Name },

    /// Primary name of an address
    Reverse { address: Address },

    /// Reverse-resolve an address, then run a batch of calls against it
    Batch {
        address: Address,

        /// JSON file holding an array of call descriptors
        #[arg(long)]
        calls: PathBuf,
    },
}

impl Command {
    fn label(&self) -> &'static str {
        match self {
            Command::Resolve { .. } => "resolve",
            Command::FindResolver { .. } => "find-resolver",
            Command::Reverse { .. } => "reverse",
            Command::Batch { .. } => "batch",
        }
    }
}

fn load_config(cli: &Cli) -> Result<ServiceConfig> {
    let mut config = ServiceConfig::from_env();

    if let Some(path) = &cli.config {
        let file = ConfigFile::read(path)?;
        config = config.merge(file);
    }
    if let Some(url) = &cli.rpc_url {
        config.rpc.url = url.clone();
    }
    if let Some(registry) = cli.registry {
        config.rpc.registry = registry;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let _telemetry = init_telemetry(config.telemetry.clone())
        .context("Failed to initialize telemetry")?;

    info!(
        rpc = %config.rpc.url,
        registry = %config.rpc.registry,
        command = cli.command.label(),
        "Starting name service"
    );

    let ledger = Arc::new(
        JsonRpcLedger::new(config.rpc.url.clone(), config.rpc.timeout)?.at_block(cli.block.clone()),
    );
    let registry = ContractRegistry::new(Arc::clone(&ledger), config.rpc.registry);
    let gateway = HttpGateway::new(config.resolution.gateway_timeout)?;
    let service = NameResolutionService::new(registry, ledger, gateway, config.resolution);

    let output = run(&service, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    if cli.print_metrics {
        eprint!("{}", quantum_telemetry::metrics::encode_metrics()?);
    }
    Ok(())
}

async fn run(service: &impl NameResolutionApi, command: Command) -> Result<Value> {
    let output = match command {
        Command::Resolve {
            name,
            text,
            contenthash,
        } => {
            let query = match (text, contenthash) {
                (Some(key), _) => RecordQuery::Text(key),
                (None, true) => RecordQuery::ContentHash,
                (None, false) => RecordQuery::Addr,
            };
            let resolution = service.resolve(&name, &query).await?;
            json!({ "name": name, "query": query, "resolution": resolution })
        }
        Command::FindResolver { name } => {
            let location = service.find_resolver(&name).await?;
            json!({ "name": name, "location": location })
        }
        Command::Reverse { address } => {
            let name = service.name_of(address).await?;
            json!({ "address": address, "name": name })
        }
        Command::Batch { address, calls } => {
            let text = std::fs::read_to_string(&calls)
                .with_context(|| format!("Failed to read {}", calls.display()))?;
            let calls: Vec<BatchCall> =
                serde_json::from_str(&text).context("Failed to parse call descriptors")?;
            debug!(count = calls.len(), "Loaded batch calls");

            let response = service.reverse_and_batch(address, &calls).await?;
            batch_json(address, &response)
        }
    };
    Ok(output)
}

fn batch_json(address: Address, response: &BatchResponse) -> Value {
    let results: Vec<Value> = response.results.iter().map(call_result_json).collect();
    json!({ "address": address, "name": response.name, "results": results })
}

fn call_result_json(result: &CallResult) -> Value {
    match result {
        CallResult::Success(data) => json!({ "status": "success", "data": data }),
        CallResult::Empty => json!({ "status": "empty" }),
        CallResult::Failed(error) => json!({
            "status": "failed",
            "kind": error.kind(),
            "error": error.to_string(),
        }),
    }
}
