mod args;
mod output;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use weft_core::client::{ClientConfig, ClientOptionsBuilder};
use weft_core::domain::WorkflowExecutionInfo;

use crate::args::Args;
use crate::output::{print_execution, print_memo, print_search_attributes};

async fn load_config(path: &Path) -> Result<ClientConfig> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing config {}", path.display()))
}

async fn load_record(path: &Path) -> Result<WorkflowExecutionInfo> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading record {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing record {}", path.display()))
}

fn init_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path).await?,
        None => ClientConfig::default(),
    };
    if let Some(namespace) = args.namespace {
        config.namespace = namespace;
    }
    if args.no_context {
        config.context_aware = false;
    }
    init_tracing(&config.log_filter);

    let options = ClientOptionsBuilder::from_config(&config).build()?;
    let raw = load_record(&args.record).await?;
    let exec = options.wrap_execution(raw);
    tracing::info!(
        workflow_id = %exec.id(),
        run_id = %exec.run_id(),
        namespace = options.namespace(),
        "loaded execution record"
    );

    print_execution(&exec);
    print_memo(&exec);
    print_search_attributes(&exec);
    Ok(())
}
