use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "weft")]
#[command(about = "Inspect a fetched workflow execution record", long_about = None)]
pub struct Args {
    /// JSON file holding one workflow execution record
    pub record: PathBuf,

    /// Optional JSON config file (namespace, context_aware, log_filter)
    #[arg(long, env = "WEFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Namespace used to bind the data converter (overrides the config file)
    #[arg(long, env = "WEFT_NAMESPACE")]
    pub namespace: Option<String>,

    /// Treat the data converter as already context specific
    #[arg(long)]
    pub no_context: bool,
}
