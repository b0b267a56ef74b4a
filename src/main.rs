use clap::Parser; // for cli
use tracing_subscriber::{EnvFilter, fmt};

use iqc_gateway::config::Args;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // parse cli arguments
    let args = Args::parse();
    iqc_gateway::serve(args).await
}
