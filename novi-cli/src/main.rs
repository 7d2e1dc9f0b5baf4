use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use novi_core::NoviConfig;
use novi_http::{start_server, ServerConfig};

#[derive(Parser)]
#[command(name = "novi", about = "Novi PQR conversational gateway")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP gateway
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1:8080")]
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { address } => {
            let runtime = NoviConfig::from_env();
            info!(
                "Starting gateway (region={}, table={})",
                runtime.region, runtime.table_name
            );
            start_server(ServerConfig::new(address, runtime))
                .await
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        }
    }

    Ok(())
}
