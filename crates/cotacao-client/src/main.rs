//! Cotacao CLI
//!
//! Asks the quote server for the current dollar bid and prints the raw
//! response body. Running out of time is reported and is not a failure.

mod api;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::time::Duration;
use tracing::{error, info, warn};

use api::{Client, Delivery};

#[derive(Parser)]
#[command(name = "cotacao-client")]
#[command(author, version, about = "Print the current USD-BRL bid from the cotacao server", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(long, env = "COTACAO_URL", default_value = api::DEFAULT_SERVER_URL)]
    url: String,

    /// Deadline for the whole request, in milliseconds
    #[arg(long, env = "COTACAO_TIMEOUT_MS", default_value_t = api::DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the response body
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose {
            "cotacao_client=debug"
        } else {
            "cotacao_client=info"
        })
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let client = Client::new(cli.url, Duration::from_millis(cli.timeout_ms))?;
    let mut stdout = tokio::io::stdout();

    match client.deliver(&mut stdout).await {
        Ok(Delivery::Printed { bytes }) => {
            info!("Received {} bytes", bytes);
            Ok(())
        }
        Ok(Delivery::TimedOut) => {
            warn!(
                "Timed out waiting for the dollar quote after {}ms",
                cli.timeout_ms
            );
            Ok(())
        }
        Err(e) => {
            error!("Request failed: {:#}", e);
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
