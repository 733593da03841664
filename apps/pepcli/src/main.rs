//! Command-line client for the Argus PEP daemon
//!
//! # Usage
//!
//! ```bash
//! # Ask for a decision using a subject DN
//! pepcli --pepd https://pepd.example.org:8154/authz \
//!     --capath /etc/grid-security/certificates \
//!     --cert hostcert.pem --key hostkey.pem \
//!     -s "CN=alice,O=example" -r urn:example:queue:long -a submit
//!
//! # Use a proxy certificate chain as the subject, JSON output
//! pepcli -c pepcli.yaml --certchain /tmp/x509up_u1000 -r urn:res -a read --format json
//!
//! # Show the configuration after file, environment and option layering
//! PEP_TIMEOUT=5s pepcli -c pepcli.yaml --print-config
//! ```

// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod output;
mod request;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use pep_client::{PepClient, PepClientConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{Cli, OutputFormat};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pepcli: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over the `-v` count.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(cli.log_level()))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config =
        PepClientConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_to(&mut config);

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let request = request::build_request(cli)?;
    let client = PepClient::new(config).context("failed to set up the PEP client")?;
    tracing::info!(endpoints = ?client.config().endpoints, "requesting authorization");

    let response = client
        .authorize(&request)
        .await
        .context("authorization request failed")?;
    if let Some(decision) = response.first_decision() {
        tracing::info!(%decision, "decision received");
    }

    match cli.format {
        OutputFormat::Text => print!("{}", output::render_text(&response)?),
        OutputFormat::Json => println!("{}", output::render_json(&response)?),
    }
    Ok(())
}
