//! physique CLI - upload a photo to a physique server and show the analysis

mod commands;
mod output;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use physique_client::PhysiqueClient;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "physique-cli")]
#[command(author, version, about = "physique image analysis CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Server URL
    #[arg(
        short,
        long,
        env = "PHYSIQUE_SERVER",
        default_value = "http://localhost:8000"
    )]
    server: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a photo and print its analysis
    Analyze {
        /// Image file to upload
        image: PathBuf,
    },
}

fn create_client(server: &str, timeout: Duration) -> Result<PhysiqueClient> {
    PhysiqueClient::with_config(server, timeout, Duration::from_secs(10))
        .with_context(|| format!("Invalid server URL: {}", server))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    let ctx = OutputContext::new(cli.output, cli.no_color, cli.quiet);

    if let Err(e) = run(&cli, &ctx).await {
        ctx.error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, ctx: &OutputContext) -> Result<()> {
    let client = create_client(&cli.server, Duration::from_secs(cli.timeout))?;

    match &cli.command {
        Commands::Analyze { image } => commands::analyze(&client, image, ctx).await,
    }
}
