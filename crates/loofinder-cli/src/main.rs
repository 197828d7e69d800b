use clap::{Parser, Subcommand};
use loofinder_lookup::NearestLookup;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "loofinder")]
#[command(about = "Find the nearest public restrooms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up the restrooms nearest to a coordinate
    Nearest {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Number of results (1-20, default 5)
        #[arg(long)]
        limit: Option<f64>,
    },
    /// Pull the bulk dataset once and print a summary
    Dataset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = loofinder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let lookup = NearestLookup::from_config(&config)?;

    match cli.command {
        Commands::Nearest { lat, lon, limit } => run_nearest(&lookup, lat, lon, limit).await,
        Commands::Dataset => run_dataset(&lookup).await,
    }
}

async fn run_nearest(
    lookup: &NearestLookup,
    lat: f64,
    lon: f64,
    limit: Option<f64>,
) -> anyhow::Result<()> {
    let result = lookup.find_nearest(lat, lon, limit).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn run_dataset(lookup: &NearestLookup) -> anyhow::Result<()> {
    let snapshot = lookup.dataset().get_dataset().await?;
    println!("records:    {}", snapshot.records.len());
    println!("source:     {}", snapshot.source_url);
    println!("fetched at: {}", snapshot.fetched_at.to_rfc3339());
    Ok(())
}
