use clap::{Parser, ValueEnum};
use location_matcher::config::Settings;
use location_matcher::core::Matcher;
use location_matcher::error::AppError;
use location_matcher::models::Direction;
use location_matcher::pipeline::{self, RunOptions};
use location_matcher::services::NominatimClient;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    /// Nearest list B location for every list A address
    AToB,
    /// Closest stock address (list A) for every customer location (list B)
    CustomerToStock,
}

impl From<DirectionArg> for Direction {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::AToB => Direction::AToB,
            DirectionArg::CustomerToStock => Direction::CustomerToStock,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "location-matcher", version)]
#[command(about = "Match every address of one CSV list to the nearest location of another")]
struct Cli {
    /// Address list with columns street, house number, zip code, city
    #[arg(long)]
    list_a: Option<PathBuf>,

    /// Location list with columns City, Zip Code
    #[arg(long)]
    list_b: Option<PathBuf>,

    /// Result file
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "a-to-b")]
    direction: DirectionArg,

    /// Configuration file replacing config/default.toml and config/local.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

async fn run(cli: Cli, settings: Settings) -> Result<(), AppError> {
    let options = RunOptions {
        list_a: cli.list_a.unwrap_or(settings.files.list_a),
        list_b: cli.list_b.unwrap_or(settings.files.list_b),
        output: cli.output.unwrap_or(settings.files.output),
        direction: cli.direction.into(),
        concurrency: settings.geocoder.concurrency,
        matcher: Matcher::new(settings.matching.distance_model),
    };

    let geocoder = NominatimClient::new(
        settings.geocoder.endpoint.clone(),
        &settings.geocoder.user_agent,
        settings.geocoder.timeout(),
    )?;

    info!(
        "Matching {:?} using {:?} distance (geocoder: {}, concurrency: {})",
        options.direction,
        options.matcher.model(),
        settings.geocoder.endpoint,
        options.concurrency
    );

    let summary = pipeline::run(&options, &geocoder).await?;

    info!(
        "List A: {}/{} geocoded, List B: {}/{} geocoded, {} matched, {} dropped",
        summary.list_a_geocoded,
        summary.list_a_rows,
        summary.list_b_geocoded,
        summary.list_b_rows,
        summary.matched,
        summary.dropped
    );
    info!("Results saved to {}", summary.output.display());

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings);

    match run(cli, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
