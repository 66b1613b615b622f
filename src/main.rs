use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use walk_bro::Coordinate;

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score an address or coordinate
    Score {
        /// Street address to geocode (ignored when --lat/--lon are given)
        #[arg(default_value = "")]
        address: String,

        /// Latitude of the location, skips geocoding
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude of the location, skips geocoding
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as YAML
    Config,
}

#[derive(Parser, Debug)]
#[command(name = "walk-bro")]
#[command(about = "Walkability, transit, and bike scores from OpenStreetMap", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/walk-bro/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "walk_bro=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match walk_bro::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = walk_bro::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let (address, lat, lon, json) = match cli.command {
        Commands::Config => {
            match serde_saphyr::to_string(&config) {
                Ok(yaml) => print!("{}", yaml),
                Err(e) => {
                    eprintln!("Failed to serialize config: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Score {
            address,
            lat,
            lon,
            json,
        } => (address, lat, lon, json),
    };

    let coordinate = match (lat, lon) {
        (Some(lat), Some(lon)) => match Coordinate::checked(lat, lon) {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(EXIT_CONFIG);
            }
        },
        _ => None,
    };

    if address.trim().is_empty() && coordinate.is_none() {
        eprintln!("Provide an address or both --lat and --lon.");
        std::process::exit(EXIT_CONFIG);
    }

    let scorer = match walk_bro::Scorer::from_config(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {:#}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    // Ctrl-C aborts in-flight requests instead of waiting out the timeout
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let result = scorer
        .calculate_scores_with_cancel(&address, coordinate, &cancel)
        .await;

    if json {
        match walk_bro::output::format_json(&result) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("{:#}", e);
                std::process::exit(EXIT_NETWORK);
            }
        }
    } else {
        let use_colors = walk_bro::output::should_use_colors();
        println!(
            "{}",
            walk_bro::output::format_result(&result, &address, use_colors)
        );
    }

    tracing::debug!("Scored in {:?}", start_time.elapsed());

    if result.is_degraded() {
        std::process::exit(EXIT_NETWORK);
    }
    std::process::exit(EXIT_SUCCESS);
}
