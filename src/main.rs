use clap::{Parser, Subcommand};
use ryde_route::sdk::{
    config::OrsConfig,
    polyline::{self, Coordinate, DecodeOptions},
    rides::{quote_all, RideQuote, VehicleClass},
    routing::{
        plan_trip, provider::types::DirectionsResponse, LocalOrsProvider, RemoteOrsProvider,
        RouteCache, RoutingError, RoutingProvider,
    },
    util::{log::init_logging, rate_limit::ors_limiter},
};
use std::{
    error::Error,
    fs,
    io::Read,
    path::{Path, PathBuf},
};

/// Route geometry and ride quotes for the ryde client
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode an encoded polyline into a JSON coordinate array
    Decode {
        #[arg(value_name = "POLYLINE")]
        encoded: String,

        /// Fail on malformed input instead of returning the decodable prefix
        #[arg(long)]
        strict: bool,

        /// Decimal digits of precision (5 for Google/ORS, 6 for polyline6)
        #[arg(
            long,
            default_value_t = polyline::DEFAULT_PRECISION,
            value_parser = clap::value_parser!(u32).range(..=i64::from(polyline::MAX_PRECISION))
        )]
        precision: u32,

        /// Stop after this many points
        #[arg(long)]
        max_points: Option<usize>,
    },

    /// Decode the first route of a directions JSON document ("-" for stdin)
    DecodeResponse { file: PathBuf },

    /// Encode "lat,lng" points into a polyline
    Encode {
        #[arg(required = true, allow_hyphen_values = true)]
        points: Vec<Coordinate>,

        #[arg(
            long,
            default_value_t = polyline::DEFAULT_PRECISION,
            value_parser = clap::value_parser!(u32).range(..=i64::from(polyline::MAX_PRECISION))
        )]
        precision: u32,
    },

    /// Route a trip through openrouteservice and print ride quotes
    Route {
        /// Pickup place name or "lat,lng"
        #[arg(short, long, allow_hyphen_values = true)]
        pickup: String,

        /// Drop place name or "lat,lng"
        #[arg(short, long, allow_hyphen_values = true)]
        drop: String,

        /// Only quote this vehicle class
        #[arg(long, value_enum)]
        vehicle: Option<VehicleClass>,

        /// Route cache file
        #[arg(long, default_value = "route_cache.json")]
        cache: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dotenvy::dotenv().ok();

    match cli.command {
        Command::Decode {
            encoded,
            strict,
            precision,
            max_points,
        } => {
            let mut opts = DecodeOptions::default().with_precision(precision);
            if let Some(max) = max_points {
                opts = opts.with_max_points(max);
            }
            let points = if strict {
                polyline::decode_strict(&encoded, &opts)?
            } else {
                polyline::decode_with(&encoded, &opts)
            };
            log::info!("Decoded {} points", points.len());
            println!("{}", serde_json::to_string_pretty(&points)?);
        }
        Command::DecodeResponse { file } => {
            let text = read_input(&file)?;
            let response: DirectionsResponse = serde_json::from_str(&text)?;
            let plan = response
                .routes
                .into_iter()
                .next()
                .ok_or_else(|| RoutingError::Generic("Response holds no routes".to_string()))?
                .into_plan()?;
            log::info!(
                "Route of {:.1} km decoded to {} points",
                plan.summary.distance_km,
                plan.geometry.len()
            );
            println!("{}", serde_json::to_string_pretty(&plan.geometry)?);
        }
        Command::Encode { points, precision } => {
            println!("{}", polyline::encode_with(&points, precision)?);
        }
        Command::Route {
            pickup,
            drop,
            vehicle,
            cache: cache_path,
        } => {
            let provider = build_provider(OrsConfig::from_env()?)?;
            let mut cache = RouteCache::load_from_file(&cache_path)?;

            let plan = plan_trip(&pickup, &drop, provider.as_ref(), &mut cache)?;
            let quotes: Vec<RideQuote> = match vehicle {
                Some(v) => vec![RideQuote::new(v, &pickup, &drop, &plan)],
                None => quote_all(&pickup, &drop, &plan),
            };
            println!("{}", serde_json::to_string_pretty(&quotes)?);

            cache.save_to_file(&cache_path)?;
            log::info!("Cache saved to {}", cache_path.display());
        }
    }

    Ok(())
}

fn build_provider(config: OrsConfig) -> Result<Box<dyn RoutingProvider>, RoutingError> {
    let provider: Box<dyn RoutingProvider> = match config {
        OrsConfig::Remote { api_key } => {
            log::info!("Using hosted openrouteservice");
            Box::new(RemoteOrsProvider::new(api_key, ors_limiter())?)
        }
        OrsConfig::Local { base_url } => {
            log::info!("Using local openrouteservice at {}", base_url);
            Box::new(LocalOrsProvider::new(base_url)?)
        }
    };
    Ok(provider)
}

fn read_input(path: &Path) -> std::io::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(path)
    }
}
