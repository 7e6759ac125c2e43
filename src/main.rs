use clap::Parser;
use geohash_grid::{DEFAULT_LENGTH, GeoCoordinate, GeoHash, GeoHashError, Precision};
use std::process::ExitCode;

/// Encode a coordinate as a geohash.
#[derive(Debug, Parser)]
#[command(name = "geohash", version, allow_negative_numbers = true)]
struct Cli {
    /// Length of the geohash in characters
    #[arg(short, long, default_value_t = DEFAULT_LENGTH)]
    length: u32,

    /// Latitude of the coordinate
    latitude: Option<f64>,

    /// Longitude of the coordinate
    longitude: Option<f64>,

    /// Coordinate formatted as latitude,longitude
    #[arg(long, conflicts_with_all = ["latitude", "longitude"])]
    coordinate: Option<String>,
}

fn resolve_coordinate(cli: &Cli) -> Result<GeoCoordinate, GeoHashError> {
    match (&cli.coordinate, cli.latitude, cli.longitude) {
        (Some(combined), _, _) => combined.parse(),
        (None, Some(latitude), Some(longitude)) => GeoCoordinate::new(latitude, longitude),
        _ => Err(GeoHashError::InvalidCoordinateFormat(
            "Coordinate or latitude and longitude must be provided".to_string(),
        )),
    }
}

fn run(cli: &Cli) -> Result<String, GeoHashError> {
    let precision = Precision::from_length(cli.length)?;
    let coordinate = resolve_coordinate(cli)?;
    log::debug!("encoding {} at {} bits", coordinate, precision.bit_count());

    let hash = GeoHash::from_point(&coordinate, precision)?;
    Ok(hash.geohash())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => {
            println!("{}", code);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
