use anyhow::Context;
use chargepark::sdk::{
    config::MapsConfig,
    listing::{merge, ListEntry, ListQuery, LocationFilter},
    maps::{FixedLocation, GoogleMapsProvider, Position, Route, SearchRadius},
    session::{Providers, Session},
    util::{log::init_logging, rate_limit::maps_limiter},
};
use clap::Parser;
use serde::Serialize;
use std::{fs::File, io::Write, path::PathBuf, sync::Arc};

/// Find EV charging stations and parking near you
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Latitude reported by the device; asks the geolocation service when omitted
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude reported by the device
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Search radius in metres (500-5000)
    #[arg(short, long)]
    radius: Option<u32>,

    /// Which results to list: all, charging or parking
    #[arg(short, long, default_value_t = LocationFilter::All)]
    filter: LocationFilter,

    /// Only list places whose name or address contains this text
    #[arg(short, long, default_value = "")]
    query: String,

    /// Place id to select; its route and distance are included in the output
    #[arg(short, long)]
    select: Option<String>,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report {
    position: Option<Position>,
    radius: String,
    locations: Vec<ListEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_distance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<Route>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    // --- Dependency Initialization ---
    let config = MapsConfig::from_env().context("Failed to load configuration")?;
    let limiter = maps_limiter(config.requests_per_second);
    let maps = Arc::new(GoogleMapsProvider::from_config(&config, limiter)?);
    let mut providers = Providers::google(maps);
    if let (Some(lat), Some(lng)) = (cli.lat, cli.lng) {
        providers.geolocation = Arc::new(FixedLocation(Position::new(lat, lng)));
    }
    let radius = cli.radius.map(SearchRadius::new).unwrap_or(config.radius);
    let session = Session::new(providers, config.fallback, radius);

    // --- Run the workflow ---
    let position = session.locate().await;
    log::info!("Searching within {} of {}", radius, position);
    session.map_ready().await;

    if let Some(place_id) = &cli.select {
        match session.select(place_id) {
            Some(pending) => pending.settled().await,
            None => log::warn!("{} is not among the nearby results", place_id),
        }
    }

    // --- Output Results ---
    let snapshot = session.snapshot();
    let selected_id = snapshot.selection.selected().map(|place| place.id.clone());
    let query = ListQuery::new(cli.filter, &cli.query);
    let locations: Vec<ListEntry> = query
        .apply(merge(&snapshot.charging, &snapshot.parking))
        .into_iter()
        .map(|place| ListEntry::new(place, selected_id.as_deref()))
        .collect();
    log::info!(
        "Found {} locations ({} charging, {} parking) within {}",
        locations.len(),
        snapshot.charging.len(),
        snapshot.parking.len(),
        snapshot.radius
    );

    let report = Report {
        position: snapshot.position,
        radius: snapshot.radius.label(),
        locations,
        selected_distance: snapshot.selection.distance_text.clone(),
        route: snapshot.selection.route.clone(),
    };
    let json_output = serde_json::to_string_pretty(&report)?;

    match &cli.output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            file.write_all(json_output.as_bytes())?;
            log::info!("Report written to {}", path.display());
        }
        None => println!("{}", json_output),
    }

    Ok(())
}
