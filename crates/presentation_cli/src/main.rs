//! Route planner CLI
//!
//! Plans drive and train routes and writes the drawn map as GeoJSON.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod planner;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use application::{
    PlannerStatus, RenderOutcome, RoutePlannerSession, RouteRequest, YOUR_LOCATION,
    train_booking_url,
};
use clap::{Parser, Subcommand};
use domain::{Coordinate, TravelMode};
use infrastructure::{AppConfig, GeoJsonMapSurface, init_tracing};
use tracing::info;

/// Route planner CLI
#[derive(Parser)]
#[command(name = "routeplanner")]
#[command(author, version, about = "Drive and train route planner", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, global = true, env = "ROUTEPLANNER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a route and draw it
    ///
    /// Example: routeplanner route --to "Pune Railway Station" --mode train --user-lat 19.076 --user-lon 72.8777
    Route {
        /// Start place, or "Your Location"
        #[arg(long, default_value = YOUR_LOCATION)]
        from: String,

        /// Destination place
        #[arg(long)]
        to: String,

        /// Travel mode (drive or train)
        #[arg(short, long, default_value = "drive")]
        mode: TravelMode,

        /// Treat the destination as a station (inferred from the text if omitted)
        #[arg(long)]
        end_is_station: Option<bool>,

        /// User latitude, used for "Your Location" and to bias geocoding
        #[arg(long, requires = "user_lon", allow_hyphen_values = true)]
        user_lat: Option<f64>,

        /// User longitude
        #[arg(long, requires = "user_lat", allow_hyphen_values = true)]
        user_lon: Option<f64>,

        /// Write the GeoJSON map here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the train ticket booking link
    BookTrain {
        /// Departure place (default: Mumbai)
        #[arg(long, default_value = "")]
        from: String,

        /// Arrival place (default: Delhi)
        #[arg(long, default_value = "")]
        to: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// One line per planner status
fn status_line(status: &PlannerStatus) -> String {
    match status {
        PlannerStatus::Idle => "Idle".to_string(),
        PlannerStatus::Working { request } => format!("⏳ Planning route {request}..."),
        PlannerStatus::Rendered { headline, .. } => headline.clone(),
        PlannerStatus::Failed { message, .. } => format!("❌ {message}"),
    }
}

fn user_location(lat: Option<f64>, lon: Option<f64>) -> anyhow::Result<Option<Coordinate>> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(Some(
            Coordinate::new(lat, lon).context("invalid user location")?,
        )),
        _ => Ok(None),
    }
}

fn route_request(from: String, to: String, end_is_station: Option<bool>) -> RouteRequest {
    let request = RouteRequest::new(from, to);
    match end_is_station {
        Some(flag) => request.with_end_is_station(flag),
        None => request,
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    let override_filter = (cli.verbose > 0).then(|| log_filter_from_verbosity(cli.verbose));
    init_tracing(&config.telemetry, override_filter)?;

    match cli.command {
        Commands::Route {
            from,
            to,
            mode,
            end_is_station,
            user_lat,
            user_lon,
            output,
        } => {
            let mut session = match user_location(user_lat, user_lon)? {
                Some(location) => RoutePlannerSession::with_user_location(location),
                None => RoutePlannerSession::new(),
            };
            session.set_active_mode(mode);

            let service = planner::build_planner(&config, session)?;
            let mut status = service.subscribe();
            let watcher = tokio::spawn(async move {
                while status.changed().await.is_ok() {
                    let line = status_line(&status.borrow_and_update());
                    eprintln!("{line}");
                }
            });

            let outcome = service
                .find_route(route_request(from, to, end_is_station))
                .await;

            let geojson = service.with_surface(GeoJsonMapSurface::to_feature_collection);
            drop(service);
            watcher.await?;

            if let RenderOutcome::Rendered { plan, .. } = outcome? {
                info!(segments = plan.segments.len(), "Route planned");
                if plan.mode == TravelMode::Train {
                    if let Some((boarding, alighting)) = &plan.stations {
                        eprintln!(
                            "🎫 Book tickets: {}",
                            train_booking_url(boarding.name(), alighting.name())
                        );
                    }
                }
            }

            let rendered = serde_json::to_string_pretty(&geojson)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("🗺️  Map written to {}", path.display());
                },
                None => println!("{rendered}"),
            }
        },

        Commands::BookTrain { from, to, yes } => {
            let url = train_booking_url(&from, &to);
            println!("🎫 Train booking: {url}");

            let confirmed = if yes {
                true
            } else {
                print!("Open the booking site? [y/N] ");
                std::io::stdout().flush()?;
                let mut answer = String::new();
                std::io::stdin().lock().read_line(&mut answer)?;
                is_affirmative(&answer)
            };

            if confirmed {
                println!("➡️  Opening {url}");
            } else {
                println!("Cancelled");
            }
        },
    }

    Ok(())
}
