//! flightsep CLI - file-based front end for the separation analysis engine.
//!
//! - `flightsep analyze`: flights JSON in, conflicts/hotspots JSON out
//! - `flightsep waypoints`: which flights file each route token

pub mod input;
pub mod report;

pub use input::{load_config, load_flights, parse_flights};
pub use report::summary_lines;

/// Log to stderr so stdout stays machine-readable.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "flightsep={default_level},flightsep_cli={default_level},flightsep_core={default_level}"
        ))
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
