//! Reading flight files and analysis settings.

use anyhow::{Context, Result};
use flightsep_core::{AnalysisConfig, Flight};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Flight files come either as a bare array or wrapped as `{"flights": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum FlightFile {
    List(Vec<Flight>),
    Wrapped { flights: Vec<Flight> },
}

/// Decode flights from JSON text.
pub fn parse_flights(text: &str) -> Result<Vec<Flight>> {
    let file: FlightFile = serde_json::from_str(text).context("invalid flight JSON")?;
    Ok(match file {
        FlightFile::List(flights) | FlightFile::Wrapped { flights } => flights,
    })
}

/// Load flights from a file, or stdin when `path` is `-`.
pub fn load_flights(path: &Path) -> Result<Vec<Flight>> {
    let text = read_source(path)?;
    let flights =
        parse_flights(&text).with_context(|| format!("reading flights from {}", path.display()))?;
    tracing::info!(count = flights.len(), source = %path.display(), "loaded flights");
    Ok(flights)
}

/// Load analysis settings; missing keys keep their defaults.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    let text = read_source(path)?;
    let config: AnalysisConfig = serde_json::from_str(&text)
        .with_context(|| format!("invalid analysis config in {}", path.display()))?;
    Ok(config)
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
