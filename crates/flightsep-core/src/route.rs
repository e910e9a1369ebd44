//! Route string parsing.
//!
//! A route is a whitespace-separated list of tokens. Coordinate tokens look
//! like `49.64N/92.114W`; anything else (airways, named fixes, typos) is
//! dropped without failing the flight.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Coordinate, Flight};

/// `<lat>[.<frac>]<N|S>/<lon>[.<frac>]<E|W>`, whole token only
static COORDINATE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d*)?)([NS])/(\d+(?:\.\d*)?)([EW])$").unwrap());

/// Result of parsing a route, keeping track of what was discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRoute {
    pub points: Vec<Coordinate>,
    pub dropped_tokens: Vec<String>,
}

/// Split a route into its raw tokens.
pub fn route_tokens(route: &str) -> impl Iterator<Item = &str> {
    route.split_whitespace()
}

/// Parse a single `<lat><N|S>/<lon><E|W>` token.
pub fn parse_token(token: &str) -> Option<Coordinate> {
    let caps = COORDINATE_TOKEN.captures(token)?;
    let mut lat: f64 = caps[1].parse().ok()?;
    let mut lon: f64 = caps[3].parse().ok()?;
    if &caps[2] == "S" {
        lat = -lat;
    }
    if &caps[4] == "W" {
        lon = -lon;
    }
    Some(Coordinate::new(lat, lon))
}

/// Parse a route into ordered coordinates, silently dropping bad tokens.
pub fn parse_route(route: &str) -> Vec<Coordinate> {
    route_tokens(route).filter_map(parse_token).collect()
}

/// Parse a route and report the tokens that did not parse.
pub fn parse_route_report(route: &str) -> ParsedRoute {
    let mut parsed = ParsedRoute::default();
    for token in route_tokens(route) {
        match parse_token(token) {
            Some(point) => parsed.points.push(point),
            None => parsed.dropped_tokens.push(token.to_string()),
        }
    }
    parsed
}

/// Map each distinct route token to the flights that file it.
///
/// Flights are listed in input order, at most once per token. Flights with
/// no id or no route are skipped.
pub fn waypoint_index(flights: &[Flight]) -> BTreeMap<String, Vec<String>> {
    let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for flight in flights {
        if flight.id.is_empty() {
            continue;
        }
        let unique: BTreeSet<&str> = route_tokens(&flight.route).collect();
        for token in unique {
            index
                .entry(token.to_string())
                .or_default()
                .push(flight.id.clone());
        }
    }
    index
}
