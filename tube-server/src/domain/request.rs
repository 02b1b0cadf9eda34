//! Routing request construction.

use std::fmt;

use serde::Serialize;

use super::validate::ValidatedRoute;

/// Vehicle categories a transit route may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitMode {
    Bus,
    /// Underground / metro.
    Subway,
    /// National Rail, Overground and Elizabeth line services.
    Rail,
}

impl TransitMode {
    /// Modes a tube route may use.
    pub const ALLOWED: [TransitMode; 3] = [TransitMode::Bus, TransitMode::Subway, TransitMode::Rail];

    /// Value of the Directions `transit_mode` parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            TransitMode::Bus => "bus",
            TransitMode::Subway => "subway",
            TransitMode::Rail => "train",
        }
    }
}

impl fmt::Display for TransitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitMode::Bus => f.write_str("bus"),
            TransitMode::Subway => f.write_str("subway"),
            TransitMode::Rail => f.write_str("rail"),
        }
    }
}

/// How the routing service should trade off candidate routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingPreference {
    /// Favour routes usable by riders with mobility constraints.
    PreferAccessible,
}

impl RoutingPreference {
    /// Value of the Directions `transit_routing_preference` parameter.
    ///
    /// The web service has no accessibility option, so the accessible
    /// preference asks for the least walking.
    pub fn as_param(&self) -> &'static str {
        match self {
            RoutingPreference::PreferAccessible => "less_walking",
        }
    }
}

/// Geographic framing of the map: centre point and zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapFraming {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

impl MapFraming {
    /// Central London at city zoom.
    pub const fn london() -> Self {
        Self {
            lat: 51.5074,
            lng: -0.1278,
            zoom: 12,
        }
    }
}

impl Default for MapFraming {
    fn default() -> Self {
        Self::london()
    }
}

/// Full place label for a station name.
///
/// The routing service geocodes free text, so bare names like "Angel" or
/// "Bank" need a qualifier to resolve to the tube station.
pub fn station_label(name: &str) -> String {
    format!("{name} Station, London")
}

/// A transit routing request between two validated stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRequest {
    /// Origin label, e.g. "Baker Street Station, London"
    pub origin: String,

    /// Destination label
    pub destination: String,

    /// Allowed transit sub-modes
    pub transit_modes: Vec<TransitMode>,

    /// Routing preference
    pub preference: RoutingPreference,

    /// Map framing for rendering the result
    pub framing: MapFraming,
}

impl RouteRequest {
    /// Build the request for a validated (start, end) pair.
    ///
    /// Travel mode is always transit.
    pub fn new(route: &ValidatedRoute, framing: MapFraming) -> Self {
        Self {
            origin: station_label(route.start()),
            destination: station_label(route.end()),
            transit_modes: TransitMode::ALLOWED.to_vec(),
            preference: RoutingPreference::PreferAccessible,
            framing,
        }
    }

    /// The `transit_mode` parameter: allowed modes joined with `|`.
    pub fn transit_mode_param(&self) -> String {
        self.transit_modes
            .iter()
            .map(TransitMode::as_param)
            .collect::<Vec<_>>()
            .join("|")
    }
}
