//! Maps a coordinate onto the provider territory that serves it.
//!
//! Two fixed boxes: Great Britain (bulk dataset provider) and North America
//! (proximity API provider). Great Britain is checked first and wins if the
//! boxes ever overlap.

use serde::Serialize;

/// Inclusive axis-aligned lat/lon bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Great Britain and Northern Ireland.
    pub const GREAT_BRITAIN: Self = Self {
        min_lat: 49.8,
        max_lat: 60.95,
        min_lon: -8.75,
        max_lon: 1.85,
    };

    /// Continental North America, Alaska through Central America.
    pub const NORTH_AMERICA: Self = Self {
        min_lat: 14.5,
        max_lat: 72.0,
        min_lon: -170.0,
        max_lon: -50.0,
    };

    #[must_use]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

/// Provider territory for a query coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Served by the bulk dataset provider.
    GreatBritain,
    /// Served by the proximity API provider.
    NorthAmerica,
    Unsupported,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::GreatBritain => write!(f, "great_britain"),
            Region::NorthAmerica => write!(f, "north_america"),
            Region::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Classify a coordinate. Non-finite input is never contained by either box
/// and therefore classifies as [`Region::Unsupported`].
#[must_use]
pub fn classify(lat: f64, lon: f64) -> Region {
    classify_within(
        &BoundingBox::GREAT_BRITAIN,
        &BoundingBox::NORTH_AMERICA,
        lat,
        lon,
    )
}

/// Classify against explicit territory bounds. `great_britain` is checked
/// first, so a point inside both boxes maps to [`Region::GreatBritain`].
#[must_use]
pub fn classify_within(
    great_britain: &BoundingBox,
    north_america: &BoundingBox,
    lat: f64,
    lon: f64,
) -> Region {
    if great_britain.contains(lat, lon) {
        Region::GreatBritain
    } else if north_america.contains(lat, lon) {
        Region::NorthAmerica
    } else {
        Region::Unsupported
    }
}
