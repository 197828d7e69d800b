use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::distance_km;

/// Display name used when a provider row has no usable name.
pub const DEFAULT_NAME: &str = "Public toilet";

/// Locality shown when a provider row carries no area information.
pub const UNKNOWN_AREA: &str = "Unknown area";

/// Three-valued amenity flag.
///
/// `Unknown` is not the same as `No`: a provider that never reports a field
/// yields `Unknown`. Serializes as `true` / `false` / `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Amenity {
    Yes,
    No,
    #[default]
    Unknown,
}

impl From<Option<bool>> for Amenity {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Amenity::Yes,
            Some(false) => Amenity::No,
            None => Amenity::Unknown,
        }
    }
}

impl From<Amenity> for Option<bool> {
    fn from(value: Amenity) -> Self {
        match value {
            Amenity::Yes => Some(true),
            Amenity::No => Some(false),
            Amenity::Unknown => None,
        }
    }
}

/// A public restroom, normalized from whichever upstream provider served it.
///
/// The shape is identical for every provider; provenance travels on the
/// [`SourceDescriptor`] attached to a [`LookupResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestroomRecord {
    /// Provider-assigned identifier, unique within that provider.
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub area_name: String,
    #[serde(default)]
    pub accessible: Amenity,
    #[serde(default)]
    pub baby_change: Amenity,
    #[serde(default)]
    pub no_payment: Amenity,
    #[serde(default)]
    pub all_gender: Amenity,
    #[serde(default)]
    pub radar_key: Amenity,
    pub notes: Option<String>,
    pub updated_at: Option<String>,
    /// Great-circle distance from the query point. Only set on lookup results.
    #[serde(default)]
    pub distance_km: Option<f64>,
}

impl RestroomRecord {
    /// Returns a copy of this record annotated with its distance from the
    /// given origin.
    #[must_use]
    pub fn with_distance_from(&self, lat: f64, lon: f64) -> Self {
        Self {
            distance_km: Some(distance_km(lat, lon, self.latitude, self.longitude)),
            ..self.clone()
        }
    }
}

/// Describes which provider produced a lookup result and how fresh it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Provider display name, e.g. `"Public Toilet Map"`.
    pub provider: String,
    /// Human-facing reference or documentation URL for the provider.
    pub reference_url: String,
    /// Direct dataset download URL, for bulk providers.
    pub dataset_url: Option<String>,
    pub license: Option<String>,
    /// When the underlying data was retrieved. Serialized as RFC 3339.
    pub fetched_at: DateTime<Utc>,
}

/// Ranked restrooms plus the descriptor of the provider that served them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub records: Vec<RestroomRecord>,
    pub source: SourceDescriptor,
}
