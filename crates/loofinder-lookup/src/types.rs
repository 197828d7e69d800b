//! Raw upstream row shapes, deserialized as-is before normalization.

use loofinder_core::RestroomRecord;
use serde::{Deserialize, Deserializer};

/// One row of the bulk dataset export.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: Option<String>,
    /// Rows explicitly marked `false` have been retired upstream.
    pub active: Option<bool>,
    pub location: Option<BulkLocation>,
    pub area: Option<BulkArea>,
    pub accessible: Option<bool>,
    pub baby_change: Option<bool>,
    pub no_payment: Option<bool>,
    pub all_gender: Option<bool>,
    pub radar: Option<bool>,
    pub notes: Option<String>,
    pub updated_at: Option<String>,
}

/// GeoJSON-style point. Coordinates are `[lon, lat]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkLocation {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl BulkLocation {
    /// Returns `(lat, lon)`, swapping the GeoJSON axis order.
    #[must_use]
    pub fn lat_lon(&self) -> Option<(f64, f64)> {
        match self.coordinates.as_slice() {
            [lon, lat, ..] => Some((*lat, *lon)),
            _ => None,
        }
    }
}

/// Administrative area; the export has shipped both a single object and a
/// list of areas.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BulkArea {
    Single(AreaName),
    Many(Vec<AreaName>),
}

impl BulkArea {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        let area = match self {
            BulkArea::Single(area) => Some(area),
            BulkArea::Many(areas) => areas.first(),
        };
        area.and_then(|a| a.name.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AreaName {
    pub name: Option<String>,
}

/// One row from the proximity API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProximityRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Only moderator-approved rows are served.
    pub approved: Option<bool>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub directions: Option<String>,
    pub comment: Option<String>,
    pub accessible: Option<bool>,
    pub unisex: Option<bool>,
    pub changing_table: Option<bool>,
    pub updated_at: Option<String>,
}

/// A normalized proximity row plus the country it reported, which drives
/// primary-country filtering but is not part of the canonical record.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityCandidate {
    pub record: RestroomRecord,
    pub country: Option<String>,
}

/// Accepts ids sent as either JSON strings or numbers.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_row_parses_export_shape() {
        let row: BulkRow = serde_json::from_value(serde_json::json!({
            "id": "abc123",
            "name": "Market Street",
            "active": true,
            "location": { "type": "Point", "coordinates": [-2.2426, 53.4808] },
            "area": [{ "type": "Metropolitan District", "name": "Manchester" }],
            "accessible": true,
            "babyChange": null,
            "noPayment": false,
            "allGender": null,
            "radar": true,
            "notes": "Open daytime",
            "updatedAt": "2024-05-01T10:00:00.000Z"
        }))
        .expect("parse");

        assert_eq!(row.id, "abc123");
        assert_eq!(row.location.and_then(|l| l.lat_lon()), Some((53.4808, -2.2426)));
        assert_eq!(row.area.as_ref().and_then(BulkArea::name), Some("Manchester"));
        assert_eq!(row.baby_change, None);
        assert_eq!(row.no_payment, Some(false));
        assert_eq!(row.radar, Some(true));
    }

    #[test]
    fn bulk_area_accepts_single_object() {
        let area: BulkArea =
            serde_json::from_value(serde_json::json!({ "name": "Camden" })).expect("parse");
        assert_eq!(area.name(), Some("Camden"));
    }

    #[test]
    fn proximity_row_accepts_numeric_id() {
        let row: ProximityRow = serde_json::from_value(serde_json::json!({
            "id": 4521,
            "name": "Cafe",
            "latitude": 40.7,
            "longitude": -74.0,
            "approved": true
        }))
        .expect("parse");
        assert_eq!(row.id, "4521");
    }

    #[test]
    fn id_rejects_null() {
        let result: Result<ProximityRow, _> =
            serde_json::from_value(serde_json::json!({ "id": null }));
        assert!(result.is_err());
    }

    #[test]
    fn short_coordinates_yield_none() {
        let loc = BulkLocation {
            coordinates: vec![1.0],
        };
        assert!(loc.lat_lon().is_none());
    }
}
