use super::*;
use crate::types::{AreaName, BulkLocation};

// -----------------------------------------------------------------------
// clamp_text
// -----------------------------------------------------------------------

#[test]
fn clamp_text_collapses_whitespace_runs() {
    assert_eq!(clamp_text("  Behind   the\n\tlibrary  ", 280), "Behind the library");
}

#[test]
fn clamp_text_leaves_short_text_alone() {
    assert_eq!(clamp_text("Open 9-5", 280), "Open 9-5");
}

#[test]
fn clamp_text_truncates_long_notes_with_ellipsis() {
    let input = "a".repeat(300);
    let clamped = clamp_text(&input, NOTES_MAX_CHARS);
    assert!(clamped.chars().count() <= NOTES_MAX_CHARS);
    assert!(clamped.ends_with('…'));
}

#[test]
fn clamp_text_counts_characters_not_bytes() {
    let input = "é".repeat(150);
    let clamped = clamp_text(&input, NAME_MAX_CHARS);
    assert_eq!(clamped.chars().count(), NAME_MAX_CHARS);
    assert!(clamped.ends_with('…'));
}

#[test]
fn clamp_text_exact_limit_is_not_truncated() {
    let input = "b".repeat(NAME_MAX_CHARS);
    assert_eq!(clamp_text(&input, NAME_MAX_CHARS), input);
}

// -----------------------------------------------------------------------
// normalize_bulk_row
// -----------------------------------------------------------------------

fn bulk_row(lon: f64, lat: f64) -> BulkRow {
    BulkRow {
        id: "gb-1".to_owned(),
        name: Some("Piccadilly Gardens".to_owned()),
        active: Some(true),
        location: Some(BulkLocation {
            coordinates: vec![lon, lat],
        }),
        area: Some(BulkArea::Many(vec![AreaName {
            name: Some("Manchester".to_owned()),
        }])),
        accessible: Some(true),
        baby_change: Some(false),
        no_payment: None,
        all_gender: Some(true),
        radar: None,
        notes: Some("Ground   floor".to_owned()),
        updated_at: Some("2024-06-01T00:00:00Z".to_owned()),
    }
}

#[test]
fn bulk_row_swaps_coordinate_order() {
    let record = normalize_bulk_row(bulk_row(-2.2426, 53.4808)).unwrap();
    assert_eq!(record.latitude, 53.4808);
    assert_eq!(record.longitude, -2.2426);
}

#[test]
fn bulk_row_maps_amenities_one_to_one() {
    let record = normalize_bulk_row(bulk_row(-2.2426, 53.4808)).unwrap();
    assert_eq!(record.accessible, Amenity::Yes);
    assert_eq!(record.baby_change, Amenity::No);
    assert_eq!(record.no_payment, Amenity::Unknown);
    assert_eq!(record.all_gender, Amenity::Yes);
    assert_eq!(record.radar_key, Amenity::Unknown);
}

#[test]
fn bulk_row_normalizes_text_fields() {
    let record = normalize_bulk_row(bulk_row(-2.2426, 53.4808)).unwrap();
    assert_eq!(record.area_name, "Manchester");
    assert_eq!(record.notes.as_deref(), Some("Ground floor"));
    assert_eq!(record.updated_at.as_deref(), Some("2024-06-01T00:00:00Z"));
    assert!(record.distance_km.is_none());
}

#[test]
fn bulk_row_inactive_is_excluded() {
    let mut row = bulk_row(-2.2426, 53.4808);
    row.active = Some(false);
    assert!(normalize_bulk_row(row).is_none());
}

#[test]
fn bulk_row_missing_active_flag_is_kept() {
    let mut row = bulk_row(-2.2426, 53.4808);
    row.active = None;
    assert!(normalize_bulk_row(row).is_some());
}

#[test]
fn bulk_row_nan_coordinates_are_excluded() {
    assert!(normalize_bulk_row(bulk_row(f64::NAN, 53.4808)).is_none());
    assert!(normalize_bulk_row(bulk_row(-2.2426, f64::INFINITY)).is_none());
}

#[test]
fn bulk_row_missing_location_is_excluded() {
    let mut row = bulk_row(-2.2426, 53.4808);
    row.location = None;
    assert!(normalize_bulk_row(row).is_none());
}

#[test]
fn bulk_row_defaults_name_and_area() {
    let mut row = bulk_row(-2.2426, 53.4808);
    row.name = Some("   ".to_owned());
    row.area = None;
    row.notes = None;
    let record = normalize_bulk_row(row).unwrap();
    assert_eq!(record.name, "Public toilet");
    assert_eq!(record.area_name, "Unknown area");
    assert!(record.notes.is_none());
}

// -----------------------------------------------------------------------
// normalize_proximity_row
// -----------------------------------------------------------------------

fn proximity_row(lat: f64, lon: f64) -> ProximityRow {
    ProximityRow {
        id: "9001".to_owned(),
        name: Some("Union Square Cafe".to_owned()),
        latitude: Some(lat),
        longitude: Some(lon),
        approved: Some(true),
        city: Some("New York".to_owned()),
        state: Some("NY".to_owned()),
        country: Some("US".to_owned()),
        directions: Some("Past the counter".to_owned()),
        comment: Some("Ask for the key".to_owned()),
        accessible: Some(false),
        unisex: Some(true),
        changing_table: Some(true),
        updated_at: None,
    }
}

#[test]
fn proximity_row_maps_differently_named_flags() {
    let candidate = normalize_proximity_row(proximity_row(40.7, -74.0)).unwrap();
    let record = candidate.record;
    assert_eq!(record.accessible, Amenity::No);
    assert_eq!(record.baby_change, Amenity::Yes);
    assert_eq!(record.all_gender, Amenity::Yes);
    assert_eq!(record.no_payment, Amenity::Unknown);
    assert_eq!(record.radar_key, Amenity::Unknown);
}

#[test]
fn proximity_row_joins_area_and_notes() {
    let candidate = normalize_proximity_row(proximity_row(40.7, -74.0)).unwrap();
    assert_eq!(candidate.record.area_name, "New York, NY");
    assert_eq!(
        candidate.record.notes.as_deref(),
        Some("Past the counter | Ask for the key")
    );
    assert_eq!(candidate.country.as_deref(), Some("US"));
}

#[test]
fn proximity_row_skips_empty_note_parts() {
    let mut row = proximity_row(40.7, -74.0);
    row.directions = Some("  ".to_owned());
    let candidate = normalize_proximity_row(row).unwrap();
    assert_eq!(candidate.record.notes.as_deref(), Some("Ask for the key"));
}

#[test]
fn proximity_row_without_city_or_state_uses_sentinel() {
    let mut row = proximity_row(40.7, -74.0);
    row.city = None;
    row.state = None;
    row.directions = None;
    row.comment = None;
    let candidate = normalize_proximity_row(row).unwrap();
    assert_eq!(candidate.record.area_name, "Unknown area");
    assert!(candidate.record.notes.is_none());
}

#[test]
fn proximity_row_state_only_area() {
    let mut row = proximity_row(40.7, -74.0);
    row.city = None;
    let candidate = normalize_proximity_row(row).unwrap();
    assert_eq!(candidate.record.area_name, "NY");
}

#[test]
fn proximity_row_unapproved_is_excluded() {
    let mut row = proximity_row(40.7, -74.0);
    row.approved = Some(false);
    assert!(normalize_proximity_row(row.clone()).is_none());
    row.approved = None;
    assert!(normalize_proximity_row(row).is_none());
}

#[test]
fn proximity_row_nan_coordinates_are_excluded() {
    assert!(normalize_proximity_row(proximity_row(f64::NAN, -74.0)).is_none());
    assert!(normalize_proximity_row(proximity_row(40.7, f64::NEG_INFINITY)).is_none());
}

#[test]
fn proximity_row_missing_longitude_is_excluded() {
    let mut row = proximity_row(40.7, -74.0);
    row.longitude = None;
    assert!(normalize_proximity_row(row).is_none());
}
