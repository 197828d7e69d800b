//! Normalization from raw provider rows to [`loofinder_core::RestroomRecord`].
//!
//! Both entry points drop rows that cannot be placed on a map (missing or
//! non-finite coordinates) and rows the provider has not published
//! (`active == false` for the bulk dataset, `approved != true` for the
//! proximity API).

use loofinder_core::restrooms::{DEFAULT_NAME, UNKNOWN_AREA};
use loofinder_core::{Amenity, RestroomRecord};

use crate::types::{BulkArea, BulkRow, ProximityCandidate, ProximityRow};

/// Maximum length of a display name, in characters.
pub const NAME_MAX_CHARS: usize = 120;

/// Maximum length of the free-text notes, in characters.
pub const NOTES_MAX_CHARS: usize = 280;

const ELLIPSIS: char = '…';

/// Collapses whitespace runs to single spaces, trims, and truncates to at
/// most `max_chars` characters. Truncated text ends with `…`, which counts
/// toward the limit.
#[must_use]
pub fn clamp_text(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    if max_chars == 0 {
        return String::new();
    }

    let kept: String = collapsed.chars().take(max_chars - 1).collect();
    let mut clamped = kept.trim_end().to_string();
    clamped.push(ELLIPSIS);
    clamped
}

/// Normalizes one bulk dataset row.
///
/// Returns `None` for retired rows and rows without a finite coordinate pair.
#[must_use]
pub fn normalize_bulk_row(row: BulkRow) -> Option<RestroomRecord> {
    if row.active == Some(false) {
        return None;
    }

    let (latitude, longitude) = row.location.as_ref().and_then(|l| l.lat_lon())?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }

    let area_name = row
        .area
        .as_ref()
        .and_then(BulkArea::name)
        .map(|name| clamp_text(name, NAME_MAX_CHARS))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_AREA.to_string());

    Some(RestroomRecord {
        id: row.id,
        name: display_name(row.name.as_deref()),
        latitude,
        longitude,
        area_name,
        accessible: Amenity::from(row.accessible),
        baby_change: Amenity::from(row.baby_change),
        no_payment: Amenity::from(row.no_payment),
        all_gender: Amenity::from(row.all_gender),
        radar_key: Amenity::from(row.radar),
        notes: optional_notes(row.notes.as_deref()),
        updated_at: non_empty(row.updated_at),
        distance_km: None,
    })
}

/// Normalizes one proximity API row, keeping its reported country alongside.
///
/// Returns `None` for unapproved rows and rows without finite coordinates.
/// The proximity API never reports payment or RADAR key access, so those
/// flags are always [`Amenity::Unknown`].
#[must_use]
pub fn normalize_proximity_row(row: ProximityRow) -> Option<ProximityCandidate> {
    if row.approved != Some(true) {
        return None;
    }

    let latitude = row.latitude.filter(|v| v.is_finite())?;
    let longitude = row.longitude.filter(|v| v.is_finite())?;

    let area_name = join_present([row.city.as_deref(), row.state.as_deref()], ", ")
        .map(|area| clamp_text(&area, NAME_MAX_CHARS))
        .unwrap_or_else(|| UNKNOWN_AREA.to_string());

    let notes = join_present([row.directions.as_deref(), row.comment.as_deref()], " | ")
        .map(|joined| clamp_text(&joined, NOTES_MAX_CHARS));

    let country = row
        .country
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    Some(ProximityCandidate {
        record: RestroomRecord {
            id: row.id,
            name: display_name(row.name.as_deref()),
            latitude,
            longitude,
            area_name,
            accessible: Amenity::from(row.accessible),
            baby_change: Amenity::from(row.changing_table),
            no_payment: Amenity::Unknown,
            all_gender: Amenity::from(row.unisex),
            radar_key: Amenity::Unknown,
            notes,
            updated_at: non_empty(row.updated_at),
            distance_km: None,
        },
        country,
    })
}

fn display_name(raw: Option<&str>) -> String {
    raw.map(|name| clamp_text(name, NAME_MAX_CHARS))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_NAME.to_string())
}

fn optional_notes(raw: Option<&str>) -> Option<String> {
    raw.map(|notes| clamp_text(notes, NOTES_MAX_CHARS))
        .filter(|notes| !notes.is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Joins the parts that are present and non-blank; `None` if nothing is left.
fn join_present<const N: usize>(parts: [Option<&str>; N], separator: &str) -> Option<String> {
    let present: Vec<&str> = parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if present.is_empty() {
        None
    } else {
        Some(present.join(separator))
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
