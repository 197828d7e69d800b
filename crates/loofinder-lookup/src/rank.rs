use loofinder_core::RestroomRecord;

/// Annotates each record with its distance from `(lat, lon)`, sorts
/// ascending, and keeps the nearest `limit`.
///
/// The sort is stable: equidistant records keep the provider's ordering.
#[must_use]
pub fn rank_by_distance(
    records: &[RestroomRecord],
    lat: f64,
    lon: f64,
    limit: usize,
) -> Vec<RestroomRecord> {
    let mut ranked: Vec<RestroomRecord> = records
        .iter()
        .map(|record| record.with_distance_from(lat, lon))
        .collect();
    ranked.sort_by(|a, b| {
        a.distance_km
            .unwrap_or(f64::INFINITY)
            .total_cmp(&b.distance_km.unwrap_or(f64::INFINITY))
    });
    ranked.truncate(limit);
    ranked
}
