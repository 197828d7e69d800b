use axum::{
    extract::{Query, State},
    Extension, Json,
};
use loofinder_core::LookupResult;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_lookup_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Raw query string. Values are kept as text so that a malformed
/// coordinate surfaces as `invalid_coordinates` instead of a generic
/// extractor rejection.
#[derive(Debug, Deserialize)]
pub(super) struct NearestQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub limit: Option<String>,
}

pub(super) async fn find_nearest(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<NearestQuery>,
) -> Result<Json<ApiResponse<LookupResult>>, ApiError> {
    let lat = parse_number(query.lat.as_deref()).unwrap_or(f64::NAN);
    let lon = parse_number(query.lon.as_deref()).unwrap_or(f64::NAN);
    let limit = parse_number(query.limit.as_deref());

    let data = state
        .lookup
        .find_nearest(lat, lon, limit)
        .await
        .map_err(|e| map_lookup_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_accepts_trimmed_decimals() {
        assert_eq!(parse_number(Some(" 51.5 ")), Some(51.5));
        assert_eq!(parse_number(Some("-0.12")), Some(-0.12));
    }

    #[test]
    fn parse_number_rejects_garbage_and_absence() {
        assert_eq!(parse_number(Some("north")), None);
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(None), None);
    }
}
