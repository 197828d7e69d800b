//! Nearest-restroom lookup: validates the query, picks the provider for the
//! query's region, and ranks what comes back.

use std::time::Duration;

use chrono::Utc;
use loofinder_core::{classify, AppConfig, LookupResult, Region};

use crate::bulk::BulkClient;
use crate::cache::DatasetCache;
use crate::client::build_http_client;
use crate::error::{LookupError, ProviderError};
use crate::provider::Provider;
use crate::proximity::ProximityClient;
use crate::rank::rank_by_distance;

/// Result count used when the caller gives none (or a non-finite one).
pub const DEFAULT_LIMIT: usize = 5;

/// Largest page of results a lookup will return.
pub const MAX_LIMIT: usize = 20;

/// Clamps a caller-supplied limit to `1..=MAX_LIMIT`, truncating fractions.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn normalize_limit(limit: Option<f64>) -> usize {
    match limit {
        Some(value) if value.is_finite() => value.trunc().clamp(1.0, MAX_LIMIT as f64) as usize,
        _ => DEFAULT_LIMIT,
    }
}

/// Entry point for nearest-restroom queries.
///
/// Holds one client per provider. The bulk provider is wrapped in a
/// [`DatasetCache`]; the proximity provider is queried on every lookup.
pub struct NearestLookup {
    dataset: DatasetCache,
    proximity: ProximityClient,
}

impl NearestLookup {
    #[must_use]
    pub fn new(dataset: DatasetCache, proximity: ProximityClient) -> Self {
        Self { dataset, proximity }
    }

    /// Wires both provider clients from application config, sharing one
    /// HTTP client between them.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let client = build_http_client(config.upstream_timeout_secs, &config.user_agent)?;
        let dataset = DatasetCache::new(
            BulkClient::new(client.clone(), config.bulk_listing_url.clone()),
            Duration::from_secs(config.bulk_cache_ttl_secs),
        );
        let proximity = ProximityClient::new(
            client,
            config.proximity_base_url.clone(),
            config.proximity_page_size,
            config.proximity_max_pages,
            config.primary_country.clone(),
        );
        Ok(Self::new(dataset, proximity))
    }

    /// The bulk dataset cache, for warm-up jobs and diagnostics.
    #[must_use]
    pub fn dataset(&self) -> &DatasetCache {
        &self.dataset
    }

    /// Finds the restrooms nearest to `(lat, lon)`.
    ///
    /// `limit` is clamped to `1..=MAX_LIMIT` and defaults to
    /// [`DEFAULT_LIMIT`]. Upstream failures are surfaced as-is; nothing is
    /// retried.
    ///
    /// # Errors
    ///
    /// - [`LookupError::InvalidCoordinates`] if either coordinate is not finite.
    /// - [`LookupError::UnsupportedRegion`] if no provider covers the point.
    /// - [`LookupError::UpstreamUnavailable`] if the provider call fails.
    pub async fn find_nearest(
        &self,
        lat: f64,
        lon: f64,
        limit: Option<f64>,
    ) -> Result<LookupResult, LookupError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(LookupError::InvalidCoordinates);
        }
        let limit = normalize_limit(limit);

        match classify(lat, lon) {
            Region::GreatBritain => {
                let provider = Provider::PublicToiletMap;
                let snapshot = self
                    .dataset
                    .get_dataset()
                    .await
                    .map_err(|e| LookupError::upstream(provider, &e))?;
                let records = rank_by_distance(&snapshot.records, lat, lon, limit);
                tracing::debug!(lat, lon, limit, returned = records.len(), %provider, "lookup served");
                Ok(LookupResult {
                    records,
                    source: provider
                        .descriptor(Some(snapshot.source_url.clone()), snapshot.fetched_at),
                })
            }
            Region::NorthAmerica => {
                let provider = Provider::RefugeRestrooms;
                let records = self
                    .proximity
                    .get_nearest(lat, lon, limit)
                    .await
                    .map_err(|e| LookupError::upstream(provider, &e))?;
                tracing::debug!(lat, lon, limit, returned = records.len(), %provider, "lookup served");
                Ok(LookupResult {
                    records,
                    source: provider.descriptor(None, Utc::now()),
                })
            }
            Region::Unsupported => Err(LookupError::UnsupportedRegion { lat, lon }),
        }
    }
}
