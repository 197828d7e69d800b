//! Proximity provider: pages through a nearest-first API per lookup.

use std::collections::HashSet;

use loofinder_core::RestroomRecord;
use reqwest::{Client, Url};

use crate::error::ProviderError;
use crate::fetch::fetch_json;
use crate::normalize::normalize_proximity_row;
use crate::rank::rank_by_distance;
use crate::types::{ProximityCandidate, ProximityRow};

/// Client for the paginated proximity API.
pub struct ProximityClient {
    client: Client,
    base_url: String,
    page_size: u32,
    max_pages: u32,
    primary_country: String,
}

impl ProximityClient {
    /// `page_size` rows are requested per page, for at most `max_pages`
    /// pages per lookup.
    #[must_use]
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        page_size: u32,
        max_pages: u32,
        primary_country: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            page_size,
            max_pages,
            primary_country: primary_country.into(),
        }
    }

    /// Fetches candidates near `(lat, lon)` and returns the nearest `limit`,
    /// distance-annotated and sorted.
    ///
    /// Pages are requested sequentially. Paging stops once `limit`
    /// primary-country candidates are in hand, on an empty page, or at the
    /// page cap.
    ///
    /// # Errors
    ///
    /// Any non-2xx page fails the whole lookup with
    /// [`ProviderError::UnexpectedStatus`]; a page that is not a JSON array
    /// fails with [`ProviderError::NotAList`].
    pub async fn get_nearest(
        &self,
        lat: f64,
        lon: f64,
        limit: usize,
    ) -> Result<Vec<RestroomRecord>, ProviderError> {
        let mut candidates: Vec<ProximityCandidate> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut primary_count = 0usize;

        for page in 1..=self.max_pages {
            let url = self.page_url(lat, lon, page)?;
            let payload = fetch_json(&self.client, &url).await?;
            let serde_json::Value::Array(rows) = payload else {
                return Err(ProviderError::NotAList { url });
            };

            if rows.is_empty() {
                tracing::debug!(page, "proximity provider returned an empty page");
                break;
            }

            for row in rows {
                let row = match serde_json::from_value::<ProximityRow>(row) {
                    Ok(row) => row,
                    Err(e) => {
                        tracing::debug!(error = %e, "skipping malformed proximity row");
                        continue;
                    }
                };
                let Some(candidate) = normalize_proximity_row(row) else {
                    continue;
                };
                if !seen.insert(candidate.record.id.clone()) {
                    continue;
                }
                if self.is_primary(&candidate) {
                    primary_count += 1;
                }
                candidates.push(candidate);
            }

            if primary_count >= limit {
                break;
            }
        }

        tracing::debug!(
            candidates = candidates.len(),
            primary_count,
            "collected proximity candidates"
        );

        let pool = prefer_country(candidates, &self.primary_country);
        Ok(rank_by_distance(&pool, lat, lon, limit))
    }

    fn is_primary(&self, candidate: &ProximityCandidate) -> bool {
        candidate
            .country
            .as_deref()
            .is_some_and(|c| same_country(c, &self.primary_country))
    }

    /// Builds the URL for one 1-based page of results.
    fn page_url(&self, lat: f64, lon: f64, page: u32) -> Result<String, ProviderError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ProviderError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("lat", &lat.to_string())
            .append_pair("lng", &lon.to_string())
            .append_pair("per_page", &self.page_size.to_string())
            .append_pair("page", &page.to_string());
        Ok(url.into())
    }
}

/// Restricts the pool to `primary_country` when any candidate is from there;
/// otherwise returns every candidate.
#[must_use]
pub fn prefer_country(
    candidates: Vec<ProximityCandidate>,
    primary_country: &str,
) -> Vec<RestroomRecord> {
    let has_primary = candidates.iter().any(|c| {
        c.country
            .as_deref()
            .is_some_and(|country| same_country(country, primary_country))
    });

    candidates
        .into_iter()
        .filter(|c| {
            !has_primary
                || c.country
                    .as_deref()
                    .is_some_and(|country| same_country(country, primary_country))
        })
        .map(|c| c.record)
        .collect()
}

/// Compares country names, folding the spellings the provider is known to
/// use for the same country.
fn same_country(a: &str, b: &str) -> bool {
    canonical_country(a) == canonical_country(b)
}

fn canonical_country(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    match upper.as_str() {
        "USA" | "UNITED STATES" | "UNITED STATES OF AMERICA" => "US".to_string(),
        "CANADA" => "CA".to_string(),
        "MEXICO" | "MÉXICO" => "MX".to_string(),
        _ => upper,
    }
}
