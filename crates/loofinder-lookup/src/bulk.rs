//! Bulk dataset provider: scrape the listing page for the current export
//! link, download the export, and normalize every row.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use reqwest::{Client, Url};

use crate::cache::DatasetSnapshot;
use crate::error::ProviderError;
use crate::fetch::{fetch_json, fetch_text};
use crate::normalize::normalize_bulk_row;
use crate::types::BulkRow;

/// Matches export download links such as
/// `https://host/exports/toilets-2025-01-01.json?download=1`, absolute or
/// root-relative, with the query possibly HTML-escaped.
static EXPORT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:https?://[^\s"'<>]+?)?/exports/toilets-[^\s"'<>/?]*\.json\?[^\s"'<>]*?download=1\b"#,
    )
    .expect("valid regex")
});

/// Client for the bulk dataset provider.
pub struct BulkClient {
    client: Client,
    listing_url: String,
}

impl BulkClient {
    #[must_use]
    pub fn new(client: Client, listing_url: impl Into<String>) -> Self {
        Self {
            client,
            listing_url: listing_url.into(),
        }
    }

    #[must_use]
    pub fn listing_url(&self) -> &str {
        &self.listing_url
    }

    /// Pulls the full dataset: listing page, export link, export download.
    ///
    /// Rows that fail to deserialize or normalize are skipped; the pull as a
    /// whole only fails on transport or structural problems.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::UnexpectedStatus`] if either request returns non-2xx.
    /// - [`ProviderError::ExportLinkNotFound`] if the listing has no export link.
    /// - [`ProviderError::NotAList`] if the export is not a JSON array.
    /// - [`ProviderError::Http`], [`ProviderError::Timeout`], or
    ///   [`ProviderError::Deserialize`] on transport or parse failures.
    pub async fn fetch_dataset(&self) -> Result<DatasetSnapshot, ProviderError> {
        let html = fetch_text(&self.client, &self.listing_url).await?;

        let link = extract_export_link(&html).ok_or_else(|| ProviderError::ExportLinkNotFound {
            listing_url: self.listing_url.clone(),
        })?;
        let source_url = resolve_link(&self.listing_url, &link)?;
        tracing::debug!(listing_url = %self.listing_url, source_url, "resolved dataset export link");

        let payload = fetch_json(&self.client, &source_url).await?;
        let serde_json::Value::Array(rows) = payload else {
            return Err(ProviderError::NotAList { url: source_url });
        };

        let total = rows.len();
        let records: Vec<_> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<BulkRow>(row) {
                Ok(row) => normalize_bulk_row(row),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping malformed dataset row");
                    None
                }
            })
            .collect();

        tracing::info!(
            source_url,
            rows = total,
            records = records.len(),
            "pulled bulk dataset"
        );

        Ok(DatasetSnapshot {
            records,
            source_url,
            fetched_at: Utc::now(),
        })
    }
}

/// Finds the first export download link in the listing HTML and unescapes
/// `&amp;` entities in it.
#[must_use]
pub fn extract_export_link(html: &str) -> Option<String> {
    EXPORT_LINK
        .find(html)
        .map(|m| m.as_str().replace("&amp;", "&"))
}

/// Resolves a possibly root-relative link against the listing page URL.
fn resolve_link(listing_url: &str, link: &str) -> Result<String, ProviderError> {
    let base = Url::parse(listing_url).map_err(|e| ProviderError::InvalidUrl {
        url: listing_url.to_owned(),
        reason: e.to_string(),
    })?;
    base.join(link)
        .map(String::from)
        .map_err(|e| ProviderError::InvalidUrl {
            url: link.to_owned(),
            reason: e.to_string(),
        })
}
