use thiserror::Error;

use crate::provider::Provider;

/// Failures talking to, or making sense of, an upstream provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("no dataset export link found on {listing_url}")]
    ExportLinkNotFound { listing_url: String },

    #[error("expected a JSON array from {url}")]
    NotAList { url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Outcome of a refresh another caller ran while this one waited for it.
    #[error("dataset refresh failed: {reason}")]
    RefreshFailed { status: Option<u16>, reason: String },
}

impl ProviderError {
    /// Upstream HTTP status, when the failure came from a non-success response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::UnexpectedStatus { status, .. } => Some(*status),
            ProviderError::Http(err) => err.status().map(|s| s.as_u16()),
            ProviderError::RefreshFailed { status, .. } => *status,
            _ => None,
        }
    }
}

/// Errors surfaced by [`crate::NearestLookup::find_nearest`].
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("latitude and longitude must be finite numbers")]
    InvalidCoordinates,

    #[error("no provider covers ({lat}, {lon})")]
    UnsupportedRegion { lat: f64, lon: f64 },

    #[error("{provider} is unavailable: {reason}")]
    UpstreamUnavailable {
        provider: Provider,
        status: Option<u16>,
        reason: String,
    },
}

impl LookupError {
    /// Wraps a provider failure, keeping the upstream status when there is one.
    #[must_use]
    pub fn upstream(provider: Provider, error: &ProviderError) -> Self {
        LookupError::UpstreamUnavailable {
            provider,
            status: error.status(),
            reason: error.to_string(),
        }
    }

    /// Stable machine-readable code for API clients.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            LookupError::InvalidCoordinates => "invalid_coordinates",
            LookupError::UnsupportedRegion { .. } => "unsupported_region",
            LookupError::UpstreamUnavailable { .. } => "upstream_unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_exposes_status() {
        let err = ProviderError::UnexpectedStatus {
            status: 503,
            url: "https://example.com".to_string(),
        };
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn structural_errors_have_no_status() {
        let err = ProviderError::ExportLinkNotFound {
            listing_url: "https://example.com".to_string(),
        };
        assert_eq!(err.status(), None);
    }

    #[test]
    fn upstream_keeps_provider_and_status() {
        let err = ProviderError::UnexpectedStatus {
            status: 502,
            url: "https://example.com/page".to_string(),
        };
        let lookup = LookupError::upstream(Provider::RefugeRestrooms, &err);
        assert!(matches!(
            lookup,
            LookupError::UpstreamUnavailable {
                provider: Provider::RefugeRestrooms,
                status: Some(502),
                ..
            }
        ));
        assert_eq!(lookup.code(), "upstream_unavailable");
    }

    #[test]
    fn shared_refresh_failure_keeps_upstream_status() {
        let err = ProviderError::RefreshFailed {
            status: Some(503),
            reason: "unexpected HTTP status 503".to_string(),
        };
        let lookup = LookupError::upstream(Provider::PublicToiletMap, &err);
        assert!(matches!(
            lookup,
            LookupError::UpstreamUnavailable {
                provider: Provider::PublicToiletMap,
                status: Some(503),
                ..
            }
        ));
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            LookupError::InvalidCoordinates.code(),
            "invalid_coordinates"
        );
        assert_eq!(
            LookupError::UnsupportedRegion { lat: 0.0, lon: 0.0 }.code(),
            "unsupported_region"
        );
    }
}
