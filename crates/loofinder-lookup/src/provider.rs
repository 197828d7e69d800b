//! Upstream provider identities and their attribution metadata.

use chrono::{DateTime, Utc};
use loofinder_core::SourceDescriptor;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// Bulk dataset covering Great Britain.
    PublicToiletMap,
    /// Paginated proximity API covering North America.
    RefugeRestrooms,
}

impl Provider {
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Provider::PublicToiletMap => "The Great British Public Toilet Map",
            Provider::RefugeRestrooms => "Refuge Restrooms",
        }
    }

    #[must_use]
    pub fn reference_url(self) -> &'static str {
        match self {
            Provider::PublicToiletMap => "https://www.toiletmap.org.uk",
            Provider::RefugeRestrooms => "https://www.refugerestrooms.org/api/docs/",
        }
    }

    #[must_use]
    pub fn license(self) -> Option<&'static str> {
        match self {
            Provider::PublicToiletMap => Some("CC BY 4.0"),
            Provider::RefugeRestrooms => None,
        }
    }

    /// Builds the descriptor attached to a lookup result served by this provider.
    #[must_use]
    pub fn descriptor(
        self,
        dataset_url: Option<String>,
        fetched_at: DateTime<Utc>,
    ) -> SourceDescriptor {
        SourceDescriptor {
            provider: self.display_name().to_string(),
            reference_url: self.reference_url().to_string(),
            dataset_url,
            license: self.license().map(str::to_string),
            fetched_at,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
