pub mod bulk;
pub mod cache;
pub mod client;
pub mod error;
mod fetch;
pub mod lookup;
pub mod normalize;
pub mod provider;
pub mod proximity;
pub mod rank;
pub mod types;

pub use bulk::{extract_export_link, BulkClient};
pub use cache::{DatasetCache, DatasetSnapshot};
pub use client::build_http_client;
pub use error::{LookupError, ProviderError};
pub use lookup::{normalize_limit, NearestLookup, DEFAULT_LIMIT, MAX_LIMIT};
pub use normalize::{clamp_text, normalize_bulk_row, normalize_proximity_row};
pub use provider::Provider;
pub use proximity::ProximityClient;
pub use rank::rank_by_distance;
pub use types::{BulkRow, ProximityCandidate, ProximityRow};
