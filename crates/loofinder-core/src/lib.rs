pub mod app_config;
pub mod config;
pub mod geo;
pub mod region;
pub mod restrooms;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_km, EARTH_RADIUS_KM};
pub use region::{classify, classify_within, BoundingBox, Region};
pub use restrooms::{Amenity, LookupResult, RestroomRecord, SourceDescriptor};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
