use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("LOOFINDER_ENV", "development"))?;

    let bind_addr = or_default("LOOFINDER_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("LOOFINDER_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("LOOFINDER_LOG_LEVEL", "info");

    let upstream_timeout_secs = parse_u64("LOOFINDER_UPSTREAM_TIMEOUT_SECS", "20")?;
    if upstream_timeout_secs == 0 {
        return Err(invalid(
            "LOOFINDER_UPSTREAM_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let user_agent = or_default("LOOFINDER_USER_AGENT", "loofinder/0.1 (nearest-restroom)");

    let bulk_listing_url = or_default(
        "LOOFINDER_BULK_LISTING_URL",
        "https://www.toiletmap.org.uk/dataset",
    );
    let bulk_cache_ttl_secs = parse_u64("LOOFINDER_BULK_CACHE_TTL_SECS", "21600")?;

    let proximity_base_url = or_default(
        "LOOFINDER_PROXIMITY_BASE_URL",
        "https://www.refugerestrooms.org/api/v1/restrooms/by_location",
    );
    let proximity_page_size = parse_u32("LOOFINDER_PROXIMITY_PAGE_SIZE", "100")?;
    let proximity_max_pages = parse_u32("LOOFINDER_PROXIMITY_MAX_PAGES", "4")?;
    if proximity_page_size == 0 || proximity_max_pages == 0 {
        let var = if proximity_page_size == 0 {
            "LOOFINDER_PROXIMITY_PAGE_SIZE"
        } else {
            "LOOFINDER_PROXIMITY_MAX_PAGES"
        };
        return Err(invalid(var, "must be greater than zero".to_string()));
    }
    let primary_country = or_default("LOOFINDER_PRIMARY_COUNTRY", "US");

    let rate_limit_per_minute = parse_usize("LOOFINDER_RATE_LIMIT_PER_MINUTE", "120")?;

    // Explicitly empty disables the job; unset falls back to every six hours.
    let dataset_warm_schedule = match lookup("LOOFINDER_DATASET_WARM_SCHEDULE") {
        Ok(raw) if raw.trim().is_empty() => None,
        Ok(raw) => Some(raw.trim().to_string()),
        Err(_) => Some("0 0 */6 * * *".to_string()),
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        upstream_timeout_secs,
        user_agent,
        bulk_listing_url,
        bulk_cache_ttl_secs,
        proximity_base_url,
        proximity_page_size,
        proximity_max_pages,
        primary_country,
        rate_limit_per_minute,
        dataset_warm_schedule,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LOOFINDER_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
