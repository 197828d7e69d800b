use std::time::Duration;

use reqwest::Client;

use crate::error::ProviderError;

/// Builds the shared HTTP client used for every upstream provider call.
///
/// `timeout_secs` bounds each request end to end, so a hung upstream fails
/// the lookup with [`ProviderError::Timeout`] instead of stalling it.
///
/// # Errors
///
/// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
/// cannot be constructed (e.g., invalid TLS config).
pub fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ProviderError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10.min(timeout_secs)))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}
