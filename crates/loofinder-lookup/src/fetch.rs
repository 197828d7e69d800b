//! Low-level HTTP helpers shared by the provider clients.
//!
//! Every helper fails on a non-2xx status; none of them retry.

use crate::error::ProviderError;

/// GET a resource and return its body as text.
pub(crate) async fn fetch_text(
    client: &reqwest::Client,
    url: &str,
) -> Result<String, ProviderError> {
    let response = send(client, url, "text/html,application/xhtml+xml").await?;
    response.text().await.map_err(|e| map_transport(url, e))
}

/// GET a resource and parse its body as JSON.
pub(crate) async fn fetch_json(
    client: &reqwest::Client,
    url: &str,
) -> Result<serde_json::Value, ProviderError> {
    let response = send(client, url, "application/json").await?;
    let body = response.text().await.map_err(|e| map_transport(url, e))?;
    serde_json::from_str(&body).map_err(|source| ProviderError::Deserialize {
        context: format!("response from {url}"),
        source,
    })
}

async fn send(
    client: &reqwest::Client,
    url: &str,
    accept: &str,
) -> Result<reqwest::Response, ProviderError> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, accept)
        .send()
        .await
        .map_err(|e| map_transport(url, e))?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url, status = status.as_u16(), "upstream returned non-success status");
        return Err(ProviderError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }
    Ok(response)
}

fn map_transport(url: &str, err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        tracing::warn!(url, "upstream request timed out");
        ProviderError::Timeout {
            url: url.to_owned(),
        }
    } else {
        ProviderError::Http(err)
    }
}
