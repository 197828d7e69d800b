//! Time-bounded cache for the bulk dataset.
//!
//! The cache is one owned cell: created empty, replaced wholesale on every
//! successful refresh, never touched by a failed one. Refreshes are
//! single-flight. Concurrent lookups that find the cache cold or expired
//! queue on the refresh lock, and whoever acquires it second re-checks
//! freshness before going to the network.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use loofinder_core::RestroomRecord;
use tokio::sync::{Mutex, RwLock};

use crate::bulk::BulkClient;
use crate::error::ProviderError;

/// Default freshness window for a bulk pull.
pub const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// One complete, normalized pull of the bulk dataset.
#[derive(Debug, Clone)]
pub struct DatasetSnapshot {
    pub records: Vec<RestroomRecord>,
    /// Direct download URL the records came from.
    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
}

struct CacheEntry {
    snapshot: Arc<DatasetSnapshot>,
    stored_at: Instant,
}

/// What waiters see of a refresh that failed while they were queued.
struct FailedRefresh {
    status: Option<u16>,
    reason: String,
}

impl FailedRefresh {
    fn to_error(&self) -> ProviderError {
        ProviderError::RefreshFailed {
            status: self.status,
            reason: self.reason.clone(),
        }
    }
}

pub struct DatasetCache {
    client: BulkClient,
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
    /// Held for the duration of a refresh; holds the last attempt's failure.
    refresh_lock: Mutex<Option<FailedRefresh>>,
    /// Completed refresh attempts, successful or not.
    attempts: AtomicU64,
}

impl DatasetCache {
    #[must_use]
    pub fn new(client: BulkClient, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            entry: RwLock::new(None),
            refresh_lock: Mutex::new(None),
            attempts: AtomicU64::new(0),
        }
    }

    /// Returns the cached dataset, refreshing it first when it is empty or
    /// older than the TTL.
    ///
    /// # Errors
    ///
    /// Propagates any [`ProviderError`] from the refresh. The previous
    /// contents stay in place, but this call still fails. Callers that were
    /// waiting on that refresh get [`ProviderError::RefreshFailed`] carrying
    /// the same status and reason.
    pub async fn get_dataset(&self) -> Result<Arc<DatasetSnapshot>, ProviderError> {
        if let Some(snapshot) = self.fresh_snapshot().await {
            tracing::debug!(records = snapshot.records.len(), "bulk dataset cache hit");
            return Ok(snapshot);
        }

        let seen_attempts = self.attempts.load(Ordering::Acquire);
        let mut last_failure = self.refresh_lock.lock().await;
        if let Some(snapshot) = self.fresh_snapshot().await {
            tracing::debug!("bulk dataset refreshed by a concurrent lookup");
            return Ok(snapshot);
        }
        if self.attempts.load(Ordering::Acquire) != seen_attempts {
            if let Some(failure) = last_failure.as_ref() {
                tracing::debug!("bulk dataset refresh failed in a concurrent lookup");
                return Err(failure.to_error());
            }
        }

        tracing::info!(listing_url = self.client.listing_url(), "refreshing bulk dataset");
        let outcome = match self.client.fetch_dataset().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                *self.entry.write().await = Some(CacheEntry {
                    snapshot: Arc::clone(&snapshot),
                    stored_at: Instant::now(),
                });
                *last_failure = None;
                Ok(snapshot)
            }
            Err(e) => {
                tracing::warn!(error = %e, "bulk dataset refresh failed; keeping previous contents");
                *last_failure = Some(FailedRefresh {
                    status: e.status(),
                    reason: e.to_string(),
                });
                Err(e)
            }
        };
        self.attempts.fetch_add(1, Ordering::Release);
        outcome
    }

    /// Current contents regardless of age; `None` if never fetched.
    pub async fn snapshot(&self) -> Option<Arc<DatasetSnapshot>> {
        self.entry
            .read()
            .await
            .as_ref()
            .map(|entry| Arc::clone(&entry.snapshot))
    }

    /// Time of the last successful pull; `None` if never fetched.
    pub async fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot().await.map(|snapshot| snapshot.fetched_at)
    }

    async fn fresh_snapshot(&self) -> Option<Arc<DatasetSnapshot>> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|e| !e.snapshot.records.is_empty() && e.stored_at.elapsed() < self.ttl)
            .map(|e| Arc::clone(&e.snapshot))
    }
}
