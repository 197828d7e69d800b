//! Background job scheduler.
//!
//! Keeps the bulk dataset cache warm so lookups in its region rarely pay
//! for a cold pull.

use std::sync::Arc;

use loofinder_core::AppConfig;
use loofinder_lookup::NearestLookup;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it shuts down all scheduled jobs.
/// When `dataset_warm_schedule` is unset the scheduler starts with no jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the cron expression is invalid, or the scheduler fails to start.
pub async fn build_scheduler(
    lookup: Arc<NearestLookup>,
    config: &AppConfig,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    match config.dataset_warm_schedule.as_deref() {
        Some(schedule) => register_dataset_warm_job(&scheduler, schedule, lookup).await?,
        None => tracing::info!("scheduler: dataset warm job disabled"),
    }

    scheduler.start().await?;
    Ok(scheduler)
}

/// Registers the recurring bulk-dataset refresh.
///
/// The job goes through the same cache entry point as lookups, so it only
/// hits the network once the cached copy has expired and never overlaps a
/// refresh a lookup already started.
async fn register_dataset_warm_job(
    scheduler: &JobScheduler,
    schedule: &str,
    lookup: Arc<NearestLookup>,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let lookup = Arc::clone(&lookup);

        Box::pin(async move {
            tracing::info!("scheduler: warming bulk dataset cache");
            warm_dataset(&lookup).await;
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(schedule, "scheduler: registered dataset warm job");
    Ok(())
}

async fn warm_dataset(lookup: &NearestLookup) {
    match lookup.dataset().get_dataset().await {
        Ok(snapshot) => tracing::info!(
            records = snapshot.records.len(),
            fetched_at = %snapshot.fetched_at,
            "scheduler: bulk dataset warm"
        ),
        Err(e) => tracing::error!(error = %e, "scheduler: bulk dataset warm failed"),
    }
}
