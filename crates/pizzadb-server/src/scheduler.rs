//! Background job scheduler.
//!
//! Registers the recurring pipeline run at server startup.

use std::sync::Arc;

use pizzadb_core::AppConfig;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::api::EnvLookup;

/// Builds and starts the scheduler, or returns `None` when no schedule is
/// configured.
///
/// The returned [`JobScheduler`] must be kept alive for the lifetime of the
/// process; dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the cron expression is invalid, or the scheduler fails to start.
pub async fn build_scheduler(
    config: &AppConfig,
    lookup: EnvLookup,
) -> Result<Option<JobScheduler>, JobSchedulerError> {
    let Some(schedule) = config.scrape_schedule.as_deref() else {
        tracing::info!("scheduler: PIZZADB_SCRAPE_SCHEDULE empty; scheduled runs disabled");
        return Ok(None);
    };

    let scheduler = JobScheduler::new().await?;
    register_pipeline_job(&scheduler, schedule, lookup).await?;
    scheduler.start().await?;

    tracing::info!(schedule, "scheduler: pipeline job registered");
    Ok(Some(scheduler))
}

async fn register_pipeline_job(
    scheduler: &JobScheduler,
    schedule: &str,
    lookup: EnvLookup,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let lookup = Arc::clone(&lookup);

        Box::pin(async move {
            tracing::info!("scheduler: starting pipeline run");
            match pizzadb_pipeline::run_from_lookup(lookup.as_ref()).await {
                Ok(summary) => tracing::info!(
                    updated = summary.updated,
                    inserted = summary.reconcile.inserted,
                    failed = summary.reconcile.failed,
                    "scheduler: pipeline run complete"
                ),
                Err(e) => tracing::error!(error = %e, "scheduler: pipeline run failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
