use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::cache::ListingCache};

/// Starts the cache sweep scheduler
///
/// Runs every minute and drops expired listing search pages so the cache does not
/// keep entries nobody will read again.
///
/// # Arguments
/// - `cache`: Listing search cache shared with the request handlers
pub async fn start_scheduler(cache: ListingCache) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let cache = cache.clone();

        Box::pin(async move {
            let purged = cache.purge_expired().await;
            if purged > 0 {
                tracing::debug!("Purged {} expired listing cache entries", purged);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Cache sweep scheduler started");

    Ok(())
}
