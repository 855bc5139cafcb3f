use chrono::Utc;
use tonic::{Response, Status};

use crate::batch::{read_stats, BatchScheduler, ReadOutcome};
use crate::server::convert::count_to_proto;
use crate::server::keys::STATS_KEY;
use crate::server::proto::HealthResponse;

/// Point-in-time counters, read through the `get` queue like any other read.
pub async fn get_health(scheduler: &BatchScheduler) -> Result<Response<HealthResponse>, Status> {
    match scheduler.submit_get(STATS_KEY, read_stats()).await {
        Ok(ReadOutcome::Stats(stats)) => Ok(Response::new(HealthResponse {
            status: "ok".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            total_items: count_to_proto(stats.total_items),
            selected_count: count_to_proto(stats.selected_count),
            next_id: stats.next_id,
        })),
        Ok(ReadOutcome::Page(_)) => Err(Status::internal("stats read resolved to a page")),
        Err(e) => Err(Status::unavailable(e.to_string())),
    }
}
