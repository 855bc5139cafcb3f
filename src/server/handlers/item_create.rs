use tonic::{Response, Status};
use tracing::debug;

use crate::batch::BatchScheduler;
use crate::metrics::OperationTimer;
use crate::server::convert::item_to_proto;
use crate::server::keys;
use crate::server::proto::{CreateItemRequest, CreateItemResponse};

use super::rejection;

pub async fn create_item(
    scheduler: &BatchScheduler,
    req: CreateItemRequest,
) -> Result<Response<CreateItemResponse>, Status> {
    let timer = OperationTimer::new("create_item");
    debug!(request_id = %timer.request_id(), custom_id = ?req.custom_id, "Queueing item creation");

    let handle = scheduler.submit_add(keys::create(req.custom_id), req.custom_id);
    match handle.await {
        Ok(item) => Ok(Response::new(CreateItemResponse {
            success: true,
            error: String::new(),
            item: Some(item_to_proto(&item)),
        })),
        Err(e) => Ok(Response::new(CreateItemResponse {
            success: false,
            error: rejection("create_item", &e)?,
            item: None,
        })),
    }
}
