use tonic::{Response, Status};

use crate::batch::{BatchScheduler, UpdateAction};
use crate::metrics::OperationTimer;
use crate::server::keys;
use crate::server::proto::{SelectItemRequest, SelectionResponse};

use super::rejection;

/// Submit one selection change and wait for its flush.
pub(super) async fn apply_update(
    scheduler: &BatchScheduler,
    operation: &'static str,
    key: String,
    action: UpdateAction,
    message: String,
) -> Result<Response<SelectionResponse>, Status> {
    let _timer = OperationTimer::new(operation);
    match scheduler.submit_update(key, action).await {
        Ok(_) => Ok(Response::new(SelectionResponse {
            success: true,
            error: String::new(),
            message,
        })),
        Err(e) => Ok(Response::new(SelectionResponse {
            success: false,
            error: rejection(operation, &e)?,
            message: String::new(),
        })),
    }
}

pub async fn select_item(
    scheduler: &BatchScheduler,
    req: SelectItemRequest,
) -> Result<Response<SelectionResponse>, Status> {
    apply_update(
        scheduler,
        "select_item",
        keys::select(req.id),
        UpdateAction::Select(req.id),
        format!("Item {} added to selected", req.id),
    )
    .await
}

pub async fn deselect_item(
    scheduler: &BatchScheduler,
    req: SelectItemRequest,
) -> Result<Response<SelectionResponse>, Status> {
    apply_update(
        scheduler,
        "deselect_item",
        keys::deselect(req.id),
        UpdateAction::Deselect(req.id),
        format!("Item {} removed from selected", req.id),
    )
    .await
}
