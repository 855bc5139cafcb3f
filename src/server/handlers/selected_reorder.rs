use tonic::{Response, Status};

use crate::batch::{BatchScheduler, UpdateAction};
use crate::server::keys::REORDER_KEY;
use crate::server::proto::{ReorderSelectedRequest, SelectionResponse};
use crate::server::structured_error::to_error_json;
use crate::server::validate::reorder_ids;

use super::item_select::apply_update;

pub async fn reorder_selected(
    scheduler: &BatchScheduler,
    req: ReorderSelectedRequest,
) -> Result<Response<SelectionResponse>, Status> {
    let ids = match reorder_ids(req) {
        Ok(ids) => ids,
        Err(e) => {
            return Ok(Response::new(SelectionResponse {
                success: false,
                error: to_error_json("reorder_selected", &e),
                message: String::new(),
            }));
        }
    };

    apply_update(
        scheduler,
        "reorder_selected",
        REORDER_KEY.to_string(),
        UpdateAction::Reorder(ids),
        "Order updated successfully".to_string(),
    )
    .await
}
