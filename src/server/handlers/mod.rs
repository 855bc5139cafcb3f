mod health;
mod item_create;
mod item_list;
mod item_select;
mod selected_reorder;

pub use health::get_health;
pub use item_create::create_item;
pub use item_list::{list_items, Listing};
pub use item_select::{deselect_item, select_item};
pub use selected_reorder::reorder_selected;

use tonic::Status;

use crate::batch::BatchError;
use crate::server::structured_error::to_error_json;

/// Turn a rejected batch request into the `error` field of a response.
///
/// Internal failures have nothing the caller can act on and are surfaced as
/// a gRPC status instead.
fn rejection(operation: &str, err: &BatchError) -> Result<String, Status> {
    match err {
        BatchError::Dropped | BatchError::Internal(_) => Err(Status::internal(err.to_string())),
        BatchError::Store(_) | BatchError::QueueFull { .. } => Ok(to_error_json(operation, err)),
    }
}
