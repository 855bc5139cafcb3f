use tonic::{Response, Status};

use crate::batch::{read_available, read_selected, BatchScheduler, ReadOutcome};
use crate::metrics::OperationTimer;
use crate::server::convert::{item_to_proto, pagination};
use crate::server::keys;
use crate::server::proto::{ListItemsRequest, ListItemsResponse};
use crate::server::validate::page_query;

use super::rejection;

/// Which side of the picker a list request reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Available,
    Selected,
}

impl Listing {
    fn operation(self) -> &'static str {
        match self {
            Listing::Available => "list_available",
            Listing::Selected => "list_selected",
        }
    }
}

pub async fn list_items(
    scheduler: &BatchScheduler,
    listing: Listing,
    req: ListItemsRequest,
) -> Result<Response<ListItemsResponse>, Status> {
    let operation = listing.operation();
    let _timer = OperationTimer::new(operation);
    let query = page_query(req.offset, req.limit, &req.search);

    let handle = match listing {
        Listing::Available => {
            scheduler.submit_get(keys::available(&query), read_available(query.clone()))
        }
        Listing::Selected => {
            scheduler.submit_get(keys::selected(&query), read_selected(query.clone()))
        }
    };

    match handle.await {
        Ok(ReadOutcome::Page(page)) => Ok(Response::new(ListItemsResponse {
            success: true,
            error: String::new(),
            items: page.items.iter().map(item_to_proto).collect(),
            pagination: Some(pagination(&query, page.total)),
        })),
        Ok(ReadOutcome::Stats(_)) => Err(Status::internal(format!(
            "{operation} resolved to a non-page result"
        ))),
        Err(e) => Ok(Response::new(ListItemsResponse {
            success: false,
            error: rejection(operation, &e)?,
            ..Default::default()
        })),
    }
}
