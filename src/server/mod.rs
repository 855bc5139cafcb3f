//! gRPC boundary: translates RPCs into batch scheduler submissions.

mod convert;
mod error_mapping;
mod handlers;
pub mod keys;
mod structured_error;
pub mod validate;

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::batch::BatchScheduler;
use handlers::Listing;

// Import generated protobuf types
pub mod proto {
    #![allow(clippy::pedantic)]
    #![allow(clippy::all)]
    tonic::include_proto!("catalog");
}

pub use error_mapping::ToStructuredError;
pub use structured_error::{to_error_json, StructuredError};

use proto::catalog_daemon_server::CatalogDaemon;
use proto::{
    CreateItemRequest, CreateItemResponse, GetHealthRequest, HealthResponse, ListItemsRequest,
    ListItemsResponse, ReorderSelectedRequest, SelectItemRequest, SelectionResponse,
};

/// Encoded descriptor set for gRPC reflection.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("catalog_descriptor");

pub struct CatalogDaemonService {
    scheduler: Arc<BatchScheduler>,
}

impl CatalogDaemonService {
    #[must_use]
    pub fn new(scheduler: Arc<BatchScheduler>) -> Self {
        Self { scheduler }
    }
}

#[tonic::async_trait]
impl CatalogDaemon for CatalogDaemonService {
    async fn list_available(
        &self,
        request: Request<ListItemsRequest>,
    ) -> Result<Response<ListItemsResponse>, Status> {
        handlers::list_items(&self.scheduler, Listing::Available, request.into_inner()).await
    }

    async fn list_selected(
        &self,
        request: Request<ListItemsRequest>,
    ) -> Result<Response<ListItemsResponse>, Status> {
        handlers::list_items(&self.scheduler, Listing::Selected, request.into_inner()).await
    }

    async fn create_item(
        &self,
        request: Request<CreateItemRequest>,
    ) -> Result<Response<CreateItemResponse>, Status> {
        handlers::create_item(&self.scheduler, request.into_inner()).await
    }

    async fn select_item(
        &self,
        request: Request<SelectItemRequest>,
    ) -> Result<Response<SelectionResponse>, Status> {
        handlers::select_item(&self.scheduler, request.into_inner()).await
    }

    async fn deselect_item(
        &self,
        request: Request<SelectItemRequest>,
    ) -> Result<Response<SelectionResponse>, Status> {
        handlers::deselect_item(&self.scheduler, request.into_inner()).await
    }

    async fn reorder_selected(
        &self,
        request: Request<ReorderSelectedRequest>,
    ) -> Result<Response<SelectionResponse>, Status> {
        handlers::reorder_selected(&self.scheduler, request.into_inner()).await
    }

    async fn get_health(
        &self,
        _request: Request<GetHealthRequest>,
    ) -> Result<Response<HealthResponse>, Status> {
        handlers::get_health(&self.scheduler).await
    }
}
