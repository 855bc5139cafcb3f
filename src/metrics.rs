use std::time::Instant;
use tracing::info;

/// A timer that logs the duration of an operation when dropped.
///
/// # Example
///
/// ```ignore
/// async fn list_available(&self, request: Request<ListItemsRequest>) -> Result<Response<ListItemsResponse>, Status> {
///     let _timer = OperationTimer::new("list_available");
///     // ... implementation ...
/// }
/// ```
pub struct OperationTimer {
    name: &'static str,
    request_id: String,
    start: Instant,
}

impl OperationTimer {
    /// Create a new timer for the given operation name.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            request_id: generate_request_id(),
            start: Instant::now(),
        }
    }

    /// Short id attached to every log line of this operation.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        info!(
            operation = %self.name,
            request_id = %self.request_id,
            duration_ms = %duration.as_millis(),
            "Operation completed"
        );
    }
}

/// Generate a short request ID for correlation.
#[must_use]
pub fn generate_request_id() -> String {
    let uuid_str = uuid::Uuid::new_v4().to_string();
    uuid_str.get(..8).unwrap_or(&uuid_str).to_string()
}
