use crate::batch::BatchError;
use crate::server::validate::RequestError;
use crate::store::StoreError;

/// Trait for mapping domain errors to structured error codes and optional tips.
pub trait ToStructuredError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>);
}

// ── StoreError ────────────────────────────────────────────────────────────────
impl ToStructuredError for StoreError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            StoreError::DuplicateId(_) => (
                "DUPLICATE_ID",
                Some("Omit the custom id to have one assigned"),
            ),
            StoreError::ItemNotFound(_) => ("ITEM_NOT_FOUND", None),
            StoreError::IdsExhausted => ("INTERNAL_ERROR", None),
        }
    }
}

// ── BatchError ────────────────────────────────────────────────────────────────
impl ToStructuredError for BatchError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            BatchError::Store(e) => e.error_code_and_tip(),
            BatchError::QueueFull { .. } => {
                ("QUEUE_FULL", Some("Retry once the pending requests are flushed"))
            }
            BatchError::Dropped | BatchError::Internal(_) => ("INTERNAL_ERROR", None),
        }
    }
}

// ── RequestError ──────────────────────────────────────────────────────────────
impl ToStructuredError for RequestError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            RequestError::InvalidOrder(_) => (
                "INVALID_ORDER",
                Some("Send the full list of selected ids in display order"),
            ),
        }
    }
}
