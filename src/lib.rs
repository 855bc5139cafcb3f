// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod app;
pub mod batch;
pub mod cors;
pub mod daemon_config;
pub mod grpc_logging;
pub mod logging;
pub mod metrics;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use batch::{
    BatchClass, BatchConfig, BatchError, BatchScheduler, FlushSummary, PendingHandle, ReadOutcome,
    UpdateAck, UpdateAction,
};
pub use daemon_config::{load_config, ConfigError, ConfigOverrides, DaemonConfig, Settings};
pub use server::CatalogDaemonService;
pub use store::{Item, ItemId, ItemStore, PageQuery, StoreError, StoreStats};
