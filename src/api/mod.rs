//! HTTP API for the image metrics service.
//!
//! `metrics_router()` returns a composable `Router` that can be mounted
//! on any axum server instance; `start_metrics_server` wraps it in a
//! managed background task.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::metrics_router;
pub use server::{start_metrics_server, start_metrics_server_on, MetricsServer};
pub use types::ApiContext;
