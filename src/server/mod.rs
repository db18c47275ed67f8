//! HTTP event intake
//!
//! Accepts the lifecycle notifications nodes POST to the coordinator and
//! feeds them to the [`Coordinator`](crate::coordinator::Coordinator).
//! Each request is handled on its own tokio task; malformed bodies are
//! rejected at this boundary and never reach the decision logic.

pub mod listener;
pub mod routes;

pub use listener::CoordinatorServer;
pub use routes::build_router;
