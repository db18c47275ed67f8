//! Notify endpoint handlers
//!
//! One route per lifecycle event, mirroring the notify URLs the nodes are
//! configured with. Handlers acknowledge with 200 regardless of what the
//! coordinator decided: notifications are one-way, a node never acts on
//! the response. Configuration inconsistencies are logged server-side
//! only.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::coordinator::Coordinator;
use crate::event::{ClusterUpdate, PublishStart, PublishStop, SubscribeStart, SubscribeStop};

/// Liveness response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Build the event intake router
pub fn build_router(coordinator: Coordinator) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/on_pub_start", post(on_pub_start))
        .route("/on_pub_stop", post(on_pub_stop))
        .route("/on_sub_start", post(on_sub_start))
        .route("/on_sub_stop", post(on_sub_stop))
        .route("/on_update", post(on_update))
        .with_state(coordinator)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn on_pub_start(State(coordinator): State<Coordinator>, Json(event): Json<PublishStart>) {
    coordinator.on_publish_start(event).await;
}

async fn on_pub_stop(State(coordinator): State<Coordinator>, Json(event): Json<PublishStop>) {
    coordinator.on_publish_stop(event).await;
}

async fn on_sub_start(State(coordinator): State<Coordinator>, Json(event): Json<SubscribeStart>) {
    // An unknown node ID is a config problem, not the notifier's fault;
    // it is logged inside the coordinator and the event is acknowledged.
    let _ = coordinator.on_subscribe_start(event).await;
}

async fn on_sub_stop(State(coordinator): State<Coordinator>, Json(event): Json<SubscribeStop>) {
    coordinator.on_subscribe_stop(event).await;
}

async fn on_update(State(coordinator): State<Coordinator>, Json(event): Json<ClusterUpdate>) {
    coordinator.on_cluster_update(event).await;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    use super::*;
    use crate::cluster::NodeRegistry;
    use crate::directory::MemoryDirectory;
    use crate::dispatch::{Dispatch, StartPullCommand};

    struct NullDispatch;

    #[async_trait::async_trait]
    impl Dispatch for NullDispatch {
        async fn send(&self, _api_addr: &str, _command: StartPullCommand) {}
    }

    fn test_router() -> Router {
        let coordinator = Coordinator::new(
            Arc::new(MemoryDirectory::new()),
            Arc::new(NodeRegistry::default()),
            Arc::new(NullDispatch),
        );
        build_router(coordinator)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_pub_start_accepted() {
        let response = test_router()
            .oneshot(post_json(
                "/on_pub_start",
                r#"{"stream_name":"match1","server_id":"1"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_body_rejected_at_boundary() {
        let response = test_router()
            .oneshot(post_json("/on_pub_start", r#"{"stream_name":42}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_sub_start_with_unknown_node_still_ok() {
        // Empty registry: the coordinator logs a config error, the
        // notifier still gets its acknowledgement
        let response = test_router()
            .oneshot(post_json(
                "/on_sub_start",
                r#"{"stream_name":"m","server_id":"9","app_name":"live","has_in_session":false,"url_param":""}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_accepted() {
        let response = test_router()
            .oneshot(post_json("/on_update", r#"{"server_id":"1","streams":[]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
