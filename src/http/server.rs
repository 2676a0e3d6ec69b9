//! Preview server setup.
//!
//! # Responsibilities
//! - Create the Axum router with the navigation and listing handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind the server to a listener and shut down gracefully
//!
//! # Design Decisions
//! - Every request is an initial page load: a fresh navigation state,
//!   one push navigation, no shared history between requests
//! - The request ID doubles as the navigation correlation ID

use std::future::Future;
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::lifecycle::App;
use crate::navigation::{NavigationError, NavigationOutcome, NavigationRequest, NavigationStatus};
use crate::routing::router::Branch;

const X_REQUEST_ID: &str = "x-request-id";

/// HTTP server rendering navigation outcomes as JSON.
pub struct PreviewServer {
    router: Router,
}

impl PreviewServer {
    pub fn new(app: App) -> Self {
        let timeout = Duration::from_secs(app.config().server.request_timeout_secs);
        Self {
            router: Self::build_router(app, timeout),
        }
    }

    /// The Axum router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    #[allow(deprecated)]
    fn build_router(app: App, timeout: Duration) -> Router {
        Router::new()
            .route("/__routes", get(list_routes))
            .route("/", get(navigate))
            .route("/{*path}", get(navigate))
            .with_state(app)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(timeout)),
            )
    }

    /// Serve until `shutdown` resolves, then let in-flight requests finish.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Preview server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Preview server stopped");
        Ok(())
    }
}

/// HTTP status for a navigation result.
pub fn status_for(result: &Result<NavigationOutcome, NavigationError>) -> StatusCode {
    match result {
        Ok(NavigationOutcome::Committed(committed)) => match &committed.status {
            NavigationStatus::Rendered => StatusCode::OK,
            NavigationStatus::NotFound => StatusCode::NOT_FOUND,
            NavigationStatus::LoaderFailed { error, .. } if error.is_not_found() => {
                StatusCode::NOT_FOUND
            }
            NavigationStatus::LoaderFailed { .. } => StatusCode::BAD_GATEWAY,
        },
        Ok(NavigationOutcome::Superseded { .. }) => StatusCode::CONFLICT,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn navigate(State(app): State<App>, headers: HeaderMap, uri: Uri) -> Response {
    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .unwrap_or_else(Uuid::new_v4);

    let state = app.new_state();
    let request = NavigationRequest::push(uri.path()).with_id(request_id);
    let result = app.resolver().navigate(&state, request).await;
    let status = status_for(&result);

    match result {
        Ok(outcome) => (status, Json(outcome)).into_response(),
        Err(err) => {
            let trail = match &err {
                NavigationError::MisconfiguredRedirect { trail, .. } => trail.clone(),
                _ => Vec::new(),
            };
            let body = json!({
                "request_id": request_id,
                "outcome": "error",
                "error": err.to_string(),
                "trail": trail,
            });
            (status, Json(body)).into_response()
        }
    }
}

async fn list_routes(State(app): State<App>) -> Json<Vec<Branch>> {
    Json(app.tree().branches())
}
