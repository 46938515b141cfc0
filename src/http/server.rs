//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy engine in front of local routes
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener
//! - Serve until shutdown is signalled

use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::proxy::{proxy_middleware, ProxyEngine};

/// HTTP server for the edge proxy.
pub struct HttpServer {
    router: Router,
    engine: Arc<ProxyEngine>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &ProxyConfig) -> Self {
        Self::with_engine(Arc::new(ProxyEngine::from_config(config)))
    }

    pub fn with_engine(engine: Arc<ProxyEngine>) -> Self {
        let router = build_router(engine.clone());
        Self { router, engine }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.engine.routes().len(),
            header_policy = ?self.engine.header_policy(),
            "HTTP server starting"
        );
        if self.engine.routes().is_empty() {
            tracing::warn!("Route table is empty, every request falls through");
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

}

/// Build the Axum router with all middleware layers.
///
/// The proxy engine runs before routing to local handlers; requests it
/// declines fall through to `/healthz` or the 404 fallback.
pub fn build_router(engine: Arc<ProxyEngine>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(engine, proxy_middleware))
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
