//! Proxy engine.
//!
//! # Data Flow
//! ```text
//! Request<Body>
//!     → OPTIONS? → 204 preflight (http::cors)
//!     → RouteTable::match_path → no match? → Dispatch::Unhandled(request)
//!     → target.rs (target URL + provider rewrite)
//!     → security::headers (request allow-list, Host)
//!     → forwarder.rs (streamed outbound call)
//!     → http::response (allow-listed headers, CORS, cache hints)
//!
//! Any ProxyError from target/forwarder → 502 JSON envelope (error.rs)
//! ```
//!
//! # Design Decisions
//! - Stateless per request; the only shared state is read-only
//! - "No route" is not an error: the request is handed back untouched
//! - The error envelope is the single place failures become responses

pub mod error;
pub mod forwarder;
pub mod target;

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use hyper::body::Incoming;

use crate::config::{HeaderPolicy, ProxyConfig};
use crate::http::cors::Cors;
use crate::http::request::RequestIdExt;
use crate::http::response::{CachePolicy, ResponseAssembler};
use crate::observability::metrics;
use crate::routing::{RouteMatch, RouteTable};
use crate::security::headers::HeaderFilter;

pub use error::ProxyError;
pub use forwarder::Forwarder;
pub use target::build_target_url;

/// Outcome of offering a request to the engine.
#[derive(Debug)]
pub enum Dispatch {
    /// The engine produced the response.
    Handled(Response),
    /// No route matched; the request is returned for another handler.
    Unhandled(Request),
}

/// Routes, filters, and forwards proxied requests.
#[derive(Debug, Clone)]
pub struct ProxyEngine {
    routes: Arc<RouteTable>,
    headers: HeaderFilter,
    cors: Cors,
    assembler: ResponseAssembler,
    forwarder: Forwarder,
}

impl ProxyEngine {
    pub fn new(
        routes: Arc<RouteTable>,
        headers: HeaderFilter,
        cors: Cors,
        cache: Option<CachePolicy>,
        forwarder: Forwarder,
    ) -> Self {
        let assembler = ResponseAssembler::new(headers.clone(), cors.clone(), cache);
        Self {
            routes,
            headers,
            cors,
            assembler,
            forwarder,
        }
    }

    /// Compile every engine component from configuration.
    pub fn from_config(config: &ProxyConfig) -> Self {
        let routes = Arc::new(RouteTable::from_config(&config.routes));
        for shadowed in routes.shadowed() {
            tracing::warn!(
                prefix = %shadowed.prefix,
                shadowed_by = %shadowed.shadowed_by,
                "Route can never match: an earlier prefix always wins"
            );
        }

        Self::new(
            routes,
            HeaderFilter::from_config(&config.headers),
            Cors::from_config(&config.cors),
            CachePolicy::from_config(&config.cache),
            Forwarder::new(),
        )
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn header_policy(&self) -> HeaderPolicy {
        self.headers.policy()
    }

    /// Handle `request` if it is a preflight or matches a route.
    pub async fn dispatch(&self, request: Request) -> Dispatch {
        if *request.method() == Method::OPTIONS {
            metrics::record_preflight();
            return Dispatch::Handled(self.cors.preflight());
        }

        let Some(matched) = self.routes.match_path(request.uri().path()) else {
            return Dispatch::Unhandled(request);
        };

        let start = Instant::now();
        let prefix = matched.prefix();
        let method = request.method().clone();
        let request_id = request.request_id().to_string();
        let path = request.uri().path().to_string();

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            route = prefix,
            "Proxying request"
        );

        let response = match self.forward(matched, request).await {
            Ok(upstream) => self.assembler.assemble(upstream, &method, prefix),
            Err(err) => {
                tracing::error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    route = prefix,
                    error = %err.message(),
                    "API proxy error"
                );
                metrics::record_upstream_error(prefix, err.kind());
                err.into_response()
            }
        };

        metrics::record_request(prefix, response.status().as_u16(), start);
        Dispatch::Handled(response)
    }

    async fn forward(
        &self,
        matched: RouteMatch<'_>,
        request: Request,
    ) -> Result<axum::http::Response<Incoming>, ProxyError> {
        let (parts, body) = request.into_parts();
        let target = build_target_url(matched, parts.uri.path(), parts.uri.query())?;
        let headers = self.headers.request_headers(&parts.headers, &target);

        tracing::trace!(url = %target, "Forwarding upstream");
        self.forwarder
            .forward(parts.method, &target, headers, body)
            .await
    }
}

/// Axum middleware: answer with the engine, or fall through to the router.
pub async fn proxy_middleware(
    State(engine): State<Arc<ProxyEngine>>,
    request: Request,
    next: Next,
) -> Response {
    match engine.dispatch(request).await {
        Dispatch::Handled(response) => response,
        Dispatch::Unhandled(request) => next.run(request).await,
    }
}
