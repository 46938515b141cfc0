//! Response assembly.
//!
//! # Responsibilities
//! - Rebuild the upstream response for the client
//! - Keep only allow-listed upstream headers, then add CORS
//! - Attach edge cache hints to GET responses, keyed by route prefix
//!
//! # Design Decisions
//! - Streaming responses avoid buffering entire body
//! - Status and reason phrase are copied verbatim
//! - Hop-by-hop headers stripped by the header filter

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method};
use axum::response::Response;
use hyper::body::Incoming;
use hyper::ext::ReasonPhrase;

use crate::config::CacheConfig;
use crate::http::cors::Cors;
use crate::security::headers::HeaderFilter;

/// Edge cache hints for cacheable (GET) responses.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    control_header: HeaderName,
    control_value: HeaderValue,
    id_header: HeaderName,
    id_namespace: String,
}

impl CachePolicy {
    /// `None` when caching is disabled or a configured header name is invalid.
    pub fn from_config(config: &CacheConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }

        let names = (
            HeaderName::from_bytes(config.control_header.to_ascii_lowercase().as_bytes()),
            HeaderName::from_bytes(config.id_header.to_ascii_lowercase().as_bytes()),
        );
        let (Ok(control_header), Ok(id_header)) = names else {
            tracing::warn!(
                control_header = %config.control_header,
                id_header = %config.id_header,
                "Invalid cache header name, cache hints disabled"
            );
            return None;
        };

        let directive = format!(
            "public, max-age={}, stale-while-revalidate={}",
            config.max_age_secs, config.stale_while_revalidate_secs
        );

        Some(Self {
            control_header,
            control_value: HeaderValue::from_str(&directive).ok()?,
            id_header,
            id_namespace: config.id_namespace.clone(),
        })
    }

    /// Set the cache directive and the per-route cache key.
    pub fn apply(&self, headers: &mut HeaderMap, prefix: &str) {
        headers.insert(self.control_header.clone(), self.control_value.clone());
        match HeaderValue::from_str(&format!("{}{}", self.id_namespace, prefix)) {
            Ok(id) => {
                headers.insert(self.id_header.clone(), id);
            }
            Err(_) => tracing::debug!(prefix, "Route prefix is not a valid cache id"),
        }
    }
}

/// Builds the client-facing response from an upstream response.
#[derive(Debug, Clone)]
pub struct ResponseAssembler {
    headers: HeaderFilter,
    cors: Cors,
    cache: Option<CachePolicy>,
}

impl ResponseAssembler {
    pub fn new(headers: HeaderFilter, cors: Cors, cache: Option<CachePolicy>) -> Self {
        Self {
            headers,
            cors,
            cache,
        }
    }

    /// Relay `upstream` for a request made with `method` on route `prefix`.
    pub fn assemble(&self, upstream: Response<Incoming>, method: &Method, prefix: &str) -> Response {
        let (parts, body) = upstream.into_parts();

        let mut response = Response::new(Body::new(body));
        *response.status_mut() = parts.status;
        if let Some(reason) = parts.extensions.get::<ReasonPhrase>() {
            response.extensions_mut().insert(reason.clone());
        }

        let headers = response.headers_mut();
        *headers = self.headers.response_headers(&parts.headers);
        self.decorate(headers, method, prefix);
        response
    }

    /// CORS always; cache hints for GET only.
    pub fn decorate(&self, headers: &mut HeaderMap, method: &Method, prefix: &str) {
        self.cors.apply(headers);
        if *method == Method::GET {
            if let Some(cache) = &self.cache {
                cache.apply(headers, prefix);
            }
        }
    }
}
