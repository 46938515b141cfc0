//! CORS headers and preflight short-circuit.
//!
//! Every response leaving the proxy is open to any origin: the proxy fronts
//! public APIs that authenticate by key, not by origin.

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;

use crate::config::CorsConfig;

const ANY: HeaderValue = HeaderValue::from_static("*");

/// Compiled CORS header values.
#[derive(Debug, Clone)]
pub struct Cors {
    allow_methods: HeaderValue,
    max_age: HeaderValue,
}

impl Cors {
    pub fn from_config(config: &CorsConfig) -> Self {
        let allow_methods = HeaderValue::from_str(&config.allow_methods).unwrap_or_else(|_| {
            tracing::warn!(
                allow_methods = %config.allow_methods,
                "Invalid CORS method list, using default"
            );
            HeaderValue::from_static("GET, POST, PUT, DELETE, PATCH, OPTIONS")
        });

        Self {
            allow_methods,
            max_age: HeaderValue::from(config.max_age_secs),
        }
    }

    /// Set the permissive CORS header set on a response.
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, ANY);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            self.allow_methods.clone(),
        );
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, ANY);
    }

    /// `204 No Content` answer to a preflight, cacheable by the browser.
    pub fn preflight(&self) -> Response {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        let headers = response.headers_mut();
        self.apply(headers);
        headers.insert(header::ACCESS_CONTROL_MAX_AGE, self.max_age.clone());
        response
    }
}

impl Default for Cors {
    fn default() -> Self {
        Self::from_config(&CorsConfig::default())
    }
}
