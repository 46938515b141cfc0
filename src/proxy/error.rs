//! Proxy failures and their 502 envelope.

use std::error::Error as _;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Failures raised while building or forwarding a proxied request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The concatenated target is not an absolute URL.
    #[error("Invalid URL '{target}': {reason}")]
    MalformedTarget { target: String, reason: String },

    /// Connect, TLS, or stream failure talking to the upstream.
    #[error("Upstream request failed: {0}")]
    UpstreamTransport(#[from] hyper_util::client::legacy::Error),
}

impl ProxyError {
    pub(crate) fn malformed(target: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedTarget {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    /// Metric label for this failure.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedTarget { .. } => "malformed_target",
            Self::UpstreamTransport(_) => "upstream_transport",
        }
    }

    /// Display text followed by every underlying cause.
    ///
    /// hyper's client errors are terse ("client error (Connect)"); the cause
    /// chain carries the useful part ("Connection refused").
    pub fn message(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        // The transport variant displays its direct source already.
        if matches!(self, Self::UpstreamTransport(_)) {
            source = source.and_then(|s| s.source());
        }
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": "Proxy Error",
            "message": self.message(),
        });

        let mut response = (StatusCode::BAD_GATEWAY, Json(body)).into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        response
    }
}
