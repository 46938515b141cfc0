//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route prefixes and targets
//! - Check configured header names and header values are legal
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Overlapping prefixes are legal; the route table reports them as shadowed

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue};
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("route table is empty")]
    NoRoutes,

    #[error("route prefix '/' is not allowed; give the route a named prefix such as '/api'")]
    RootPrefix,

    #[error("route prefix '{0}' must start with '/'")]
    PrefixNotRooted(String),

    #[error("route prefix '{0}' must not end with '/'")]
    PrefixTrailingSlash(String),

    #[error("route prefix '{0}' is declared more than once")]
    DuplicatePrefix(String),

    #[error("route '{prefix}' target '{target}' is not an absolute http(s) URL")]
    InvalidTarget { prefix: String, target: String },

    #[error("invalid header name '{0}'")]
    HeaderName(String),

    #[error("CORS method list '{0}' is not a valid header value")]
    CorsMethods(String),

    #[error("cache id namespace '{0}' is not a valid header value")]
    CacheNamespace(String),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    let mut seen = HashSet::new();
    for route in &config.routes {
        if route.prefix == "/" {
            errors.push(ValidationError::RootPrefix);
        } else if !route.prefix.starts_with('/') {
            errors.push(ValidationError::PrefixNotRooted(route.prefix.clone()));
        } else if route.prefix.ends_with('/') {
            errors.push(ValidationError::PrefixTrailingSlash(route.prefix.clone()));
        }

        if !seen.insert(route.prefix.as_str()) {
            errors.push(ValidationError::DuplicatePrefix(route.prefix.clone()));
        }

        let target_ok = Url::parse(&route.target)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .unwrap_or(false);
        if !target_ok {
            errors.push(ValidationError::InvalidTarget {
                prefix: route.prefix.clone(),
                target: route.target.clone(),
            });
        }
    }

    let header_names = config
        .headers
        .request_allow
        .iter()
        .chain(&config.headers.response_allow)
        .chain([&config.cache.control_header, &config.cache.id_header]);
    for name in header_names {
        if HeaderName::from_bytes(name.to_ascii_lowercase().as_bytes()).is_err() {
            errors.push(ValidationError::HeaderName(name.clone()));
        }
    }

    if HeaderValue::from_str(&config.cors.allow_methods).is_err() {
        errors.push(ValidationError::CorsMethods(config.cors.allow_methods.clone()));
    }
    if HeaderValue::from_str(&config.cache.id_namespace).is_err() {
        errors.push(ValidationError::CacheNamespace(
            config.cache.id_namespace.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
