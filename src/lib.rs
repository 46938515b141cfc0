//! Edge API proxy library.
//!
//! Forwards API calls to upstream providers chosen by literal path prefix,
//! streaming bodies in both directions.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;
pub mod security;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::{Dispatch, ProxyEngine};
