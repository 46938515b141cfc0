//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → compiled into RouteTable / HeaderFilter / ResponsePolicy at startup
//! ```
//!
//! # Design Decisions
//! - Config is loaded once; there is no hot reload
//! - All fields have defaults; no file means the stock provider table
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CacheConfig, CorsConfig, HeaderConfig, HeaderPolicy, ListenerConfig, ObservabilityConfig,
    ProxyConfig, RewriteRule, RouteConfig,
};
