//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.
//! Every section has defaults, so an empty file (or no file) yields the
//! stock provider table.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Ordered prefix routes. Declaration order is match order.
    pub routes: Vec<RouteConfig>,

    /// Header forwarding policy.
    pub headers: HeaderConfig,

    /// CORS headers applied to every response.
    pub cors: CorsConfig,

    /// Edge cache hints for GET responses.
    pub cache: CacheConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: default_routes(),
            headers: HeaderConfig::default(),
            cors: CorsConfig::default(),
            cache: CacheConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// A single prefix route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Literal path prefix, e.g. "/openai". Must start with '/', must not end
    /// with one, and so can never be the bare root "/".
    pub prefix: String,

    /// Absolute upstream base address.
    pub target: String,

    /// Provider-specific path rewrite applied after concatenation.
    #[serde(default)]
    pub rewrite: RewriteRule,
}

impl RouteConfig {
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            target: target.into(),
            rewrite: RewriteRule::None,
        }
    }

    pub fn with_rewrite(mut self, rewrite: RewriteRule) -> Self {
        self.rewrite = rewrite;
        self
    }
}

/// Path rewrites a route may opt into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteRule {
    #[default]
    None,
    /// Vertex AI: `/publishers/v1beta` or `/publishers/v1` becomes
    /// `/publishers/google` when the remainder starts with a version segment.
    VertexPublisher,
}

/// Which inbound/upstream headers cross the proxy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderPolicy {
    /// Only allow-listed headers are forwarded; Host is set to the target.
    #[default]
    Strict,
    /// Everything except Host and hop-by-hop headers is forwarded.
    Permissive,
}

/// Header forwarding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub policy: HeaderPolicy,

    /// Inbound headers forwarded upstream under the strict policy.
    pub request_allow: Vec<String>,

    /// Upstream headers returned to the client under the strict policy.
    pub response_allow: Vec<String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            policy: HeaderPolicy::Strict,
            request_allow: [
                "authorization",
                "content-type",
                "accept",
                "x-api-key",
                "anthropic-version",
                "x-goog-api-key",
            ]
            .map(String::from)
            .to_vec(),
            response_allow: [
                "content-type",
                "x-request-id",
                "x-ratelimit-limit",
                "x-ratelimit-remaining",
                "x-ratelimit-reset",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Value of `Access-Control-Allow-Methods`.
    pub allow_methods: String,

    /// Preflight cache lifetime (`Access-Control-Max-Age`).
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_methods: "GET, POST, PUT, DELETE, PATCH, OPTIONS".to_string(),
            max_age_secs: 86_400,
        }
    }
}

/// Edge cache hints attached to GET responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,

    /// Freshness window in seconds.
    pub max_age_secs: u64,

    /// Stale-while-revalidate window in seconds.
    pub stale_while_revalidate_secs: u64,

    /// Header carrying the cache directive.
    pub control_header: String,

    /// Header carrying the per-route cache key.
    pub id_header: String,

    /// Namespace prepended to the matched prefix, e.g. "api" -> "api/openai".
    pub id_namespace: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_age_secs: 60,
            stale_while_revalidate_secs: 30,
            control_header: "cdn-cache-control".to_string(),
            id_header: "cache-tag".to_string(),
            id_namespace: "api".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// The stock provider table. Order matters: first match wins.
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("/openai", "https://api.openai.com"),
        RouteConfig::new("/claude", "https://api.anthropic.com"),
        RouteConfig::new("/gemini", "https://generativelanguage.googleapis.com"),
        RouteConfig::new("/groq", "https://api.groq.com/openai"),
        RouteConfig::new("/xai", "https://api.x.ai"),
        RouteConfig::new("/cohere", "https://api.cohere.ai"),
        RouteConfig::new("/huggingface", "https://api-inference.huggingface.co"),
        RouteConfig::new("/together", "https://api.together.xyz"),
        RouteConfig::new("/novita", "https://api.novita.ai"),
        RouteConfig::new("/portkey", "https://api.portkey.ai"),
        RouteConfig::new("/fireworks", "https://api.fireworks.ai"),
        RouteConfig::new("/openrouter", "https://openrouter.ai/api"),
        RouteConfig::new("/discord", "https://discord.com/api"),
        RouteConfig::new("/telegram", "https://api.telegram.org"),
        // Self-hosted services
        RouteConfig::new("/422wolf", "https://422wolf.198990.xyz"),
        RouteConfig::new("/qwen", "https://qwen.198990.xyz"),
        RouteConfig::new("/newapi", "https://newapi.190904.xyz"),
        RouteConfig::new("/gbalance", "http://jp2.190904.xyz:8010"),
        RouteConfig::new("/gbalance2", "http://usa2.190904.xyz:8000"),
        RouteConfig::new("/gbalance3", "http://usa4.190904.xyz:8010"),
        RouteConfig::new("/gcli", "http://usa4.190904.xyz:7856"),
        RouteConfig::new("/cliproxy", "http://usa4.190904.xyz:8317"),
        RouteConfig::new(
            "/vertex",
            "https://aiplatform.googleapis.com/v1/projects/1094537026349/locations/global/publishers",
        )
        .with_rewrite(RewriteRule::VertexPublisher),
    ]
}
