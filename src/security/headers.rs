//! Header allow-listing in both directions.
//!
//! # Responsibilities
//! - Select inbound headers forwarded upstream
//! - Set Host to the upstream authority
//! - Select upstream headers returned to the client
//!
//! # Design Decisions
//! - Strict policy is the default; permissive is an explicit opt-in
//! - Names are lower-cased once at construction; `HeaderName` is lower-case
//!   by construction, so every lookup is case-insensitive
//! - Hop-by-hop headers never cross the proxy, whatever the policy

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::config::{HeaderConfig, HeaderPolicy};

/// Connection-scoped headers owned by each hop's transport.
const HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    HeaderName::from_static("proxy-connection"),
    header::TRANSFER_ENCODING,
    header::TE,
    header::TRAILER,
    header::UPGRADE,
];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(name)
}

/// Compiled header policy, shared read-only across requests.
#[derive(Debug, Clone)]
pub struct HeaderFilter {
    policy: HeaderPolicy,
    request_allow: Vec<HeaderName>,
    response_allow: Vec<HeaderName>,
}

impl HeaderFilter {
    /// Compile configured names. Invalid names are skipped with a warning;
    /// validation rejects them before this point in normal startup.
    pub fn from_config(config: &HeaderConfig) -> Self {
        Self {
            policy: config.policy,
            request_allow: compile_names(&config.request_allow),
            response_allow: compile_names(&config.response_allow),
        }
    }

    pub fn policy(&self) -> HeaderPolicy {
        self.policy
    }

    /// Headers to send upstream for a request bound to `target`.
    pub fn request_headers(&self, inbound: &HeaderMap, target: &Url) -> HeaderMap {
        match self.policy {
            HeaderPolicy::Strict => {
                let mut outbound = copy_allowed(inbound, &self.request_allow);
                if let Some(host) = authority(target).and_then(|h| HeaderValue::from_str(&h).ok()) {
                    outbound.insert(header::HOST, host);
                }
                outbound
            }
            // The client derives Host from the target URI when absent.
            HeaderPolicy::Permissive => copy_except(inbound, |name| {
                *name == header::HOST || is_hop_by_hop(name)
            }),
        }
    }

    /// Upstream headers to pass back to the client.
    pub fn response_headers(&self, upstream: &HeaderMap) -> HeaderMap {
        match self.policy {
            HeaderPolicy::Strict => copy_allowed(upstream, &self.response_allow),
            HeaderPolicy::Permissive => copy_except(upstream, is_hop_by_hop),
        }
    }
}

impl Default for HeaderFilter {
    fn default() -> Self {
        Self::from_config(&HeaderConfig::default())
    }
}

fn compile_names(names: &[String]) -> Vec<HeaderName> {
    names
        .iter()
        .filter_map(|name| match HeaderName::from_bytes(name.to_ascii_lowercase().as_bytes()) {
            Ok(name) => Some(name),
            Err(_) => {
                tracing::warn!(header = %name, "Ignoring invalid header name");
                None
            }
        })
        .collect()
}

fn copy_allowed(from: &HeaderMap, allow: &[HeaderName]) -> HeaderMap {
    let mut to = HeaderMap::new();
    for name in allow {
        for value in from.get_all(name) {
            to.append(name.clone(), value.clone());
        }
    }
    to
}

fn copy_except(from: &HeaderMap, skip: impl Fn(&HeaderName) -> bool) -> HeaderMap {
    let mut to = HeaderMap::with_capacity(from.len());
    for (name, value) in from {
        if !skip(name) {
            to.append(name.clone(), value.clone());
        }
    }
    to
}

/// `host[:port]` of a URL, port only when explicit and non-default.
fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
