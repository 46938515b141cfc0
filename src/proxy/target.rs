//! Target URL construction.
//!
//! `base (one trailing slash stripped) + remainder`, an optional
//! provider-specific rewrite, then the inbound query string verbatim.

use url::Url;

use crate::config::RewriteRule;
use crate::proxy::error::ProxyError;
use crate::routing::RouteMatch;

const VERTEX_PUBLISHER: &str = "/publishers/google";

/// Build the absolute upstream URL for a matched request.
pub fn build_target_url(
    matched: RouteMatch<'_>,
    path: &str,
    query: Option<&str>,
) -> Result<Url, ProxyError> {
    let remainder = &path[matched.prefix().len()..];
    let base = matched.target();
    let base = base.strip_suffix('/').unwrap_or(base);

    let mut target = format!("{base}{remainder}");
    if matched.route.rewrite() == RewriteRule::VertexPublisher {
        target = rewrite_vertex_publisher(remainder, target);
    }

    let mut url = Url::parse(&target).map_err(|e| ProxyError::malformed(&target, e))?;
    url.set_query(query.filter(|q| !q.is_empty()));
    Ok(url)
}

/// Vertex AI expects `/publishers/google/...`; clients written against the
/// Gemini API send `/v1beta/...` or `/v1/...`, which lands the version
/// segment in the publisher slot.
fn rewrite_vertex_publisher(remainder: &str, target: String) -> String {
    if !(remainder.starts_with("/v1beta") || remainder.starts_with("/v1")) {
        return target;
    }
    target
        .replacen("/publishers/v1beta", VERTEX_PUBLISHER, 1)
        .replacen("/publishers/v1", VERTEX_PUBLISHER, 1)
}
