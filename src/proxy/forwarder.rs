//! Upstream forwarding.
//!
//! # Responsibilities
//! - Own the shared HTTP(S) client
//! - Send the outbound request with the inbound body stream moved in
//!
//! # Design Decisions
//! - No timeout and no retry: failures surface immediately to the caller
//! - Bodies are never buffered; upload size is unbounded
//! - Plain `http://` upstreams are allowed alongside HTTPS

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, Response, Uri};
use hyper::body::Incoming;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use url::Url;

use crate::proxy::error::ProxyError;

type HttpsClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Issues outbound requests to upstream providers.
#[derive(Clone, Debug)]
pub struct Forwarder {
    client: HttpsClient,
}

impl Forwarder {
    pub fn new() -> Self {
        // Already installed on second and later calls.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .build();

        let client = Client::builder(TokioExecutor::new()).build(connector);
        Self { client }
    }

    /// Send `body` to `target` with `method` and `headers`.
    pub async fn forward(
        &self,
        method: Method,
        target: &Url,
        headers: HeaderMap,
        body: Body,
    ) -> Result<Response<Incoming>, ProxyError> {
        let uri: Uri = target
            .as_str()
            .parse()
            .map_err(|e| ProxyError::malformed(target.as_str(), e))?;

        let mut request = Request::new(body);
        *request.method_mut() = method;
        *request.uri_mut() = uri;
        *request.headers_mut() = headers;

        Ok(self.client.request(request).await?)
    }
}
