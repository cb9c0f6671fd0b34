//! reqwest-based HTTP sending for cloudsig.
//!
//! This crate provides [`ReqwestHttpSend`], an implementation of the
//! `HttpSend` trait from `cloudsig-core` on top of a [`reqwest::Client`].
//! Credential providers use it for metadata-service and token-exchange
//! calls; it is not a general purpose HTTP client.
//!
//! ## Local emulators
//!
//! Requests whose target host is a loopback address are sent through a
//! client that accepts invalid TLS certificates, so signing flows can be
//! exercised against local storage emulators with self-signed certificates.
//! The exception is keyed on the address itself and never applies to any
//! other host.

use async_trait::async_trait;
use bytes::Bytes;
use cloudsig_core::{Error, HttpSend, Result};
use reqwest::Client;
use std::net::IpAddr;
use std::sync::OnceLock;

/// reqwest-based implementation of the `HttpSend` trait.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a user constructed client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn is_loopback_host(host: &str) -> bool {
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }

    // IPv6 authorities carry brackets, e.g. `[::1]`.
    let host = host.trim_start_matches('[').trim_end_matches(']');
    host.parse::<IpAddr>().is_ok_and(|ip| ip.is_loopback())
}

fn loopback_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .expect("loopback client must be built")
    })
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let client = if req.uri().host().is_some_and(is_loopback_host) {
            loopback_client()
        } else {
            &self.client
        };

        let req = reqwest::Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;

        let resp = client
            .execute(req)
            .await
            .map_err(|e| Error::unexpected("failed to send http request").with_source(e))?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::unexpected("failed to read response body").with_source(e))?;

        let mut http_resp = http::Response::new(body);
        *http_resp.status_mut() = status;
        *http_resp.headers_mut() = headers;
        Ok(http_resp)
    }
}
