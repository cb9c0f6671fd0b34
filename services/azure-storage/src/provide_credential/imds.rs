use crate::{Config, Credential};
use async_trait::async_trait;
use bytes::Bytes;
use cloudsig_core::time::{now, parse_rfc3339, DateTime};
use cloudsig_core::{Context, Error, ProvideCredential, Result};
use serde::Deserialize;
use std::sync::Arc;

const MSI_API_VERSION: &str = "2018-02-01";
const MSI_ENDPOINT: &str = "http://169.254.169.254/metadata/identity/oauth2/token";
const STORAGE_RESOURCE: &str = "https://storage.azure.com/";

/// ImdsCredentialProvider resolves a bearer token from the managed identity
/// metadata endpoint available on Azure VMs and similar compute.
///
/// The returned token carries the expiration reported by the endpoint, so
/// the store refreshes it by calling this provider again.
///
/// Reference: <https://learn.microsoft.com/en-us/azure/app-service/overview-managed-identity?tabs=portal,http#using-the-rest-protocol>
#[derive(Debug, Clone)]
pub struct ImdsCredentialProvider {
    config: Arc<Config>,
}

impl Default for ImdsCredentialProvider {
    fn default() -> Self {
        Self::new(Arc::new(Config::default()))
    }
}

impl ImdsCredentialProvider {
    /// Create a new ImdsCredentialProvider.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ImdsCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let endpoint = self.config.msi_endpoint.as_deref().unwrap_or(MSI_ENDPOINT);

        let mut url =
            format!("{endpoint}?api-version={MSI_API_VERSION}&resource={STORAGE_RESOURCE}");
        // Only one id parameter may be set when requesting a token.
        if let Some(object_id) = &self.config.object_id {
            url.push_str(&format!("&object_id={object_id}"));
        } else if let Some(client_id) = &self.config.client_id {
            url.push_str(&format!("&client_id={client_id}"));
        } else if let Some(msi_res_id) = &self.config.msi_res_id {
            url.push_str(&format!("&msi_res_id={msi_res_id}"));
        }

        let mut req = http::Request::builder()
            .method(http::Method::GET)
            .uri(&url)
            .header("metadata", "true");
        if let Some(secret) = &self.config.msi_secret {
            req = req.header("x-identity-header", secret);
        }
        let req = req.body(Bytes::new()).map_err(|e| {
            Error::request_invalid("failed to build managed identity request").with_source(e)
        })?;

        let resp = ctx.http_send_as_string(req).await.map_err(|e| {
            Error::credential_refresh("failed to reach managed identity endpoint")
                .with_source(e)
                .with_context(format!("endpoint: {endpoint}"))
                .set_retryable(true)
        })?;

        if resp.status() != http::StatusCode::OK {
            return Err(Error::credential_refresh(format!(
                "managed identity endpoint returned {}: {}",
                resp.status(),
                resp.body()
            )));
        }

        let token: AccessTokenResponse = serde_json::from_str(resp.body()).map_err(|e| {
            Error::unexpected("failed to parse managed identity response").with_source(e)
        })?;

        let expires_in = parse_expires_on(&token.expires_on)?;

        Ok(Some(Credential::with_bearer_token(
            &token.access_token,
            Some(expires_in),
        )))
    }
}

// NOTE: expires_on is usually a string of unix epoch seconds, but some
// hosting environments hand back RFC 3339.
// https://docs.microsoft.com/en-us/azure/app-service/overview-managed-identity?tabs=dotnet#rest-protocol-examples
fn parse_expires_on(expires_on: &str) -> Result<DateTime> {
    if expires_on.is_empty() {
        // No expiration reported; re-read after ten minutes.
        return Ok(now() + chrono::TimeDelta::try_minutes(10).expect("in bounds"));
    }

    if let Ok(epoch) = expires_on.parse::<i64>() {
        return chrono::DateTime::from_timestamp(epoch, 0)
            .ok_or_else(|| Error::unexpected(format!("invalid epoch timestamp: {expires_on}")));
    }

    parse_rfc3339(expires_on)
}

#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: String,
    #[serde(default)]
    expires_on: String,
}
