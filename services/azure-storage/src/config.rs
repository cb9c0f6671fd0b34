use crate::constants::*;
use cloudsig_core::utils::Redact;
use cloudsig_core::Context;
use std::fmt::{Debug, Formatter};

/// Config carries all the configuration for Azure Storage services.
///
/// The providers share one snapshot (`Arc<Config>`), so several signers can
/// coexist with independent configuration.
#[derive(Clone, Default)]
pub struct Config {
    /// Storage account name.
    pub account_name: Option<String>,
    /// Storage account key, base64 encoded. Terminal source together with
    /// `account_name`.
    pub account_key: Option<String>,
    /// Pre-issued SAS token, appended to request targets verbatim.
    pub sas_token: Option<String>,
    /// Pre-issued bearer token. Terminal source; never refreshed.
    pub bearer_token: Option<String>,
    /// Object id of a user assigned managed identity.
    ///
    /// Only one of `object_id`, `client_id` and `msi_res_id` is forwarded to
    /// the metadata endpoint, in that order.
    pub object_id: Option<String>,
    /// Client id of a user assigned managed identity.
    pub client_id: Option<String>,
    /// ARM resource id of a user assigned managed identity.
    pub msi_res_id: Option<String>,
    /// Header value mitigating SSRF against the metadata endpoint, required
    /// by some hosting environments.
    pub msi_secret: Option<String>,
    /// Endpoint of the managed identity metadata service, defaults to
    /// `http://169.254.169.254/metadata/identity/oauth2/token`.
    pub msi_endpoint: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("account_name", &self.account_name)
            .field("account_key", &Redact::from(&self.account_key))
            .field("sas_token", &Redact::from(&self.sas_token))
            .field("bearer_token", &Redact::from(&self.bearer_token))
            .field("msi_endpoint", &self.msi_endpoint)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Fill unset fields from environment variables.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.account_name.is_none() {
            self.account_name = ctx
                .env_var(AZURE_STORAGE_ACCOUNT_NAME)
                .or_else(|| ctx.env_var(AZBLOB_ACCOUNT_NAME));
        }
        if self.account_key.is_none() {
            self.account_key = ctx
                .env_var(AZURE_STORAGE_ACCOUNT_KEY)
                .or_else(|| ctx.env_var(AZBLOB_ACCOUNT_KEY));
        }
        if self.sas_token.is_none() {
            self.sas_token = ctx.env_var(AZURE_STORAGE_SAS_TOKEN);
        }
        if self.client_id.is_none() {
            self.client_id = ctx.env_var(AZURE_CLIENT_ID);
        }
        if self.object_id.is_none() {
            self.object_id = ctx.env_var(AZURE_OBJECT_ID);
        }
        if self.msi_res_id.is_none() {
            self.msi_res_id = ctx.env_var(AZURE_MSI_RES_ID);
        }
        if self.msi_secret.is_none() {
            self.msi_secret = ctx.env_var(AZURE_MSI_SECRET);
        }
        if self.msi_endpoint.is_none() {
            self.msi_endpoint = ctx.env_var(AZURE_MSI_ENDPOINT);
        }

        self
    }
}
