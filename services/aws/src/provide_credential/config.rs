use crate::{Config, Credential};
use async_trait::async_trait;
use cloudsig_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

/// ConfigCredentialProvider yields the keys set directly on [`Config`].
///
/// This is the terminal source for callers that construct their credential
/// explicitly.
#[derive(Debug, Clone)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new ConfigCredentialProvider.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        match (&self.config.access_key_id, &self.config.secret_access_key) {
            (Some(ak), Some(sk)) => Ok(Some(Credential {
                access_key_id: ak.clone(),
                secret_access_key: sk.clone(),
                session_token: self.config.session_token.clone(),
                ..Default::default()
            })),
            _ => Ok(None),
        }
    }
}
