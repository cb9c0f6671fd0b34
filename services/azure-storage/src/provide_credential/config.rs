use crate::{Config, Credential};
use async_trait::async_trait;
use cloudsig_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

/// ConfigCredentialProvider yields the credentials set directly on
/// [`Config`].
///
/// All three shapes are terminal sources: a SAS token wins over an account
/// key, which wins over a bearer token. None of them carries an expiration,
/// so the store never refreshes them.
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
        if let Some(token) = &self.config.sas_token {
            return Ok(Some(Credential::with_sas_token(token)));
        }

        if let (Some(account_name), Some(account_key)) =
            (&self.config.account_name, &self.config.account_key)
        {
            return Ok(Some(Credential::with_shared_key(account_name, account_key)));
        }

        if let Some(token) = &self.config.bearer_token {
            return Ok(Some(Credential::with_bearer_token(token, None)));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sas_token_wins() {
        let provider = ConfigCredentialProvider::new(Arc::new(Config {
            account_name: Some("account".to_string()),
            account_key: Some("a2V5".to_string()),
            sas_token: Some("sv=2021-01-01&sig=abc".to_string()),
            ..Default::default()
        }));

        let cred = provider
            .provide_credential(&Context::new())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(cred, Credential::SasToken { .. }));
    }

    #[tokio::test]
    async fn test_shared_key_from_config() {
        let provider = ConfigCredentialProvider::new(Arc::new(Config {
            account_name: Some("account".to_string()),
            account_key: Some("a2V5".to_string()),
            ..Default::default()
        }));

        let cred = provider
            .provide_credential(&Context::new())
            .await
            .unwrap()
            .unwrap();
        match cred {
            Credential::SharedKey {
                account_name,
                account_key,
            } => {
                assert_eq!(account_name, "account");
                assert_eq!(account_key, "a2V5");
            }
            _ => panic!("expected SharedKey credential"),
        }
    }

    #[tokio::test]
    async fn test_empty_config_yields_none() {
        let provider = ConfigCredentialProvider::new(Arc::new(Config::default()));
        assert!(provider
            .provide_credential(&Context::new())
            .await
            .unwrap()
            .is_none());
    }
}
