use crate::provide_credential::{ConfigCredentialProvider, ImdsCredentialProvider};
use crate::{Config, Credential};
use async_trait::async_trait;
use cloudsig_core::{Context, ProvideCredential, ProvideCredentialChain, Result};
use std::sync::Arc;

/// DefaultCredentialProvider tries the Azure credential sources in order.
///
/// Resolution order:
///
/// 1. Explicit configuration (SAS token, account key, bearer token)
/// 2. Managed identity metadata endpoint (Azure VM)
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new(Arc::new(Config::default()))
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider from a config snapshot.
    pub fn new(config: Arc<Config>) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(ConfigCredentialProvider::new(config.clone()))
            .push(ImdsCredentialProvider::new(config));

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use cloudsig_core::StaticEnv;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_env_backed_config_resolves_shared_key() {
        let ctx = Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([
                (
                    AZBLOB_ACCOUNT_NAME.to_string(),
                    "test_account".to_string(),
                ),
                (AZBLOB_ACCOUNT_KEY.to_string(), "dGVzdF9rZXk=".to_string()),
            ]),
        });

        let config = Arc::new(Config::default().from_env(&ctx));
        let provider = DefaultCredentialProvider::new(config);

        let cred = provider.provide_credential(&ctx).await.unwrap().unwrap();
        match cred {
            Credential::SharedKey {
                account_name,
                account_key,
            } => {
                assert_eq!(account_name, "test_account");
                assert_eq!(account_key, "dGVzdF9rZXk=");
            }
            _ => panic!("expected SharedKey credential"),
        }
    }

    #[tokio::test]
    async fn test_env_backed_config_resolves_sas_token() {
        let ctx = Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([(
                AZURE_STORAGE_SAS_TOKEN.to_string(),
                "sv=2021-01-01&ss=b&srt=c&sp=rwdlaciytfx".to_string(),
            )]),
        });

        let config = Arc::new(Config::default().from_env(&ctx));
        let provider = DefaultCredentialProvider::new(config);

        let cred = provider.provide_credential(&ctx).await.unwrap().unwrap();
        match cred {
            Credential::SasToken { token } => {
                assert_eq!(token, "sv=2021-01-01&ss=b&srt=c&sp=rwdlaciytfx");
            }
            _ => panic!("expected SasToken credential"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_metadata_yields_none() {
        // No config and no reachable metadata endpoint: resolution exhausts
        // the chain without producing a credential.
        let ctx = Context::new().with_env(StaticEnv::default());

        let provider = DefaultCredentialProvider::default();
        let cred = provider.provide_credential(&ctx).await.unwrap();
        assert!(cred.is_none());
    }
}
