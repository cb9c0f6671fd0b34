use crate::provide_credential::{
    AssumeRoleCredentialProvider, ConfigCredentialProvider, EcsCredentialProvider,
    EnvCredentialProvider, Imdsv2CredentialProvider, ProfileCredentialProvider,
};
use crate::{Config, Credential};
use async_trait::async_trait;
use cloudsig_core::{Context, ProvideCredential, ProvideCredentialChain, Result};
use std::sync::Arc;

/// DefaultCredentialProvider resolves credentials through the standard
/// source order. The first source that yields a usable key wins and later
/// sources are not consulted.
///
/// Resolution order:
///
/// 1. Explicit keys on [`Config`]
/// 2. Environment variables
/// 3. Shared profile files (`~/.aws/credentials`, `~/.aws/config`)
/// 4. STS role assumption, when a role is configured
/// 5. ECS task metadata
/// 6. EC2 instance metadata (IMDSv2)
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
            .push(EnvCredentialProvider::new())
            .push(ProfileCredentialProvider::new(config.clone()))
            .push(AssumeRoleCredentialProvider::new(config.clone()))
            .push(EcsCredentialProvider::new(config.clone()))
            .push(Imdsv2CredentialProvider::new(config));

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
