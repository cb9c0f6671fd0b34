use bytes::Bytes;
use cloudsig_core::{Result, Signer};
use std::time::Duration;

/// The closed set of signing schemes, selected by an explicit provider tag.
///
/// A transport's pre-send hook holds one of these per destination and calls
/// [`sign`][ProviderSigner::sign] exactly once per outgoing attempt; every
/// retry re-signs with a fresh timestamp and a fresh credential snapshot.
pub enum ProviderSigner {
    /// AWS Signature Version 4.
    Aws(Signer<cloudsig_aws::Credential>),
    /// AWS Signature Version 2 (legacy parameter signing).
    AwsV2(Signer<cloudsig_aws::Credential>),
    /// Azure Storage (Shared Key, SAS or bearer token).
    Azure(Signer<cloudsig_azure_storage::Credential>),
}

impl ProviderSigner {
    /// Sign the request in place with the scheme this tag selects.
    pub async fn sign(
        &self,
        req: &mut http::request::Parts,
        body: &mut Bytes,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        match self {
            ProviderSigner::Aws(signer) => signer.sign(req, body, expires_in).await,
            ProviderSigner::AwsV2(signer) => signer.sign(req, body, expires_in).await,
            ProviderSigner::Azure(signer) => signer.sign(req, body, expires_in).await,
        }
    }
}
