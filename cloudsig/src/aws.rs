//! AWS signing with convenience constructors.

pub use cloudsig_aws::*;

#[cfg(all(feature = "default-context", not(target_arch = "wasm32")))]
use crate::default_context;
#[cfg(all(feature = "default-context", not(target_arch = "wasm32")))]
use cloudsig_core::Signer;
#[cfg(all(feature = "default-context", not(target_arch = "wasm32")))]
use std::sync::Arc;

/// Create a SigV4 signer with the standard wiring: default context, the
/// default credential chain seeded from the environment, and a request
/// signer for the given service and region.
///
/// Pass empty strings to infer service and region from the request host.
#[cfg(all(feature = "default-context", not(target_arch = "wasm32")))]
pub fn default_signer(service: &str, region: &str) -> Signer<Credential> {
    let ctx = default_context();
    let config = Arc::new(Config::default().from_env(&ctx));
    let provider = DefaultCredentialProvider::new(config);
    Signer::new(ctx, provider, RequestSigner::new(service, region))
}

/// Create a SigV2 signer with the standard wiring, for legacy services that
/// still sign parameter strings.
#[cfg(all(feature = "default-context", not(target_arch = "wasm32")))]
pub fn default_signer_v2(api_version: &str) -> Signer<Credential> {
    let ctx = default_context();
    let config = Arc::new(Config::default().from_env(&ctx));
    let provider = DefaultCredentialProvider::new(config);
    Signer::new(ctx, provider, RequestSignerV2::new(api_version))
}
