//! Azure Storage signing with convenience constructors.

pub use cloudsig_azure_storage::*;

#[cfg(all(feature = "default-context", not(target_arch = "wasm32")))]
use crate::default_context;
#[cfg(all(feature = "default-context", not(target_arch = "wasm32")))]
use cloudsig_core::Signer;
#[cfg(all(feature = "default-context", not(target_arch = "wasm32")))]
use std::sync::Arc;

/// Create an Azure Storage signer with the standard wiring: default
/// context and the default credential chain seeded from the environment.
#[cfg(all(feature = "default-context", not(target_arch = "wasm32")))]
pub fn default_signer() -> Signer<Credential> {
    let ctx = default_context();
    let config = Arc::new(Config::default().from_env(&ctx));
    let provider = DefaultCredentialProvider::new(config);
    Signer::new(ctx, provider, RequestSigner::new())
}
