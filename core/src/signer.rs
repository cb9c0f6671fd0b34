use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Signer is the pre-send hook that authenticates outgoing requests.
///
/// It owns the credential store for one service: the currently resolved
/// credential lives behind an exclusive lock, and every [`sign`][Signer::sign]
/// call obtains a snapshot before invoking the request signer. When the
/// snapshot has entered its refresh window the provider is re-run while the
/// lock is held, so exactly one refresh is in flight per store and every
/// waiting request observes either the old or the fully replaced credential.
///
/// A failed refresh propagates to the request that triggered it and leaves
/// the previous snapshot in place; a later request may retry.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = K>>,
    signer: Arc<dyn SignRequest<Credential = K>>,

    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        provider: impl ProvideCredential<Credential = K>,
        signer: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,
            provider: Arc::new(provider),
            signer: Arc::new(signer),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Replace the credential provider.
    pub fn with_credential_provider(
        mut self,
        provider: impl ProvideCredential<Credential = K>,
    ) -> Self {
        self.provider = Arc::new(provider);
        self.credential = Arc::new(Mutex::new(None));
        self
    }

    /// Return a snapshot of the current credential, refreshing it first if it
    /// is absent or inside its refresh window.
    ///
    /// This call may block on a network round trip (profile role exchange,
    /// metadata service). Callers on the signing path should expect that.
    pub async fn get_credential(&self) -> Result<Option<K>> {
        let mut slot = self.credential.lock().await;

        // Re-check under the lock: a refresh finished by another task while
        // we were waiting is reused instead of repeated.
        if slot.is_valid() {
            return Ok(slot.clone());
        }

        log::debug!("credential missing or expiring, resolving");
        let fresh = self.provider.provide_credential(&self.ctx).await?;
        if fresh.is_valid() {
            *slot = fresh.clone();
        }

        Ok(fresh)
    }

    /// Sign the request in place, resolving or refreshing the credential as
    /// needed.
    ///
    /// Each call pulls a fresh snapshot and a fresh timestamp, so a retried
    /// request is simply signed again.
    pub async fn sign(
        &self,
        req: &mut http::request::Parts,
        body: &mut Bytes,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        let credential = self.get_credential().await?;

        self.signer
            .sign_request(&self.ctx, req, body, credential.as_ref(), expires_in)
            .await
    }
}
