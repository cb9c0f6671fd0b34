use crate::{Context, Result};
use bytes::Bytes;
use std::fmt::Debug;
use std::time::Duration;

/// SigningCredential is implemented by credential snapshots.
///
/// A credential knows whether it is still usable for signing: one without an
/// expiration is valid forever, one with an expiration reports itself invalid
/// once it enters its refresh window.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is still usable for signing.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// ProvideCredential resolves a credential from some source.
///
/// Services require different credentials: AWS wants an access key and a
/// secret key, Azure Storage wants an account key, a SAS token or a bearer
/// token. A provider returns `Ok(None)` when its source is simply not
/// present (so the next provider in a chain can be consulted) and `Err` when
/// the source exists but resolving it failed.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: SigningCredential;

    /// Resolve a credential from the current environment.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// SignRequest mutates an outgoing request so the service accepts it.
///
/// Implementations consume a credential snapshot and rewrite the request's
/// headers, target or body in place. They must be pure apart from that
/// mutation: no network access, so a signer can run on the hot path of every
/// request.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: SigningCredential;

    /// Sign the request in place.
    ///
    /// ## Body
    ///
    /// The fully materialized request body. Signers that hash or rewrite the
    /// payload (SigV4 content hashing, SigV2 form signing) read and replace
    /// it; header-only signers ignore it.
    ///
    /// ## Expires In
    ///
    /// `Some(duration)` requests a presigned/delegation form valid for the
    /// given duration instead of an `Authorization` header. Signers without
    /// such a form must return an error.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut http::request::Parts,
        body: &mut Bytes,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()>;
}
