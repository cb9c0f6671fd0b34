//! Signing object storage requests without effort.
//!
//! `cloudsig` authenticates outbound HTTP requests to AWS-compatible and
//! Azure-compatible object storage services. It computes the
//! provider-specific signatures (AWS SigV4 and SigV2, Azure Shared Key and
//! SAS) and resolves and refreshes the credentials those signatures are
//! computed from, without caller intervention.
//!
//! # Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use cloudsig::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Credentials resolve from the environment, shared profiles,
//!     // role assumption or instance metadata, whichever answers first.
//!     let signer = cloudsig::aws::default_signer("s3", "us-east-1");
//!
//!     let req = http::Request::builder()
//!         .method("PUT")
//!         .uri("https://s3.amazonaws.com/my-bucket/my-object")
//!         .body(Bytes::from_static(b"hello"))
//!         .expect("request must be valid");
//!
//!     // Sign right before handing the request to the transport.
//!     let (mut parts, mut body) = req.into_parts();
//!     signer.sign(&mut parts, &mut body, None).await?;
//!     # Ok(())
//! }
//! ```

pub use cloudsig_core::*;

#[cfg(all(feature = "default-context", not(target_arch = "wasm32")))]
mod context;
#[cfg(all(feature = "default-context", not(target_arch = "wasm32")))]
pub use context::default_context;

#[cfg(feature = "aws")]
pub mod aws;

#[cfg(feature = "azure")]
pub mod azure;

#[cfg(all(feature = "aws", feature = "azure"))]
mod provider;
#[cfg(all(feature = "aws", feature = "azure"))]
pub use provider::ProviderSigner;
