//! Core components for signing object storage requests.
//!
//! This crate holds the provider-independent half of the workspace: the
//! [`Context`] that abstracts file, HTTP and environment access, the traits
//! that service crates implement ([`ProvideCredential`] and [`SignRequest`]),
//! and the [`Signer`] that ties a credential store to a request signer and
//! acts as the pre-send hook of an HTTP client.
//!
//! ## Overview
//!
//! - [`SigningRequest`] is the canonicalizable view of an outgoing request.
//!   Signers decompose a request into it, mutate headers and query, and apply
//!   it back.
//! - [`ProvideCredential`] resolves a credential from some source: static
//!   values, environment, config files or a metadata service.
//! - [`ProvideCredentialChain`] tries a list of providers in order and stops
//!   at the first that yields a credential.
//! - [`Signer`] caches the resolved credential and refreshes it when it
//!   reports itself no longer valid, holding an exclusive lock for the
//!   duration of the refresh so concurrent requests never duplicate it.
//!
//! Service crates supply the actual signing algorithms and provider chains.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, FileRead, HttpSend, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};

mod chain;
pub use chain::ProvideCredentialChain;

mod request;
pub use request::{SigningMethod, SigningRequest};

mod signer;
pub use signer::Signer;
