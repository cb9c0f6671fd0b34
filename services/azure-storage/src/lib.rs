//! Azure Storage service signer.
//!
//! This crate provides signing for Azure Storage services:
//! - Shared Key authorization
//! - SAS (Shared Access Signature) generation, account level and service
//!   level
//! - Bearer token authorization, including managed identity resolution

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::RequestSigner;

mod provide_credential;
pub use provide_credential::{
    ConfigCredentialProvider, DefaultCredentialProvider, ImdsCredentialProvider,
};

pub mod sas;

mod constants;
