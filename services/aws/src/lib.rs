//! AWS service signers.
//!
//! This crate implements AWS Signature Version 4 and the legacy Signature
//! Version 2 together with the credential resolution chain (static values,
//! environment, shared profiles, STS role assumption, ECS task metadata and
//! EC2 instance metadata).

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_v4;
pub use sign_v4::RequestSigner;

mod sign_v2;
pub use sign_v2::RequestSignerV2;

mod provide_credential;
pub use provide_credential::{
    AssumeRoleCredentialProvider, ConfigCredentialProvider, DefaultCredentialProvider,
    EcsCredentialProvider, EnvCredentialProvider, Imdsv2CredentialProvider,
    ProfileCredentialProvider, StaticCredentialProvider,
};

mod constants;
pub use constants::EMPTY_STRING_SHA256;
