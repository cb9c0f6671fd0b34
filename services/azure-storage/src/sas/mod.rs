//! Shared Access Signature generation.
//!
//! Both flavors are stand-alone delegation URIs signed with the account's
//! shared key: [`AccountSharedAccessSignature`] grants account wide access,
//! [`BlobSharedAccessSignature`] scopes the grant to one container or blob.

use cloudsig_core::{Error, Result};
use std::fmt;

mod account_sas;
pub use account_sas::AccountSharedAccessSignature;

mod service_sas;
pub use service_sas::{BlobSharedAccessSignature, SasResource};

/// Permission alphabet and canonical ordering for account level SAS.
const ACCOUNT_PERMISSION_ORDER: &str = "rwdxlacupt";

/// Permission alphabet and canonical ordering for service level SAS.
const SERVICE_PERMISSION_ORDER: &str = "racwdxltmeop";

/// A validated, canonically ordered SAS permission set.
///
/// The signature is computed over the literal permission text, so the set is
/// normalized to the provider-mandated ordering regardless of how the caller
/// spelled it. Characters outside the recognized alphabet are rejected
/// before any signing happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SasPermissions(String);

impl SasPermissions {
    /// Parse permissions for an account level SAS.
    pub fn account(input: &str) -> Result<Self> {
        Self::parse(input, ACCOUNT_PERMISSION_ORDER)
    }

    /// Parse permissions for a service level SAS.
    pub fn service(input: &str) -> Result<Self> {
        Self::parse(input, SERVICE_PERMISSION_ORDER)
    }

    fn parse(input: &str, order: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::config_invalid("permission string must not be empty"));
        }
        if let Some(unknown) = input.chars().find(|c| !order.contains(*c)) {
            return Err(Error::config_invalid(format!(
                "unrecognized permission {unknown:?} in {input:?}"
            )));
        }

        Ok(Self(
            order.chars().filter(|c| input.contains(*c)).collect(),
        ))
    }
}

impl fmt::Display for SasPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Specifies the protocol permitted for a request made with the SAS ([Azure documentation](https://docs.microsoft.com/rest/api/storageservices/create-service-sas#specifying-the-http-protocol)).
#[derive(Copy, Clone, Debug)]
pub enum Protocol {
    /// HTTPS only.
    Https,
    /// Both HTTP and HTTPS.
    HttpHttps,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Protocol::Https => write!(f, "https"),
            Protocol::HttpHttps => write!(f, "http,https"),
        }
    }
}

fn urlencoded(s: String) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_are_canonically_ordered() {
        // Caller order does not survive; provider order does.
        assert_eq!(SasPermissions::account("wr").unwrap().to_string(), "rw");
        assert_eq!(
            SasPermissions::account("ucaldwr").unwrap().to_string(),
            "rwdlacu"
        );
        assert_eq!(SasPermissions::service("cr").unwrap().to_string(), "rc");
    }

    #[test]
    fn test_unknown_permission_is_rejected() {
        let err = SasPermissions::account("rz").unwrap_err();
        assert_eq!(err.kind(), cloudsig_core::ErrorKind::ConfigInvalid);

        assert!(SasPermissions::service("").is_err());
        // `m` (move) belongs to the service alphabet only.
        assert!(SasPermissions::account("m").is_err());
        assert!(SasPermissions::service("m").is_ok());
    }
}
