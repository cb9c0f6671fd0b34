use cloudsig_core::time::{now, DateTime};
use cloudsig_core::utils::Redact;
use cloudsig_core::SigningCredential;
use std::fmt::{Debug, Formatter};
use std::time::Duration;

/// How long before the hard expiration a bearer token is treated as expired
/// and proactively refreshed.
pub const DEFAULT_EXPIRES_THRESHOLD: Duration = Duration::from_secs(5 * 60);

/// Credential for the different Azure Storage authentication methods.
#[derive(Clone)]
pub enum Credential {
    /// Shared Key authentication with account name and key.
    SharedKey {
        /// Azure storage account name.
        account_name: String,
        /// Azure storage account key, base64 encoded.
        account_key: String,
    },
    /// SAS (Shared Access Signature) token authentication.
    SasToken {
        /// SAS token.
        token: String,
    },
    /// Bearer token for OAuth authentication.
    BearerToken {
        /// Bearer token.
        token: String,
        /// Expiration time for this credential.
        expires_in: Option<DateTime>,
        /// Lead time before `expires_in` at which the token reports itself
        /// expired. Defaults to [`DEFAULT_EXPIRES_THRESHOLD`].
        expires_threshold: Option<Duration>,
    },
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::SharedKey {
                account_name,
                account_key,
            } => f
                .debug_struct("Credential::SharedKey")
                .field("account_name", &Redact::from(account_name))
                .field("account_key", &Redact::from(account_key))
                .finish(),
            Credential::SasToken { token } => f
                .debug_struct("Credential::SasToken")
                .field("token", &Redact::from(token))
                .finish(),
            Credential::BearerToken {
                token, expires_in, ..
            } => f
                .debug_struct("Credential::BearerToken")
                .field("token", &Redact::from(token))
                .field("expires_in", expires_in)
                .finish(),
        }
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        match self {
            Credential::SharedKey {
                account_name,
                account_key,
            } => !account_name.is_empty() && !account_key.is_empty(),
            Credential::SasToken { token } => !token.is_empty(),
            Credential::BearerToken {
                token,
                expires_in,
                expires_threshold,
            } => {
                if token.is_empty() {
                    return false;
                }
                let Some(expires_in) = expires_in else {
                    return true;
                };
                let threshold = expires_threshold.unwrap_or(DEFAULT_EXPIRES_THRESHOLD);
                let threshold =
                    chrono::TimeDelta::from_std(threshold).expect("threshold in bounds");
                now() + threshold < *expires_in
            }
        }
    }
}

impl Credential {
    /// Create a new credential with shared key authentication.
    pub fn with_shared_key(account_name: &str, account_key: &str) -> Self {
        Self::SharedKey {
            account_name: account_name.to_string(),
            account_key: account_key.to_string(),
        }
    }

    /// Create a new credential with SAS token authentication.
    pub fn with_sas_token(sas_token: &str) -> Self {
        Self::SasToken {
            token: sas_token.to_string(),
        }
    }

    /// Create a new credential with bearer token authentication.
    pub fn with_bearer_token(bearer_token: &str, expires_in: Option<DateTime>) -> Self {
        Self::BearerToken {
            token: bearer_token.to_string(),
            expires_in,
            expires_threshold: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_key_validity() {
        assert!(Credential::with_shared_key("account", "a2V5").is_valid());
        assert!(!Credential::with_shared_key("", "a2V5").is_valid());
        assert!(!Credential::with_shared_key("account", "").is_valid());
    }

    #[test]
    fn test_bearer_token_threshold() {
        // No expiration: valid forever.
        assert!(Credential::with_bearer_token("token", None).is_valid());

        // One second left against a five second lead: expired.
        let cred = Credential::BearerToken {
            token: "token".to_string(),
            expires_in: Some(now() + chrono::TimeDelta::try_seconds(1).unwrap()),
            expires_threshold: Some(Duration::from_secs(5)),
        };
        assert!(!cred.is_valid());

        // One hour left against the default five minute lead: fine.
        let cred = Credential::with_bearer_token(
            "token",
            Some(now() + chrono::TimeDelta::try_hours(1).unwrap()),
        );
        assert!(cred.is_valid());
    }

    #[test]
    fn test_debug_redacts_key() {
        let cred = Credential::with_shared_key("account", "c2VjcmV0LXNlY3JldC1zZWNyZXQ=");
        let repr = format!("{cred:?}");
        assert!(!repr.contains("c2VjcmV0LXNlY3JldC1zZWNyZXQ="));
    }
}
