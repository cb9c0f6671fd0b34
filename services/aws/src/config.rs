use crate::constants::*;
use cloudsig_core::utils::Redact;
use cloudsig_core::Context;
use std::fmt::{Debug, Formatter};

/// Config carries the explicit configuration consulted by the credential
/// providers.
///
/// Every field is optional; unset fields fall back to the environment or the
/// provider's default. The providers share one snapshot (`Arc<Config>`), so
/// several signers can coexist with independent configuration and tests can
/// inspect exactly what a resolution cycle saw.
#[derive(Clone, Default)]
pub struct Config {
    /// Access key id, taken over every other source when set together with
    /// `secret_access_key`.
    pub access_key_id: Option<String>,
    /// Secret access key.
    pub secret_access_key: Option<String>,
    /// Session token accompanying temporary keys.
    pub session_token: Option<String>,
    /// Region used for signing and for the regional STS endpoint.
    pub region: Option<String>,
    /// Profile name looked up in the shared config/credentials files.
    ///
    /// `AWS_PROFILE` overrides it; the final fallback is `default`.
    pub profile: Option<String>,
    /// Path of the shared config file, defaults to `~/.aws/config`.
    pub config_file: Option<String>,
    /// Path of the shared credentials file, defaults to `~/.aws/credentials`.
    pub credentials_file: Option<String>,
    /// Role to assume via STS before signing.
    pub role_arn: Option<String>,
    /// Session name recorded by the role assumption call.
    pub role_session_name: Option<String>,
    /// External id forwarded to the role assumption call.
    pub external_id: Option<String>,
    /// Validity requested for assumed-role credentials, in seconds.
    pub duration_seconds: Option<u32>,
    /// Use the regional STS endpoint instead of the global one.
    pub use_regional_sts_endpoint: bool,
    /// Disable the ECS task metadata source.
    pub container_credentials_disabled: bool,
    /// Endpoint of the EC2 instance metadata service, defaults to
    /// `http://169.254.169.254`.
    pub ec2_metadata_endpoint: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("session_token", &Redact::from(&self.session_token))
            .field("region", &self.region)
            .field("profile", &self.profile)
            .field("role_arn", &self.role_arn)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Fill unset fields from environment variables.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.access_key_id.is_none() {
            self.access_key_id = ctx.env_var(AWS_ACCESS_KEY_ID);
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key = ctx.env_var(AWS_SECRET_ACCESS_KEY);
        }
        if self.session_token.is_none() {
            self.session_token = ctx.env_var(AWS_SESSION_TOKEN);
        }
        if self.region.is_none() {
            self.region = ctx.env_var(AWS_REGION);
        }
        if self.profile.is_none() {
            self.profile = ctx.env_var(AWS_PROFILE);
        }
        if self.config_file.is_none() {
            self.config_file = ctx.env_var(AWS_CONFIG_FILE);
        }
        if self.credentials_file.is_none() {
            self.credentials_file = ctx.env_var(AWS_SHARED_CREDENTIALS_FILE);
        }
        if self.role_arn.is_none() {
            self.role_arn = ctx.env_var(AWS_ROLE_ARN);
        }
        if self.role_session_name.is_none() {
            self.role_session_name = ctx.env_var(AWS_ROLE_SESSION_NAME);
        }
        if ctx.env_var(AWS_STS_REGIONAL_ENDPOINTS).as_deref() == Some("regional") {
            self.use_regional_sts_endpoint = true;
        }

        self
    }
}
