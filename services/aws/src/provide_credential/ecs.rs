use crate::constants::{
    AWS_CONTAINER_CREDENTIALS_FULL_URI, AWS_CONTAINER_CREDENTIALS_RELATIVE_URI,
};
use crate::{Config, Credential};
use async_trait::async_trait;
use bytes::Bytes;
use cloudsig_core::time::parse_rfc3339;
use cloudsig_core::{Context, Error, ProvideCredential, Result};
use http::Method;
use serde::Deserialize;
use std::sync::Arc;

/// EcsCredentialProvider loads temporary credentials from the ECS task
/// metadata endpoint.
///
/// The endpoint is announced through `AWS_CONTAINER_CREDENTIALS_RELATIVE_URI`
/// or `AWS_CONTAINER_CREDENTIALS_FULL_URI`; outside a container environment
/// neither is set and this provider yields nothing.
///
/// References:
/// - [IAM roles for tasks](https://docs.aws.amazon.com/AmazonECS/latest/developerguide/task-iam-roles.html)
#[derive(Debug)]
pub struct EcsCredentialProvider {
    config: Arc<Config>,
}

impl EcsCredentialProvider {
    /// Create a new EcsCredentialProvider.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl Default for EcsCredentialProvider {
    fn default() -> Self {
        Self::new(Arc::new(Config::default()))
    }
}

#[async_trait]
impl ProvideCredential for EcsCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        if self.config.container_credentials_disabled {
            return Ok(None);
        }

        let envs = ctx.env_vars();
        let url = match (
            envs.get(AWS_CONTAINER_CREDENTIALS_RELATIVE_URI),
            envs.get(AWS_CONTAINER_CREDENTIALS_FULL_URI),
        ) {
            (Some(relative), _) => format!("http://169.254.170.2{relative}"),
            (None, Some(full)) => full.to_string(),
            (None, None) => return Ok(None),
        };

        let req = http::Request::builder()
            .uri(&url)
            .method(Method::GET)
            .body(Bytes::new())
            .map_err(|e| {
                Error::request_invalid("failed to build task metadata request").with_source(e)
            })?;

        let resp = ctx.http_send_as_string(req).await.map_err(|e| {
            Error::credential_refresh("failed to reach task metadata endpoint")
                .with_source(e)
                .set_retryable(true)
        })?;

        if resp.status() != http::StatusCode::OK {
            return Err(Error::credential_refresh(format!(
                "task metadata endpoint returned {}: {}",
                resp.status(),
                resp.body()
            )));
        }

        let content = resp.into_body();
        let cred: TaskCredentials = serde_json::from_str(&content).map_err(|e| {
            Error::unexpected("failed to parse task metadata credentials").with_source(e)
        })?;

        let expires_in = parse_rfc3339(&cred.expiration).map_err(|e| {
            Error::unexpected("failed to parse task credential expiration").with_source(e)
        })?;

        Ok(Some(Credential {
            access_key_id: cred.access_key_id,
            secret_access_key: cred.secret_access_key,
            session_token: Some(cred.token),
            expires_in: Some(expires_in),
            ..Default::default()
        }))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TaskCredentials {
    access_key_id: String,
    secret_access_key: String,
    token: String,
    expiration: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudsig_core::StaticEnv;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_outside_container_yields_none() {
        let ctx = Context::new().with_env(StaticEnv::default());

        let provider = EcsCredentialProvider::default();
        let cred = provider.provide_credential(&ctx).await.unwrap();
        assert!(cred.is_none());
    }

    #[tokio::test]
    async fn test_disabled_by_config() {
        let ctx = Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([(
                AWS_CONTAINER_CREDENTIALS_RELATIVE_URI.to_string(),
                "/v2/credentials/uuid".to_string(),
            )]),
        });

        let provider = EcsCredentialProvider::new(Arc::new(Config {
            container_credentials_disabled: true,
            ..Default::default()
        }));
        let cred = provider.provide_credential(&ctx).await.unwrap();
        assert!(cred.is_none());
    }

    #[test]
    fn test_parse_task_credentials() {
        let content = r#"{
            "AccessKeyId": "ACCESS_KEY_ID",
            "Expiration": "2019-11-09T13:34:41Z",
            "RoleArn": "TASK_ROLE_ARN",
            "SecretAccessKey": "SECRET_ACCESS_KEY",
            "Token": "SECURITY_TOKEN_STRING"
        }"#;

        let cred: TaskCredentials = serde_json::from_str(content).expect("must parse");
        assert_eq!(cred.access_key_id, "ACCESS_KEY_ID");
        assert_eq!(cred.secret_access_key, "SECRET_ACCESS_KEY");
        assert_eq!(cred.token, "SECURITY_TOKEN_STRING");
        assert_eq!(cred.expiration, "2019-11-09T13:34:41Z");
    }
}
