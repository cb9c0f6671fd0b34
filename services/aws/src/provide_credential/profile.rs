use crate::{constants::*, Config, Credential};
use async_trait::async_trait;
use cloudsig_core::{Context, Error, ProvideCredential, Result};
use ini::Ini;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// ProfileCredentialProvider loads AWS credentials from the shared
/// credentials and config files.
///
/// Lookup order:
/// - `~/.aws/credentials` (or `AWS_SHARED_CREDENTIALS_FILE` / the configured
///   path), section `[<profile>]`
/// - `~/.aws/config` (or `AWS_CONFIG_FILE` / the configured path), section
///   `[default]` or `[profile <name>]`
///
/// The profile name comes from `AWS_PROFILE`, then the configuration, then
/// `default`.
#[derive(Debug, Clone)]
pub struct ProfileCredentialProvider {
    config: Arc<Config>,
}

impl Default for ProfileCredentialProvider {
    fn default() -> Self {
        Self::new(Arc::new(Config::default()))
    }
}

impl ProfileCredentialProvider {
    /// Create a new ProfileCredentialProvider.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

/// Resolve the active profile name.
pub(crate) fn profile_name(ctx: &Context, config: &Config) -> String {
    ctx.env_var(AWS_PROFILE)
        .or_else(|| config.profile.clone())
        .unwrap_or_else(|| "default".to_string())
}

async fn read_ini(ctx: &Context, path: &str) -> Result<Option<Ini>> {
    let Some(expanded) = ctx.expand_home_dir(path) else {
        debug!("failed to expand homedir for path: {path}");
        return Ok(None);
    };

    let content = match ctx.file_read(&expanded).await {
        Ok(content) => content,
        Err(err) => {
            debug!("failed to read profile file {expanded}: {err:?}");
            return Ok(None);
        }
    };

    let conf = Ini::load_from_str(&String::from_utf8_lossy(&content)).map_err(|e| {
        Error::config_invalid("failed to parse profile file")
            .with_context(format!("path: {expanded}"))
            .with_source(e)
    })?;

    Ok(Some(conf))
}

/// Load the merged key/value view of a profile: values from the credentials
/// file override values from the config file.
pub(crate) async fn load_profile(
    ctx: &Context,
    config: &Config,
    profile: &str,
) -> Result<Option<HashMap<String, String>>> {
    let mut merged: HashMap<String, String> = HashMap::new();

    let config_path = config
        .config_file
        .clone()
        .or_else(|| ctx.env_var(AWS_CONFIG_FILE))
        .unwrap_or_else(|| "~/.aws/config".to_string());
    if let Some(conf) = read_ini(ctx, &config_path).await? {
        // The config file prefixes non-default sections with `profile `.
        let section = match profile {
            "default" => "default".to_string(),
            name => format!("profile {name}"),
        };
        if let Some(props) = conf.section(Some(section.as_str())) {
            for (k, v) in props.iter() {
                merged.insert(k.to_string(), v.to_string());
            }
        }
    }

    let credentials_path = config
        .credentials_file
        .clone()
        .or_else(|| ctx.env_var(AWS_SHARED_CREDENTIALS_FILE))
        .unwrap_or_else(|| "~/.aws/credentials".to_string());
    if let Some(conf) = read_ini(ctx, &credentials_path).await? {
        if let Some(props) = conf.section(Some(profile)) {
            for (k, v) in props.iter() {
                merged.insert(k.to_string(), v.to_string());
            }
        }
    }

    if merged.is_empty() {
        debug!("profile {profile} not found in credentials or config file");
        Ok(None)
    } else {
        Ok(Some(merged))
    }
}

#[async_trait]
impl ProvideCredential for ProfileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let profile = profile_name(ctx, &self.config);

        let Some(props) = load_profile(ctx, &self.config, &profile).await? else {
            return Ok(None);
        };

        match (
            props.get("aws_access_key_id"),
            props.get("aws_secret_access_key"),
        ) {
            (Some(ak), Some(sk)) => Ok(Some(Credential {
                access_key_id: ak.clone(),
                secret_access_key: sk.clone(),
                session_token: props.get("aws_session_token").cloned(),
                ..Default::default()
            })),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudsig_core::StaticEnv;
    use cloudsig_file_read_tokio::TokioFileRead;
    use pretty_assertions::assert_eq;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn test_context() -> Context {
        Context::new()
            .with_file_read(TokioFileRead)
            .with_env(StaticEnv::default())
    }

    #[tokio::test]
    async fn test_profile_from_credentials_file() {
        let _ = env_logger::builder().is_test(true).try_init();

        let tmp_dir = tempdir().unwrap();
        let file_path = tmp_dir.path().join("credentials");
        let mut tmp_file = File::create(&file_path).unwrap();
        writeln!(tmp_file, "[default]").unwrap();
        writeln!(tmp_file, "aws_access_key_id = DEFAULTACCESSKEYID").unwrap();
        writeln!(tmp_file, "aws_secret_access_key = DEFAULTSECRETACCESSKEY").unwrap();
        writeln!(tmp_file, "aws_session_token = DEFAULTSESSIONTOKEN").unwrap();
        writeln!(tmp_file).unwrap();
        writeln!(tmp_file, "[profile1]").unwrap();
        writeln!(tmp_file, "aws_access_key_id = PROFILE1ACCESSKEYID").unwrap();
        writeln!(tmp_file, "aws_secret_access_key = PROFILE1SECRETACCESSKEY").unwrap();

        let ctx = test_context();

        let provider = ProfileCredentialProvider::new(Arc::new(Config {
            credentials_file: Some(file_path.to_string_lossy().to_string()),
            ..Default::default()
        }));
        let cred = provider.provide_credential(&ctx).await.unwrap().unwrap();
        assert_eq!(cred.access_key_id, "DEFAULTACCESSKEYID");
        assert_eq!(cred.secret_access_key, "DEFAULTSECRETACCESSKEY");
        assert_eq!(cred.session_token.as_deref(), Some("DEFAULTSESSIONTOKEN"));

        let provider = ProfileCredentialProvider::new(Arc::new(Config {
            profile: Some("profile1".to_string()),
            credentials_file: Some(file_path.to_string_lossy().to_string()),
            ..Default::default()
        }));
        let cred = provider.provide_credential(&ctx).await.unwrap().unwrap();
        assert_eq!(cred.access_key_id, "PROFILE1ACCESSKEYID");
    }

    #[tokio::test]
    async fn test_profile_from_config_file() {
        let tmp_dir = tempdir().unwrap();
        let file_path = tmp_dir.path().join("config");
        let mut tmp_file = File::create(&file_path).unwrap();
        writeln!(tmp_file, "[default]").unwrap();
        writeln!(tmp_file, "aws_access_key_id = CONFIGACCESSKEYID").unwrap();
        writeln!(tmp_file, "aws_secret_access_key = CONFIGSECRETACCESSKEY").unwrap();
        writeln!(tmp_file).unwrap();
        writeln!(tmp_file, "[profile profile1]").unwrap();
        writeln!(tmp_file, "aws_access_key_id = PROFILE1ACCESSKEYID").unwrap();
        writeln!(tmp_file, "aws_secret_access_key = PROFILE1SECRETACCESSKEY").unwrap();

        let ctx = test_context();

        let provider = ProfileCredentialProvider::new(Arc::new(Config {
            config_file: Some(file_path.to_string_lossy().to_string()),
            credentials_file: Some("/non/existent/path".to_string()),
            ..Default::default()
        }));
        let cred = provider.provide_credential(&ctx).await.unwrap().unwrap();
        assert_eq!(cred.access_key_id, "CONFIGACCESSKEYID");

        let provider = ProfileCredentialProvider::new(Arc::new(Config {
            profile: Some("profile1".to_string()),
            config_file: Some(file_path.to_string_lossy().to_string()),
            credentials_file: Some("/non/existent/path".to_string()),
            ..Default::default()
        }));
        let cred = provider.provide_credential(&ctx).await.unwrap().unwrap();
        assert_eq!(cred.access_key_id, "PROFILE1ACCESSKEYID");
    }

    /// Values from the credentials file override the config file.
    #[tokio::test]
    async fn test_credentials_file_overrides_config_file() {
        let tmp_dir = tempdir().unwrap();

        let config_path = tmp_dir.path().join("config");
        let mut f = File::create(&config_path).unwrap();
        writeln!(f, "[default]").unwrap();
        writeln!(f, "aws_access_key_id = CONFIGACCESSKEYID").unwrap();
        writeln!(f, "aws_secret_access_key = CONFIGSECRETACCESSKEY").unwrap();
        writeln!(f, "region = eu-west-2").unwrap();

        let credentials_path = tmp_dir.path().join("credentials");
        let mut f = File::create(&credentials_path).unwrap();
        writeln!(f, "[default]").unwrap();
        writeln!(f, "aws_access_key_id = SHAREDACCESSKEYID").unwrap();
        writeln!(f, "aws_secret_access_key = SHAREDSECRETACCESSKEY").unwrap();

        let ctx = test_context();
        let config = Config {
            config_file: Some(config_path.to_string_lossy().to_string()),
            credentials_file: Some(credentials_path.to_string_lossy().to_string()),
            ..Default::default()
        };

        let props = load_profile(&ctx, &config, "default")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(props["aws_access_key_id"], "SHAREDACCESSKEYID");
        // Config-only keys survive the merge.
        assert_eq!(props["region"], "eu-west-2");
    }

    #[tokio::test]
    async fn test_env_profile_overrides_config() {
        let tmp_dir = tempdir().unwrap();
        let file_path = tmp_dir.path().join("credentials");
        let mut tmp_file = File::create(&file_path).unwrap();
        writeln!(tmp_file, "[profile1]").unwrap();
        writeln!(tmp_file, "aws_access_key_id = PROFILE1ACCESSKEYID").unwrap();
        writeln!(tmp_file, "aws_secret_access_key = PROFILE1SECRETACCESSKEY").unwrap();

        let ctx = Context::new()
            .with_file_read(TokioFileRead)
            .with_env(StaticEnv {
                home_dir: None,
                envs: std::collections::HashMap::from([(
                    AWS_PROFILE.to_string(),
                    "profile1".to_string(),
                )]),
            });

        let provider = ProfileCredentialProvider::new(Arc::new(Config {
            profile: Some("default".to_string()),
            credentials_file: Some(file_path.to_string_lossy().to_string()),
            ..Default::default()
        }));
        let cred = provider.provide_credential(&ctx).await.unwrap().unwrap();
        assert_eq!(cred.access_key_id, "PROFILE1ACCESSKEYID");
    }

    #[tokio::test]
    async fn test_missing_files_yield_none() {
        let provider = ProfileCredentialProvider::new(Arc::new(Config {
            config_file: Some("/non/existent/path".to_string()),
            credentials_file: Some("/non/existent/path".to_string()),
            ..Default::default()
        }));
        let cred = provider
            .provide_credential(&test_context())
            .await
            .unwrap();
        assert!(cred.is_none());
    }
}
