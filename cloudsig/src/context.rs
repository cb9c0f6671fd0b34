use cloudsig_core::{Context, OsEnv};
use cloudsig_file_read_tokio::TokioFileRead;
use cloudsig_http_send_reqwest::ReqwestHttpSend;

/// Build a [`Context`] wired with the default implementations: Tokio file
/// reading, reqwest HTTP sending and OS environment access.
pub fn default_context() -> Context {
    Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}
