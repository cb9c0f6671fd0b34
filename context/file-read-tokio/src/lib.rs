//! Tokio-based file reading for cloudsig.
//!
//! This crate provides [`TokioFileRead`], an async file reader implementing
//! the `FileRead` trait from `cloudsig-core` on top of Tokio's file system
//! operations. Credential providers use it to read shared config and
//! credentials files without blocking the runtime.
//!
//! ## Example
//!
//! ```no_run
//! use cloudsig_core::{Context, OsEnv};
//! use cloudsig_file_read_tokio::TokioFileRead;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ctx = Context::new()
//!         .with_file_read(TokioFileRead)
//!         .with_env(OsEnv);
//!
//!     match ctx.file_read("/path/to/credentials").await {
//!         Ok(content) => println!("read {} bytes", content.len()),
//!         Err(e) => eprintln!("failed to read file: {e}"),
//!     }
//! }
//! ```

use async_trait::async_trait;
use cloudsig_core::{Error, FileRead, Result};

/// Tokio-based implementation of the `FileRead` trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileRead;

#[async_trait]
impl FileRead for TokioFileRead {
    async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .map_err(|e| Error::unexpected("failed to read file").with_source(e))
    }
}
