//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime` without depending directly on `common`.

use std::path::Path;

/// Ensure the database directory exists; in-memory stores pass `None`.
pub async fn ensure_env(data_dir: Option<&Path>) -> anyhow::Result<()> {
    match data_dir {
        Some(dir) => common::env::ensure_data_dir(dir).await,
        None => Ok(()),
    }
}
