use crate::errors::UpstreamError;
use crate::models::UpstreamBundle;
use crate::source::{DataSource, parse_bundle};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, error};

/// Stored upstream responses, one `<account>.json` file per account holding
/// `{ "calendar": ..., "user": ... }` exactly as the GitHub APIs returned them.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    calendar: serde_json::Value,
    #[serde(default)]
    user: Option<serde_json::Value>,
}

impl SnapshotSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn snapshot_path(&self, account: &str) -> Result<PathBuf, UpstreamError> {
        if !is_valid_login(account) {
            return Err(UpstreamError::NotFound(account.to_string()));
        }
        Ok(self.dir.join(format!("{account}.json")))
    }
}

#[async_trait]
impl DataSource for SnapshotSource {
    async fn fetch(&self, account: &str) -> Result<UpstreamBundle, UpstreamError> {
        let path = self.snapshot_path(account)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no snapshot at {}", path.display());
                return Err(UpstreamError::NotFound(account.to_string()));
            }
            Err(err) => {
                error!("failed to read snapshot {}: {err}", path.display());
                return Err(err.into());
            }
        };

        let snapshot: Snapshot = serde_json::from_slice(&bytes).map_err(|err| {
            error!("failed to parse snapshot {}: {err}", path.display());
            UpstreamError::InvalidPayload(err.to_string())
        })?;
        parse_bundle(snapshot.calendar, snapshot.user)
    }
}

/// GitHub logins: 1-39 ASCII alphanumerics or hyphens, not starting with a hyphen.
pub fn is_valid_login(account: &str) -> bool {
    !account.is_empty()
        && account.len() <= 39
        && !account.starts_with('-')
        && account
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}
