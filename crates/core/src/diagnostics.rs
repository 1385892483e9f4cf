use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::endpoints::{default_endpoints_path, EndpointsError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticRecord {
    pub timestamp_unix_ms: u128,
    pub query_text: String,
    pub detail: String,
}

#[must_use]
pub fn unix_timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[derive(Debug, Error)]
pub enum DiagnosticsError {
    #[error("failed to resolve default config path: {0}")]
    Config(#[from] EndpointsError),
    #[error("invalid diagnostics path `{0}`")]
    InvalidPath(PathBuf),
    #[error("failed to create diagnostics directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize diagnostic record: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to append diagnostic record at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct FileDiagnosticsLog {
    path: PathBuf,
}

impl FileDiagnosticsLog {
    pub fn load_default() -> Result<Self, DiagnosticsError> {
        Ok(Self {
            path: default_diagnostics_path()?,
        })
    }

    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &DiagnosticRecord) -> Result<(), DiagnosticsError> {
        let parent_dir = self
            .path
            .parent()
            .ok_or_else(|| DiagnosticsError::InvalidPath(self.path.clone()))?;
        fs::create_dir_all(parent_dir).map_err(|source| DiagnosticsError::CreateDir {
            path: parent_dir.to_path_buf(),
            source,
        })?;

        let rendered = serde_json::to_string(record)
            .map_err(|source| DiagnosticsError::Serialize { source })?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| DiagnosticsError::Write {
                path: self.path.clone(),
                source,
            })?;
        writeln!(file, "{rendered}").map_err(|source| DiagnosticsError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn default_diagnostics_path() -> Result<PathBuf, DiagnosticsError> {
    let endpoints_path = default_endpoints_path()?;
    let Some(config_dir) = endpoints_path.parent() else {
        return Err(DiagnosticsError::InvalidPath(endpoints_path));
    };
    Ok(config_dir.join("diagnostics.ndjson"))
}
