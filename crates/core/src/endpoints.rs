use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointProfile {
    pub name: String,
    pub base_url: String,
}

impl EndpointProfile {
    #[must_use]
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
        }
    }
}

impl Default for EndpointProfile {
    fn default() -> Self {
        Self::new("default", DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Error)]
pub enum EndpointsError {
    #[error("config directory is unavailable for this platform")]
    ConfigDirUnavailable,
    #[error("failed to read endpoints file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse endpoints file at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to create config directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize endpoints: {source}")]
    Serialize {
        #[source]
        source: toml::ser::Error,
    },
    #[error("failed to write endpoints file at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct EndpointsDocument {
    #[serde(default)]
    endpoints: Vec<EndpointProfile>,
}

impl EndpointsDocument {
    fn normalize(&mut self) {
        let mut by_name = std::collections::BTreeMap::new();
        for endpoint in self.endpoints.drain(..) {
            by_name.insert(endpoint.name.clone(), endpoint);
        }
        self.endpoints = by_name.into_values().collect();
    }
}

#[derive(Debug, Clone)]
pub struct FileEndpointsStore {
    path: PathBuf,
    endpoints: Vec<EndpointProfile>,
}

impl FileEndpointsStore {
    pub fn load_default() -> Result<Self, EndpointsError> {
        let path = default_endpoints_path()?;
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl Into<PathBuf>) -> Result<Self, EndpointsError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                endpoints: Vec::new(),
            });
        }

        let raw = fs::read_to_string(&path).map_err(|source| EndpointsError::Read {
            path: path.clone(),
            source,
        })?;

        if raw.trim().is_empty() {
            return Ok(Self {
                path,
                endpoints: Vec::new(),
            });
        }

        let mut doc: EndpointsDocument =
            toml::from_str(&raw).map_err(|source| EndpointsError::Parse {
                path: path.clone(),
                source,
            })?;
        doc.normalize();

        Ok(Self {
            path,
            endpoints: doc.endpoints,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn endpoints(&self) -> &[EndpointProfile] {
        &self.endpoints
    }

    #[must_use]
    pub fn endpoint(&self, name: &str) -> Option<&EndpointProfile> {
        self.endpoints.iter().find(|endpoint| endpoint.name == name)
    }

    pub fn upsert_endpoint(&mut self, endpoint: EndpointProfile) {
        if let Some(existing) = self
            .endpoints
            .iter_mut()
            .find(|existing| existing.name == endpoint.name)
        {
            *existing = endpoint;
        } else {
            self.endpoints.push(endpoint);
            self.endpoints.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        }
    }

    #[must_use]
    pub fn delete_endpoint(&mut self, name: &str) -> bool {
        let original_len = self.endpoints.len();
        self.endpoints.retain(|endpoint| endpoint.name != name);
        self.endpoints.len() != original_len
    }

    pub fn persist(&self) -> Result<(), EndpointsError> {
        if let Some(parent_dir) = self.path.parent() {
            fs::create_dir_all(parent_dir).map_err(|source| EndpointsError::CreateDir {
                path: parent_dir.to_path_buf(),
                source,
            })?;
        }

        let doc = EndpointsDocument {
            endpoints: self.endpoints.clone(),
        };
        let rendered =
            toml::to_string_pretty(&doc).map_err(|source| EndpointsError::Serialize { source })?;

        fs::write(&self.path, rendered).map_err(|source| EndpointsError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

pub fn default_endpoints_path() -> Result<PathBuf, EndpointsError> {
    let base_dir = if let Some(custom) = env::var_os("DRILL_CONFIG_DIR") {
        PathBuf::from(custom)
    } else if cfg!(target_os = "windows") {
        env::var_os("APPDATA")
            .map(PathBuf::from)
            .ok_or(EndpointsError::ConfigDirUnavailable)?
    } else if let Some(xdg_config_home) = env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config_home)
    } else {
        let home = env::var_os("HOME").ok_or(EndpointsError::ConfigDirUnavailable)?;
        PathBuf::from(home).join(".config")
    };

    Ok(base_dir.join("drill").join("endpoints.toml"))
}
