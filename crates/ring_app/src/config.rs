//! File configuration for the server.
//!
//! The file is YAML or JSON, chosen by extension:
//!
//! ```yaml
//! path: /api/v1/docs
//! docs:
//!   - path: https://pets.internal/openapi.yaml
//!   - path: https://store.internal/openapi.json
//! ```
//!
//! Order of `docs` matters: on conflicting values the later document wins.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ring_core::{RenderOptions, SourceDescriptor};
use ring_engine::{AggregationPolicy, EmptyResultPolicy, FetchSettings, SourceErrorPolicy};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid yaml configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid json configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported configuration file {0:?}: expected .yaml, .yml or .json")]
    UnsupportedExtension(PathBuf),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RingConfig {
    /// Base path of the viewer; documents are served below it.
    pub path: String,
    pub docs: Vec<DocRef>,
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// JSON indentation width, 0 for compact output.
    #[serde(default)]
    pub indent: usize,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub on_source_error: SourceErrorMode,
    #[serde(default)]
    pub on_empty: EmptyMode,
    #[serde(default = "default_title")]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocRef {
    #[serde(alias = "location")]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let settings = FetchSettings::default();
        Self {
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
            redirect_limit: settings.redirect_limit,
            max_bytes: settings.max_bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceErrorMode {
    #[default]
    Skip,
    Abort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyMode {
    #[default]
    EmptyDocument,
    Error,
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_title() -> String {
    "API Documentation".to_string()
}

impl RingConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(ConfigError::UnsupportedExtension(path.to_path_buf())),
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validated()
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if !self.path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "path `{}` must start with `/`",
                self.path
            )));
        }
        if self.docs.is_empty() {
            return Err(ConfigError::Invalid("docs cannot be empty".into()));
        }
        if let Some(position) = self.docs.iter().position(|doc| doc.path.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "docs[{position}] has an empty path"
            )));
        }
        Ok(self)
    }

    /// Base path without a trailing slash; the root stays `/`.
    pub fn base_path(&self) -> &str {
        match self.path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        }
    }

    pub fn sources(&self) -> Vec<SourceDescriptor> {
        self.docs
            .iter()
            .map(|doc| SourceDescriptor::new(doc.path.trim()))
            .collect()
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.fetch.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.fetch.request_timeout_secs),
            redirect_limit: self.fetch.redirect_limit,
            max_bytes: self.fetch.max_bytes,
        }
    }

    pub fn policy(&self) -> AggregationPolicy {
        AggregationPolicy {
            on_source_error: match self.on_source_error {
                SourceErrorMode::Skip => SourceErrorPolicy::Skip,
                SourceErrorMode::Abort => SourceErrorPolicy::Abort,
            },
            on_empty: match self.on_empty {
                EmptyMode::EmptyDocument => EmptyResultPolicy::EmptyDocument,
                EmptyMode::Error => EmptyResultPolicy::Error,
            },
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            json_indent: self.indent,
        }
    }
}
