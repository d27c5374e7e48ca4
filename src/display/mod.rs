//! Display notes request model and file loading

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Two optional free-form text fields shown by the notes panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayNotesRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(
        default,
        rename = "specialConditions",
        alias = "special_conditions",
        skip_serializing_if = "Option::is_none"
    )]
    pub special_conditions: Option<String>,
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unsupported request file {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
}

/// A field is shown only when it is present and non-empty.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl DisplayNotesRequest {
    pub fn new(notes: Option<String>, special_conditions: Option<String>) -> Self {
        Self {
            notes,
            special_conditions,
        }
    }

    pub fn notes(&self) -> Option<&str> {
        present(&self.notes)
    }

    pub fn special_conditions(&self) -> Option<&str> {
        present(&self.special_conditions)
    }

    /// True when neither field would be displayed
    pub fn is_blank(&self) -> bool {
        self.notes().is_none() && self.special_conditions().is_none()
    }

    /// Fields set on `other` replace ours; unset fields are left alone.
    pub fn overlay(mut self, other: DisplayNotesRequest) -> Self {
        if other.notes.is_some() {
            self.notes = other.notes;
        }
        if other.special_conditions.is_some() {
            self.special_conditions = other.special_conditions;
        }
        self
    }

    /// Parse a request from file contents, picking the format by extension
    pub fn parse(path: &Path, content: &str) -> Result<Self, RequestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => serde_json::from_str(content).map_err(|source| RequestError::Json {
                path: path.to_path_buf(),
                source,
            }),
            Some("toml") => toml::from_str(content).map_err(|source| RequestError::Toml {
                path: path.to_path_buf(),
                source,
            }),
            _ => Err(RequestError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub async fn load(path: &Path) -> Result<Self, RequestError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| RequestError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let request = Self::parse(path, &content)?;
        tracing::debug!(
            "Loaded request from {}: notes={} special_conditions={}",
            path.display(),
            request.notes().is_some(),
            request.special_conditions().is_some()
        );
        Ok(request)
    }
}
