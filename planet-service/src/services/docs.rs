//! OpenAPI description passthrough.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocsError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Rendered as plain text, never as the JSON error shape.
impl IntoResponse for DocsError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Error reading file");
        let body = match self {
            DocsError::Read { .. } => "Error reading file",
            DocsError::Parse { .. } => "Error reading file: invalid JSON",
        };
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[derive(Debug, Clone)]
pub struct ApiDocs {
    path: PathBuf,
}

impl ApiDocs {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the file on every call so edits show up without a restart.
    pub async fn load(&self) -> Result<Value, DocsError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| DocsError::Read {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_str(&raw).map_err(|source| DocsError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}
