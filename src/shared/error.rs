// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;
pub type Result<T> = std::result::Result<T, ClientError>;

/// Underlying cause of a connection failure, kept intact for diagnostics.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures raised while talking to the control plane.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("{method} {url} returned HTTP {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("connection error")]
    Connection(#[source] BoxError),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// HTTP status preserved from the control plane, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Connection(Box::new(err))
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    RequestFailed(#[from] TransportError),

    #[error("Invalid response: {0}")]
    RenderError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("YAML error")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn validation(context: impl Into<String>) -> Self {
        Self::ValidationError(context.into())
    }

    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn render_error(context: impl Into<String>) -> Self {
        Self::RenderError(context.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::ValidationError(_))
    }

    /// Transport failures include replies whose body could not be decoded.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::RequestFailed(_) | ClientError::RenderError(_)
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::RequestFailed(e) => e.status(),
            _ => None,
        }
    }
}
