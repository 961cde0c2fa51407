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

//! Operator configuration file (`k3skvm.toml`)
//!
//! ```toml
//! [client]
//! base_url = "http://10.0.0.2:8080"
//! output = "table"
//! ```

use crate::infrastructure::constants::{CONF_FILE_ENV, DEFAULT_BASE_URL};
use crate::shared::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConf {
    pub client: ClientConf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConf {
    pub base_url: String,
    pub output: String,
}

impl Default for ClientConf {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output: OutputFormat::Json.as_str().to_string(),
        }
    }
}

impl CliConf {
    /// Load configuration from TOML file
    pub fn from<T: AsRef<str>>(path: T) -> Result<Self> {
        let path = path.as_ref();
        if !Path::new(path).exists() {
            return Err(ClientError::config_error(format!(
                "Configuration file not found: {}",
                path
            )));
        }

        let content = read_to_string(path).map_err(|e| {
            ClientError::config_error(format!("Failed to read config file {}: {}", path, e))
        })?;

        let conf: Self = toml::from_str(&content)?;
        tracing::debug!(path, "loaded configuration");
        Ok(conf)
    }

    /// Explicit path > `K3SKVM_CONF_FILE` > built-in defaults.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from(path);
        }

        match std::env::var(CONF_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from(path.trim()),
            _ => Ok(Self::default()),
        }
    }
}

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Table,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Table => "table",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "table" => Ok(OutputFormat::Table),
            _ => Err(ClientError::config_error(format!(
                "Invalid output format: {} (expected json, yaml or table)",
                s
            ))),
        }
    }
}
