//! # Application Configuration
//!
//! Optional TOML file passed with `--config`:
//!
//! ```toml
//! [hypergraph]
//! weighted = true
//! on_missing = "ignore"       # strict | ignore
//! on_duplicate = "accumulate" # overwrite | accumulate | reject
//!
//! [log]
//! format = "json"             # text | json
//! filter = "hgx=debug"
//! ```
//!
//! Every key is optional. `HGX_LOG_FORMAT` and `RUST_LOG` override the
//! `[log]` table.

use crate::error::AppError;
use crate::input::read_bounded;
use hgx_core::HypergraphConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "hgx=info,hgx_core=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive; `None` means `DEFAULT_LOG_FILTER`.
    pub filter: Option<String>,
}

impl LogConfig {
    /// Resolve the output format, letting `HGX_LOG_FORMAT` win.
    #[must_use]
    pub fn effective_format(&self, env_format: Option<&str>) -> LogFormat {
        match env_format {
            Some("json") => LogFormat::Json,
            Some("text") => LogFormat::Text,
            _ => self.format,
        }
    }

    #[must_use]
    pub fn filter_directive(&self) -> &str {
        self.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub hypergraph: HypergraphConfig,
    pub log: LogConfig,
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a TOML file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = read_bounded(path, MAX_CONFIG_FILE_SIZE)?;
        Self::from_toml_str(&text)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<Self, AppError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
