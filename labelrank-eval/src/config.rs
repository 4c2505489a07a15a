//! Configuration for evaluation runs.
//!
//! Uses `figment` for layered configuration: defaults -> user config ->
//! workspace config -> explicit file -> environment. Callers apply command
//! line overrides on the extracted value.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Prefix for environment overrides, e.g. `LABELRANK_OUTPUT__FORMAT=table`.
pub const ENV_PREFIX: &str = "LABELRANK_";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Label vocabulary file used when none is given on the command line.
    #[serde(default)]
    pub vocabulary_path: Option<PathBuf>,
    /// Report rendering.
    #[serde(default)]
    pub output: OutputConfig,
    /// Log destinations.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

/// Report rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Include per-document scores in the report.
    #[serde(default)]
    pub per_document: bool,
    /// Decimal places in table output.
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            per_document: false,
            precision: default_precision(),
        }
    }
}

fn default_precision() -> usize {
    4
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write JSON logs to a daily rolling file.
    #[serde(default)]
    pub json_file: bool,
    /// Directory for the JSON log file (platform data dir if unset).
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl LoggingConfig {
    /// Effective log directory.
    pub fn resolved_log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|d| d.data_dir().join("logs"))
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("dev", "labelrank", "labelrank")
}

/// User-level config file (`~/.config/labelrank/config.toml` on Linux).
pub fn user_config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.toml"))
}

/// Workspace-level config file.
pub fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(".labelrank").join("config.toml")
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with `LABELRANK_`, `__` for nesting)
/// 2. Explicit config file
/// 3. Workspace-local config (`.labelrank/config.toml`)
/// 4. User config
/// 5. Built-in defaults
pub fn load_config(workspace: Option<&Path>, explicit: Option<&Path>) -> Result<EvalConfig> {
    let mut figment = Figment::from(Serialized::defaults(EvalConfig::default()));

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(ws) = workspace {
        let ws_config = workspace_config_path(ws);
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    // An explicitly named file must exist.
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(crate::EvalError::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    Ok(figment.extract()?)
}
