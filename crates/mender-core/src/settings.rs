use crate::error::SettingsError;
use crate::types::{AutoFixConfig, BatchPolicy};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const SETTINGS_DIR: &str = ".mender";
pub const SETTINGS_FILE: &str = "config.toml";

/// On-disk pipeline configuration. A missing file yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub auto_fix: AutoFixConfig,
    pub analysis: BatchPolicy,
}

pub fn load_settings(repo_path: &Path) -> Result<PipelineSettings, SettingsError> {
    let path = repo_path.join(SETTINGS_DIR).join(SETTINGS_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(PipelineSettings::default());
        }
        Err(err) => return Err(SettingsError::Read { path, source: err }),
    };
    toml::from_str(&content).map_err(|err| SettingsError::Parse {
        path,
        message: err.to_string(),
    })
}
