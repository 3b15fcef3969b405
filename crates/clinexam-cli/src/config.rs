use std::path::{Path, PathBuf};

use clinexam_core::models::domain::Domain;
use clinexam_engine::EngineConfig;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Pretty-print JSON output even without `--pretty`.
    #[serde(default)]
    pub pretty: bool,
    /// Domains whose scales and alert rules run. Added in v1.
    #[serde(default = "all_domains")]
    pub domains: Vec<Domain>,
    /// Version the file was migrated from, if a migration ran on load.
    #[serde(skip)]
    pub migrated_from: Option<u32>,
}

fn all_domains() -> Vec<Domain> {
    Domain::ALL.to_vec()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            log_format: LogFormat::Text,
            pretty: false,
            domains: all_domains(),
            migrated_from: None,
        }
    }
}

impl CliConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::for_domains(self.domains.iter().copied())
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("clinexam").join("config.json"))
}

/// Load the config at `path`, or the default location when `None`.
///
/// A missing file yields the defaults; an unreadable or malformed one is an
/// error.
pub fn load_config(path: Option<&Path>) -> eyre::Result<CliConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if !path.exists() {
        return Ok(CliConfig::default());
    }

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> eyre::Result<CliConfig> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
        Some(v) => u32::try_from(v).map_err(|_| {
            eyre::eyre!(
                "config_version {v} is newer than this build supports ({CURRENT_VERSION}). \
                 Please update clinexam."
            )
        })?,
        None => 0,
    };

    let migrated = migrate(json, on_disk_version)?;
    let mut config: CliConfig = serde_json::from_value(migrated)?;
    if on_disk_version < CURRENT_VERSION {
        config.migrated_from = Some(on_disk_version);
    }
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update clinexam."
        ));
    }

    // v0 → v1: `log_json: bool` becomes `log_format`, `domains` defaults to all
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        let json_logs = obj
            .remove("log_json")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        obj.entry("log_format").or_insert(serde_json::Value::String(
            if json_logs { "json" } else { "text" }.to_string(),
        ));
        obj.entry("domains").or_insert(serde_json::json!(all_domains()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
    }

    Ok(json)
}
