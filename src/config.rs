use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::identity::DisplayNames;
use crate::domain::row::AgendaMode;
use crate::domain::standup::StandupOptions;
use crate::error::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const CONFIG_DIR_NAME: &str = "standup";
const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_PATH_ENV: &str = "STANDUP_CONFIG";

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or_else(|| AppError::Configuration("no configuration directory available".to_string()))
}

pub fn config_file_path() -> AppResult<PathBuf> {
    match env::var_os(CONFIG_PATH_ENV) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(config_directory()?.join(CONFIG_FILE_NAME)),
    }
}

/// Settings persisted by `standup config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredConfig {
    pub github_token: Option<String>,
    pub repository: Option<String>,
    pub api_url: Option<String>,
    pub agenda_mode: Option<String>,
    pub display_names: BTreeMap<String, String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(path, data)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github_token: Option<String>,
    pub repository: Option<String>,
    pub api_url: String,
    pub agenda_mode: AgendaMode,
    pub display_names: DisplayNames,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Self::from_sources(stored, |key| env::var(key).ok())
    }

    /// Environment values win over the stored file; empty values count as unset.
    pub fn from_sources(
        stored: StoredConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> AppResult<Self> {
        let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let agenda_mode = match lookup("STANDUP_AGENDA_MODE").or(stored.agenda_mode) {
            Some(raw) => AgendaMode::from_str(&raw).ok_or_else(|| {
                AppError::Configuration(format!(
                    "unknown agenda mode '{raw}' (expected 'split' or 'single')"
                ))
            })?,
            None => AgendaMode::default(),
        };

        Ok(Self {
            github_token: lookup("GITHUB_TOKEN").or(stored.github_token),
            repository: lookup("GITHUB_REPOSITORY").or(stored.repository),
            api_url: lookup("GITHUB_API_URL")
                .or(stored.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            agenda_mode,
            display_names: DisplayNames::new(stored.display_names),
        })
    }

    pub fn standup_options(&self) -> StandupOptions {
        StandupOptions {
            agenda_mode: self.agenda_mode,
            display_names: self.display_names.clone(),
        }
    }
}
