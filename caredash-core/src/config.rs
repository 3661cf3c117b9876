use crate::{AddPolicy, FileLayoutStore, Grid};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config directory not found")]
    NoConfigDir,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigFile {
    pub grid: GridConfig,
    pub layout: LayoutConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: u16,
    pub row_height: u16,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub store: Option<PathBuf>,
    pub add_policy: AddPolicy,
    pub defaults: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for GridConfig {
    fn default() -> Self {
        let grid = Grid::default();
        Self {
            columns: grid.columns(),
            row_height: grid.row_height(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            store: None,
            add_policy: AddPolicy::Immediate,
            defaults: vec![
                "metrics-hospitals".to_string(),
                "metrics-clinics".to_string(),
                "metrics-providers".to_string(),
                "metrics-devices".to_string(),
                "chart-patient-visits".to_string(),
                "management-tickets".to_string(),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl ConfigFile {
    pub fn load() -> Result<Self, ConfigError> {
        // Priority: ./caredash.toml -> ~/.config/caredash/caredash.toml -> default
        let paths = [
            std::env::current_dir()?.join("caredash.toml"),
            dirs::config_dir()
                .ok_or(ConfigError::NoConfigDir)?
                .join("caredash/caredash.toml"),
        ];

        for path in paths {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid.columns, self.grid.row_height)
    }

    pub fn store_path(&self) -> PathBuf {
        self.layout
            .store
            .clone()
            .unwrap_or_else(FileLayoutStore::default_path)
    }

    /// `<data dir>/caredash/caredash.log` unless configured
    pub fn log_path(&self) -> PathBuf {
        self.logging.file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("caredash"))
                .unwrap_or_else(|| PathBuf::from("."))
                .join("caredash.log")
        })
    }
}
