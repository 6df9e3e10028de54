use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{DEFAULT_LOCAL_IP, DEFAULT_NAO_PORT, DEFAULT_SIM_PORT};
use crate::tracking::domain::color_preset::ColorPreset;
use crate::tracking::infrastructure::color_blob_locator::LocatorConfig;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingSettings {
    pub color: ColorPreset,
    pub scale: f64,
    pub erode_iterations: u8,
    pub dilate_iterations: u8,
    pub draw: bool,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        let locator = LocatorConfig::default();
        Self {
            color: ColorPreset::Red,
            scale: locator.scale,
            erode_iterations: locator.erode_iterations,
            dilate_iterations: locator.dilate_iterations,
            draw: locator.draw,
        }
    }
}

impl TrackingSettings {
    pub fn locator_config(&self) -> LocatorConfig {
        LocatorConfig {
            scale: self.scale,
            erode_iterations: self.erode_iterations,
            dilate_iterations: self.dilate_iterations,
            draw: self.draw,
            ..LocatorConfig::default()
        }
    }
}

/// Where the vendor tools live and how to reach them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub simulator_dir: PathBuf,
    pub daemon_dir: PathBuf,
    pub scenes_dir: PathBuf,
    pub local_ip: String,
    pub sim_port: u16,
    pub nao_port: u16,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            simulator_dir: PathBuf::from("/opt/V-REP"),
            daemon_dir: PathBuf::from("/opt/choregraphe/bin"),
            scenes_dir: PathBuf::from("scenes"),
            local_ip: DEFAULT_LOCAL_IP.to_string(),
            sim_port: DEFAULT_SIM_PORT,
            nao_port: DEFAULT_NAO_PORT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tracking: TrackingSettings,
    pub simulation: SimulationSettings,
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("naotrack").join("settings.json"))
    }

    /// User settings, or defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                log::warn!("{e}; using defaults");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(write_err)
    }
}
