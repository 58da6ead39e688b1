use crate::codec::DEFAULT_EXPORT_FILE_NAME;
use crate::error::{MemoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";

/// What an edit does to a memo's display timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPolicy {
    /// Keep the creation timestamp.
    #[default]
    Preserve,
    /// Stamp the memo with the time of the edit.
    Refresh,
}

impl fmt::Display for TimestampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampPolicy::Preserve => write!(f, "preserve"),
            TimestampPolicy::Refresh => write!(f, "refresh"),
        }
    }
}

impl FromStr for TimestampPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(TimestampPolicy::Preserve),
            "refresh" => Ok(TimestampPolicy::Refresh),
            other => Err(format!(
                "Invalid edit_timestamp '{}': expected preserve or refresh",
                other
            )),
        }
    }
}

/// Configuration for memopad, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemoConfig {
    /// Timestamp behaviour when a memo is edited.
    #[serde(default)]
    pub edit_timestamp: TimestampPolicy,

    /// File name `export` writes when no path is given.
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            edit_timestamp: TimestampPolicy::default(),
            export_file_name: default_export_file_name(),
        }
    }
}

impl MemoConfig {
    pub const KEYS: [&'static str; 2] = ["edit_timestamp", "export_file_name"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(MemoError::Io)?;
        let config: MemoConfig =
            serde_json::from_str(&content).map_err(MemoError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(MemoError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(MemoError::Serialization)?;
        fs::write(config_path, content).map_err(MemoError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "edit_timestamp" => Some(self.edit_timestamp.to_string()),
            "export_file_name" => Some(self.export_file_name.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "edit_timestamp" => {
                self.edit_timestamp = value.parse()?;
                Ok(())
            }
            "export_file_name" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err("export_file_name cannot be empty".to_string());
                }
                self.export_file_name = value.to_string();
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }

    /// Every key with its current value, in a stable order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}
