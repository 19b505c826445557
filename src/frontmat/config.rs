use crate::error::{FrontmatError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_EXTENSION: &str = ".md";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Default `tracing` filter directive for this verbosity.
    pub fn log_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

impl FromStr for Verbosity {
    type Err = FrontmatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "quiet" => Ok(Verbosity::Quiet),
            "normal" => Ok(Verbosity::Normal),
            "verbose" => Ok(Verbosity::Verbose),
            "debug" => Ok(Verbosity::Debug),
            other => Err(FrontmatError::Config(format!(
                "Unknown verbosity '{}' (expected quiet, normal, verbose or debug)",
                other
            ))),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::Debug => "debug",
        };
        f.write_str(name)
    }
}

/// Settings for frontmat, stored as `config.json` in the user config directory.
///
/// The loaded value is handed to [`crate::api::FrontmatApi::new`]; nothing reads
/// it from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrontmatConfig {
    #[serde(default)]
    pub verbosity: Verbosity,

    /// Compute and report changes without writing any file
    #[serde(default)]
    pub dry_run: bool,

    /// Extensions of the files treated as targets inside a directory
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec![DEFAULT_EXTENSION.to_string()]
}

impl Default for FrontmatConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            dry_run: false,
            extensions: default_extensions(),
        }
    }
}

impl FrontmatConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(FrontmatError::Io)?;
        let config: FrontmatConfig =
            serde_json::from_str(&content).map_err(FrontmatError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(FrontmatError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(FrontmatError::Serialization)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content).map_err(FrontmatError::Io)?;
        Ok(())
    }

    /// Get a setting by its CLI name, formatted for display
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "dry-run" => Some(self.dry_run.to_string()),
            "verbosity" => Some(self.verbosity.to_string()),
            "extensions" => Some(self.extensions.join(",")),
            _ => None,
        }
    }

    /// Set a setting by its CLI name
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "dry-run" => {
                self.dry_run = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("Invalid value for dry-run: {} (true/false)", value))?;
            }
            "verbosity" => {
                self.verbosity = value.parse().map_err(|e: FrontmatError| e.to_string())?;
            }
            "extensions" => {
                self.set_extensions(value.split(','));
                if self.extensions.is_empty() {
                    return Err("At least one extension is required".to_string());
                }
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// Set the target extensions (each normalized to start with a dot)
    pub fn set_extensions<I, S>(&mut self, exts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = exts
            .into_iter()
            .map(|ext| ext.as_ref().trim().to_string())
            .filter(|ext| !ext.is_empty())
            .map(|ext| {
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{}", ext)
                }
            })
            .collect();
    }
}
