//! Runtime configuration for derived goal presentation.

use std::env;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::errors::{Error, Result};
use crate::goals::progress::Rgb;

/// Environment variable naming a JSON config file
pub const CONFIG_PATH_ENV: &str = "GOALTRACK_CONFIG";

/// Mantine `teal.6`
pub const DEFAULT_COMPLETE_COLOR: Rgb = Rgb::new(0x12, 0xb8, 0x86);
/// Mantine `indigo.6`, the app's primary colour
pub const DEFAULT_BEHIND_COLOR: Rgb = Rgb::new(0x4c, 0x6e, 0xf5);

/// The two ends of the progress indicator gradient
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorPalette {
    #[serde_as(as = "DisplayFromStr")]
    pub complete_color: Rgb,
    #[serde_as(as = "DisplayFromStr")]
    pub behind_color: Rgb,
}

impl Default for IndicatorPalette {
    fn default() -> Self {
        IndicatorPalette {
            complete_color: DEFAULT_COMPLETE_COLOR,
            behind_color: DEFAULT_BEHIND_COLOR,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalsConfig {
    pub indicator: IndicatorPalette,
}

impl GoalsConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        debug!("Loaded goals config from {}", path.display());
        Self::from_json_str(&raw)
    }

    /// Config from the file named by `GOALTRACK_CONFIG`, defaults when unset.
    pub fn from_env() -> Result<Self> {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => Ok(Self::default()),
        }
    }
}
