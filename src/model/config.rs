//! Application configuration structures

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, ConvertResult};

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub passes: PassConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Output options
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Output root used when `--outdir` is not given
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("converted")
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: default_output_dir(),
        }
    }
}

/// Input decoding options
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InputConfig {
    /// Encoding labels tried in order; Latin-1 is always the last resort
    #[serde(default = "default_encodings")]
    pub encodings: Vec<String>,
}

fn default_encodings() -> Vec<String> {
    vec!["utf-8-bom".into(), "shift_jis".into(), "utf-8".into()]
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            encodings: default_encodings(),
        }
    }
}

/// Structural pass toggles (the line rewriter always runs)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PassConfig {
    pub putpixel_shader: bool,
    pub batch_drawpoly: bool,
    pub draw_after_load: bool,
    pub sampler_clamp: bool,
    pub force_blend_none: bool,
}

impl Default for PassConfig {
    fn default() -> Self {
        PassConfig {
            putpixel_shader: true,
            batch_drawpoly: true,
            draw_after_load: true,
            sampler_clamp: true,
            force_blend_none: true,
        }
    }
}

/// UI configuration options
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UiConfig {
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            color: default_color(),
        }
    }
}

impl Config {
    /// Get the a2conv configuration directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            })
            .join("a2conv")
    }

    /// Get the default configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from `path`, or return defaults if the file doesn't exist
    pub fn load_from(path: &Path) -> ConvertResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
        Self::from_toml(&content).map_err(|e| ConvertError::config(path, e))
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
