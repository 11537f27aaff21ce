//! Engine configuration.
//!
//! Configuration is a small YAML document:
//!
//! ```yaml
//! tag_libraries: [text, hrefs, quote]
//! template_dirs:
//!   - ./templates
//! ```
//!
//! Both keys are optional. Omitted `tag_libraries` falls back to
//! [`DEFAULT_TAG_LIBRARIES`]; omitted `template_dirs` means only inline and
//! built-in templates are used.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::registry::DEFAULT_TAG_LIBRARIES;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tag library identifiers, in load order. Later libraries override
    /// earlier ones on name clashes.
    pub tag_libraries: Vec<String>,

    /// Directories searched for tag templates before the built-in ones.
    pub template_dirs: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tag_libraries: DEFAULT_TAG_LIBRARIES.iter().map(|s| s.to_string()).collect(),
            template_dirs: Vec::new(),
        }
    }
}

impl Config {
    /// Parses configuration from YAML.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    /// Reads configuration from a YAML file.
    ///
    /// Relative template directories are resolved against the file's own
    /// directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&source)?;
        if let Some(base) = path.parent() {
            for dir in &mut config.template_dirs {
                if dir.is_relative() {
                    *dir = base.join(&*dir);
                }
            }
        }
        Ok(config)
    }
}
