//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// File names searched in the working directory, in order
pub const CONFIG_CANDIDATES: &[&str] = &[".searchdish.toml", "searchdish.toml"];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, a standard location, or defaults
    ///
    /// An explicit path that does not exist is an error; a missing file in
    /// the standard locations is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = match &config_path {
            Some(p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let schema: ConfigSchema = toml::from_str(content)?;
        schema.validate().to_result()?;
        Ok(Self { schema, path: None })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .chain(dirs::config_dir().map(|d| d.join("searchdish").join("config.toml")))
        .find(|p| p.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;

    let schema: ConfigSchema = toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {}", path.display()))?;

    schema
        .validate()
        .to_result()
        .context(format!("Invalid values in {}", path.display()))?;

    Ok(schema)
}
