//! `pyme` configuration file.
//!
//! The file lives at `<config dir>/pyme/config.toml` unless `--config` (or
//! `PYME_CONFIG`) points elsewhere. A missing file means defaults. Company
//! RUT and region are checked while loading, so a bad value is reported
//! as a configuration error rather than surfacing later.

use std::path::{Path, PathBuf};

use pyme_core::{Region, Rut};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Directory name under the platform config dir.
pub const PROJECT_NAME: &str = "pyme";

const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PymeConfig {
    /// `tracing` filter used when neither `RUST_LOG` nor `--verbose` is set
    pub log_level: String,
    /// The company operating the ERP
    pub company: CompanyConfig,
    /// Output preferences
    pub display: DisplayConfig,
}

/// The company operating the ERP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyConfig {
    /// Legal name
    pub name: String,
    /// Company RUT, validated on load
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rut: Option<Rut>,
    /// Region of the head office
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

/// Output preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Print a lowercase `k` check digit as `K` when formatting
    pub uppercase_check_digit: bool,
}

impl Default for PymeConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            company: CompanyConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: "Mi Empresa SpA".to_string(),
            rut: None,
            region: None,
        }
    }
}

impl PymeConfig {
    /// Load the configuration, falling back to defaults when the file does
    /// not exist.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(config_path) {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The explicit path if given, otherwise the default location.
    pub fn resolve_config_path(config_path: Option<&str>) -> Option<PathBuf> {
        match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// `<config dir>/pyme/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join(CONFIG_FILE))
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PymeConfig::default();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.company.name, "Mi Empresa SpA");
        assert!(config.company.rut.is_none());
        assert!(!config.display.uppercase_check_digit);
    }

    #[test]
    fn test_parse_full_file() {
        let config = PymeConfig::from_toml_str(
            r#"
            log_level = "info"

            [company]
            name = "Comercial Andes Ltda."
            rut = "76086428-5"
            region = "Región de Valparaíso"

            [display]
            uppercase_check_digit = true
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.company.rut.unwrap().to_string(), "76.086.428-5");
        assert_eq!(config.company.region, Some(Region::Valparaiso));
        assert!(config.display.uppercase_check_digit);
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = PymeConfig::from_toml_str("[display]\nuppercase_check_digit = true\n").unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.company.name, "Mi Empresa SpA");
    }

    #[test]
    fn test_parse_rejects_invalid_company_rut() {
        let err = PymeConfig::from_toml_str("[company]\nrut = \"76086428-4\"\n").unwrap_err();
        assert!(err.to_string().contains("check digit mismatch"));
    }

    #[test]
    fn test_parse_rejects_unknown_region() {
        assert!(PymeConfig::from_toml_str("[company]\nregion = \"Narnia\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        let config = PymeConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config, PymeConfig::default());
    }

    #[test]
    fn test_load_invalid_file_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[company]\nrut = \"12.345.678-9\"\n").unwrap();

        let err = PymeConfig::load(Some(path.to_str().unwrap())).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = PymeConfig::default();
        config.company.rut = Some("12.345.678-5".parse().unwrap());
        config.company.region = Some(Region::Metropolitana);

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("rut = \"12.345.678-5\""));
        assert!(text.contains("[display]"));
        assert_eq!(PymeConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_default_config_path_ends_with_project_file() {
        if let Some(path) = PymeConfig::default_config_path() {
            assert!(path.ends_with("pyme/config.toml"));
        }
    }
}
