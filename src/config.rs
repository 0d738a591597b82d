//! Configuration handling for the wizard

use crate::domain::countries::{find_country, DEFAULT_COUNTRY};
use crate::i18n::Language;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_COUNTRIES_URL: &str = "https://restcountries.com";
pub const DEFAULT_UNIVERSITIES_URL: &str = "http://universities.hipolabs.com";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 8;

const COUNTRIES_URL_ENV: &str = "ABROAD_COUNTRIES_URL";
const UNIVERSITIES_URL_ENV: &str = "ABROAD_UNIVERSITIES_URL";

/// Which program step a deployment runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramSelector {
    /// Pick one entry of the fixed catalog
    #[default]
    Catalog,
    /// Country, university, field and level backed by directory lookups
    Guided,
}

/// User configuration; every field is optional in the file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface language
    pub language: Option<Language>,
    /// Program selection strategy
    pub program_selector: Option<ProgramSelector>,
    /// Seconds before a directory lookup gives up
    pub lookup_timeout_secs: Option<u64>,
    /// Base URL of the countries directory
    pub countries_url: Option<String>,
    /// Base URL of the universities directory
    pub universities_url: Option<String>,
    /// Where exported registration documents are written
    pub export_dir: Option<PathBuf>,
    /// Country preselected on the personal-info form
    pub default_country: Option<String>,
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "abroad", "abroad-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from the platform config dir, then apply
    /// environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            Some(path) => {
                // first run: leave an editable file behind
                let config = Self::default();
                if let Err(e) = config.save_to(&path) {
                    tracing::warn!("Could not write default config to {}: {}", path.display(), e);
                }
                config
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(COUNTRIES_URL_ENV).filter(|v| !v.is_empty()) {
            self.countries_url = Some(url);
        }
        if let Some(url) = var(UNIVERSITIES_URL_ENV).filter(|v| !v.is_empty()) {
            self.universities_url = Some(url);
        }
    }

    pub fn language(&self) -> Language {
        self.language.unwrap_or_default()
    }

    pub fn program_selector(&self) -> ProgramSelector {
        self.program_selector.unwrap_or_default()
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(
            self.lookup_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_LOOKUP_TIMEOUT_SECS),
        )
    }

    pub fn countries_url(&self) -> &str {
        self.countries_url.as_deref().unwrap_or(DEFAULT_COUNTRIES_URL)
    }

    pub fn universities_url(&self) -> &str {
        self.universities_url
            .as_deref()
            .unwrap_or(DEFAULT_UNIVERSITIES_URL)
    }

    /// Export directory, the current directory when unset
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Preselected country; unknown codes fall back to the default
    pub fn default_country(&self) -> &str {
        self.default_country
            .as_deref()
            .filter(|code| find_country(code).is_some())
            .unwrap_or(DEFAULT_COUNTRY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.language(), Language::En);
        assert_eq!(config.program_selector(), ProgramSelector::Catalog);
        assert_eq!(config.lookup_timeout(), Duration::from_secs(8));
        assert_eq!(config.countries_url(), DEFAULT_COUNTRIES_URL);
        assert_eq!(config.default_country(), "CM");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            language: Some(Language::Fr),
            program_selector: Some(ProgramSelector::Guided),
            lookup_timeout_secs: Some(3),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"fr\""));
        assert!(json.contains("\"guided\""));

        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_config_ignores_extra_fields() {
        let json = r#"{"language": "fr", "theme": "dark"}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.language(), Language::Fr);
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let config = AppConfig {
            lookup_timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(config.lookup_timeout(), Duration::from_secs(8));
    }

    #[test]
    fn test_unknown_default_country_falls_back() {
        let config = AppConfig {
            default_country: Some("ZZ".into()),
            ..Default::default()
        };
        assert_eq!(config.default_country(), DEFAULT_COUNTRY);

        let config = AppConfig {
            default_country: Some("FR".into()),
            ..Default::default()
        };
        assert_eq!(config.default_country(), "FR");
    }

    #[test]
    fn test_env_overrides_urls() {
        let mut config = AppConfig {
            countries_url: Some("http://file-value".into()),
            ..Default::default()
        };
        config.apply_env(|key| match key {
            UNIVERSITIES_URL_ENV => Some("http://localhost:9000".into()),
            COUNTRIES_URL_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.countries_url(), "http://file-value");
        assert_eq!(config.universities_url(), "http://localhost:9000");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            export_dir: Some(dir.path().to_path_buf()),
            program_selector: Some(ProgramSelector::Guided),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
