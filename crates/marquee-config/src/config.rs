use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_LOCALE: &str = "en-US";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub curation: CurationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Locale used when a localized overview comes back empty
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurationConfig {
    /// Locale requested for search and detail lookups
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Manual-add suggestions are only fetched for queries at least this long
    #[serde(default = "default_suggestion_min_chars")]
    pub suggestion_min_chars: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_suggestion_min_chars() -> usize {
    3
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            image_base_url: default_image_base_url(),
            default_locale: default_locale(),
        }
    }
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            suggestion_min_chars: default_suggestion_min_chars(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, or defaults when it does not exist yet
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("tmdb.api_base_url", &self.tmdb.api_base_url),
            ("tmdb.image_base_url", &self.tmdb.image_base_url),
        ] {
            if url.trim().is_empty() {
                return Err(anyhow::anyhow!("{} cannot be empty", name));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow::anyhow!("{} must be an http(s) URL: {}", name, url));
            }
        }

        if self.tmdb.default_locale.trim().is_empty() {
            return Err(anyhow::anyhow!("tmdb.default_locale cannot be empty"));
        }
        if self.curation.locale.trim().is_empty() {
            return Err(anyhow::anyhow!("curation.locale cannot be empty"));
        }

        Ok(())
    }

    /// Set a value by dotted key, as used by `marquee config set`
    pub fn set_value(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "tmdb.api_base_url" => self.tmdb.api_base_url = value.trim_end_matches('/').to_string(),
            "tmdb.image_base_url" => self.tmdb.image_base_url = value.trim_end_matches('/').to_string(),
            "tmdb.default_locale" => self.tmdb.default_locale = value.to_string(),
            "curation.locale" => self.curation.locale = value.to_string(),
            "curation.suggestion_min_chars" => {
                self.curation.suggestion_min_chars = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("suggestion_min_chars must be a number, got '{}'", value))?;
            }
            "logging.file" => {
                self.logging.file = if value.is_empty() { None } else { Some(PathBuf::from(value)) };
            }
            _ => return Err(anyhow::anyhow!("Unknown config key: {}", key)),
        }
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.curation.locale = "fr-FR".to_string();
        config.curation.suggestion_min_chars = 4;

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.curation.locale, "fr-FR");
        assert_eq!(loaded.curation.suggestion_min_chars, 4);
        assert_eq!(loaded.tmdb.default_locale, DEFAULT_LOCALE);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[curation]\nlocale = \"de-DE\"\n").unwrap();
        assert_eq!(config.curation.locale, "de-DE");
        assert_eq!(config.curation.suggestion_min_chars, 3);
        assert_eq!(config.tmdb.api_base_url, "https://api.themoviedb.org/3");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.curation.locale, DEFAULT_LOCALE);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.tmdb.api_base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.tmdb.api_base_url = default_api_base_url();
        config.curation.locale = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_set_value() {
        let mut config = Config::default();
        config.set_value("curation.locale", "es-ES").unwrap();
        config.set_value("tmdb.api_base_url", "http://localhost:8080/3/").unwrap();
        assert_eq!(config.curation.locale, "es-ES");
        assert_eq!(config.tmdb.api_base_url, "http://localhost:8080/3");

        assert!(config.set_value("curation.suggestion_min_chars", "many").is_err());
        assert!(config.set_value("nope", "1").is_err());
    }
}
