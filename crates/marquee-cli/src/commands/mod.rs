pub mod config;
pub mod locales;
pub mod prompts;
pub mod resolve;
pub mod resolve_ui;
pub mod review;
pub mod search;
pub mod show;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use marquee_config::{Config, CredentialStore, PathManager};
use marquee_sources::{create_metadata_client, MetadataClient, MetadataError};

/// Paths, configuration and stored credentials shared by the commands
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub credentials: CredentialStore,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();

        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

        let credentials_file = paths.credentials_file();
        let mut credentials = CredentialStore::new(credentials_file.clone());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

        Ok(Self { paths, config, credentials })
    }

    pub fn metadata_client(&self, api_key: Option<&str>) -> Result<Box<dyn MetadataClient>> {
        create_metadata_client(&self.config, &self.credentials, api_key).map_err(|e| match e {
            MetadataError::MissingApiKey => eyre!(
                "No TMDB API key configured. Run 'marquee config api-key' or set MARQUEE_TMDB_API_KEY."
            ),
            other => eyre!("Failed to create TMDB client: {}", other),
        })
    }

    /// Locale from the command line, falling back to `curation.locale`
    pub fn locale(&self, requested: Option<String>) -> String {
        requested
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.config.curation.locale.clone())
    }
}
