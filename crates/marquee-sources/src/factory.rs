//! Builds the metadata client from configuration and stored credentials.

use marquee_config::{Config, CredentialStore};
use tracing::debug;
use crate::error::MetadataError;
use crate::tmdb::TmdbClient;
use crate::traits::MetadataClient;

/// Pick the API key: explicit override (flag or environment) first, then the credential store
pub fn resolve_api_key(override_key: Option<&str>, credentials: &CredentialStore) -> Option<String> {
    override_key
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .or_else(|| credentials.get_tmdb_api_key().cloned())
}

/// Create the configured metadata client
pub fn create_metadata_client(
    config: &Config,
    credentials: &CredentialStore,
    override_key: Option<&str>,
) -> Result<Box<dyn MetadataClient>, MetadataError> {
    let api_key = resolve_api_key(override_key, credentials).ok_or(MetadataError::MissingApiKey)?;
    let client = TmdbClient::new(api_key, &config.tmdb)?;
    debug!(base_url = %client.base_url(), "Created TMDB metadata client");
    Ok(Box::new(client))
}
