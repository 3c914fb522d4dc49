use async_trait::async_trait;
use marquee_config::TmdbConfig;
use marquee_models::{Locale, MovieDetail, MovieId, SearchMatch};
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};
use crate::error::MetadataError;
use crate::tmdb::api;
use crate::traits::MetadataClient;

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    image_base_url: String,
    default_locale: String,
}

impl TmdbClient {
    pub fn new(api_key: String, config: &TmdbConfig) -> Result<Self, MetadataError> {
        if api_key.trim().is_empty() {
            return Err(MetadataError::MissingApiKey);
        }

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MetadataError::upstream("building HTTP client", e))?;

        Ok(Self {
            client: Arc::new(client),
            api_key,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.trim_end_matches('/').to_string(),
            default_locale: config.default_locale.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MetadataClient for TmdbClient {
    fn provider_name(&self) -> &str {
        "tmdb"
    }

    fn default_locale(&self) -> &str {
        &self.default_locale
    }

    fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    async fn search(&self, query: &str, locale: &str) -> Result<Vec<SearchMatch>, MetadataError> {
        api::search_movies(&self.client, &self.base_url, &self.api_key, query, locale).await
    }

    async fn fetch_detail(&self, id: MovieId, locale: &str) -> Result<MovieDetail, MetadataError> {
        fetch_with_overview_fallback(id, locale, &self.default_locale, |language| async move {
            api::get_movie_details(&self.client, &self.base_url, &self.api_key, id, &language).await
        })
        .await
    }

    async fn list_locales(&self) -> Vec<Locale> {
        match api::get_languages(&self.client, &self.base_url, &self.api_key).await {
            Ok(locales) => locales,
            Err(e) => {
                warn!("Failed to fetch TMDB languages: {}", e);
                Vec::new()
            }
        }
    }
}

/// Whether a localized detail needs its overview filled from the default locale
pub fn needs_overview_fallback(detail: &MovieDetail, locale: &str, default_locale: &str) -> bool {
    detail.overview.trim().is_empty() && locale != default_locale
}

/// Take the overview from `fallback` when it has one; everything else stays localized
pub fn merge_overview_fallback(mut localized: MovieDetail, fallback: MovieDetail) -> MovieDetail {
    if !fallback.overview.trim().is_empty() {
        localized.overview = fallback.overview;
    }
    localized
}

/// Fetch a detail in `locale`, retrying in `default_locale` for the overview only.
///
/// `fetch` performs a single request for the given language. The lookup only
/// succeeds when every request it needed succeeded.
pub async fn fetch_with_overview_fallback<F, Fut>(
    id: MovieId,
    locale: &str,
    default_locale: &str,
    fetch: F,
) -> Result<MovieDetail, MetadataError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<MovieDetail, MetadataError>>,
{
    let localized = fetch(locale.to_string()).await?;
    if !needs_overview_fallback(&localized, locale, default_locale) {
        return Ok(localized);
    }

    debug!(id, locale = %locale, default_locale = %default_locale, "Empty localized overview, falling back");
    match fetch(default_locale.to_string()).await {
        Ok(fallback) => Ok(merge_overview_fallback(localized, fallback)),
        Err(e) => {
            warn!("Overview fallback for movie {} in {} failed: {}", id, default_locale, e);
            Err(e)
        }
    }
}
