use async_trait::async_trait;
use marquee_models::{Locale, MovieDetail, MovieId, SearchMatch};
use crate::error::MetadataError;
use crate::tmdb::DEFAULT_IMAGE_BASE_URL;

/// Capabilities the resolution pipeline needs from a movie metadata provider.
///
/// Implementations must never panic on upstream trouble: every failure is a
/// `MetadataError` so callers can skip the item and carry on.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    fn provider_name(&self) -> &str;

    /// Locale used to fill in an empty localized overview
    fn default_locale(&self) -> &str;

    /// Base URL poster path fragments are appended to
    fn image_base_url(&self) -> &str {
        DEFAULT_IMAGE_BASE_URL
    }

    /// Fuzzy title search, adult titles excluded. No match is `Ok(vec![])`.
    async fn search(&self, query: &str, locale: &str) -> Result<Vec<SearchMatch>, MetadataError>;

    /// Full detail (credits and videos included) for one movie.
    ///
    /// When `locale` is not the default locale and its overview is empty, the
    /// overview (and only the overview) is taken from the default locale. If
    /// that second request fails, the whole lookup fails.
    async fn fetch_detail(&self, id: MovieId, locale: &str) -> Result<MovieDetail, MetadataError>;

    /// Languages the provider can localize into; empty when unavailable.
    async fn list_locales(&self) -> Vec<Locale>;
}
