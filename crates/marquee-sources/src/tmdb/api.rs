use marquee_models::{Locale, MovieDetail, MovieId, SearchMatch};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use crate::error::MetadataError;

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<TmdbSearchHit>,
}

#[derive(Debug, Deserialize)]
struct TmdbSearchHit {
    id: MovieId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbLanguage {
    iso_639_1: String,
    #[serde(default)]
    english_name: String,
}

/// Search movies by free-text title
pub async fn search_movies(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
    language: &str,
) -> Result<Vec<SearchMatch>, MetadataError> {
    let context = format!("search '{}'", query);
    debug!(query = %query, language = %language, "TMDB search");

    let response = client
        .get(format!("{}/search/movie", base_url))
        .query(&[
            ("api_key", api_key),
            ("query", query),
            ("include_adult", "false"),
            ("language", language),
        ])
        .send()
        .await
        .map_err(|e| MetadataError::upstream(&context, e.without_url()))?;

    let parsed: TmdbSearchResponse = read_json(response, &context).await?;
    Ok(parsed
        .results
        .into_iter()
        .map(|hit| SearchMatch {
            id: hit.id,
            title: hit.title,
            release_date: hit.release_date,
        })
        .collect())
}

/// Fetch one movie with credits and videos appended, in a single language
pub async fn get_movie_details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    id: MovieId,
    language: &str,
) -> Result<MovieDetail, MetadataError> {
    let context = format!("movie {} ({})", id, language);
    debug!(id, language = %language, "TMDB movie details");

    let response = client
        .get(format!("{}/movie/{}", base_url, id))
        .query(&[
            ("api_key", api_key),
            ("append_to_response", "credits,videos"),
            ("language", language),
        ])
        .send()
        .await
        .map_err(|e| MetadataError::upstream(&context, e.without_url()))?;

    read_json(response, &context).await
}

/// Fetch the languages TMDB can localize into
pub async fn get_languages(
    client: &Client,
    base_url: &str,
    api_key: &str,
) -> Result<Vec<Locale>, MetadataError> {
    let context = "configuration/languages";

    let response = client
        .get(format!("{}/configuration/languages", base_url))
        .query(&[("api_key", api_key)])
        .send()
        .await
        .map_err(|e| MetadataError::upstream(context, e.without_url()))?;

    let languages: Vec<TmdbLanguage> = read_json(response, context).await?;
    Ok(languages
        .into_iter()
        .map(|lang| Locale {
            code: lang.iso_639_1,
            display_name: lang.english_name,
        })
        .collect())
}

async fn read_json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, MetadataError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        let snippet: String = error_text.chars().take(200).collect();
        return Err(MetadataError::upstream(context, format!("{} - {}", status, snippet)));
    }

    let body = response
        .text()
        .await
        .map_err(|e| MetadataError::upstream(context, e.without_url()))?;
    parse_body(&body, context)
}

fn parse_body<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, MetadataError> {
    serde_json::from_str(body).map_err(|e| MetadataError::malformed(context, e))
}
