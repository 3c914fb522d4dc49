//! In-memory metadata client for pipeline and session tests.

use async_trait::async_trait;
use marquee_models::{Genre, Locale, MovieDetail, MovieId, SearchMatch};
use marquee_sources::{MetadataClient, MetadataError};
use std::collections::HashMap;
use std::sync::Mutex;

enum StubDetail {
    Found(MovieDetail),
    Malformed,
    Unavailable,
}

#[derive(Default)]
pub struct StubClient {
    searches: HashMap<String, Option<Vec<SearchMatch>>>, // None = upstream failure
    details: HashMap<MovieId, StubDetail>,
    calls: Mutex<Vec<String>>,
}

pub fn detail(id: MovieId, title: &str, genres: &[&str]) -> MovieDetail {
    MovieDetail {
        id,
        title: title.to_string(),
        overview: format!("About {}", title),
        poster_path: Some(format!("/{}.jpg", id)),
        release_date: "2001-01-01".to_string(),
        vote_average: Some(7.5),
        runtime: Some(110),
        genres: Some(
            genres
                .iter()
                .enumerate()
                .map(|(i, name)| Genre { id: i as u32, name: name.to_string() })
                .collect(),
        ),
        credits: None,
        videos: None,
    }
}

fn hit(id: MovieId, title: &str) -> SearchMatch {
    SearchMatch {
        id,
        title: title.to_string(),
        release_date: Some("2001-01-01".to_string()),
    }
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Title searches to a single hit whose detail resolves
    pub fn with_movie(mut self, title: &str, id: MovieId, genres: &[&str]) -> Self {
        self.searches.insert(title.to_string(), Some(vec![hit(id, title)]));
        self.details.insert(id, StubDetail::Found(detail(id, title, genres)));
        self
    }

    pub fn with_search(mut self, title: &str, results: Vec<SearchMatch>) -> Self {
        self.searches.insert(title.to_string(), Some(results));
        self
    }

    /// Several hits, all with resolvable details
    pub fn with_search_results(mut self, query: &str, hits: Vec<(MovieId, &str)>, genres: &[&str]) -> Self {
        let mut results = Vec::new();
        for (id, title) in hits {
            results.push(hit(id, title));
            self.details.insert(id, StubDetail::Found(detail(id, title, genres)));
        }
        self.searches.insert(query.to_string(), Some(results));
        self
    }

    pub fn with_search_failure(mut self, title: &str) -> Self {
        self.searches.insert(title.to_string(), None);
        self
    }

    /// Title searches fine but its detail fails (malformed or unavailable)
    pub fn with_broken_detail(mut self, title: &str, id: MovieId, malformed: bool) -> Self {
        self.searches.insert(title.to_string(), Some(vec![hit(id, title)]));
        let broken = if malformed { StubDetail::Malformed } else { StubDetail::Unavailable };
        self.details.insert(id, broken);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MetadataClient for StubClient {
    fn provider_name(&self) -> &str {
        "stub"
    }

    fn default_locale(&self) -> &str {
        "en-US"
    }

    fn image_base_url(&self) -> &str {
        "http://images.test"
    }

    async fn search(&self, query: &str, locale: &str) -> Result<Vec<SearchMatch>, MetadataError> {
        self.record_call(format!("search:{}:{}", query, locale));
        match self.searches.get(query) {
            Some(Some(results)) => Ok(results.clone()),
            Some(None) => Err(MetadataError::upstream(format!("search '{}'", query), "502 Bad Gateway")),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_detail(&self, id: MovieId, locale: &str) -> Result<MovieDetail, MetadataError> {
        self.record_call(format!("detail:{}:{}", id, locale));
        match self.details.get(&id) {
            Some(StubDetail::Found(detail)) => Ok(detail.clone()),
            Some(StubDetail::Malformed) => Err(MetadataError::malformed(format!("movie {}", id), "missing field `id`")),
            Some(StubDetail::Unavailable) | None => {
                Err(MetadataError::upstream(format!("movie {}", id), "404 Not Found"))
            }
        }
    }

    async fn list_locales(&self) -> Vec<Locale> {
        Vec::new()
    }
}
