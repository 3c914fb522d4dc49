use marquee_config::CurationConfig;
use marquee_models::{ExportPayload, MovieId, MovieRecord, SearchMatch};
use marquee_sources::MetadataClient;
use std::str::FromStr;
use tracing::{debug, info, warn};
use crate::error::{CurationError, Result};
use crate::parser::{parse_candidates, Candidate};
use crate::pipeline::{fetch_record, PipelineState, ProgressEvent, ResolutionPipeline, ResolutionReport};
use crate::review_list::{GenreFilter, MoveTarget, ReviewList};

const MAX_ACTORS: usize = 5;

/// Record fields the edit flow can change. The id is not editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Title,
    ReleaseDate,
    Rating,
    Duration,
    Overview,
    Genres,
    Actors,
    Director,
    TrailerUrl,
    PosterUrl,
}

impl RecordField {
    pub const ALL: [RecordField; 10] = [
        RecordField::Title,
        RecordField::ReleaseDate,
        RecordField::Rating,
        RecordField::Duration,
        RecordField::Overview,
        RecordField::Genres,
        RecordField::Actors,
        RecordField::Director,
        RecordField::TrailerUrl,
        RecordField::PosterUrl,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RecordField::Title => "title",
            RecordField::ReleaseDate => "release",
            RecordField::Rating => "rating",
            RecordField::Duration => "duration",
            RecordField::Overview => "overview",
            RecordField::Genres => "genres",
            RecordField::Actors => "actors",
            RecordField::Director => "director",
            RecordField::TrailerUrl => "trailer",
            RecordField::PosterUrl => "poster",
        }
    }

    /// Current value as the text an editor would show
    pub fn current_value(&self, record: &MovieRecord) -> String {
        match self {
            RecordField::Title => record.title.clone(),
            RecordField::ReleaseDate => record.release_date.clone(),
            RecordField::Rating => record.rating.map(|r| r.to_string()).unwrap_or_default(),
            RecordField::Duration => record.duration_minutes.to_string(),
            RecordField::Overview => record.overview.clone(),
            RecordField::Genres => record.genres.join(", "),
            RecordField::Actors => record.actors.join(", "),
            RecordField::Director => record.director.clone().unwrap_or_default(),
            RecordField::TrailerUrl => record.trailer_url.clone().unwrap_or_default(),
            RecordField::PosterUrl => record.poster_url.clone().unwrap_or_default(),
        }
    }

    /// Parse `value` into the field. On error the record is left untouched.
    pub fn apply(&self, record: &mut MovieRecord, value: &str) -> Result<()> {
        let trimmed = value.trim();
        let invalid = || CurationError::InvalidField {
            field: self.name(),
            value: value.to_string(),
        };

        match self {
            RecordField::Title => record.title = trimmed.to_string(),
            RecordField::ReleaseDate => record.release_date = trimmed.to_string(),
            RecordField::Overview => record.overview = value.to_string(),
            RecordField::Rating => {
                record.rating = if trimmed.is_empty() {
                    None
                } else {
                    let rating: f64 = trimmed.parse().map_err(|_| invalid())?;
                    if !rating.is_finite() || !(0.0..=10.0).contains(&rating) {
                        return Err(invalid());
                    }
                    Some(rating)
                };
            }
            RecordField::Duration => {
                record.duration_minutes = if trimmed.is_empty() {
                    0
                } else {
                    trimmed.parse().map_err(|_| invalid())?
                };
            }
            RecordField::Genres => record.genres = split_list(value),
            RecordField::Actors => {
                let actors = split_list(value);
                if actors.len() > MAX_ACTORS {
                    return Err(invalid());
                }
                record.actors = actors;
            }
            RecordField::Director => record.director = non_empty(trimmed),
            RecordField::TrailerUrl => record.trailer_url = non_empty(trimmed),
            RecordField::PosterUrl => record.poster_url = non_empty(trimmed),
        }
        Ok(())
    }
}

impl FromStr for RecordField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(RecordField::Title),
            "release" | "release_date" => Ok(RecordField::ReleaseDate),
            "rating" => Ok(RecordField::Rating),
            "duration" | "runtime" => Ok(RecordField::Duration),
            "overview" => Ok(RecordField::Overview),
            "genres" => Ok(RecordField::Genres),
            "actors" | "cast" => Ok(RecordField::Actors),
            "director" => Ok(RecordField::Director),
            "trailer" => Ok(RecordField::TrailerUrl),
            "poster" => Ok(RecordField::PosterUrl),
            _ => Err(format!("Unknown field: {}", s)),
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Everything the user is working on, owned by a single writer.
///
/// Presentation layers bind their gestures to these methods; nothing here
/// renders or prompts.
pub struct CurationSession {
    candidates: Vec<Candidate>,
    list: ReviewList,
    locale: String,
    genre_filter: GenreFilter,
    draft: Option<MovieRecord>,
    pipeline: ResolutionPipeline,
    suggestion_min_chars: usize,
}

impl CurationSession {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            candidates: Vec::new(),
            list: ReviewList::new(),
            locale: locale.into(),
            genre_filter: GenreFilter::All,
            draft: None,
            pipeline: ResolutionPipeline::new(),
            suggestion_min_chars: 3,
        }
    }

    pub fn from_config(config: &CurationConfig) -> Self {
        let mut session = Self::new(config.locale.clone());
        session.suggestion_min_chars = config.suggestion_min_chars;
        session
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn review_list(&self) -> &ReviewList {
        &self.list
    }

    pub fn pipeline_state(&self) -> &PipelineState {
        self.pipeline.state()
    }

    /// Load a new upload. Any previous results are discarded.
    pub fn load_text(&mut self, raw: &str) -> usize {
        self.candidates = parse_candidates(raw);
        self.list.clear();
        self.draft = None;
        self.genre_filter = GenreFilter::All;
        self.pipeline.reset();
        debug!(candidates = self.candidates.len(), "Loaded title list");
        self.candidates.len()
    }

    pub fn set_include(&mut self, index: usize, include: bool) -> Result<()> {
        let candidate = self
            .candidates
            .get_mut(index)
            .ok_or(CurationError::UnknownCandidate(index))?;
        candidate.include = include;
        Ok(())
    }

    pub fn toggle_include(&mut self, index: usize) -> Result<bool> {
        let candidate = self
            .candidates
            .get_mut(index)
            .ok_or(CurationError::UnknownCandidate(index))?;
        candidate.include = !candidate.include;
        Ok(candidate.include)
    }

    /// Run the resolution pipeline over included candidates; results replace the list
    pub async fn resolve<C, F>(&mut self, client: &C, on_progress: F) -> Result<ResolutionReport>
    where
        C: MetadataClient + ?Sized,
        F: FnMut(ProgressEvent<'_>),
    {
        let records = self
            .pipeline
            .run(client, &self.candidates, &self.locale, on_progress)
            .await?;

        let rejected = self.list.replace_all(records);
        if !rejected.is_empty() {
            warn!("Dropped {} duplicate record(s) from resolution results", rejected.len());
        }
        self.draft = None;
        self.refresh_genre_filter();

        Ok(self.pipeline.report().cloned().unwrap_or_default())
    }

    /// Suggestions for manual add; short queries return nothing without calling upstream
    pub async fn suggest<C>(&self, client: &C, query: &str) -> Vec<SearchMatch>
    where
        C: MetadataClient + ?Sized,
    {
        let query = query.trim();
        if query.chars().count() < self.suggestion_min_chars {
            return Vec::new();
        }

        match client.search(query, &self.locale).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Suggestion search for '{}' failed: {}", query, e);
                Vec::new()
            }
        }
    }

    /// Fetch a chosen suggestion and append it. On any failure nothing is added.
    pub async fn add_match<C>(&mut self, client: &C, chosen: &SearchMatch) -> Result<MovieId>
    where
        C: MetadataClient + ?Sized,
    {
        if self.list.contains(chosen.id) {
            return Err(CurationError::DuplicateRecord(chosen.id));
        }

        let record = fetch_record(client, chosen.id, &self.locale).await.map_err(|e| {
            warn!("Failed to add '{}': {}", chosen.title, e);
            e
        })?;
        let id = record.id;
        self.list.append(record)?;
        info!(id, title = %chosen.title, "Added movie manually");
        Ok(id)
    }

    pub fn remove(&mut self, id: MovieId) -> Option<MovieRecord> {
        let removed = self.list.remove_by_id(id)?;
        if self.draft.as_ref().is_some_and(|d| d.id == id) {
            self.draft = None;
        }
        self.refresh_genre_filter();
        Some(removed)
    }

    pub fn move_by_id(&mut self, id: MovieId, target: MoveTarget) -> Result<()> {
        self.list.move_by_id(id, target)
    }

    /// Drag-and-drop release: `active` was dropped onto `over`
    pub fn move_onto(&mut self, active: MovieId, over: MovieId) -> Result<()> {
        self.list.move_onto(active, over)
    }

    pub fn begin_edit(&mut self, id: MovieId) -> Result<&MovieRecord> {
        let record = self.list.get(id).cloned().ok_or(CurationError::UnknownRecord(id))?;
        Ok(self.draft.insert(record))
    }

    pub fn draft(&self) -> Option<&MovieRecord> {
        self.draft.as_ref()
    }

    pub fn edit_field(&mut self, field: RecordField, value: &str) -> Result<()> {
        let draft = self.draft.as_mut().ok_or(CurationError::NoActiveEdit)?;
        let mut updated = draft.clone();
        field.apply(&mut updated, value)?;
        *draft = updated;
        Ok(())
    }

    pub fn commit_edit(&mut self) -> Result<MovieId> {
        let draft = self.draft.take().ok_or(CurationError::NoActiveEdit)?;
        let id = draft.id;
        self.list.replace_by_id(id, draft)?;
        self.refresh_genre_filter();
        Ok(id)
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    pub fn genre_filter(&self) -> &GenreFilter {
        &self.genre_filter
    }

    pub fn set_genre_filter(&mut self, filter: GenreFilter) {
        self.genre_filter = filter;
        self.refresh_genre_filter();
    }

    /// Records shown under the current genre filter, in list order
    pub fn visible_records(&self) -> Vec<&MovieRecord> {
        self.list.filter_by_genre(&self.genre_filter).collect()
    }

    pub fn distinct_genres(&self) -> Vec<String> {
        self.list.distinct_genres()
    }

    /// Produce the export payload and clear the session for the next upload
    pub fn save(&mut self) -> ExportPayload {
        let records = self.list.records().to_vec();
        let payload = ExportPayload::new(records, self.locale.clone());
        info!(records = payload.records.len(), locale = %payload.locale, "Saving curated list");

        self.candidates.clear();
        self.list.clear();
        self.draft = None;
        self.genre_filter = GenreFilter::All;
        self.pipeline.reset();
        payload
    }

    /// A genre filter naming a genre no longer in the list falls back to All
    fn refresh_genre_filter(&mut self) {
        if let GenreFilter::Genre(genre) = &self.genre_filter {
            if !self.list.iter().any(|r| r.has_genre(genre)) {
                debug!(genre = %genre, "Genre no longer present, clearing filter");
                self.genre_filter = GenreFilter::All;
            }
        }
    }
}
