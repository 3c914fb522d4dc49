use marquee_models::MovieId;
use marquee_sources::MetadataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurationError {
    #[error("no match found for '{0}'")]
    NoMatch(String),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("movie {0} is already in the list")]
    DuplicateRecord(MovieId),

    #[error("movie {0} is not in the list")]
    UnknownRecord(MovieId),

    #[error("edited record has id {found}, expected {expected}")]
    IdMismatch { expected: MovieId, found: MovieId },

    #[error("invalid value for {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("no candidate at line {0}")]
    UnknownCandidate(usize),

    #[error("no edit in progress")]
    NoActiveEdit,

    #[error("a resolution run is already in progress")]
    PipelineBusy,
}

pub type Result<T> = std::result::Result<T, CurationError>;
