pub mod error;
pub mod export;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod review_list;
pub mod session;

#[cfg(test)]
mod test_support;

pub use error::{CurationError, Result};
pub use export::{default_export_path, read_export, write_export};
pub use normalize::{normalize, normalize_with_image_base};
pub use parser::{parse_candidates, parse_titles, Candidate};
pub use pipeline::{
    fetch_record, CandidateOutcome, PipelineState, ProgressEvent, ResolutionPipeline, ResolutionReport,
    SkipReason, SkippedCandidate,
};
pub use review_list::{GenreFilter, MoveTarget, ReviewList};
pub use session::{CurationSession, RecordField};
