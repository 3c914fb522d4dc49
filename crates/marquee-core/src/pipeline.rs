use marquee_models::{MovieId, MovieRecord};
use marquee_sources::MetadataClient;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use crate::error::{CurationError, Result};
use crate::normalize::normalize_with_image_base;
use crate::parser::Candidate;

/// Why a candidate produced no record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SkipReason {
    NoMatch,
    Upstream(String),
    Malformed(String),
    /// Top match was already resolved from an earlier line
    Duplicate(MovieId),
}

impl From<CurationError> for SkipReason {
    fn from(err: CurationError) -> Self {
        match err {
            CurationError::NoMatch(_) => SkipReason::NoMatch,
            CurationError::Metadata(e) if e.is_malformed() => SkipReason::Malformed(e.to_string()),
            other => SkipReason::Upstream(other.to_string()),
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoMatch => write!(f, "no match"),
            SkipReason::Upstream(msg) => write!(f, "upstream error: {}", msg),
            SkipReason::Malformed(msg) => write!(f, "malformed response: {}", msg),
            SkipReason::Duplicate(id) => write!(f, "duplicate of movie {}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedCandidate {
    pub line: usize, // Index into the candidate list
    pub title: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolutionReport {
    pub attempted: usize,
    pub resolved: usize,
    pub skipped: Vec<SkippedCandidate>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutcome {
    Resolved(MovieId),
    Skipped(SkipReason),
}

/// Progress notifications emitted while a run is in flight
#[derive(Debug)]
pub enum ProgressEvent<'a> {
    Started { total: usize },
    Candidate {
        position: usize, // 1-based among included candidates
        total: usize,
        title: &'a str,
        outcome: &'a CandidateOutcome,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum PipelineState {
    #[default]
    Idle,
    Running { processed: usize, total: usize },
    Done(ResolutionReport),
}

/// Sequential title resolution: search, take the top match, fetch detail, normalize.
///
/// One candidate is fully resolved before the next starts, so at most one
/// upstream request is in flight. Failures skip the candidate and never stop the run.
#[derive(Debug, Default)]
pub struct ResolutionPipeline {
    state: PipelineState,
}

impl ResolutionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, PipelineState::Running { .. })
    }

    pub fn report(&self) -> Option<&ResolutionReport> {
        match &self.state {
            PipelineState::Done(report) => Some(report),
            _ => None,
        }
    }

    /// Back to `Idle`, e.g. when a new list is loaded
    pub fn reset(&mut self) {
        self.state = PipelineState::Idle;
    }

    pub async fn run<C, F>(
        &mut self,
        client: &C,
        candidates: &[Candidate],
        locale: &str,
        mut on_progress: F,
    ) -> Result<Vec<MovieRecord>>
    where
        C: MetadataClient + ?Sized,
        F: FnMut(ProgressEvent<'_>),
    {
        if self.is_running() {
            return Err(CurationError::PipelineBusy);
        }

        let included: Vec<(usize, &Candidate)> = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.include)
            .collect();
        let total = included.len();

        info!(total, excluded = candidates.len() - total, locale = %locale, "Starting title resolution");
        self.state = PipelineState::Running { processed: 0, total };
        on_progress(ProgressEvent::Started { total });

        let mut records = Vec::with_capacity(total);
        let mut seen: HashSet<MovieId> = HashSet::new();
        let mut report = ResolutionReport {
            attempted: total,
            ..ResolutionReport::default()
        };

        for (position, (line, candidate)) in included.into_iter().enumerate() {
            let outcome = match resolve_title(client, &candidate.title, locale, &seen).await {
                Ok(record) => {
                    debug!(title = %candidate.title, id = record.id, "Resolved candidate");
                    seen.insert(record.id);
                    let id = record.id;
                    records.push(record);
                    report.resolved += 1;
                    CandidateOutcome::Resolved(id)
                }
                Err(reason) => {
                    warn!("Skipping '{}' (line {}): {}", candidate.title, line + 1, reason);
                    report.skipped.push(SkippedCandidate {
                        line,
                        title: candidate.title.clone(),
                        reason: reason.clone(),
                    });
                    CandidateOutcome::Skipped(reason)
                }
            };

            self.state = PipelineState::Running { processed: position + 1, total };
            on_progress(ProgressEvent::Candidate {
                position: position + 1,
                total,
                title: &candidate.title,
                outcome: &outcome,
            });
        }

        info!(
            resolved = report.resolved,
            skipped = report.skipped.len(),
            "Title resolution finished"
        );
        self.state = PipelineState::Done(report);
        Ok(records)
    }
}

async fn resolve_title<C>(
    client: &C,
    title: &str,
    locale: &str,
    seen: &HashSet<MovieId>,
) -> std::result::Result<MovieRecord, SkipReason>
where
    C: MetadataClient + ?Sized,
{
    let matches = client.search(title, locale).await.map_err(CurationError::from)?;
    let top = matches.into_iter().next().ok_or(SkipReason::NoMatch)?;
    if seen.contains(&top.id) {
        return Err(SkipReason::Duplicate(top.id));
    }
    Ok(fetch_record(client, top.id, locale).await?)
}

/// Fetch and normalize a single movie. Nothing is produced unless the detail fetch succeeds.
pub async fn fetch_record<C>(client: &C, id: MovieId, locale: &str) -> Result<MovieRecord>
where
    C: MetadataClient + ?Sized,
{
    let detail = client.fetch_detail(id, locale).await?;
    Ok(normalize_with_image_base(&detail, client.image_base_url()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_candidates;
    use crate::test_support::StubClient;

    #[tokio::test]
    async fn test_resolves_in_order() {
        let client = StubClient::new()
            .with_movie("Inception", 27205, &["Action"])
            .with_movie("The Matrix", 603, &["Action"]);
        let candidates = parse_candidates("Inception\n\n  \nThe Matrix\n");

        let mut pipeline = ResolutionPipeline::new();
        let records = pipeline.run(&client, &candidates, "en-US", |_| {}).await.unwrap();

        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![27205, 603]);
        let report = pipeline.report().unwrap();
        assert_eq!(report.resolved, 2);
        assert!(report.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_excluded_candidates_are_never_searched() {
        let client = StubClient::new()
            .with_movie("Alien", 348, &["Horror"])
            .with_movie("Heat", 949, &["Crime"])
            .with_movie("Fargo", 275, &["Crime"]);
        let mut candidates = parse_candidates("Alien\nHeat\nFargo");
        candidates[1].include = false;

        let mut pipeline = ResolutionPipeline::new();
        let records = pipeline.run(&client, &candidates, "en-US", |_| {}).await.unwrap();

        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![348, 275]);
        assert!(!client.calls().iter().any(|c| c.contains("Heat") || c.contains("949")));
        assert_eq!(pipeline.report().unwrap().attempted, 2);
    }

    #[tokio::test]
    async fn test_failures_skip_and_continue() {
        let client = StubClient::new()
            .with_movie("Alien", 348, &["Horror"])
            .with_search("Nonexistent Film", Vec::new())
            .with_search_failure("Flaky")
            .with_movie("Heat", 949, &["Crime"])
            .with_broken_detail("Broken", 13, true)
            .with_broken_detail("Down", 14, false)
            .with_movie("Fargo", 275, &["Crime"]);
        let candidates = parse_candidates("Alien\nNonexistent Film\nFlaky\nHeat\nBroken\nDown\nFargo");

        let mut pipeline = ResolutionPipeline::new();
        let records = pipeline.run(&client, &candidates, "en-US", |_| {}).await.unwrap();

        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![348, 949, 275]);

        let report = pipeline.report().unwrap();
        let reasons: Vec<(usize, &SkipReason)> = report.skipped.iter().map(|s| (s.line, &s.reason)).collect();
        assert_eq!(reasons.len(), 4);
        assert_eq!(reasons[0], (1, &SkipReason::NoMatch));
        assert!(matches!(reasons[1], (2, SkipReason::Upstream(_))));
        assert!(matches!(reasons[2], (4, SkipReason::Malformed(_))));
        assert!(matches!(reasons[3], (5, SkipReason::Upstream(_))));
    }

    #[tokio::test]
    async fn test_only_top_match_is_used() {
        let client = StubClient::new().with_search_results(
            "Dune",
            vec![(438631, "Dune"), (841, "Dune (1984)")],
            &["Science Fiction"],
        );
        let candidates = parse_candidates("Dune");

        let mut pipeline = ResolutionPipeline::new();
        let records = pipeline.run(&client, &candidates, "en-US", |_| {}).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 438631);
        assert!(!client.calls().contains(&"detail:841:en-US".to_string()));
    }

    #[tokio::test]
    async fn test_duplicate_lines_resolve_once() {
        let client = StubClient::new().with_movie("Heat", 949, &["Crime"]);
        let candidates = parse_candidates("Heat\nHeat");

        let mut pipeline = ResolutionPipeline::new();
        let records = pipeline.run(&client, &candidates, "en-US", |_| {}).await.unwrap();

        assert_eq!(records.len(), 1);
        let report = pipeline.report().unwrap();
        assert_eq!(report.skipped[0].reason, SkipReason::Duplicate(949));
        assert_eq!(client.calls().iter().filter(|c| c.starts_with("detail:")).count(), 1);
    }

    #[tokio::test]
    async fn test_calls_are_sequential() {
        let client = StubClient::new()
            .with_movie("Alien", 348, &[])
            .with_movie("Heat", 949, &[]);
        let candidates = parse_candidates("Alien\nHeat");

        let mut pipeline = ResolutionPipeline::new();
        pipeline.run(&client, &candidates, "fr-FR", |_| {}).await.unwrap();

        assert_eq!(
            client.calls(),
            vec!["search:Alien:fr-FR", "detail:348:fr-FR", "search:Heat:fr-FR", "detail:949:fr-FR"]
        );
    }

    #[tokio::test]
    async fn test_progress_events() {
        let client = StubClient::new().with_movie("Alien", 348, &[]);
        let candidates = parse_candidates("Alien\nMissing");

        let mut events = Vec::new();
        let mut pipeline = ResolutionPipeline::new();
        pipeline
            .run(&client, &candidates, "en-US", |event| match event {
                ProgressEvent::Started { total } => events.push(format!("start:{}", total)),
                ProgressEvent::Candidate { position, title, outcome, .. } => {
                    let ok = matches!(outcome, CandidateOutcome::Resolved(_));
                    events.push(format!("{}:{}:{}", position, title, ok));
                }
            })
            .await
            .unwrap();

        assert_eq!(events, vec!["start:2", "1:Alien:true", "2:Missing:false"]);
        assert!(matches!(pipeline.state(), PipelineState::Done(_)));
    }

    #[tokio::test]
    async fn test_empty_candidate_list() {
        let client = StubClient::new();
        let mut pipeline = ResolutionPipeline::new();
        let records = pipeline.run(&client, &[], "en-US", |_| {}).await.unwrap();

        assert!(records.is_empty());
        assert_eq!(pipeline.report().unwrap().attempted, 0);
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_record_uses_client_image_base() {
        let client = StubClient::new().with_movie("Alien", 348, &["Horror"]);
        let record = fetch_record(&client, 348, "en-US").await.unwrap();

        assert_eq!(record.poster_url.as_deref(), Some("http://images.test/348.jpg"));
        assert!(fetch_record(&client, 1, "en-US").await.is_err());
    }

    #[test]
    fn test_skip_reason_from_error() {
        use marquee_sources::MetadataError;

        assert_eq!(SkipReason::from(CurationError::NoMatch("x".to_string())), SkipReason::NoMatch);
        assert!(matches!(
            SkipReason::from(CurationError::Metadata(MetadataError::malformed("movie 1", "bad"))),
            SkipReason::Malformed(_)
        ));
        assert!(matches!(
            SkipReason::from(CurationError::Metadata(MetadataError::upstream("movie 1", "timeout"))),
            SkipReason::Upstream(_)
        ));
    }
}
