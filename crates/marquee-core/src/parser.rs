use serde::Serialize;

/// One title from the uploaded list, with the user's include choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub title: String,
    pub include: bool,
}

/// Split uploaded text into candidate titles.
///
/// Lines are split on `\n`; blank and whitespace-only lines are dropped and
/// the rest are trimmed. Order is kept and duplicates are not removed.
pub fn parse_titles(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse uploaded text into candidates, all included by default
pub fn parse_candidates(raw: &str) -> Vec<Candidate> {
    parse_titles(raw)
        .into_iter()
        .map(|title| Candidate { title, include: true })
        .collect()
}
