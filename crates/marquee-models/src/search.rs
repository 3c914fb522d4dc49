use serde::{Deserialize, Serialize};
use crate::movie::{year_prefix, MovieId};

/// A single upstream search hit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchMatch {
    pub id: MovieId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl SearchMatch {
    pub fn release_year(&self) -> Option<&str> {
        self.release_date.as_deref().and_then(year_prefix)
    }

    /// Suggestion label, e.g. "The Matrix (1999)"
    pub fn label(&self) -> String {
        match self.release_year() {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}
