use serde::{Deserialize, Serialize};
use crate::movie::{MovieId, MovieRecord};

/// Value produced by the save action. Persisting it is up to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportPayload {
    pub records: Vec<MovieRecord>,
    pub locale: String,
    pub order: Vec<MovieId>, // Record ids in display order
}

impl ExportPayload {
    pub fn new(records: Vec<MovieRecord>, locale: impl Into<String>) -> Self {
        let order = records.iter().map(|r| r.id).collect();
        Self {
            records,
            locale: locale.into(),
            order,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
