use marquee_models::{MovieId, MovieRecord};
use std::collections::BTreeSet;
use crate::error::{CurationError, Result};

/// Where a record should land when reordered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// Directly in front of another record
    Before(MovieId),
    /// At a position in the list after the moved record is taken out (clamped to the end)
    Index(usize),
}

/// Display-only genre selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Genre(String),
}

impl GenreFilter {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            GenreFilter::All
        } else {
            GenreFilter::Genre(value.to_string())
        }
    }

    pub fn matches(&self, record: &MovieRecord) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Genre(genre) => record.has_genre(genre),
        }
    }
}

/// Ordered collection of resolved movies, keyed by movie id.
///
/// Order is user controlled. Ids are unique: appending an id that is already
/// present is rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewList {
    records: Vec<MovieRecord>,
}

impl ReviewList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn ids(&self) -> Vec<MovieId> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: MovieId) -> Option<&MovieRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn position(&self, id: MovieId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn append(&mut self, record: MovieRecord) -> Result<()> {
        if self.contains(record.id) {
            return Err(CurationError::DuplicateRecord(record.id));
        }
        self.records.push(record);
        Ok(())
    }

    /// Remove a record; absent ids are a no-op
    pub fn remove_by_id(&mut self, id: MovieId) -> Option<MovieRecord> {
        let index = self.position(id)?;
        Some(self.records.remove(index))
    }

    /// Whole-record replace used by the edit flow. Identity cannot change.
    pub fn replace_by_id(&mut self, id: MovieId, record: MovieRecord) -> Result<()> {
        if record.id != id {
            return Err(CurationError::IdMismatch { expected: id, found: record.id });
        }
        let index = self.position(id).ok_or(CurationError::UnknownRecord(id))?;
        self.records[index] = record;
        Ok(())
    }

    pub fn move_by_id(&mut self, id: MovieId, target: MoveTarget) -> Result<()> {
        let from = self.position(id).ok_or(CurationError::UnknownRecord(id))?;

        if let MoveTarget::Before(before) = target {
            if before == id {
                return Ok(());
            }
            if !self.contains(before) {
                return Err(CurationError::UnknownRecord(before));
            }
        }

        let record = self.records.remove(from);
        let to = match target {
            MoveTarget::Index(index) => index.min(self.records.len()),
            // Present: checked above and it is not the removed record
            MoveTarget::Before(before) => self.position(before).unwrap_or(self.records.len()),
        };
        self.records.insert(to, record);
        Ok(())
    }

    /// Drop `active` onto `over`: `active` takes the position `over` held
    pub fn move_onto(&mut self, active: MovieId, over: MovieId) -> Result<()> {
        if active == over {
            return Ok(());
        }
        let from = self.position(active).ok_or(CurationError::UnknownRecord(active))?;
        let to = self.position(over).ok_or(CurationError::UnknownRecord(over))?;
        let record = self.records.remove(from);
        self.records.insert(to, record);
        Ok(())
    }

    /// Records matching the filter, in list order. Never reorders storage.
    pub fn filter_by_genre<'a>(&'a self, filter: &'a GenreFilter) -> impl Iterator<Item = &'a MovieRecord> + 'a {
        self.records.iter().filter(move |r| filter.matches(r))
    }

    /// Every genre present in the list, sorted ascending
    pub fn distinct_genres(&self) -> Vec<String> {
        self.records
            .iter()
            .flat_map(|r| r.genres.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Replace the whole content. Later duplicates of an id are returned, not stored.
    pub fn replace_all(&mut self, records: Vec<MovieRecord>) -> Vec<MovieRecord> {
        self.records.clear();
        let mut rejected = Vec::new();
        for record in records {
            if self.contains(record.id) {
                rejected.push(record);
            } else {
                self.records.push(record);
            }
        }
        rejected
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests;
