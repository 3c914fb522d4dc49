use serde::{Deserialize, Serialize};

/// Upstream (TMDB) movie identifier. Unique key within a review list.
pub type MovieId = u64;

/// Normalized movie, the unit stored in a review list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub release_date: String, // ISO date or empty
    pub rating: Option<f64>, // 0-10, None when unavailable
    pub duration_minutes: u32,
    pub genres: Vec<String>,
    pub actors: Vec<String>, // At most 5, billing order
    pub director: Option<String>,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
}

impl MovieRecord {
    /// Rating rendered with one decimal place, or "N/A" when missing or not a number
    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(value) if value.is_finite() => format!("{:.1}", value),
            _ => "N/A".to_string(),
        }
    }

    /// Four-digit release year, when the release date has one
    pub fn release_year(&self) -> Option<&str> {
        year_prefix(&self.release_date)
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

pub(crate) fn year_prefix(date: &str) -> Option<&str> {
    let year = date.get(..4)?;
    if year.chars().all(|c| c.is_ascii_digit()) {
        Some(year)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rating: Option<f64>, release_date: &str) -> MovieRecord {
        MovieRecord {
            id: 27205,
            title: "Inception".to_string(),
            overview: String::new(),
            release_date: release_date.to_string(),
            rating,
            duration_minutes: 148,
            genres: vec!["Action".to_string(), "Science Fiction".to_string()],
            actors: Vec::new(),
            director: None,
            poster_url: None,
            trailer_url: None,
        }
    }

    #[test]
    fn test_rating_label() {
        assert_eq!(record(Some(8.364), "").rating_label(), "8.4");
        assert_eq!(record(Some(10.0), "").rating_label(), "10.0");
        assert_eq!(record(None, "").rating_label(), "N/A");
        assert_eq!(record(Some(f64::NAN), "").rating_label(), "N/A");
    }

    #[test]
    fn test_release_year() {
        assert_eq!(record(None, "2010-07-15").release_year(), Some("2010"));
        assert_eq!(record(None, "").release_year(), None);
        assert_eq!(record(None, "n/a").release_year(), None);
    }

    #[test]
    fn test_has_genre_is_exact() {
        let movie = record(None, "");
        assert!(movie.has_genre("Action"));
        assert!(!movie.has_genre("action"));
        assert!(!movie.has_genre("Science"));
    }
}
