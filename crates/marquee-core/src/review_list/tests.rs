use super::*;

fn record(id: MovieId, title: &str, genres: &[&str]) -> MovieRecord {
    MovieRecord {
        id,
        title: title.to_string(),
        overview: String::new(),
        release_date: String::new(),
        rating: Some(7.0),
        duration_minutes: 100,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        actors: Vec::new(),
        director: None,
        poster_url: None,
        trailer_url: None,
    }
}

fn sample_list() -> ReviewList {
    let mut list = ReviewList::new();
    list.append(record(1, "Alien", &["Horror", "Science Fiction"])).unwrap();
    list.append(record(2, "Heat", &["Crime", "Drama"])).unwrap();
    list.append(record(3, "Arrival", &["Drama", "Science Fiction"])).unwrap();
    list.append(record(4, "Zodiac", &["Crime"])).unwrap();
    list
}

#[test]
fn test_append_keeps_insertion_order() {
    assert_eq!(sample_list().ids(), vec![1, 2, 3, 4]);
}

#[test]
fn test_append_rejects_duplicate_id() {
    let mut list = sample_list();
    let err = list.append(record(2, "Heat (again)", &[])).unwrap_err();
    assert!(matches!(err, CurationError::DuplicateRecord(2)));
    assert_eq!(list.len(), 4);
    assert_eq!(list.get(2).unwrap().title, "Heat");
}

#[test]
fn test_remove_by_id() {
    let mut list = sample_list();
    assert_eq!(list.remove_by_id(2).unwrap().title, "Heat");
    assert_eq!(list.ids(), vec![1, 3, 4]);
    assert!(list.remove_by_id(99).is_none());
    assert_eq!(list.ids(), vec![1, 3, 4]);
}

#[test]
fn test_replace_by_id() {
    let mut list = sample_list();
    let mut edited = list.get(3).unwrap().clone();
    edited.title = "Arrival (2016)".to_string();
    list.replace_by_id(3, edited).unwrap();

    assert_eq!(list.get(3).unwrap().title, "Arrival (2016)");
    assert_eq!(list.ids(), vec![1, 2, 3, 4]);
}

#[test]
fn test_replace_by_id_rejects_identity_change() {
    let mut list = sample_list();
    let other = record(5, "Other", &[]);
    assert!(matches!(
        list.replace_by_id(3, other.clone()),
        Err(CurationError::IdMismatch { expected: 3, found: 5 })
    ));
    assert!(matches!(list.replace_by_id(5, other), Err(CurationError::UnknownRecord(5))));
}

#[test]
fn test_move_before() {
    let mut list = sample_list();
    list.move_by_id(4, MoveTarget::Before(2)).unwrap();
    assert_eq!(list.ids(), vec![1, 4, 2, 3]);

    list.move_by_id(1, MoveTarget::Before(3)).unwrap();
    assert_eq!(list.ids(), vec![4, 2, 1, 3]);

    list.move_by_id(2, MoveTarget::Before(2)).unwrap();
    assert_eq!(list.ids(), vec![4, 2, 1, 3]);
}

#[test]
fn test_move_to_index() {
    let mut list = sample_list();
    list.move_by_id(1, MoveTarget::Index(2)).unwrap();
    assert_eq!(list.ids(), vec![2, 3, 1, 4]);

    list.move_by_id(2, MoveTarget::Index(100)).unwrap();
    assert_eq!(list.ids(), vec![3, 1, 4, 2]);

    list.move_by_id(2, MoveTarget::Index(0)).unwrap();
    assert_eq!(list.ids(), vec![2, 3, 1, 4]);
}

#[test]
fn test_move_unknown_ids() {
    let mut list = sample_list();
    assert!(matches!(list.move_by_id(9, MoveTarget::Index(0)), Err(CurationError::UnknownRecord(9))));
    assert!(matches!(list.move_by_id(1, MoveTarget::Before(9)), Err(CurationError::UnknownRecord(9))));
    assert_eq!(list.ids(), vec![1, 2, 3, 4]);
}

#[test]
fn test_move_onto_drag_semantics() {
    let mut list = sample_list();
    // Dragging down: the dragged record lands after the one it was dropped on
    list.move_onto(1, 3).unwrap();
    assert_eq!(list.ids(), vec![2, 3, 1, 4]);

    // Dragging up: the dragged record lands before it
    list.move_onto(4, 2).unwrap();
    assert_eq!(list.ids(), vec![4, 2, 3, 1]);

    list.move_onto(3, 3).unwrap();
    assert_eq!(list.ids(), vec![4, 2, 3, 1]);
}

#[test]
fn test_filter_by_genre() {
    let list = sample_list();
    let drama: Vec<MovieId> = list
        .filter_by_genre(&GenreFilter::Genre("Drama".to_string()))
        .map(|r| r.id)
        .collect();
    assert_eq!(drama, vec![2, 3]);

    let none: Vec<MovieId> = list
        .filter_by_genre(&GenreFilter::Genre("Western".to_string()))
        .map(|r| r.id)
        .collect();
    assert!(none.is_empty());
}

#[test]
fn test_move_then_filter_all_reproduces_order() {
    let mut list = sample_list();
    list.move_by_id(3, MoveTarget::Before(1)).unwrap();

    let all: Vec<MovieId> = list.filter_by_genre(&GenreFilter::All).map(|r| r.id).collect();
    assert_eq!(all, vec![3, 1, 2, 4]);

    // Filtering is a projection: clearing it restores the full order
    let crime: Vec<MovieId> = list
        .filter_by_genre(&GenreFilter::Genre("Crime".to_string()))
        .map(|r| r.id)
        .collect();
    assert_eq!(crime, vec![2, 4]);

    let all_again: Vec<MovieId> = list.filter_by_genre(&GenreFilter::All).map(|r| r.id).collect();
    assert_eq!(all_again, all);
    assert_eq!(list.ids(), all);
}

#[test]
fn test_distinct_genres_sorted_and_recomputed() {
    let mut list = sample_list();
    assert_eq!(
        list.distinct_genres(),
        vec!["Crime", "Drama", "Horror", "Science Fiction"]
    );

    list.remove_by_id(1);
    assert_eq!(list.distinct_genres(), vec!["Crime", "Drama", "Science Fiction"]);

    list.clear();
    assert!(list.distinct_genres().is_empty());
}

#[test]
fn test_replace_all_drops_later_duplicates() {
    let mut list = sample_list();
    let rejected = list.replace_all(vec![
        record(7, "Se7en", &["Crime"]),
        record(8, "Fargo", &["Crime"]),
        record(7, "Se7en", &["Thriller"]),
    ]);

    assert_eq!(list.ids(), vec![7, 8]);
    assert_eq!(list.get(7).unwrap().genres, vec!["Crime"]);
    assert_eq!(rejected.len(), 1);
}

#[test]
fn test_genre_filter_parse() {
    assert_eq!(GenreFilter::parse("all"), GenreFilter::All);
    assert_eq!(GenreFilter::parse(" "), GenreFilter::All);
    assert_eq!(GenreFilter::parse("Drama"), GenreFilter::Genre("Drama".to_string()));
}
