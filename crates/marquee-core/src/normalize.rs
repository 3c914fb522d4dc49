use marquee_models::{MovieDetail, MovieRecord};
use marquee_sources::tmdb::{DEFAULT_IMAGE_BASE_URL, YOUTUBE_WATCH_URL};

const MAX_ACTORS: usize = 5;

/// Map a detail payload to a review-list record using the default image base
pub fn normalize(detail: &MovieDetail) -> MovieRecord {
    normalize_with_image_base(detail, DEFAULT_IMAGE_BASE_URL)
}

/// Map a detail payload to a review-list record.
///
/// Pure: missing optional sections become empty lists or `None`.
pub fn normalize_with_image_base(detail: &MovieDetail, image_base_url: &str) -> MovieRecord {
    let director = detail.credits.as_ref().and_then(|credits| {
        credits
            .crew
            .iter()
            .find(|person| person.job == "Director")
            .map(|person| person.name.clone())
    });

    let trailer_url = detail.videos.as_ref().and_then(|videos| {
        videos
            .results
            .iter()
            .find(|video| video.site == "YouTube" && video.video_type == "Trailer")
            .map(|video| format!("{}{}", YOUTUBE_WATCH_URL, video.key))
    });

    let actors = detail
        .credits
        .as_ref()
        .map(|credits| {
            credits
                .cast
                .iter()
                .take(MAX_ACTORS)
                .map(|actor| actor.name.clone())
                .collect()
        })
        .unwrap_or_default();

    let genres = detail
        .genres
        .as_ref()
        .map(|genres| genres.iter().map(|g| g.name.clone()).collect())
        .unwrap_or_default();

    let poster_url = detail
        .poster_path
        .as_deref()
        .filter(|path| !path.is_empty())
        .map(|path| format!("{}{}", image_base_url, path));

    MovieRecord {
        id: detail.id,
        title: detail.title.clone(),
        overview: detail.overview.clone(),
        release_date: detail.release_date.clone(),
        rating: detail.vote_average,
        duration_minutes: detail.runtime.unwrap_or(0),
        genres,
        actors,
        director,
        poster_url,
        trailer_url,
    }
}
