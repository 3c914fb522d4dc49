pub mod api;
pub mod client;

pub use client::{fetch_with_overview_fallback, merge_overview_fallback, needs_overview_fallback, TmdbClient};

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";
