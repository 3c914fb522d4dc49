pub mod error;
pub mod factory;
pub mod tmdb;
pub mod traits;

pub use error::MetadataError;
pub use factory::{create_metadata_client, resolve_api_key};
pub use tmdb::TmdbClient;
pub use traits::MetadataClient;
