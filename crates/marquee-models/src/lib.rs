pub mod detail;
pub mod export;
pub mod locale;
pub mod movie;
pub mod search;

pub use detail::{CastMember, Credits, CrewMember, Genre, MovieDetail, Video, Videos};
pub use export::ExportPayload;
pub use locale::Locale;
pub use movie::{MovieId, MovieRecord};
pub use search::SearchMatch;
