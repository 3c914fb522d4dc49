pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, CurationConfig, LoggingConfig, TmdbConfig, DEFAULT_LOCALE};
pub use credentials::{mask_secret, CredentialStore};
pub use paths::{container_base_path, PathManager};
