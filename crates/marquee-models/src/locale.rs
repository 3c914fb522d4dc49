use serde::{Deserialize, Serialize};

/// Language the metadata API can localize text into
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Locale {
    pub code: String,
    pub display_name: String,
}
