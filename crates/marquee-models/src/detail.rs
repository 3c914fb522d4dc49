use serde::{Deserialize, Serialize};
use crate::movie::MovieId;

/// Raw movie detail payload as returned by the metadata API with
/// `credits` and `videos` appended. Every optional section may be absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MovieDetail {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
    #[serde(default)]
    pub credits: Option<Credits>,
    #[serde(default)]
    pub videos: Option<Videos>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Videos {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    #[serde(default)]
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
