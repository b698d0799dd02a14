use serde::{Deserialize, Serialize};

/// Content record discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Movie,
    /// One season of a TV series.
    Tv,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier as the content pipeline wrote it: TMDB uses numbers, the
/// pipeline sometimes synthesizes strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    /// Read a truthy scalar id: `0`, `""` and non-scalars yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => match n.as_i64().or_else(|| whole_float(n)) {
                Some(0) => None,
                Some(i) => Some(Self::Number(i)),
                None => Some(Self::Text(n.to_string())),
            },
            serde_json::Value::String(s) if !s.is_empty() => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

/// `8.0` is the same id as `8`.
fn whole_float(n: &serde_json::Number) -> Option<i64> {
    let f = n.as_f64()?;
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A place to stream, rent or buy a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingProvider {
    pub id: RawId,
    pub name: String,
    pub logo_url: Option<String>,
}

/// Fields only TV seasons carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonDetails {
    pub series_name: Option<String>,
    pub season_number: Option<i64>,
    pub episode_count: Option<i64>,
    pub network: Option<String>,
    pub runtime: Option<i64>,
    pub status: Option<String>,
    pub imdb_rating: Option<f64>,
}

/// Display-ready movie or season, derived once from the raw document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub id: RawId,
    pub kind: ContentKind,
    pub title: String,
    /// Short blurb: description, else overview.
    pub description: Option<String>,
    /// Long blurb: overview, else description.
    pub overview: Option<String>,
    pub genres: Vec<String>,
    pub director: Option<String>,
    pub top_actors: Vec<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub poster_url: Option<String>,
    pub poster_src_set: String,
    pub trailer_url: Option<String>,
    pub trailer_embed_url: Option<String>,
    pub streaming_url: Option<String>,
    pub rental_url: Option<String>,
    pub streaming_providers: Vec<StreamingProvider>,
    pub info_url: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub season: Option<SeasonDetails>,
}
