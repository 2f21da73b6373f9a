use serde::{Deserialize, Serialize};
use url::Url;

/// Overview length, in characters, kept in a recommendation before truncation.
pub const OVERVIEW_PREVIEW_CHARS: usize = 150;
pub const ELLIPSIS: &str = "...";
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/200x300?text=No+Image";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub overview: String,
    #[serde(default)]
    pub poster_url: Option<String>,
}

impl MovieRecord {
    pub fn new(title: impl Into<String>, overview: impl Into<String>, poster_url: Option<String>) -> Self {
        Self { title: title.into(), overview: overview.into(), poster_url }
    }
}

/// One ranked result, shaped for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub overview: String,
    pub poster_url: String,
    pub similarity_score: f64,
}

/// Truncate to [`OVERVIEW_PREVIEW_CHARS`] characters plus [`ELLIPSIS`]; shorter text is returned as is.
pub fn preview_overview(overview: &str) -> String {
    match overview.char_indices().nth(OVERVIEW_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &overview[..cut], ELLIPSIS),
        None => overview.to_string(),
    }
}

/// Stored poster when it is an http(s) URL, the placeholder otherwise.
pub fn resolve_poster(poster_url: Option<&str>) -> String {
    poster_url
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| Url::parse(s).ok().filter(|u| matches!(u.scheme(), "http" | "https")).map(|_| s.to_string()))
        .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string())
}

/// Clamp to [0, 1] and round to three decimals.
pub fn round_score(score: f32) -> f64 {
    let clamped = (score as f64).clamp(0.0, 1.0);
    (clamped * 1000.0).round() / 1000.0
}
