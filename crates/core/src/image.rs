//! TMDB image CDN URLs.
//!
//! Paths come from the content pipeline with their leading slash
//! (`/abc123.jpg`), so the URL is a plain concatenation of base, size token
//! and path.

pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/";

/// Size used for card and dialog posters.
pub const POSTER_SIZE: &str = "w500";

/// Size used for streaming-provider badges.
pub const LOGO_SIZE: &str = "w45";

/// Widths offered to the browser for the dialog poster.
pub const POSTER_SRCSET_SIZES: [&str; 3] = ["w185", "w342", "w500"];

/// Build a fully-qualified image URL, or `None` when there is no path.
///
/// The size token is not validated.
pub fn build_image_url(path: Option<&str>, size: &str) -> Option<String> {
    match path {
        Some(p) if !p.is_empty() => Some(format!("{IMAGE_BASE}{size}{p}")),
        _ => None,
    }
}

/// Build a responsive `srcset` value (`"<url> 185w, <url> 342w"`).
///
/// The width is the token with every `w` removed, read as a number (a bare
/// `"w"` is width 0). Tokens whose width is not a finite number are
/// skipped. Returns an empty string when there is no path.
pub fn build_source_set(path: Option<&str>, sizes: &[&str]) -> String {
    sizes
        .iter()
        .filter_map(|size| {
            let width = token_width(size)?;
            let url = build_image_url(path, size)?;
            Some(format!("{url} {width}w"))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn token_width(size: &str) -> Option<f64> {
    let digits = size.replace('w', "");
    let digits = digits.trim();
    if digits.is_empty() {
        return Some(0.0);
    }
    digits.parse::<f64>().ok().filter(|w| w.is_finite())
}
