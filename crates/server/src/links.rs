//! "Add to Radarr / Sonarr" deep links.

use reqwest::Url;
use tracing::warn;
use watchtonight_core::{ContentKind, NormalizedRecord};
use watchtonight_settings::ArrUrls;

/// Deep link into the user's Radarr (movies) or Sonarr (seasons) add page.
///
/// `None` when the matching base URL is unset or not an http(s) URL.
pub fn add_url(record: &NormalizedRecord, urls: &ArrUrls) -> Option<String> {
    let (base, term) = match record.kind {
        ContentKind::Movie => (&urls.radarr_url, format!("tmdb:{}", record.id)),
        ContentKind::Tv => {
            let series = record.season.as_ref()?.series_name.clone()?;
            (&urls.sonarr_url, series)
        }
    };
    if base.is_empty() {
        return None;
    }

    let mut url = match Url::parse(&format!("{}/add/new", base.trim_end_matches('/'))) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        _ => {
            warn!(base = %base, "ignoring invalid arr base url");
            return None;
        }
    };
    url.query_pairs_mut().append_pair("term", &term);
    Some(url.into())
}
