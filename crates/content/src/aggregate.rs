use serde::Serialize;
use tracing::info;
use watchtonight_core::timeline::{latest_generated_at, sort_by_release_date_desc};
use watchtonight_core::transform::{TransformOptions, transform_movies, transform_seasons};
use watchtonight_core::{ContentError, ContentKind, NormalizedRecord};

use crate::source::{ContentSource, MOVIES_DOCUMENT, SEASONS_DOCUMENT};

/// Everything the page shows: merged records, newest first, plus the
/// freshness stamp (empty when neither document carried a valid one).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFeed {
    pub items: Vec<NormalizedRecord>,
    pub last_updated: String,
}

impl ContentFeed {
    pub fn movies(&self) -> impl Iterator<Item = &NormalizedRecord> {
        self.of_kind(ContentKind::Movie)
    }

    pub fn seasons(&self) -> impl Iterator<Item = &NormalizedRecord> {
        self.of_kind(ContentKind::Tv)
    }

    fn of_kind(&self, kind: ContentKind) -> impl Iterator<Item = &NormalizedRecord> {
        self.items.iter().filter(move |item| item.kind == kind)
    }
}

/// Fetch both documents concurrently, transform, merge and sort.
///
/// If either fetch fails the whole load fails with that error; there is no
/// partial feed.
pub async fn load_all_content<S>(
    source: &S,
    opts: &TransformOptions,
) -> Result<ContentFeed, ContentError>
where
    S: ContentSource + ?Sized,
{
    let (movies_raw, seasons_raw) = tokio::try_join!(
        source.fetch_json(MOVIES_DOCUMENT),
        source.fetch_json(SEASONS_DOCUMENT),
    )?;

    let movies = transform_movies(&movies_raw, opts);
    let seasons = transform_seasons(&seasons_raw, opts);
    info!(movies = movies.len(), seasons = seasons.len(), "content loaded");

    let mut items = movies;
    items.extend(seasons);

    Ok(ContentFeed {
        items: sort_by_release_date_desc(items),
        last_updated: latest_generated_at(&[
            movies_raw["generated_at"].as_str(),
            seasons_raw["generated_at"].as_str(),
        ]),
    })
}
