//! Raw pipeline documents -> [`NormalizedRecord`]s.
//!
//! The input is untrusted: nothing here fails. Missing optional fields get
//! their documented defaults and a document without its collection key
//! yields no records.

use serde_json::Value;

use crate::image::{POSTER_SIZE, POSTER_SRCSET_SIZES, build_image_url, build_source_set};
use crate::providers::{dedupe_providers, has_rent_option};
use crate::raw;
use crate::trailer::trailer_embed_url;
use crate::types::{ContentKind, NormalizedRecord, RawId, SeasonDetails};

const TMDB_SITE: &str = "https://www.themoviedb.org";

#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Streaming-availability region treated as home (ISO 3166-1 code).
    pub region: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            region: "US".to_string(),
        }
    }
}

/// Transform every entry under the document's `movies` key.
pub fn transform_movies(document: &Value, opts: &TransformOptions) -> Vec<NormalizedRecord> {
    collection(document, "movies")
        .iter()
        .map(|m| transform_movie(m, opts))
        .collect()
}

/// Transform every entry under the document's `seasons` key.
pub fn transform_seasons(document: &Value, opts: &TransformOptions) -> Vec<NormalizedRecord> {
    collection(document, "seasons")
        .iter()
        .map(|s| transform_season(s, opts))
        .collect()
}

pub fn transform_movie(movie: &Value, opts: &TransformOptions) -> NormalizedRecord {
    let id = RawId::from_json(&movie["id"]).unwrap_or_else(|| RawId::Text(String::new()));
    let info_url = format!("{TMDB_SITE}/movie/{id}");

    NormalizedRecord {
        title: movie["title"].as_str().unwrap_or_default().to_string(),
        director: raw::owned_text(&movie["director"]),
        release_date: raw::owned_text(&movie["release_date"]),
        info_url,
        season: None,
        ..common_fields(movie, id, ContentKind::Movie, opts)
    }
}

pub fn transform_season(season: &Value, opts: &TransformOptions) -> NormalizedRecord {
    let series_id = raw::scalar(&season["series_id"]);
    let season_number = raw::scalar(&season["season_number"]);
    let series_name = raw::owned_text(&season["series_name"]);

    let id = RawId::from_json(&season["season_id"])
        .unwrap_or_else(|| RawId::Text(format!("{series_id}-s{season_number}")));

    let details = SeasonDetails {
        series_name: series_name.clone(),
        season_number: raw::integer(&season["season_number"]),
        episode_count: raw::integer(&season["episode_count"]),
        network: season["network"].as_str().map(str::to_string),
        runtime: raw::integer(&season["runtime"]),
        status: season["status"].as_str().map(str::to_string),
        imdb_rating: raw::number(&season["ratings"]["imdb"]["rating"]),
    };

    NormalizedRecord {
        title: format!(
            "{} — Season {season_number}",
            series_name.as_deref().unwrap_or("Unknown series")
        ),
        director: None,
        release_date: raw::owned_text(&season["air_date"]),
        info_url: format!("{TMDB_SITE}/tv/{series_id}/season/{season_number}"),
        season: Some(details),
        ..common_fields(season, id, ContentKind::Tv, opts)
    }
}

/// Fields derived the same way for movies and seasons.
fn common_fields(
    item: &Value,
    id: RawId,
    kind: ContentKind,
    opts: &TransformOptions,
) -> NormalizedRecord {
    let description = raw::owned_text(&item["description"]);
    let overview = raw::owned_text(&item["overview"]);
    let poster_path = raw::owned_text(&item["poster_path"]);
    let trailer_url = raw::owned_text(&item["trailer_url"]);

    let availability = &item["streaming_availability"][opts.region.as_str()];
    let services = Some(&availability["services"]).filter(|s| s.is_object());
    let streaming_url = raw::owned_text(&availability["link"]);
    let rental_url = if has_rent_option(services) {
        streaming_url.clone()
    } else {
        None
    };

    NormalizedRecord {
        id,
        kind,
        title: String::new(),
        description: description.clone().or_else(|| overview.clone()),
        overview: overview.or(description),
        genres: raw::string_list(&item["genres"]),
        director: None,
        top_actors: raw::string_list(&item["top_actors"]),
        release_date: None,
        poster_url: build_image_url(poster_path.as_deref(), POSTER_SIZE),
        poster_src_set: build_source_set(poster_path.as_deref(), &POSTER_SRCSET_SIZES),
        poster_path,
        trailer_embed_url: trailer_embed_url(trailer_url.as_deref()),
        trailer_url,
        streaming_url,
        rental_url,
        streaming_providers: dedupe_providers(services),
        info_url: String::new(),
        season: None,
    }
}

fn collection<'a>(document: &'a Value, key: &str) -> &'a [Value] {
    document[key].as_array().map(Vec::as_slice).unwrap_or_default()
}
