//! schema.org JSON-LD for the landing page.

use serde_json::{Value, json};

use crate::types::{ContentKind, NormalizedRecord};

/// Site-level fields of the `WebSite` node.
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub name: String,
    pub url: String,
    pub description: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "WatchTonight".to_string(),
            url: "https://watchtonight.app/".to_string(),
            description: "Recently popular movies available to stream at home.".to_string(),
        }
    }
}

/// Build the `@graph` document: the site plus an ordered `ItemList` of the
/// records, positions starting at 1.
pub fn structured_data(items: &[NormalizedRecord], site: &SiteInfo) -> Value {
    let list: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let schema_type = match item.kind {
                ContentKind::Movie => "Movie",
                ContentKind::Tv => "TVSeason",
            };
            let url = if item.info_url.is_empty() {
                &site.url
            } else {
                &item.info_url
            };
            let mut node = json!({
                "@type": schema_type,
                "name": item.title,
                "url": url,
            });
            if let Some(description) = item.overview.as_ref().or(item.description.as_ref()) {
                node["description"] = json!(description);
            }
            if let Some(image) = &item.poster_url {
                node["image"] = json!(image);
            }
            if let Some(date) = &item.release_date {
                node["datePublished"] = json!(date);
            }
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "item": node,
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@graph": [
            {
                "@type": "WebSite",
                "name": site.name,
                "url": site.url,
                "description": site.description,
                "inLanguage": "en",
            },
            {
                "@type": "ItemList",
                "name": "Tonight’s picks",
                "itemListOrder": "ItemListOrderAscending",
                "numberOfItems": list.len(),
                "itemListElement": list,
            }
        ]
    })
}
