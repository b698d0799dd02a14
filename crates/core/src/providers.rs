use std::collections::HashSet;

use serde_json::Value;

use crate::image::{LOGO_SIZE, build_image_url};
use crate::raw;
use crate::types::{RawId, StreamingProvider};

/// Acquisition buckets in scan order.
pub const BUCKETS: [&str; 3] = ["subscription", "rent", "buy"];

/// Merge the subscription, rent and buy buckets of one region's `services`
/// object into a unique provider list.
///
/// The first entry seen for a `provider_id` wins; entries without a truthy
/// id are dropped. Order is scan order, never sorted.
pub fn dedupe_providers(services: Option<&Value>) -> Vec<StreamingProvider> {
    let Some(services) = services else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut providers = Vec::new();

    let entries = BUCKETS
        .iter()
        .filter_map(|bucket| services[*bucket].as_array())
        .flatten();

    for entry in entries {
        let Some(id) = RawId::from_json(&entry["provider_id"]) else {
            continue;
        };
        if !seen.insert(id.clone()) {
            continue;
        }
        providers.push(StreamingProvider {
            id,
            name: entry["provider_name"].as_str().unwrap_or_default().to_string(),
            logo_url: build_image_url(raw::text(&entry["logo_path"]), LOGO_SIZE),
        });
    }

    providers
}

/// Whether the rent bucket has at least one entry.
pub fn has_rent_option(services: Option<&Value>) -> bool {
    services
        .and_then(|s| s["rent"].as_array())
        .and_then(|rent| rent.first())
        .is_some_and(|first| !first.is_null())
}
