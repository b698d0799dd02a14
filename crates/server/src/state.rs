use std::sync::Arc;

use watchtonight_content::ContentView;
use watchtonight_core::structured::SiteInfo;
use watchtonight_settings::{SettingsBackend, SettingsStore};

pub type Settings = SettingsStore<Arc<dyn SettingsBackend>>;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub content: ContentView,
    pub settings: Arc<Settings>,
    pub site: SiteInfo,
}

impl AppState {
    pub fn new(content: ContentView, backend: Arc<dyn SettingsBackend>, site: SiteInfo) -> Self {
        Self {
            content,
            settings: Arc::new(SettingsStore::new(backend)),
            site,
        }
    }
}
