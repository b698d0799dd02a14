use watchtonight_core::structured::SiteInfo;

/// Runtime configuration, read from `WATCHTONIGHT_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL the pipeline's `movies.json` / `tv_seasons.json` live under.
    pub content_url: String,
    /// Streaming-availability region treated as home.
    pub region: String,
    pub db_path: String,
    pub bind_addr: String,
    pub site_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            content_url: "http://127.0.0.1:5173/content".to_string(),
            region: "US".to_string(),
            db_path: "watchtonight.db".to_string(),
            bind_addr: "0.0.0.0:8097".to_string(),
            site_url: SiteInfo::default().url,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        Self {
            content_url: get("WATCHTONIGHT_CONTENT_URL", defaults.content_url),
            region: get("WATCHTONIGHT_REGION", defaults.region).to_uppercase(),
            db_path: get("WATCHTONIGHT_DB", defaults.db_path),
            bind_addr: get("WATCHTONIGHT_BIND", defaults.bind_addr),
            site_url: get("WATCHTONIGHT_SITE_URL", defaults.site_url),
        }
    }

    pub fn site_info(&self) -> SiteInfo {
        SiteInfo {
            url: self.site_url.clone(),
            ..SiteInfo::default()
        }
    }
}
