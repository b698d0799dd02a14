use regex::Regex;
use std::sync::LazyLock;

pub const EMBED_BASE: &str = "https://www.youtube.com/embed/";

// watch?v=ID, youtu.be/ID, embed/ID, shorts/ID
static RE_YOUTUBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:https?://)?(?:www\.|m\.)?(?:youtube(?:-nocookie)?\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|v/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[?&#/]|$)",
    )
    .unwrap()
});

/// Embeddable player URL for a YouTube trailer link.
///
/// Non-YouTube links yield `None`; the dialog then hides the trailer button.
pub fn trailer_embed_url(trailer_url: Option<&str>) -> Option<String> {
    let url = trailer_url?.trim();
    let caps = RE_YOUTUBE.captures(url)?;
    Some(format!("{EMBED_BASE}{}", &caps[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMBED: &str = "https://www.youtube.com/embed/dQw4w9WgXcQ";

    #[test]
    fn converts_common_youtube_links() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ&t=42",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abc",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "www.youtube.com/watch?v=dQw4w9WgXcQ",
        ] {
            assert_eq!(trailer_embed_url(Some(url)).as_deref(), Some(EMBED), "{url}");
        }
    }

    #[test]
    fn rejects_other_links() {
        for url in [
            "",
            "https://vimeo.com/123456",
            "https://www.youtube.com/channel/UC1234567890",
            "https://www.youtube.com/watch?v=short",
        ] {
            assert_eq!(trailer_embed_url(Some(url)), None, "{url}");
        }
        assert_eq!(trailer_embed_url(None), None);
    }
}
