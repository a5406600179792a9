//! Link and video recognition.
//!
//! Every function here works on escaped line text, as produced by
//! [`normalize_lines`](crate::normalize::normalize_lines): an `&` inside a
//! URL arrives as `&amp;` and is unescaped before it lands in an attribute.

use once_cell::sync::Lazy;
use regex::Regex;

use coursefmt_core::markup::{self, unescape};

pub use coursefmt_core::markup::anchor;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"https?://[^\s<>"]+"#).expect("valid regex"));

/// Existing anchors and tags, which autolinking must leave alone
static PROTECTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<a\b[^>]*>.*?</a>|<[^>]*>").expect("valid regex"));

static YOUTUBE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:youtube\.com/(?:watch\?(?:\S*?&(?:amp;)?)?v=|embed/|shorts/|live/)|youtu\.be/)([A-Za-z0-9_-]{11})",
    )
    .expect("valid regex")
});

static YOUTUBE_SI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[?&](?:amp;)?si=([A-Za-z0-9_-]+)").expect("valid regex"));

static TED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)ted\.com/talks/([A-Za-z0-9_]+)").expect("valid regex"));

/// Characters that end a sentence rather than a URL
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"'];

/// A recognized video, ready to embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoEmbed {
    YouTube { id: String, si: Option<String> },
    Ted { slug: String },
}

impl VideoEmbed {
    /// The iframe `src` for this video
    pub fn embed_url(&self) -> String {
        match self {
            VideoEmbed::YouTube { id, si: Some(si) } => {
                format!("https://www.youtube.com/embed/{id}?si={si}")
            }
            VideoEmbed::YouTube { id, si: None } => format!("https://www.youtube.com/embed/{id}"),
            VideoEmbed::Ted { slug } => format!("https://embed.ted.com/talks/{slug}"),
        }
    }
}

/// Strip sentence punctuation, escaped brackets and an unbalanced `)` off a URL match
fn trim_url(url: &str) -> &str {
    let mut url = url;
    loop {
        let before = url.len();
        url = url.trim_end_matches(TRAILING_PUNCTUATION);
        for entity in ["&gt;", "&lt;", "&amp;"] {
            url = url.strip_suffix(entity).unwrap_or(url);
        }
        if url.ends_with(')') && url.matches('(').count() < url.matches(')').count() {
            url = &url[..url.len() - 1];
        }
        if url.len() == before {
            return url;
        }
    }
}

/// Whether the whole text is a single URL
pub fn is_bare_url(text: &str) -> bool {
    let text = text.trim();
    URL_RE
        .find(text)
        .is_some_and(|m| m.start() == 0 && m.end() == text.len())
}

/// The first URL in the text, with trailing punctuation excluded
pub fn find_url(text: &str) -> Option<&str> {
    URL_RE.find(text).map(|m| trim_url(m.as_str()))
}

/// Wrap every bare URL in an anchor, outside existing anchors and tags
pub fn autolink(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for protected in PROTECTED_RE.find_iter(text) {
        out.push_str(&link_segment(&text[last..protected.start()]));
        out.push_str(protected.as_str());
        last = protected.end();
    }
    out.push_str(&link_segment(&text[last..]));
    out
}

fn link_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut last = 0;
    for m in URL_RE.find_iter(segment) {
        let url = trim_url(m.as_str());
        out.push_str(&segment[last..m.start()]);
        out.push_str(&anchor(&unescape(url), url));
        last = m.start() + url.len();
    }
    out.push_str(&segment[last..]);
    out
}

/// Extract the video id (and `si` share token) from a YouTube URL
pub fn youtube_match(url: &str) -> Option<(String, Option<String>)> {
    let id = YOUTUBE_RE.captures(url)?[1].to_string();
    let si = YOUTUBE_SI_RE.captures(url).map(|c| c[1].to_string());
    Some((id, si))
}

/// Extract the talk slug from a TED URL
pub fn ted_match(url: &str) -> Option<String> {
    TED_RE.captures(url).map(|c| c[1].to_string())
}

/// Recognize an embeddable video URL
pub fn video_embed(url: &str) -> Option<VideoEmbed> {
    if let Some((id, si)) = youtube_match(url) {
        return Some(VideoEmbed::YouTube { id, si });
    }
    ted_match(url).map(|slug| VideoEmbed::Ted { slug })
}

/// Anchor for `url` labeled with `title`, emphasis converted to markup
pub fn titled_anchor(url: &str, title: &str) -> String {
    let label = markup::inline(title.trim());
    anchor(&unescape(url), &label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_bare_url() {
        assert!(is_bare_url("https://example.com/a?b=1"));
        assert!(is_bare_url("  http://x.org  "));
        assert!(!is_bare_url("See https://example.com"));
        assert!(!is_bare_url("example.com"));
    }

    #[test]
    fn test_find_url_trims_punctuation() {
        assert_eq!(find_url("Visit https://x.org/a."), Some("https://x.org/a"));
        assert_eq!(find_url("(see https://x.org/a)"), Some("https://x.org/a"));
        assert_eq!(
            find_url("https://en.wikipedia.org/wiki/Rust_(language)"),
            Some("https://en.wikipedia.org/wiki/Rust_(language)")
        );
        assert_eq!(find_url("&lt;https://x.org/a&gt;"), Some("https://x.org/a"));
        assert_eq!(find_url("no link"), None);
    }

    #[test]
    fn test_autolink() {
        assert_eq!(
            autolink("Read https://x.org/a now"),
            r#"Read <a href="https://x.org/a" target="_blank" rel="noopener noreferrer">https://x.org/a</a> now"#
        );
    }

    #[test]
    fn test_autolink_unescapes_href() {
        let linked = autolink("https://x.org/?a=1&amp;b=2");
        assert!(linked.contains(r#"href="https://x.org/?a=1&amp;b=2""#));
        assert!(linked.contains(">https://x.org/?a=1&amp;b=2</a>"));
    }

    #[test]
    fn test_autolink_skips_existing_anchors() {
        let text = r#"<a href="https://x.org">https://x.org</a> and https://y.org"#;
        let linked = autolink(text);
        assert_eq!(linked.matches("<a ").count(), 2);
        assert!(linked.starts_with(r#"<a href="https://x.org">https://x.org</a>"#));
    }

    #[test]
    fn test_youtube_forms() {
        let id = Some(("abc12345678".to_string(), None));
        assert_eq!(youtube_match("https://www.youtube.com/watch?v=abc12345678"), id);
        assert_eq!(youtube_match("https://youtu.be/abc12345678"), id);
        assert_eq!(youtube_match("https://www.youtube.com/embed/abc12345678"), id);
        assert_eq!(youtube_match("https://youtube.com/shorts/abc12345678"), id);
        assert_eq!(
            youtube_match("https://www.youtube.com/watch?feature=share&amp;v=abc12345678"),
            id
        );
    }

    #[test]
    fn test_youtube_share_token() {
        assert_eq!(
            youtube_match("https://youtu.be/abc12345678?si=XyZ_12"),
            Some(("abc12345678".to_string(), Some("XyZ_12".to_string())))
        );
    }

    #[test]
    fn test_ted_match() {
        assert_eq!(
            ted_match("https://www.ted.com/talks/brene_brown_the_power_of_vulnerability?language=en"),
            Some("brene_brown_the_power_of_vulnerability".to_string())
        );
        assert_eq!(ted_match("https://www.ted.com/speakers/x"), None);
    }

    #[test]
    fn test_embed_urls() {
        let yt = video_embed("https://youtu.be/abc12345678?si=tok").unwrap();
        assert_eq!(yt.embed_url(), "https://www.youtube.com/embed/abc12345678?si=tok");
        let ted = video_embed("https://www.ted.com/talks/some_talk").unwrap();
        assert_eq!(ted.embed_url(), "https://embed.ted.com/talks/some_talk");
        assert_eq!(video_embed("https://vimeo.com/123"), None);
    }
}
