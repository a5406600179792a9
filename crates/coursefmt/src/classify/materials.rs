//! Learning materials: resource tiers, topic headings and per-topic
//! content modes.
//!
//! ```text
//! Required Resources          tier heading (h3)
//! Readings:                   topic heading (h4), mode = readings
//! - Title https://...         list entry, link resolved
//! Videos:                     topic heading (h4), mode = videos
//! Intro https://youtu.be/...  titled embed
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use coursefmt_core::{markup, AnnotatedLine, Section};

use super::{heading_text, RuleTable};
use crate::blocks;
use crate::normalize::compact;
use crate::links::{self, autolink, find_url, titled_anchor, VideoEmbed};
use crate::lists::ListBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceTier {
    Required,
    Optional,
}

/// How lines under a topic heading are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    Videos,
    Readings,
    Textbook,
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialsKind {
    /// `Required Resources` / `Optional Resources`
    Tier(ResourceTier),
    /// A topic heading, or untitled content before any heading
    Topic(ContentMode),
}

pub type MaterialsSection = Section<MaterialsKind>;

static TIERS: Lazy<RuleTable<ResourceTier>> = Lazy::new(|| {
    RuleTable::new()
        .pattern(
            "required",
            r"(?i)^required\s+(?:resources|materials)\s*:?$",
            ResourceTier::Required,
        )
        .pattern(
            "optional",
            r"(?i)^optional\s+(?:resources|materials)\s*:?$",
            ResourceTier::Optional,
        )
});

static TOPICS: Lazy<RuleTable<ContentMode>> = Lazy::new(|| {
    const TAIL: &str = r"\s*:?$";
    RuleTable::new()
        .pattern("textbook", &format!(r"(?i)^textbook\s+readings?{TAIL}"), ContentMode::Textbook)
        .pattern("readings", &format!(r"(?i)^(?:required\s+|optional\s+)?readings?{TAIL}"), ContentMode::Readings)
        .pattern("videos", &format!(r"(?i)^videos?{TAIL}"), ContentMode::Videos)
        .pattern("articles", &format!(r"(?i)^articles?{TAIL}"), ContentMode::Readings)
        .pattern("podcasts", &format!(r"(?i)^podcasts?{TAIL}"), ContentMode::Generic)
        .pattern("tools", &format!(r"(?i)^tools?{TAIL}"), ContentMode::Generic)
        .pattern("websites", &format!(r"(?i)^websites?{TAIL}"), ContentMode::Generic)
        .pattern("case_studies", &format!(r"(?i)^case\s+stud(?:y|ies){TAIL}"), ContentMode::Generic)
        .pattern(
            "llm",
            &format!(r"(?i)^experimenting\s+with\s+(?:an?\s+)?llms?{TAIL}"),
            ContentMode::Generic,
        )
        .predicate("colon_heading", is_colon_heading, ContentMode::Generic)
});

/// Fallback topic heading: a short non-bullet, URL-free line ending in `:`
fn is_colon_heading(line: &AnnotatedLine) -> bool {
    let plain = markup::plain_text(&line.text);
    !line.is_bullet_marker && plain.ends_with(':') && find_url(&plain).is_none() && plain.len() > 1
}

static EXERCISE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^exercise\b").expect("valid regex"));

fn step(mut sections: Vec<MaterialsSection>, line: &AnnotatedLine) -> Vec<MaterialsSection> {
    let plain = markup::plain_text(&line.text);

    if !line.is_bullet_marker {
        if let Some((_, tier)) = TIERS.classify(line) {
            trace!(?tier, "tier heading");
            sections.push(Section::new(MaterialsKind::Tier(tier), heading_text(&plain)));
            return sections;
        }
        if let Some((rule, mode)) = TOPICS.classify(line) {
            trace!(rule, ?mode, "topic heading");
            sections.push(Section::new(MaterialsKind::Topic(mode), heading_text(&plain)));
            return sections;
        }
    }

    let needs_topic = !matches!(sections.last(), Some(s) if matches!(s.kind, MaterialsKind::Topic(_)));
    if needs_topic {
        sections.push(Section::new(MaterialsKind::Topic(ContentMode::Readings), ""));
    }
    if let Some(section) = sections.last_mut() {
        section.lines.push(line.clone());
    }
    sections
}

/// Split normalized lines into tier and topic sections
pub fn classify(lines: &[AnnotatedLine]) -> Vec<MaterialsSection> {
    let sections = compact(lines).iter().fold(Vec::new(), step);
    debug!(sections = sections.len(), "classified learning materials");
    sections
}

/// Rule names of the tier and topic tables, in evaluation order
pub fn rule_names() -> Vec<&'static str> {
    TIERS.names().chain(TOPICS.names()).collect()
}

// ---------------------------------------------------------------------------
// Link shapes for reading entries

static MD_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").expect("valid regex"));

/// `[Title](url url)`: a pasted link whose label was its own URL
static MD_DOUBLE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\s+https?://[^\s)]+\)").expect("valid regex")
});

/// `[Title](<a href="url">...</a>)` after escaping
static MD_ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[([^\]]+)\]\(&lt;a\s+[^&]*?href="([^"]+)"[^)]*?&lt;/a&gt;\)"#).expect("valid regex")
});

static TITLE_URL_DESC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s+(https?://\S+?):\s+(.+)$").expect("valid regex"));

static TITLE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s+(https?://\S+)$").expect("valid regex"));

fn clean_title(title: &str) -> &str {
    title.trim().trim_end_matches([':', '-', '–', '—', '|']).trim()
}

/// Resolve the first matching resource-link shape, if any.
///
/// Tried in order: `[Title](url)`, pasted artifacts of it, `Title URL`,
/// `Title URL: Description`.
pub fn resource_link(text: &str) -> Option<String> {
    for re in [&*MD_DOUBLE_URL_RE, &*MD_ANCHOR_RE, &*MD_LINK_RE] {
        if re.is_match(text) {
            let replaced = re.replace_all(text, |caps: &regex::Captures| titled_anchor(&caps[2], &caps[1]));
            return Some(markup::inline(&replaced));
        }
    }

    if let Some(caps) = TITLE_URL_RE.captures(text) {
        let title = clean_title(&caps[1]);
        if !title.is_empty() && find_url(title).is_none() {
            let url = &caps[2];
            let trimmed = find_url(url).unwrap_or(url);
            return Some(format!("{}{}", titled_anchor(trimmed, title), &url[trimmed.len()..]));
        }
    }

    if let Some(caps) = TITLE_URL_DESC_RE.captures(text) {
        let title = clean_title(&caps[1]);
        if !title.is_empty() && find_url(title).is_none() {
            return Some(format!(
                "{}: {}",
                titled_anchor(&caps[2], title),
                blocks::inline(&caps[3])
            ));
        }
    }

    None
}

/// Resolve a reading entry: a link shape, or autolinked text
pub fn reading_entry(text: &str) -> String {
    resource_link(text).unwrap_or_else(|| autolink(&markup::inline(text)))
}

/// Render the body of a reading-style topic
pub fn render_readings(lines: &[AnnotatedLine], mode: ContentMode) -> String {
    let mut out = String::new();
    let mut list = ListBuilder::new();
    let link_entries = matches!(mode, ContentMode::Readings | ContentMode::Textbook);

    for line in lines {
        if line.is_bullet_marker {
            let entry = reading_entry(&line.text);
            list = if EXERCISE_RE.is_match(&markup::plain_text(&line.text)) {
                list.pinned(line.indent, &entry)
            } else {
                list.item(line.indent, &entry)
            };
            continue;
        }

        if link_entries {
            if let Some(entry) = resource_link(&line.text) {
                let root = list.root_indent().unwrap_or(line.indent);
                list = list.item(root, &entry);
                continue;
            }
        }

        if list.is_open() {
            out.push_str(&std::mem::take(&mut list).finish());
        }
        out.push_str(&blocks::paragraph(&line.text));
    }

    out.push_str(&list.finish());
    out
}

// ---------------------------------------------------------------------------
// Videos

/// One rendered unit of a videos topic
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoEntry {
    pub title: Option<String>,
    pub context: Option<String>,
    pub url: Option<String>,
    pub embed: Option<VideoEmbed>,
}

/// Videos state machine
#[derive(Debug, Clone, PartialEq, Eq)]
enum VideoState {
    Idle,
    /// A URL line was just emitted; a deeper URL-less line may describe it
    AfterVideo { indent: usize },
    /// A title is waiting for its URL
    Titled { title: String },
    /// A title and its context are waiting
    Described { title: String, context: String },
}

#[derive(Debug)]
struct VideoAcc {
    state: VideoState,
    entries: Vec<VideoEntry>,
}

impl VideoAcc {
    fn flush(&mut self) {
        match std::mem::replace(&mut self.state, VideoState::Idle) {
            VideoState::Titled { title } => self.entries.push(VideoEntry {
                title: Some(title),
                ..VideoEntry::default()
            }),
            VideoState::Described { title, context } => self.entries.push(VideoEntry {
                title: Some(title),
                context: Some(context),
                ..VideoEntry::default()
            }),
            VideoState::Idle | VideoState::AfterVideo { .. } => {}
        }
    }
}

fn video_step(mut acc: VideoAcc, line: &AnnotatedLine) -> VideoAcc {
    if let Some(url) = find_url(&line.text).map(str::to_string) {
        let (before, after) = line.text.split_once(url.as_str()).unwrap_or_default();
        let inline_title = clean_title(before);
        let trailing = after.trim().trim_start_matches([':', '-', '–', '—', '|']).trim();

        let (title, context) = if links::is_bare_url(&line.text) {
            // A lone URL belongs to the title (and context) read before it
            match std::mem::replace(&mut acc.state, VideoState::Idle) {
                VideoState::Titled { title } => (Some(title), None),
                VideoState::Described { title, context } => (Some(title), Some(context)),
                _ => (None, None),
            }
        } else {
            acc.flush();
            let title = (!inline_title.is_empty()).then(|| inline_title.to_string());
            let context = (!trailing.is_empty()).then(|| trailing.to_string());
            (title, context)
        };

        trace!(%url, embeddable = links::video_embed(&url).is_some(), "video line");
        acc.entries.push(VideoEntry {
            title,
            context,
            embed: links::video_embed(&url),
            url: Some(url),
        });
        acc.state = VideoState::AfterVideo { indent: line.indent };
        return acc;
    }

    let text = line.text.clone();
    let next = match std::mem::replace(&mut acc.state, VideoState::Idle) {
        VideoState::AfterVideo { indent } if line.indent > indent => {
            if let Some(last) = acc.entries.last_mut() {
                if last.context.is_none() {
                    last.context = Some(text);
                    return acc;
                }
            }
            VideoState::Titled { title: line.text.clone() }
        }
        VideoState::Titled { title } => VideoState::Described { title, context: text },
        VideoState::Described { title, context } => {
            acc.entries.push(VideoEntry {
                title: Some(title),
                context: Some(context),
                ..VideoEntry::default()
            });
            VideoState::Titled { title: text }
        }
        VideoState::Idle | VideoState::AfterVideo { .. } => VideoState::Titled { title: text },
    };
    acc.state = next;
    acc
}

/// Group the lines of a videos topic into entries
pub fn collect_videos(lines: &[AnnotatedLine]) -> Vec<VideoEntry> {
    let mut acc = lines.iter().fold(
        VideoAcc {
            state: VideoState::Idle,
            entries: Vec::new(),
        },
        video_step,
    );
    acc.flush();
    acc.entries
}
