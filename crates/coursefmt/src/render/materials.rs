//! Learning materials body.

use coursefmt_core::markup::unescape;
use coursefmt_core::AnnotatedLine;

use super::video_block;
use crate::blocks;
use crate::classify::materials::{classify, collect_videos, render_readings, ContentMode, MaterialsKind, VideoEntry};
use crate::links::anchor;

fn render_video(entry: &VideoEntry) -> String {
    let mut out = String::new();
    if let Some(title) = &entry.title {
        out.push_str(&format!("<p><strong>{}</strong></p>", blocks::inline(title)));
    }
    if let Some(context) = &entry.context {
        out.push_str(&blocks::paragraph(context));
    }
    if let Some(url) = &entry.url {
        match &entry.embed {
            Some(embed) => {
                let title = entry.title.as_deref().unwrap_or("Video");
                out.push_str(&video_block(Some(embed), title));
            }
            None => {
                // No embed source: link the URL and leave an empty player slot
                out.push_str(&format!("<p>{}</p>", anchor(&unescape(url), url)));
                out.push_str(&video_block(None, ""));
            }
        }
    }
    out
}

pub fn render_materials(lines: &[AnnotatedLine]) -> String {
    let mut out = String::new();
    for section in classify(lines) {
        match section.kind {
            MaterialsKind::Tier(_) => out.push_str(&format!("<h3>{}</h3>", section.heading)),
            MaterialsKind::Topic(mode) => {
                if !section.heading.is_empty() {
                    out.push_str(&format!("<h4>{}</h4>", section.heading));
                }
                match mode {
                    ContentMode::Videos => {
                        for entry in collect_videos(&section.lines) {
                            out.push_str(&render_video(&entry));
                        }
                    }
                    _ => out.push_str(&render_readings(&section.lines, mode)),
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_lines;

    #[test]
    fn test_youtube_video_embed() {
        let html = render_materials(&normalize_lines(
            "Videos:\nIntro Video https://www.youtube.com/watch?v=abc12345678",
        ));
        assert!(html.starts_with("<h4>Videos</h4><p><strong>Intro Video</strong></p>"));
        assert!(html.contains("src=\"https://www.youtube.com/embed/abc12345678\""));
        assert!(!html.contains("watch?v="));
    }

    #[test]
    fn test_non_embeddable_video() {
        let html = render_materials(&normalize_lines("Videos\n- https://vimeo.com/123"));
        assert!(html.contains(">https://vimeo.com/123</a></p>"));
        assert!(html.ends_with("<div class=\"embed-responsive embed-responsive-16by9\"></div>"));
    }

    #[test]
    fn test_reading_entry_list_item() {
        let html = render_materials(&normalize_lines(
            "The Illustrated Word2vec https://example.com/word2vec",
        ));
        assert_eq!(
            html,
            "<ul><li><a href=\"https://example.com/word2vec\" target=\"_blank\" rel=\"noopener noreferrer\">The Illustrated Word2vec</a></li></ul>"
        );
    }

    #[test]
    fn test_tiers_and_topics_render_headings() {
        let html = render_materials(&normalize_lines(
            "Required Resources\nReadings:\n- Chapter 1\nOptional Resources\nPodcasts:\nListen on the commute",
        ));
        assert_eq!(
            html,
            concat!(
                "<h3>Required Resources</h3><h4>Readings</h4><ul><li>Chapter 1</li></ul>",
                "<h3>Optional Resources</h3><h4>Podcasts</h4><p>Listen on the commute</p>"
            )
        );
    }
}
