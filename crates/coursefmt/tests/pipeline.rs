//! End-to-end behaviour of the formatter on representative documents

use coursefmt::{format_content, ContentInput, DocumentKind, ListBuilder, TemplateContext, COPYRIGHT};

fn text(kind: &str, input: &str) -> String {
    format_content(ContentInput::Text(input.to_string()), kind, &TemplateContext::default())
}

fn pasted(kind: &str, html: &str) -> String {
    format_content(ContentInput::Html(html.to_string()), kind, &TemplateContext::default())
}

#[test]
fn test_every_kind_has_shell() {
    for kind in DocumentKind::ALL {
        let html = text(kind.tag(), "Some content");
        assert!(html.starts_with("<div class=\"WFU-SPS WFU-Container-Global\">"), "{kind}");
        assert!(html.contains("<footer class=\"WFU-footer\">"), "{kind}");
        assert!(html.contains(COPYRIGHT), "{kind}");
    }
}

#[test]
fn test_empty_input_renders_empty_shell() {
    for input in ["", "   \n\t\n  "] {
        for kind in DocumentKind::ALL {
            let html = text(kind.tag(), input);
            assert!(html.contains("WFU-SubpageHero"), "{kind}");
            assert!(html.contains("<p class=\"WFU-SubpageHeader\">Course Name</p>"), "{kind}");
            assert!(
                html.contains("<div class=\"col-xs-12 WFU-SubpageContent\">\n</div>"),
                "{kind}"
            );
            assert!(html.contains(COPYRIGHT), "{kind}");
        }
    }
}

#[test]
fn test_bold_survives_paste_and_render() {
    let html = pasted("discussion", "<p><b>Key term</b> explained here</p>");
    assert_eq!(html.matches("<strong>").count(), 1);
    assert!(html.contains("<strong>Key term</strong> explained here"));
}

#[test]
fn test_empty_bold_leaves_no_markers() {
    let html = pasted("discussion", "<p>A<b></b>B<strong> </strong>C</p>");
    assert!(!html.contains("<strong>"));
    assert!(!html.contains("**"));
    assert!(html.contains("<p>AB C</p>"));
}

/// Indents `[0, 0, 2, 2, 0]` nest as depths `[1, 1, 2, 2, 1]`. The last
/// item goes back into the first top-level list, which is never closed and
/// reopened, so every `<ul>` is balanced and there is exactly one root list.
#[test]
fn test_list_indentation_fidelity() {
    let indents = [0, 0, 2, 2, 0];
    let builder = indents
        .iter()
        .enumerate()
        .fold(ListBuilder::new(), |b, (i, indent)| b.item(*indent, &format!("i{i}")));
    assert_eq!(builder.depths(), &[1, 1, 2, 2, 1]);

    let html = builder.finish();
    assert_eq!(html.matches("<ul>").count(), html.matches("</ul>").count());
    assert_eq!(html.matches("<ul>").count(), 2);
    assert_eq!(
        html,
        "<ul><li>i0</li><li>i1<ul><li>i2</li><li>i3</li></ul></li><li>i4</li></ul>"
    );

    let page = text("discussion", "- i0\n- i1\n  - i2\n  - i3\n- i4");
    assert!(page.contains(&html));
}

#[test]
fn test_cross_style_emphasis_survives_paste() {
    let html = pasted("discussion", "<p><em>Read <strong>this</strong> now</em></p>");
    assert!(html.contains("<p><em>Read <strong>this</strong> now</em></p>"));
}

#[test]
fn test_bold_paragraph_survives_paste() {
    let html = pasted("discussion", r#"<p style="font-weight:bold">Week 1</p><p>x</p>"#);
    assert!(html.contains("<p><strong>Week 1</strong></p><p>x</p>"));
}

#[test]
fn test_dash_label_splits_heading_from_text() {
    let html = text("discussion", "Instructions – Post by Wednesday.");
    assert!(html.contains("<h3>Instructions</h3><p>Post by Wednesday.</p>"));
    assert!(!html.contains("<h3>Instructions –"));
}

#[test]
fn test_module_line_keeps_emphasis() {
    let html = text("assessment-overview", "Discussions\nModule 1: Read *Dune*");
    assert!(html.contains("<p><strong>Module 1</strong>: Read <em>Dune</em></p>"));
}

#[test]
fn test_assessment_overview_discussions() {
    let html = text(
        "assessment-overview",
        "Discussions\nModule 1: Respond to the prompt.\nModule 2: Build on a peer's post.\n20 points each",
    );
    assert!(html.contains(concat!(
        "<h3>Discussions</h3>",
        "<p><strong>Module 1</strong>: Respond to the prompt.</p>",
        "<p><strong>Module 2</strong>: Build on a peer's post.</p>",
        "<p><em>20 points each</em></p>"
    )));
}

#[test]
fn test_youtube_link_becomes_embed() {
    let html = text(
        "learning-materials",
        "Videos:\nIntro Video https://www.youtube.com/watch?v=abc12345678",
    );
    assert!(html.contains("<iframe src=\"https://www.youtube.com/embed/abc12345678\""));
    assert!(!html.contains("watch?v="));
}

#[test]
fn test_title_url_reading_entry() {
    let html = text(
        "learning-materials",
        "Readings\nThe Illustrated Word2vec https://example.com/word2vec",
    );
    assert!(html.contains(
        "<li><a href=\"https://example.com/word2vec\" target=\"_blank\" rel=\"noopener noreferrer\">The Illustrated Word2vec</a></li>"
    ));
}

#[test]
fn test_script_in_pasted_content_is_removed() {
    let html = pasted(
        "syllabus",
        "<p>Office hours</p><script>alert(1)</script><p onclick=\"x()\">Tuesdays</p>",
    );
    assert!(!html.contains("script"));
    assert!(!html.contains("alert"));
    assert!(!html.contains("onclick"));
    assert!(html.contains("<p>Office hours</p><p>Tuesdays</p>"));
}

#[test]
fn test_module_banner_from_context() {
    let ctx = TemplateContext::from_json(r#"{"moduleNumber": 5, "title": "Module 5 Overview"}"#).unwrap();
    let html = format_content(ContentInput::Text("Intro".to_string()), "module-overview", &ctx);
    assert!(html.contains("<div class=\"WFU-SubpageHeroModule5\"></div>"));
    assert!(html.contains("<h2 class=\"WFU-SubpageSubheader\">Module 5 Overview</h2>"));
}
