//! HTML rendering.
//!
//! Four page templates share one shell ([`base_document`]): the `<head>` block
//! parameterized by title and canonical path, and a `<main>` wrapper.
//!
//! ## Escaping
//!
//! Document text is spliced in with [`PreEscaped`]: the source document is
//! trusted and may already contain markup or entities (`&amp;`, `<em>`), which
//! must reach the page unchanged. Values from the site config go through
//! maud's normal escaping.
//!
//! Rendering is pure. The same document, position, and options always yield
//! byte-identical output.

use crate::config::SiteOptions;
use crate::document::Document;
use crate::links::{self, Navigation, PageRef};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Render the page at `page` to a complete HTML document.
pub fn render(doc: &Document, page: PageRef, options: &SiteOptions) -> Markup {
    match page {
        PageRef::Index => render_index(doc, options),
        PageRef::Standalone(idx) => render_standalone(doc, idx, options),
        PageRef::Chapter(idx) => render_chapter(doc, idx, options),
        PageRef::Verse { chapter, verse } => render_verse(doc, chapter, verse, options),
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the shared document shell.
fn base_document(
    options: &SiteOptions,
    title: &str,
    canonical_path: &str,
    content: Markup,
) -> Markup {
    let head_config = &options.head;
    html! {
        (DOCTYPE)
        html lang=(head_config.lang) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="theme-color" content=(head_config.theme_color);
                link rel="icon" type=(head_config.icon_type) href=(head_config.icon);
                link rel="stylesheet" href=(head_config.stylesheet);
                title { (PreEscaped(title)) }
                link rel="canonical" href=(PreEscaped(options.canonical_url(canonical_path)));
            }
            body {
                main {
                    (content)
                }
            }
        }
    }
}

/// Renders the previous/next links of a chapter or verse page.
///
/// Absent links are left out, not rendered disabled.
fn nav_footer(navigation: &Navigation) -> Markup {
    html! {
        footer {
            nav {
                @if let Some(prev) = &navigation.previous {
                    a rel="prev" href=(PreEscaped(&prev.href)) accesskey="p" { (PreEscaped(&prev.label)) }
                }
                @if let Some(next) = &navigation.next {
                    a rel="next" href=(PreEscaped(&next.href)) accesskey="n" { (PreEscaped(&next.label)) }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the site root: title, page links, chapter list, license, resources.
fn render_index(doc: &Document, options: &SiteOptions) -> Markup {
    let title = format!("{} – {}", doc.title, doc.subtitle);

    let content = html! {
        article {
            header {
                h1 { (PreEscaped(&doc.title)) }
                h2 { (PreEscaped(&doc.subtitle)) }
            }
            p { em { (PreEscaped(&doc.translation_note)) } }
            @for page in &doc.pages {
                p {
                    a href=(PreEscaped(links::page_path(page))) {
                        (PreEscaped(&page.title)) " by " (PreEscaped(&page.author))
                    }
                }
            }
            h3 { "Chapters" }
            ol {
                @for (idx, chapter) in doc.chapters.iter().enumerate() {
                    li { a href=(links::chapter_path(idx)) { (PreEscaped(&chapter.title)) } }
                }
            }
            p { (PreEscaped(&doc.copyright)) }
            @for line in &doc.license {
                p { (PreEscaped(line)) }
            }
            hr;
            ul {
                @for resource in &options.resources {
                    li { a href=(resource.href) rel="noindex" { (resource.label) } }
                }
            }
        }
    };

    base_document(options, &title, links::INDEX_PATH, content)
}

/// Renders a standalone page with its byline and paragraphs.
fn render_standalone(doc: &Document, idx: usize, options: &SiteOptions) -> Markup {
    let page = &doc.pages[idx];
    let title = format!("{} – {}", doc.title, page.title);

    let content = html! {
        article {
            header {
                h1 { a href="." accesskey="h" { (PreEscaped(&doc.title)) } }
                h2 { (PreEscaped(&page.title)) }
            }
            p { em { "By " (PreEscaped(&page.author)) } }
            @for paragraph in &page.content {
                p { (PreEscaped(paragraph)) }
            }
        }
    };

    base_document(options, &title, &links::page_path(page), content)
}

/// Renders a chapter index: one linked line per verse plus chapter navigation.
fn render_chapter(doc: &Document, idx: usize, options: &SiteOptions) -> Markup {
    let chapter = &doc.chapters[idx];
    let heading = links::chapter_heading(idx, chapter);
    let title = format!("{} – {}", doc.title, heading);
    let navigation = links::chapter_navigation(&doc.chapters, idx);

    let content = html! {
        header {
            h1 { a href=".." accesskey="h" { (PreEscaped(&doc.title)) } }
            h2 { (PreEscaped(&heading)) }
        }
        @for verse in &chapter.verses {
            article {
                (PreEscaped(&verse.no)) ". "
                a href=(PreEscaped(&verse.no)) { (PreEscaped(&verse.verse)) }
            }
        }
        (nav_footer(&navigation))
    };

    base_document(options, &title, &links::chapter_path(idx), content)
}

/// Renders a verse page: breadcrumb header, text, optional footnote, navigation.
fn render_verse(
    doc: &Document,
    chapter_idx: usize,
    verse_idx: usize,
    options: &SiteOptions,
) -> Markup {
    let chapter = &doc.chapters[chapter_idx];
    let verse = &chapter.verses[verse_idx];
    let heading = links::chapter_heading(chapter_idx, chapter);
    let title = format!("{} – {} – {}", doc.title, heading, verse.no);
    let navigation = links::verse_navigation(&doc.chapters, chapter_idx, verse_idx);

    let content = html! {
        article {
            header {
                h1 { a href=".." accesskey="h" { (PreEscaped(&doc.title)) } }
                h2 { a href="." accesskey="c" { (PreEscaped(&heading)) } }
                h3 { (PreEscaped(&verse.no)) }
            }
            p { (PreEscaped(&verse.verse)) }
            @if let Some(footnote) = &verse.footnote {
                hr;
                p { (PreEscaped(footnote)) }
            }
            (nav_footer(&navigation))
        }
    };

    base_document(
        options,
        &title,
        &links::verse_path(chapter_idx, verse),
        content,
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn rendered(doc: &Document, page: PageRef) -> String {
        render(doc, page, &sample_options()).into_string()
    }

    #[test]
    fn base_document_includes_doctype_and_head() {
        let doc = sample_document(&[&["1"]]);
        let html = rendered(&doc, PageRef::Index);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="en-US">"#));
        assert!(html.contains(r#"<meta name="theme-color" content="grey">"#));
        assert!(html.contains(r#"<link rel="icon" type="image/webp" href="/assets/icons/icon.webp">"#));
        assert!(html.contains(r#"<link rel="stylesheet" href="/assets/css/styles.css">"#));
    }

    #[test]
    fn canonical_link_uses_prefix_and_path() {
        let doc = sample_document(&[&["1", "2"]]);
        assert!(rendered(&doc, PageRef::Index)
            .contains(r#"<link rel="canonical" href="https://example.com/">"#));
        assert!(rendered(&doc, PageRef::Standalone(0))
            .contains(r#"<link rel="canonical" href="https://example.com/introduction">"#));
        assert!(rendered(&doc, PageRef::Chapter(0))
            .contains(r#"<link rel="canonical" href="https://example.com/chapter-1/">"#));
        assert!(rendered(&doc, PageRef::Verse { chapter: 0, verse: 1 })
            .contains(r#"<link rel="canonical" href="https://example.com/chapter-1/2">"#));
    }

    #[test]
    fn index_lists_pages_chapters_and_license() {
        let doc = sample_document(&[&["1"], &["2"]]);
        let html = rendered(&doc, PageRef::Index);

        assert!(html.contains("<title>The Work – A Translation</title>"));
        assert!(html.contains("<h1>The Work</h1>"));
        assert!(html.contains("<h2>A Translation</h2>"));
        assert!(html.contains("<p><em>Translated for testing</em></p>"));
        assert!(html.contains(r#"<a href="introduction">Introduction by Ann Author</a>"#));
        assert!(html.contains(r#"<a href="notes">Notes by Tom Translator</a>"#));
        assert!(html.contains(
            r#"<ol><li><a href="chapter-1/">Chapter Title 1</a></li><li><a href="chapter-2/">Chapter Title 2</a></li></ol>"#
        ));
        assert!(html.contains("<p>Copyright Nobody</p>"));
        assert!(html.contains("<p>License line one</p><p>License line two</p>"));
    }

    #[test]
    fn index_footer_resources_are_noindex() {
        let doc = sample_document(&[&["1"]]);
        let html = rendered(&doc, PageRef::Index);
        assert_eq!(html.matches(r#"rel="noindex""#).count(), 3);
        assert!(html.contains(r#"<a href="source.pdf" rel="noindex">The source PDF</a>"#));
    }

    #[test]
    fn standalone_page_has_byline_and_paragraphs() {
        let doc = sample_document(&[&["1"]]);
        let html = rendered(&doc, PageRef::Standalone(0));

        assert!(html.contains("<title>The Work – Introduction</title>"));
        assert!(html.contains(r#"<h1><a href="." accesskey="h">The Work</a></h1>"#));
        assert!(html.contains("<h2>Introduction</h2>"));
        assert!(html.contains("<p><em>By Ann Author</em></p>"));
        assert!(html.contains("<p>First paragraph</p><p>Second paragraph</p>"));
    }

    #[test]
    fn chapter_page_lists_verses() {
        let doc = sample_document(&[&["1", "2"], &["3"]]);
        let html = rendered(&doc, PageRef::Chapter(0));

        assert!(html.contains("<title>The Work – Chapter 1: “Chapter Title 1”</title>"));
        assert!(html.contains("<h2>Chapter 1: “Chapter Title 1”</h2>"));
        assert!(html.contains(r#"<article>1. <a href="1">Verse 1</a></article>"#));
        assert!(html.contains(r#"<article>2. <a href="2">Verse 2</a></article>"#));
    }

    #[test]
    fn first_chapter_has_next_but_no_previous() {
        let doc = sample_document(&[&["1", "2"], &["3"]]);
        let html = rendered(&doc, PageRef::Chapter(0));
        assert!(!html.contains(r#"rel="prev""#));
        assert!(html.contains(
            r#"<a rel="next" href="../chapter-2/" accesskey="n">Chapter 2: “Chapter Title 2”</a>"#
        ));
    }

    #[test]
    fn last_chapter_has_previous_but_no_next() {
        let doc = sample_document(&[&["1", "2"], &["3"]]);
        let html = rendered(&doc, PageRef::Chapter(1));
        assert!(html.contains(r#"<a rel="prev" href="../chapter-1/" accesskey="p">"#));
        assert!(!html.contains(r#"rel="next""#));
    }

    #[test]
    fn verse_page_breadcrumb_and_text() {
        let doc = sample_document(&[&["1", "2"], &["3"]]);
        let html = rendered(&doc, PageRef::Verse { chapter: 0, verse: 1 });

        assert!(html.contains("<title>The Work – Chapter 1: “Chapter Title 1” – 2</title>"));
        assert!(html.contains(r#"<h1><a href=".." accesskey="h">The Work</a></h1>"#));
        assert!(html.contains(r#"<h2><a href="." accesskey="c">Chapter 1: “Chapter Title 1”</a></h2>"#));
        assert!(html.contains("<h3>2</h3>"));
        assert!(html.contains("<p>Verse 2</p>"));
    }

    #[test]
    fn verse_page_crosses_chapter_boundary() {
        let doc = sample_document(&[&["1", "2"], &["3"]]);
        let html = rendered(&doc, PageRef::Verse { chapter: 0, verse: 1 });
        assert!(html.contains(r#"<a rel="prev" href="1" accesskey="p">Previous</a>"#));
        assert!(html.contains(r#"<a rel="next" href="../chapter-2/3" accesskey="n">Next</a>"#));

        let last = rendered(&doc, PageRef::Verse { chapter: 1, verse: 0 });
        assert!(last.contains(r#"<a rel="prev" href="../chapter-1/2" accesskey="p">Previous</a>"#));
        assert!(!last.contains(r#"rel="next""#));
    }

    #[test]
    fn footnote_rendered_only_when_present() {
        let mut doc = sample_document(&[&["1", "2"]]);
        doc.chapters[0].verses[1].footnote = Some("A footnote".to_string());

        let without = rendered(&doc, PageRef::Verse { chapter: 0, verse: 0 });
        assert!(!without.contains("<hr>"));

        let with = rendered(&doc, PageRef::Verse { chapter: 0, verse: 1 });
        assert!(with.contains("<p>Verse 2</p><hr><p>A footnote</p>"));
    }

    #[test]
    fn document_text_is_not_escaped() {
        let mut doc = sample_document(&[&["1"]]);
        doc.chapters[0].verses[0].verse = "Mind &amp; <em>matter</em>".to_string();
        let html = rendered(&doc, PageRef::Verse { chapter: 0, verse: 0 });
        assert!(html.contains("<p>Mind &amp; <em>matter</em></p>"));
    }

    #[test]
    fn config_values_are_escaped() {
        let doc = sample_document(&[&["1"]]);
        let mut options = sample_options();
        options.resources[0].label = "PDF <draft>".to_string();
        let html = render(&doc, PageRef::Index, &options).into_string();
        assert!(html.contains("PDF &lt;draft&gt;"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let doc = sample_document(&[&["1", "2"], &["3"]]);
        for page in [
            PageRef::Index,
            PageRef::Standalone(1),
            PageRef::Chapter(1),
            PageRef::Verse { chapter: 0, verse: 0 },
        ] {
            assert_eq!(rendered(&doc, page), rendered(&doc, page));
        }
    }
}
