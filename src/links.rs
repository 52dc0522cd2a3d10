//! Canonical paths and previous/next navigation.
//!
//! Every generated page has a canonical path relative to the configured URL
//! prefix. It is used for the page's `<link rel="canonical">` and for its
//! sitemap `<loc>`:
//!
//! | Page          | Canonical path            | File                          |
//! |---------------|---------------------------|-------------------------------|
//! | Site root     | (empty)                   | `index.html`                  |
//! | Standalone    | `<slug>`                  | `<slug>.html`                 |
//! | Chapter index | `chapter-<n>/`            | `chapter-<n>/index.html`      |
//! | Verse         | `chapter-<n>/<no>`        | `chapter-<n>/<no>.html`       |
//!
//! Chapters are numbered from 1 by position. Navigation hrefs are relative to
//! the page they appear on, so chapter pages link to sibling directories
//! (`../chapter-3/`) and verse pages stay within their directory except at a
//! chapter boundary, where they cross into the neighbouring chapter. There is
//! no wraparound: the first chapter and first verse overall have no
//! previous link, the last ones have no next link.
//!
//! Everything here is pure; no I/O.

use crate::document::{Chapter, Document, Page, Verse};

/// Canonical path of the site root.
pub const INDEX_PATH: &str = "";

const HTML_EXTENSION: &str = "html";

/// Position of one generated page within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRef {
    Index,
    /// A standalone page, by 0-based position in `pages`.
    Standalone(usize),
    /// A chapter index page, by 0-based position in `chapters`.
    Chapter(usize),
    Verse { chapter: usize, verse: usize },
}

impl PageRef {
    /// Path relative to the URL prefix, as used for canonical links and
    /// sitemap entries.
    pub fn canonical_path(self, doc: &Document) -> String {
        match self {
            PageRef::Index => INDEX_PATH.to_string(),
            PageRef::Standalone(idx) => page_path(&doc.pages[idx]),
            PageRef::Chapter(idx) => chapter_path(idx),
            PageRef::Verse { chapter, verse } => {
                verse_path(chapter, &doc.chapters[chapter].verses[verse])
            }
        }
    }

    /// File path relative to the output directory, `/`-separated.
    pub fn output_file(self, doc: &Document) -> String {
        match self {
            PageRef::Index => format!("index.{HTML_EXTENSION}"),
            PageRef::Chapter(idx) => format!("{}/index.{HTML_EXTENSION}", chapter_dir(idx)),
            other => format!("{}.{HTML_EXTENSION}", other.canonical_path(doc)),
        }
    }
}

/// A single navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

/// Previous/next links of a chapter or verse page.
///
/// A `None` side is omitted from the page entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    pub previous: Option<NavLink>,
    pub next: Option<NavLink>,
}

pub fn page_path(page: &Page) -> String {
    page.slug()
}

/// Directory name of the chapter at 0-based `index`.
pub fn chapter_dir(index: usize) -> String {
    format!("chapter-{}", index + 1)
}

pub fn chapter_path(index: usize) -> String {
    format!("{}/", chapter_dir(index))
}

pub fn verse_path(chapter_index: usize, verse: &Verse) -> String {
    format!("{}/{}", chapter_dir(chapter_index), verse.no)
}

/// `Chapter <n>: “<title>”`, used in headings, titles and nav labels.
pub fn chapter_heading(index: usize, chapter: &Chapter) -> String {
    format!("Chapter {}: “{}”", index + 1, chapter.title)
}

/// Navigation between chapter index pages.
pub fn chapter_navigation(chapters: &[Chapter], index: usize) -> Navigation {
    let link = |target: usize| NavLink {
        label: chapter_heading(target, &chapters[target]),
        href: format!("../{}", chapter_path(target)),
    };

    Navigation {
        previous: index.checked_sub(1).map(link),
        next: (index + 1 < chapters.len()).then(|| link(index + 1)),
    }
}

/// Navigation between verse pages, crossing chapter boundaries.
pub fn verse_navigation(chapters: &[Chapter], chapter_index: usize, verse_index: usize) -> Navigation {
    let verses = &chapters[chapter_index].verses;

    let previous_href = if verse_index > 0 {
        Some(verses[verse_index - 1].no.clone())
    } else {
        chapter_index
            .checked_sub(1)
            .and_then(|prev| {
                chapters[prev]
                    .verses
                    .last()
                    .map(|verse| format!("../{}", verse_path(prev, verse)))
            })
    };

    let next_href = if verse_index + 1 < verses.len() {
        Some(verses[verse_index + 1].no.clone())
    } else {
        chapters.get(chapter_index + 1).and_then(|next| {
            next.verses
                .first()
                .map(|verse| format!("../{}", verse_path(chapter_index + 1, verse)))
        })
    };

    Navigation {
        previous: previous_href.map(|href| NavLink {
            label: "Previous".to_string(),
            href,
        }),
        next: next_href.map(|href| NavLink {
            label: "Next".to_string(),
            href,
        }),
    }
}
