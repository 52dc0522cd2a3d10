//! Shared test utilities: small in-memory documents and site options.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! // Two chapters: verses 1 and 2, then verse 3.
//! let doc = sample_document(&[&["1", "2"], &["3"]]);
//! assert_eq!(doc.chapters[1].verses[0].no, "3");
//! ```

use crate::config::{SiteConfig, SiteOptions};
use crate::document::{Chapter, Document, Page, Verse};

pub const TEST_PREFIX: &str = "https://example.com";
pub const TEST_LASTMOD: &str = "2024-01-01T12:00:00.000Z";

/// Build a document with the two standard pages and one chapter per entry
/// of `chapters`, each holding verses with the given numbers.
///
/// Chapter `n` is titled `Chapter Title <n>`; verse text is `Verse <no>`.
pub fn sample_document(chapters: &[&[&str]]) -> Document {
    Document {
        title: "The Work".to_string(),
        subtitle: "A Translation".to_string(),
        translation_note: "Translated for testing".to_string(),
        copyright: "Copyright Nobody".to_string(),
        license: vec!["License line one".to_string(), "License line two".to_string()],
        pages: vec![
            Page {
                title: "Introduction".to_string(),
                author: "Ann Author".to_string(),
                content: vec!["First paragraph".to_string(), "Second paragraph".to_string()],
            },
            Page {
                title: "Notes".to_string(),
                author: "Tom Translator".to_string(),
                content: vec!["A note".to_string()],
            },
        ],
        chapters: chapters
            .iter()
            .enumerate()
            .map(|(idx, verses)| Chapter {
                title: format!("Chapter Title {}", idx + 1),
                verses: verses
                    .iter()
                    .map(|no| Verse {
                        no: no.to_string(),
                        verse: format!("Verse {no}"),
                        footnote: None,
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Site options built from the stock config with the test prefix and lastmod.
pub fn sample_options() -> SiteOptions {
    let mut config = SiteConfig::default();
    config.canonical_url_prefix = Some(TEST_PREFIX.to_string());
    config.sitemap_lastmod = Some(TEST_LASTMOD.to_string());
    SiteOptions::from_config(&config).unwrap()
}
