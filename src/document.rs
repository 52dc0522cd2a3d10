//! The source document: a titled work made of chapters of numbered verses,
//! plus a handful of standalone pages.
//!
//! The document is read once from JSON and stays immutable for the rest of
//! the run. Every string field is embedded into HTML verbatim, so the JSON is
//! the trust boundary: whoever produces it is responsible for escaping.
//!
//! ## Format
//!
//! ```json
//! {
//!   "title": "The Dhammapada",
//!   "subtitle": "Verses on the Way",
//!   "translation_note": "Translated from the Pali",
//!   "copyright": "Copyright © ...",
//!   "license": ["This work is licensed under ..."],
//!   "pages": [
//!     { "title": "Introduction", "author": "...", "content": ["<paragraph>", "..."] },
//!     { "title": "Notes", "author": "...", "content": ["..."] }
//!   ],
//!   "chapters": [
//!     { "title": "Pairs", "verses": [
//!       { "no": 1, "verse": "...", "footnote": "..." },
//!       { "no": "2-3", "verse": "..." }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Verse numbers may be JSON numbers or strings; a string covers labels such
//! as `"58-59"` that span more than one physical verse.

use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("cannot read document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("document needs at least 2 standalone pages, found {0}")]
    TooFewPages(usize),
    #[error("page {0} has an empty title")]
    EmptyPageTitle(usize),
    #[error("page {page} slug \"{slug}\" is not a usable file name")]
    InvalidPageSlug { page: usize, slug: String },
    #[error("chapter {number} (\"{title}\") has no verses")]
    EmptyChapter { number: usize, title: String },
    #[error("chapter {chapter} has a verse with an empty number")]
    EmptyVerseNo { chapter: usize },
    #[error("chapter {chapter} has verse number \"{no}\" which is not a valid file name")]
    InvalidVerseNo { chapter: usize, no: String },
}

/// The whole work.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub title: String,
    pub subtitle: String,
    #[serde(alias = "translationNote")]
    pub translation_note: String,
    pub copyright: String,
    /// License text, one paragraph per entry.
    #[serde(default)]
    pub license: Vec<String>,
    pub pages: Vec<Page>,
    pub chapters: Vec<Chapter>,
}

/// A standalone essay-like page (introduction, translator notes, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub title: String,
    pub author: String,
    /// Paragraphs in presentation order.
    #[serde(default)]
    pub content: Vec<String>,
}

impl Page {
    /// URL segment and file stem: the lowercased title.
    pub fn slug(&self) -> String {
        self.title.to_lowercase()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub verses: Vec<Verse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Verse {
    /// Display label, also the file stem inside the chapter directory.
    #[serde(deserialize_with = "verse_number")]
    pub no: String,
    /// Verse text.
    pub verse: String,
    #[serde(default)]
    pub footnote: Option<String>,
}

fn verse_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    })
}

impl Document {
    /// Read and parse a document file. Call [`Document::validate`] before
    /// rendering it.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| DocumentError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject documents that would render broken pages or navigation.
    ///
    /// Runs before anything is written, so a malformed document never leaves
    /// a half-generated tree behind.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.pages.len() < 2 {
            return Err(DocumentError::TooFewPages(self.pages.len()));
        }
        for (idx, page) in self.pages.iter().enumerate() {
            if page.title.trim().is_empty() {
                return Err(DocumentError::EmptyPageTitle(idx + 1));
            }
            let slug = page.slug();
            // `index` would overwrite the site root.
            if !is_valid_file_stem(&slug) || slug == "index" {
                return Err(DocumentError::InvalidPageSlug { page: idx + 1, slug });
            }
        }

        for (idx, chapter) in self.chapters.iter().enumerate() {
            let number = idx + 1;
            if chapter.verses.is_empty() {
                return Err(DocumentError::EmptyChapter {
                    number,
                    title: chapter.title.clone(),
                });
            }

            let mut seen = HashSet::new();
            for verse in &chapter.verses {
                if verse.no.trim().is_empty() {
                    return Err(DocumentError::EmptyVerseNo { chapter: number });
                }
                if !is_valid_file_stem(&verse.no) {
                    return Err(DocumentError::InvalidVerseNo {
                        chapter: number,
                        no: verse.no.clone(),
                    });
                }
                if !seen.insert(verse.no.as_str()) {
                    // Later pages overwrite earlier ones with the same number.
                    tracing::warn!(chapter = number, no = %verse.no, "duplicate verse number");
                }
            }
        }
        Ok(())
    }

    /// Number of HTML pages a full run emits, which is also the number of
    /// sitemap entries: index, pages, and each chapter index with its verses.
    pub fn emitted_page_count(&self) -> usize {
        1 + self.pages.len()
            + self
                .chapters
                .iter()
                .map(|c| 1 + c.verses.len())
                .sum::<usize>()
    }

    pub fn verse_count(&self) -> usize {
        self.chapters.iter().map(|c| c.verses.len()).sum()
    }
}

fn is_valid_file_stem(no: &str) -> bool {
    !no.contains(['/', '\\']) && no != "." && no != ".."
}
