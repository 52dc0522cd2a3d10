//! # Versebook
//!
//! A static site generator for verse works: a titled document of chapters
//! and numbered verses, plus a few standalone pages, rendered into a tree of
//! cross-linked HTML files with a sitemap and a robots file.
//!
//! # Pipeline
//!
//! One run is a single, sequential batch transformation:
//!
//! ```text
//! document.json  →  Document  →  (PageRef → HTML → file + sitemap entry)*  →  dist/
//! ```
//!
//! The document is loaded and validated up front, so malformed input fails
//! before anything is written. After that every page goes through the same
//! four steps in document order: canonical path, render, write, sitemap
//! entry. Identical input and lastmod produce a byte-identical tree.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`document`] | The source document: serde types, loading, validation |
//! | [`links`] | Canonical paths, output file names, previous/next navigation |
//! | [`render`] | Maud templates for the index, standalone, chapter and verse pages |
//! | [`sitemap`] | Incremental `sitemap.xml` writer and `robots.txt` content |
//! | [`sink`] | Remove-then-write files, create-or-empty directories |
//! | [`generate`] | The emission sequence and its progress events |
//! | [`config`] | `versebook.toml` loading, merging, validation, CLI overrides |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Trusted Input, Unescaped Text
//!
//! Document strings may already carry markup and entities, so the renderer
//! splices them in as [`maud::PreEscaped`]. Config values, which are never
//! meant to contain markup, keep maud's escaping.
//!
//! ## Relative Navigation
//!
//! Links between pages are relative (`2`, `../chapter-3/1`), so the output
//! can be served from any prefix. Only the canonical link and the sitemap use
//! the absolute URL prefix.
//!
//! ## One Sitemap Writer
//!
//! The sitemap is appended to through a single buffered writer that lives
//! for the whole run, instead of reopening the file per page. Page files are
//! still opened and closed independently.

pub mod config;
pub mod document;
pub mod generate;
pub mod links;
pub mod output;
pub mod render;
pub mod sink;
pub mod sitemap;

#[cfg(test)]
pub(crate) mod test_helpers;
