//! CLI output formatting.
//!
//! Output is **information-centric**: each entity leads with its positional
//! index and title, with the file it maps to shown after an arrow or on an
//! indented context line.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! The Dhammapada – Verses on the Way
//!
//! Pages
//!     001 Introduction → introduction.html
//!         By Jane Doe (12 paragraphs)
//!     002 Notes → notes.html
//!         By John Roe (3 paragraphs)
//!
//! Chapters
//!     001 Pairs (20 verses) → chapter-1/
//!     002 Heedfulness (12 verses) → chapter-2/
//!
//! 38 pages, 38 sitemap entries
//! ```
//!
//! ## Build
//!
//! ```text
//! Writing robots.txt
//! Writing sitemap.xml
//! Writing index.html
//! Prepared chapter-1/
//! Writing chapter-1/index.html
//! ...
//! Generated 3 pages, 2 chapters, 32 verses → dist
//! Sitemap: 38 entries
//! ```
//!
//! Each `format_*` function is pure and returns lines; the `print_*` wrappers
//! write them to stdout.

use crate::document::Document;
use crate::generate::{GenerateEvent, GenerateSummary};
use crate::links;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the inventory of a loaded document.
pub fn format_check_output(doc: &Document) -> Vec<String> {
    let mut lines = vec![format!("{} \u{2013} {}", doc.title, doc.subtitle)];

    lines.push(String::new());
    lines.push("Pages".to_string());
    for (i, page) in doc.pages.iter().enumerate() {
        lines.push(format!(
            "{}{} {} \u{2192} {}.html",
            indent(1),
            format_index(i + 1),
            page.title,
            links::page_path(page)
        ));
        lines.push(format!(
            "{}By {} ({})",
            indent(2),
            page.author,
            plural(page.content.len(), "paragraph", "paragraphs")
        ));
    }

    lines.push(String::new());
    lines.push("Chapters".to_string());
    for (i, chapter) in doc.chapters.iter().enumerate() {
        lines.push(format!(
            "{}{} {} ({}) \u{2192} {}",
            indent(1),
            format_index(i + 1),
            chapter.title,
            plural(chapter.verses.len(), "verse", "verses"),
            links::chapter_path(i)
        ));
    }

    lines.push(String::new());
    let total = doc.emitted_page_count();
    lines.push(format!(
        "{}, {}",
        plural(total, "page", "pages"),
        plural(total, "sitemap entry", "sitemap entries")
    ));
    lines
}

pub fn print_check_output(doc: &Document) {
    for line in format_check_output(doc) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format a single progress event.
pub fn format_generate_event(event: &GenerateEvent) -> String {
    match event {
        GenerateEvent::Writing { path } => format!("Writing {}", path),
        GenerateEvent::DirectoryPrepared { path } => format!("Prepared {}/", path),
    }
}

pub fn print_generate_event(event: &GenerateEvent) {
    println!("{}", format_generate_event(event));
}

/// Format the closing summary of a build.
pub fn format_generate_summary(summary: &GenerateSummary, output_dir: &Path) -> Vec<String> {
    vec![
        format!(
            "Generated {}, {}, {} \u{2192} {}",
            plural(summary.pages, "page", "pages"),
            plural(summary.chapters, "chapter", "chapters"),
            plural(summary.verses, "verse", "verses"),
            output_dir.display()
        ),
        format!(
            "Sitemap: {}",
            plural(summary.sitemap_entries, "entry", "entries")
        ),
    ]
}

pub fn print_generate_summary(summary: &GenerateSummary, output_dir: &Path) {
    for line in format_generate_summary(summary, output_dir) {
        println!("{}", line);
    }
}
