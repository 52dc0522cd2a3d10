//! Site generation.
//!
//! Runs the fixed emission sequence over a loaded document:
//!
//! 1. `robots.txt`
//! 2. open `sitemap.xml`
//! 3. `index.html`
//! 4. one `<slug>.html` per standalone page
//! 5. per chapter: empty `chapter-<n>/`, write its `index.html`, then one
//!    `<no>.html` per verse
//! 6. close `sitemap.xml`
//!
//! Each page goes through the same steps: compute its canonical path, render
//! it, write the file, append its sitemap entry. The sitemap therefore lists
//! pages in exactly the order they were written.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── robots.txt
//! ├── sitemap.xml
//! ├── index.html
//! ├── introduction.html
//! ├── notes.html
//! ├── chapter-1/
//! │   ├── index.html
//! │   ├── 1.html
//! │   └── 2.html
//! └── chapter-2/
//!     ├── index.html
//!     └── 3.html
//! ```
//!
//! There is no rollback. The first failure aborts the run and whatever was
//! written so far stays on disk.

use crate::config::{ConfigError, SiteConfig, SiteOptions};
use crate::document::{Document, DocumentError};
use crate::links::{self, PageRef};
use crate::render;
use crate::sink::{self, SinkError};
use crate::sitemap::{self, Sitemap};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
    #[error("Output error: {0}")]
    Sink(#[from] SinkError),
}

impl GenerateError {
    /// Process exit code: the OS error number of an underlying I/O failure
    /// when it fits in an exit status, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        let io_error = match self {
            GenerateError::Sink(e) => Some(&e.source),
            GenerateError::Document(DocumentError::Io { source, .. }) => Some(source),
            GenerateError::Config(ConfigError::Io(e)) => Some(e),
            _ => None,
        };
        io_error
            .and_then(std::io::Error::raw_os_error)
            .and_then(|code| u8::try_from(code).ok())
            .filter(|code| *code != 0)
            .unwrap_or(1)
    }
}

/// Progress notifications, one per file about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateEvent {
    /// A chapter directory was created or emptied.
    DirectoryPrepared { path: String },
    /// A file is about to be written. `path` is relative to the output root.
    Writing { path: String },
}

/// What a completed run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub pages: usize,
    pub chapters: usize,
    pub verses: usize,
    pub sitemap_entries: usize,
}

/// Load the document named by `config`, then generate the site into the
/// configured output directory.
pub fn build(
    config: &SiteConfig,
    on_event: impl FnMut(&GenerateEvent),
) -> Result<GenerateSummary, GenerateError> {
    let options = SiteOptions::from_config(config)?;
    let document = Document::load(Path::new(&config.document))?;
    let summary = generate(&document, &options, Path::new(&config.output_dir), on_event)?;
    Ok(summary)
}

/// Generate the whole site for `doc` into `output_dir`.
///
/// The document is validated first, so a malformed document fails before
/// anything is written.
pub fn generate(
    doc: &Document,
    options: &SiteOptions,
    output_dir: &Path,
    on_event: impl FnMut(&GenerateEvent),
) -> Result<GenerateSummary, GenerateError> {
    doc.validate()?;
    sink::ensure_dir(output_dir)?;

    let mut emitter = Emitter {
        doc,
        options,
        root: output_dir,
        on_event,
    };

    emitter.write_robots()?;
    let mut map = emitter.open_sitemap()?;

    emitter.emit(PageRef::Index, &mut map)?;
    for idx in 0..doc.pages.len() {
        emitter.emit(PageRef::Standalone(idx), &mut map)?;
    }
    for (chapter_idx, chapter) in doc.chapters.iter().enumerate() {
        emitter.prepare_chapter_dir(chapter_idx)?;
        emitter.emit(PageRef::Chapter(chapter_idx), &mut map)?;
        for verse_idx in 0..chapter.verses.len() {
            emitter.emit(
                PageRef::Verse {
                    chapter: chapter_idx,
                    verse: verse_idx,
                },
                &mut map,
            )?;
        }
    }

    let sitemap_path = output_dir.join(sitemap::SITEMAP_FILENAME);
    let (_, sitemap_entries) = map
        .finish()
        .map_err(|e| SinkError::new("write", &sitemap_path, e))?;

    let summary = GenerateSummary {
        pages: 1 + doc.pages.len(),
        chapters: doc.chapters.len(),
        verses: doc.verse_count(),
        sitemap_entries,
    };
    tracing::debug!(?summary, output = %output_dir.display(), "site generated");
    Ok(summary)
}

/// Per-run state shared by the emission steps.
struct Emitter<'a, F> {
    doc: &'a Document,
    options: &'a SiteOptions,
    root: &'a Path,
    on_event: F,
}

impl<F: FnMut(&GenerateEvent)> Emitter<'_, F> {
    fn target(&mut self, relative: &str) -> PathBuf {
        (self.on_event)(&GenerateEvent::Writing {
            path: relative.to_string(),
        });
        self.root.join(relative)
    }

    fn write_robots(&mut self) -> Result<(), SinkError> {
        let path = self.target(sitemap::ROBOTS_FILENAME);
        sink::write_file(&path, &sitemap::robots_txt(&self.options.url_prefix))
    }

    fn open_sitemap(&mut self) -> Result<Sitemap<BufWriter<File>>, SinkError> {
        let path = self.target(sitemap::SITEMAP_FILENAME);
        let out = sink::create_file(&path)?;
        Sitemap::start(out, &self.options.url_prefix, &self.options.lastmod)
            .map_err(|e| SinkError::new("write", &path, e))
    }

    fn prepare_chapter_dir(&mut self, chapter_idx: usize) -> Result<(), SinkError> {
        let relative = links::chapter_dir(chapter_idx);
        sink::prepare_empty_dir(&self.root.join(&relative))?;
        (self.on_event)(&GenerateEvent::DirectoryPrepared { path: relative });
        Ok(())
    }

    /// Render one page, write it, and record it in the sitemap.
    fn emit(
        &mut self,
        page: PageRef,
        map: &mut Sitemap<BufWriter<File>>,
    ) -> Result<(), SinkError> {
        let canonical_path = page.canonical_path(self.doc);
        let html = render::render(self.doc, page, self.options).into_string();
        let path = self.target(&page.output_file(self.doc));
        sink::write_file(&path, &html)?;
        map.add(&canonical_path).map_err(|e| {
            SinkError::new("write", &self.root.join(sitemap::SITEMAP_FILENAME), e)
        })
    }
}
