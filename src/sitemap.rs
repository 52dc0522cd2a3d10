//! Sitemap and robots file.
//!
//! The sitemap is written incrementally through one long-lived writer: the
//! envelope is opened before the first page is emitted, one `<url>` entry is
//! appended right after each page, and the envelope is closed at the end.
//! Every entry carries the same `<lastmod>`, supplied once per run.
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset ...>
//!   <url>
//!     <loc>https://example.com/chapter-1/</loc>
//!     <lastmod>2024-01-01T12:00:00.000Z</lastmod>
//!   </url>
//! </urlset>
//! ```

use std::io::{self, Write};

pub const SITEMAP_FILENAME: &str = "sitemap.xml";
pub const ROBOTS_FILENAME: &str = "robots.txt";

const URLSET_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset
  xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
  xsi:schemaLocation="http://www.sitemaps.org/schemas/sitemap/0.9 http://www.sitemaps.org/schemas/sitemap/0.9/sitemap.xsd"
  xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#;

const URLSET_CLOSE: &str = "</urlset>\n";

/// Contents of `robots.txt`: a single line pointing at the sitemap.
pub fn robots_txt(url_prefix: &str) -> String {
    format!("Sitemap: {url_prefix}/{SITEMAP_FILENAME}\n")
}

/// An open sitemap document accumulating entries in emission order.
pub struct Sitemap<W: Write> {
    out: W,
    url_prefix: String,
    lastmod: String,
    entries: usize,
}

impl<W: Write> Sitemap<W> {
    /// Write the XML declaration and the opening `<urlset>` tag.
    pub fn start(mut out: W, url_prefix: &str, lastmod: &str) -> io::Result<Self> {
        out.write_all(URLSET_OPEN.as_bytes())?;
        Ok(Self {
            out,
            url_prefix: url_prefix.to_string(),
            lastmod: lastmod.to_string(),
            entries: 0,
        })
    }

    /// Append the entry for one emitted page.
    pub fn add(&mut self, canonical_path: &str) -> io::Result<()> {
        write!(
            self.out,
            "  <url>\n    <loc>{}/{}</loc>\n    <lastmod>{}</lastmod>\n  </url>\n",
            self.url_prefix, canonical_path, self.lastmod
        )?;
        self.entries += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Close the envelope and flush. Returns the writer and the entry count.
    pub fn finish(mut self) -> io::Result<(W, usize)> {
        self.out.write_all(URLSET_CLOSE.as_bytes())?;
        self.out.flush()?;
        Ok((self.out, self.entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robots_points_at_sitemap() {
        assert_eq!(
            robots_txt("https://example.com"),
            "Sitemap: https://example.com/sitemap.xml\n"
        );
    }

    #[test]
    fn empty_sitemap_is_a_valid_envelope() {
        let sitemap = Sitemap::start(Vec::new(), "https://example.com", "2024").unwrap();
        assert!(sitemap.is_empty());
        let (out, count) = sitemap.finish().unwrap();
        let xml = String::from_utf8(out).unwrap();
        assert_eq!(count, 0);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset\n"));
        assert!(xml.contains(r#"xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.ends_with("\">\n</urlset>\n"));
    }

    #[test]
    fn entries_in_emission_order_with_shared_lastmod() {
        let mut sitemap =
            Sitemap::start(Vec::new(), "https://example.com", "2024-01-01T12:00:00.000Z").unwrap();
        sitemap.add("").unwrap();
        sitemap.add("introduction").unwrap();
        sitemap.add("chapter-1/").unwrap();
        sitemap.add("chapter-1/1").unwrap();
        assert_eq!(sitemap.len(), 4);

        let (out, count) = sitemap.finish().unwrap();
        let xml = String::from_utf8(out).unwrap();
        assert_eq!(count, 4);
        assert!(xml.contains(
            "  <url>\n    <loc>https://example.com/</loc>\n    <lastmod>2024-01-01T12:00:00.000Z</lastmod>\n  </url>\n"
        ));

        let locs: Vec<&str> = xml
            .lines()
            .filter_map(|l| l.trim().strip_prefix("<loc>"))
            .filter_map(|l| l.strip_suffix("</loc>"))
            .collect();
        assert_eq!(
            locs,
            vec![
                "https://example.com/",
                "https://example.com/introduction",
                "https://example.com/chapter-1/",
                "https://example.com/chapter-1/1",
            ]
        );
        assert_eq!(xml.matches("<lastmod>2024-01-01T12:00:00.000Z</lastmod>").count(), 4);
    }
}
