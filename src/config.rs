//! Site configuration.
//!
//! Settings come from an optional `versebook.toml` merged on top of stock
//! defaults, then from command-line flags, which win over the file.
//!
//! ## Configuration Options
//!
//! ```toml
//! # Every key may be omitted; these are the built-in values
//!
//! document = "document.json"   # Source document (JSON)
//! output_dir = "dist"          # Where the site is written
//!
//! # Required for `build`, either here or via --url-prefix / --lastmod
//! # canonical_url_prefix = "https://example.com"
//! # sitemap_lastmod = "2024-01-01T12:00:00.000Z"
//!
//! [head]
//! lang = "en-US"
//! theme_color = "grey"
//! icon = "/assets/icons/icon.webp"
//! icon_type = "image/webp"
//! stylesheet = "/assets/css/styles.css"
//!
//! [[resources]]                # Index footer links, marked rel="noindex"
//! href = "source.pdf"
//! label = "The source PDF"
//! ```
//!
//! Config files are sparse: override just the values you want. Arrays such as
//! `resources` are replaced as a whole, not merged entry by entry.
//!
//! A key the generator does not know is an error, not silently ignored.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "versebook.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("missing required setting `{0}` (set it in the config file or pass it on the command line)")]
    Missing(&'static str),
}

/// Configuration as loaded from `versebook.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Path of the source document.
    pub document: String,
    /// Output directory for the generated site.
    pub output_dir: String,
    /// Absolute URL prefix without trailing slash, e.g. `https://example.com`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url_prefix: Option<String>,
    /// Timestamp stamped on every sitemap entry of a run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitemap_lastmod: Option<String>,
    /// Values for the shared `<head>` block.
    pub head: HeadConfig,
    /// Footer links on the index page.
    pub resources: Vec<ResourceLink>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            document: "document.json".to_string(),
            output_dir: "dist".to_string(),
            canonical_url_prefix: None,
            sitemap_lastmod: None,
            head: HeadConfig::default(),
            resources: default_resources(),
        }
    }
}

impl SiteConfig {
    /// Validate the values that are present.
    ///
    /// Missing prefix/lastmod are not an error here; `check` and `gen-config`
    /// run without them. [`SiteOptions::from_config`] enforces presence.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prefix) = &self.canonical_url_prefix {
            validate_url_prefix(prefix)?;
        }
        if let Some(lastmod) = &self.sitemap_lastmod {
            if lastmod.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "sitemap_lastmod must not be empty".into(),
                ));
            }
        }
        if self.document.is_empty() {
            return Err(ConfigError::Validation("document must not be empty".into()));
        }
        if self.output_dir.is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        for link in &self.resources {
            if link.href.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "resource link \"{}\" has an empty href",
                    link.label
                )));
            }
        }
        Ok(())
    }
}

/// Values given on the command line, each replacing its config counterpart.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url_prefix: Option<String>,
    pub lastmod: Option<String>,
    pub document: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl SiteConfig {
    /// Apply command-line overrides and re-validate.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if overrides.url_prefix.is_some() {
            self.canonical_url_prefix = overrides.url_prefix;
        }
        if overrides.lastmod.is_some() {
            self.sitemap_lastmod = overrides.lastmod;
        }
        if let Some(document) = overrides.document {
            self.document = document.to_string_lossy().into_owned();
        }
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir.to_string_lossy().into_owned();
        }
        self.validate()?;
        Ok(self)
    }
}

fn validate_url_prefix(prefix: &str) -> Result<(), ConfigError> {
    if prefix.is_empty() {
        return Err(ConfigError::Validation(
            "canonical_url_prefix must not be empty".into(),
        ));
    }
    if prefix.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "canonical_url_prefix must not end with '/': {prefix}"
        )));
    }
    if !(prefix.starts_with("http://") || prefix.starts_with("https://")) {
        return Err(ConfigError::Validation(format!(
            "canonical_url_prefix must be an absolute http(s) URL: {prefix}"
        )));
    }
    Ok(())
}

/// The shared `<head>` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadConfig {
    /// `lang` attribute of `<html>`.
    pub lang: String,
    /// `<meta name="theme-color">` value.
    pub theme_color: String,
    /// Favicon URL.
    pub icon: String,
    /// MIME type of the favicon.
    pub icon_type: String,
    /// Stylesheet URL. Referenced only, never processed.
    pub stylesheet: String,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            lang: "en-US".to_string(),
            theme_color: "grey".to_string(),
            icon: "/assets/icons/icon.webp".to_string(),
            icon_type: "image/webp".to_string(),
            stylesheet: "/assets/css/styles.css".to_string(),
        }
    }
}

/// A link in the index page footer pointing at a source artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceLink {
    pub href: String,
    pub label: String,
}

fn default_resources() -> Vec<ResourceLink> {
    vec![
        ResourceLink {
            href: "source.pdf".to_string(),
            label: "The source PDF".to_string(),
        },
        ResourceLink {
            href: "document.json".to_string(),
            label: "A JSON file with the PDF’s content for processing".to_string(),
        },
        ResourceLink {
            href: "https://crates.io/crates/versebook".to_string(),
            label: "The generator that builds these pages from above JSON".to_string(),
        },
    ]
}

/// Fully resolved settings for one generation run.
///
/// Unlike [`SiteConfig`], the prefix and lastmod are guaranteed present and
/// valid, so the renderer and sitemap never deal with `Option`s.
#[derive(Debug, Clone)]
pub struct SiteOptions {
    pub url_prefix: String,
    pub lastmod: String,
    pub head: HeadConfig,
    pub resources: Vec<ResourceLink>,
}

impl SiteOptions {
    pub fn from_config(config: &SiteConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let url_prefix = config
            .canonical_url_prefix
            .clone()
            .ok_or(ConfigError::Missing("canonical_url_prefix"))?;
        let lastmod = config
            .sitemap_lastmod
            .clone()
            .ok_or(ConfigError::Missing("sitemap_lastmod"))?;
        Ok(Self {
            url_prefix,
            lastmod,
            head: config.head.clone(),
            resources: config.resources.clone(),
        })
    }

    /// Absolute URL of a canonical path. The site root is the empty path.
    pub fn canonical_url(&self, canonical_path: &str) -> String {
        format!("{}/{}", self.url_prefix, canonical_path)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// The built-in settings as a TOML table, the base layer for merging.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Layer `overlay` over `base`.
///
/// Tables merge per key, recursively. Any other value in `overlay`, arrays
/// included, replaces the one in `base` wholesale, which is why a
/// `[[resources]]` list in a user file replaces the default links.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let value = match base_table.remove(&key) {
                    Some(existing) => merge_toml(existing, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, value);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value, `None` if it does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, deserialize, validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path`, falling back to stock defaults when the
/// file is absent.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_some() {
        tracing::debug!(path = %path.display(), "loaded config file");
    }
    resolve_config(overlay)
}

/// The stock config file printed by `gen-config`, every key documented.
pub fn stock_config_toml() -> &'static str {
    r##"# Versebook Configuration
# =======================
# Every key may be omitted; the values below are the built-in ones.
# Misspelled or unknown keys are rejected.

# Source document (JSON).
document = "document.json"

# Directory the site is written to. Created if missing; only the files the
# generator owns are replaced.
output_dir = "dist"

# Absolute URL prefix, no trailing slash. Used for every canonical link and
# sitemap <loc>. Required for `build` unless passed as --url-prefix.
# canonical_url_prefix = "https://example.com"

# Timestamp written as <lastmod> on every sitemap entry of a run.
# Required for `build` unless passed as --lastmod.
# sitemap_lastmod = "2024-01-01T12:00:00.000Z"

# ---------------------------------------------------------------------------
# Shared <head> block
# ---------------------------------------------------------------------------
[head]
lang = "en-US"
theme_color = "grey"
icon = "/assets/icons/icon.webp"
icon_type = "image/webp"
stylesheet = "/assets/css/styles.css"

# ---------------------------------------------------------------------------
# Index page footer links (rendered with rel="noindex").
# Defining any [[resources]] replaces the whole default list.
# ---------------------------------------------------------------------------
[[resources]]
href = "source.pdf"
label = "The source PDF"

[[resources]]
href = "document.json"
label = "A JSON file with the PDF’s content for processing"

[[resources]]
href = "https://crates.io/crates/versebook"
label = "The generator that builds these pages from above JSON"
"##
}
