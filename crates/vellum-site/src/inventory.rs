//! Documentation page discovery.
//!
//! Walks the configured docs directory for Markdown sources, derives a
//! site-relative URL for each page, and extracts a title. The walk respects
//! `.gitignore` files and skips hidden entries; page loading runs on the
//! rayon thread pool.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Deserialize;

use vellum_markdown::{Block, Document};

use crate::site::SiteError;

/// File extensions included in the documentation walk.
const DOC_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// A discovered documentation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPage {
    /// Source file path relative to the docs directory.
    pub source_path: PathBuf,
    /// Site-relative URL path (e.g., `""`, `"guide"`, `"domain/setup"`).
    pub url: String,
    /// Page title.
    pub title: String,
}

/// Discover all documentation pages under `source_dir`.
///
/// Files named with a leading `_` are treated as partials and skipped.
/// Pages are returned sorted by URL; two sources mapping to the same URL
/// (e.g., `guide.md` and `guide.mdx`) are both kept, with a warning.
///
/// Returns an empty inventory if the directory does not exist.
///
/// # Errors
///
/// Returns an error if the walk fails or a page cannot be read.
pub fn scan_docs(source_dir: &Path) -> Result<Vec<DocPage>, SiteError> {
    if !source_dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkBuilder::new(source_dir).build() {
        let entry = entry?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.into_path();
        if has_doc_extension(&path) && !is_partial(&path) {
            files.push(path);
        }
    }

    let mut pages = files
        .par_iter()
        .map(|path| load_page(source_dir, path))
        .collect::<Result<Vec<_>, SiteError>>()?;

    pages.sort_by(|a, b| a.url.cmp(&b.url).then_with(|| a.source_path.cmp(&b.source_path)));
    warn_duplicate_urls(&pages);

    Ok(pages)
}

/// Convert a docs-relative source path to a site-relative URL path.
///
/// `index` files map to their directory:
/// - `index.md` -> `""`
/// - `guide.md` -> `"guide"`
/// - `domain/index.md` -> `"domain"`
/// - `domain/setup.mdx` -> `"domain/setup"`
pub(crate) fn source_path_to_url(rel_path: &Path) -> String {
    let path_str = rel_path.to_string_lossy();

    let without_ext = path_str
        .strip_suffix(".mdx")
        .or_else(|| path_str.strip_suffix(".md"))
        .unwrap_or(&path_str);

    if without_ext == "index" {
        String::new()
    } else if let Some(without_index) = without_ext.strip_suffix("/index") {
        without_index.to_string()
    } else {
        without_ext.to_string()
    }
}

fn has_doc_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DOC_EXTENSIONS.contains(&ext))
}

/// Files whose name starts with `_` are partials for inclusion, not pages.
fn is_partial(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('_'))
}

/// Read one page and derive its URL and title.
fn load_page(source_dir: &Path, path: &Path) -> Result<DocPage, SiteError> {
    let source = std::fs::read_to_string(path).map_err(|e| SiteError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let document = vellum_markdown::parse(&source);

    let rel_path = path.strip_prefix(source_dir).unwrap_or(path);
    let title = front_matter_title(&document)
        .or_else(|| first_heading_title(&document))
        .unwrap_or_else(|| title_from_stem(path));

    Ok(DocPage {
        source_path: rel_path.to_path_buf(),
        url: source_path_to_url(rel_path),
        title,
    })
}

/// Front matter fields consulted during discovery.
#[derive(Deserialize)]
struct FrontMatterFields {
    title: Option<String>,
}

/// Extract the `title:` field from a document's front matter, if any.
fn front_matter_title(document: &Document) -> Option<String> {
    let Some(Block::FrontMatter { lines }) = document.blocks.first() else {
        return None;
    };
    if lines.len() < 2 {
        return None;
    }

    // Drop the delimiter lines; the interior is plain YAML.
    let interior = lines[1..lines.len() - 1].join("\n");
    let trimmed = interior.trim();
    if trimmed.is_empty() {
        return None;
    }

    let fields: FrontMatterFields = serde_yaml::from_str(trimmed).ok()?;
    fields.title.filter(|title| !title.is_empty())
}

/// Text of the first level-1 heading, if any.
fn first_heading_title(document: &Document) -> Option<String> {
    document.blocks.iter().find_map(|block| match block {
        Block::Heading { level: 1, text } => Some(text.clone()),
        _ => None,
    })
}

/// Derive a title from the file stem (`setup-guide` becomes `Setup Guide`).
fn title_from_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| titlecase(&stem.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Convert a kebab-case or `snake_case` slug to title case.
fn titlecase(slug: &str) -> String {
    let mut title = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !title.is_empty() {
            title.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            title.extend(first.to_uppercase());
            title.push_str(chars.as_str());
        }
    }
    title
}

/// Warn about URL collisions in a URL-sorted inventory.
fn warn_duplicate_urls(pages: &[DocPage]) {
    for pair in pages.windows(2) {
        if pair[0].url == pair[1].url {
            tracing::warn!(
                url = %pair[0].url,
                first = %pair[0].source_path.display(),
                second = %pair[1].source_path.display(),
                "Two sources map to the same URL"
            );
        }
    }
}
