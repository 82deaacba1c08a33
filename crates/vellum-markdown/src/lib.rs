//! Directive-aware markdown block tree with variant filtering.
//!
//! This crate is the document-processing core of vellum: it parses markdown
//! into a typed [`Block`] tree, rewrites the tree through [`Transform`]s,
//! and serializes it back to markdown. The shipped transform is
//! [`VariantFilter`], which keeps exactly one of two variant-fenced
//! documentation sections per build.
//!
//! # Architecture
//!
//! - [`parse`] scans lines once, pairing `:::name` container directives with
//!   their closing markers while treating code fences as opaque. Quotes and
//!   list items nest, so directives are found at any depth.
//! - [`VariantFilter`] rebuilds child sequences: a variant directive either
//!   disappears with its whole subtree or is replaced by its own children in
//!   place, decided by an exclusive-or of its label and the build flag.
//! - [`Document::to_markdown`] emits normalized markdown, making
//!   parse, filter, serialize usable as a per-document preprocessor.
//!
//! # Example
//!
//! ```
//! use vellum_markdown::{Transform, VariantFilter, VariantLabels, parse};
//!
//! let source = "intro\n\n:::v2\nnew docs\n:::\n\n:::v1\nold docs\n:::\n";
//! let mut document = parse(source);
//!
//! let filter = VariantFilter::new(VariantLabels::default(), true);
//! filter.apply(&mut document);
//!
//! let output = document.to_markdown();
//! assert!(output.contains("new docs"));
//! assert!(!output.contains("old docs"));
//! ```

mod block;
mod parser;
mod transform;
mod variant;
mod writer;

pub use block::{Block, Directive, Document, ListItem, ParseWarning};
pub use parser::parse;
pub use transform::Transform;
pub use variant::{VariantFilter, VariantLabels};
