//! Variant section filtering.
//!
//! Documentation for two incompatible product generations lives in one
//! source tree, fenced by a pair of mutually exclusive container directives:
//!
//! ```markdown
//! :::v2
//! Docs for the next generation.
//! :::
//!
//! :::v1
//! Docs for the current generation.
//! :::
//! ```
//!
//! [`VariantFilter`] keeps exactly one side per build: the kept directive is
//! unwrapped (its children spliced into the parent, in place), the other is
//! removed along with its entire contents. Directives with any other name
//! pass through untouched and are recursed into, as are quotes and list
//! items, so fenced sections are found at any nesting depth.

use crate::block::{Block, Directive, Document, ListItem};
use crate::transform::Transform;

/// The pair of directive names marking variant-specific sections.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantLabels {
    /// Label for next-generation content.
    pub next: String,
    /// Label for current-generation content.
    pub current: String,
}

impl VariantLabels {
    /// Create a label pair.
    #[must_use]
    pub fn new(next: impl Into<String>, current: impl Into<String>) -> Self {
        Self {
            next: next.into(),
            current: current.into(),
        }
    }

    /// Whether `name` is one of the two variant labels.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        name == self.next || name == self.current
    }
}

impl Default for VariantLabels {
    fn default() -> Self {
        Self::new("v2", "v1")
    }
}

/// Removes or unwraps variant directives based on which generation a build
/// renders.
///
/// The decision per directive is an exclusive-or of "is this the next-gen
/// label" and `render_next`: when they disagree the section is removed
/// wholesale, when they agree the directive node is unwrapped and its
/// children take its place. Sibling order is always preserved.
///
/// The flag is injected at construction and the filter never reads process
/// state, so a single instance can serve any number of documents.
#[derive(Debug, Clone)]
pub struct VariantFilter {
    labels: VariantLabels,
    render_next: bool,
}

impl VariantFilter {
    /// Create a filter for one build configuration.
    #[must_use]
    pub fn new(labels: VariantLabels, render_next: bool) -> Self {
        Self {
            labels,
            render_next,
        }
    }

    /// The label pair this filter recognizes.
    #[must_use]
    pub fn labels(&self) -> &VariantLabels {
        &self.labels
    }

    /// Whether next-generation sections are the ones kept.
    #[must_use]
    pub fn render_next(&self) -> bool {
        self.render_next
    }

    /// Filter a child sequence, returning a freshly built one.
    ///
    /// Each input block contributes zero blocks (a removed variant section),
    /// its recursively filtered children (an unwrapped one), or itself with
    /// children filtered in place of the originals (everything else).
    #[must_use]
    pub fn filter_blocks(&self, blocks: Vec<Block>) -> Vec<Block> {
        let mut kept = Vec::with_capacity(blocks.len());

        for block in blocks {
            match block {
                Block::Directive(directive) if self.labels.matches(&directive.name) => {
                    let remove = (directive.name == self.labels.next) ^ self.render_next;
                    if !remove {
                        kept.extend(self.filter_blocks(directive.children));
                    }
                }
                other => kept.push(self.filter_block(other)),
            }
        }

        kept
    }

    /// Recurse into a non-variant block's children, leaving leaves untouched.
    fn filter_block(&self, block: Block) -> Block {
        match block {
            Block::Directive(Directive {
                name,
                args,
                colons,
                children,
            }) => Block::Directive(Directive {
                name,
                args,
                colons,
                children: self.filter_blocks(children),
            }),
            Block::Quote { children } => Block::Quote {
                children: self.filter_blocks(children),
            },
            Block::List { ordered, items } => Block::List {
                ordered,
                items: items
                    .into_iter()
                    .map(|ListItem { marker, children }| ListItem {
                        marker,
                        children: self.filter_blocks(children),
                    })
                    .collect(),
            },
            leaf => leaf,
        }
    }
}

impl Transform for VariantFilter {
    fn name(&self) -> &str {
        "variant-filter"
    }

    fn apply(&self, document: &mut Document) {
        let blocks = std::mem::take(&mut document.blocks);
        document.blocks = self.filter_blocks(blocks);
    }
}
