//! Block tree types for parsed markdown documents.

use std::fmt;

/// A parsed markdown document: an ordered tree of [`Block`]s plus any
/// diagnostics the parser collected along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Top-level blocks in source order.
    pub blocks: Vec<Block>,
    /// Parser diagnostics (unclosed directives, stray closers, unclosed fences).
    pub warnings: Vec<ParseWarning>,
}

impl Document {
    /// Create a document from blocks with no warnings.
    #[must_use]
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            warnings: Vec::new(),
        }
    }

    /// Serialize the tree back to markdown text.
    ///
    /// Output is normalized: blocks are separated by a single blank line and
    /// list continuations are re-indented to their content column. Content is
    /// never reordered or dropped.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        crate::writer::to_markdown(self)
    }
}

/// A single block in the document tree.
///
/// Containers (`Directive`, `Quote`, `List` items) hold ordered child blocks;
/// the remaining variants are leaves and are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Block {
    /// Leading YAML front matter, delimiters included. Only ever the first
    /// block of a document.
    FrontMatter { lines: Vec<String> },
    /// ATX heading (`# Title` through `###### Title`).
    Heading { level: u8, text: String },
    /// Run of plain text lines, verbatim.
    Paragraph { lines: Vec<String> },
    /// Fenced code block, all lines verbatim including both fence lines.
    /// Opaque: directive markers inside are content.
    CodeFence { lines: Vec<String> },
    /// Thematic break (`---`, `***`, `___`).
    ThematicBreak { raw: String },
    /// Blockquote; the `>` prefix is stripped and the interior re-parsed.
    Quote { children: Vec<Block> },
    /// Bullet or ordered list.
    List { ordered: bool, items: Vec<ListItem> },
    /// Container directive (`:::name` through the pairing `:::`).
    Directive(Directive),
}

impl Block {
    /// Convenience constructor for a single-line paragraph.
    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph {
            lines: vec![text.into()],
        }
    }

    /// Convenience constructor for a heading.
    #[must_use]
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::Heading {
            level,
            text: text.into(),
        }
    }
}

/// A container directive block: `:::name[label]{attrs}` through the pairing
/// closing marker.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Directive {
    /// Directive name (alphanumerics, hyphens, underscores).
    pub name: String,
    /// Raw remainder of the opening marker after the name, verbatim
    /// (bracket label, attribute braces, trailing text). Empty when the
    /// marker was bare.
    pub args: String,
    /// Number of colons in the opening marker (at least 3). Preserved so
    /// nested markers round-trip.
    pub colons: usize,
    /// Content between the markers, parsed.
    pub children: Vec<Block>,
}

impl Directive {
    /// Create a bare directive (`:::name`) with the given children.
    #[must_use]
    pub fn new(name: impl Into<String>, children: Vec<Block>) -> Self {
        Self {
            name: name.into(),
            args: String::new(),
            colons: 3,
            children,
        }
    }
}

/// One item of a [`Block::List`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListItem {
    /// The verbatim marker (`-`, `*`, `+`, `1.`, `2)`, ...).
    pub marker: String,
    /// Item content, parsed. Directives nested in items appear here.
    pub children: Vec<Block>,
}

impl ListItem {
    /// Create an item with a `-` marker.
    #[must_use]
    pub fn new(children: Vec<Block>) -> Self {
        Self {
            marker: "-".to_owned(),
            children,
        }
    }
}

/// A parser diagnostic tied to a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseWarning {
    /// 1-indexed source line. For unclosed constructs this is the line that
    /// opened them.
    pub line: usize,
    /// Human-readable description.
    pub message: String,
}

impl ParseWarning {
    pub(crate) fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}
