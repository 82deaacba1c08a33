//! Markdown serialization of the block tree.
//!
//! Output is normalized rather than byte-identical to the source: blocks are
//! separated by a single blank line, list continuations are re-indented to
//! their content column, and quote lines are re-prefixed with `> `. Content
//! is never reordered or dropped, so parse, transform, serialize is a stable
//! preprocessing pipeline.

use crate::block::{Block, Directive, Document, ListItem};

/// Serialize a document back to markdown text.
pub(crate) fn to_markdown(document: &Document) -> String {
    let mut out = String::new();
    write_blocks(&document.blocks, &mut out);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn write_blocks(blocks: &[Block], out: &mut String) {
    for (idx, block) in blocks.iter().enumerate() {
        if idx > 0 {
            out.push_str("\n\n");
        }
        write_block(block, out);
    }
}

fn write_block(block: &Block, out: &mut String) {
    match block {
        Block::FrontMatter { lines } | Block::Paragraph { lines } | Block::CodeFence { lines } => {
            push_lines(lines, out);
        }
        Block::Heading { level, text } => {
            for _ in 0..*level {
                out.push('#');
            }
            if !text.is_empty() {
                out.push(' ');
                out.push_str(text);
            }
        }
        Block::ThematicBreak { raw } => out.push_str(raw),
        Block::Quote { children } => write_quote(children, out),
        Block::List { items, .. } => {
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push('\n');
                }
                write_item(item, out);
            }
        }
        Block::Directive(directive) => write_directive(directive, out),
    }
}

fn write_quote(children: &[Block], out: &mut String) {
    let inner = render_children(children);
    for (idx, line) in inner.lines().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        if line.is_empty() {
            out.push('>');
        } else {
            out.push_str("> ");
            out.push_str(line);
        }
    }
}

fn write_item(item: &ListItem, out: &mut String) {
    let indent = " ".repeat(item.marker.len() + 1);
    let inner = render_children(&item.children);

    out.push_str(&item.marker);
    let mut lines = inner.lines();
    if let Some(first) = lines.next()
        && !first.is_empty()
    {
        out.push(' ');
        out.push_str(first);
    }
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(&indent);
            out.push_str(line);
        }
    }
}

fn write_directive(directive: &Directive, out: &mut String) {
    let fence = ":".repeat(directive.colons);

    out.push_str(&fence);
    out.push_str(&directive.name);
    out.push_str(&directive.args);
    out.push('\n');
    if !directive.children.is_empty() {
        out.push_str(&render_children(&directive.children));
        out.push('\n');
    }
    out.push_str(&fence);
}

fn render_children(blocks: &[Block]) -> String {
    let mut out = String::new();
    write_blocks(blocks, &mut out);
    out
}

fn push_lines(lines: &[String], out: &mut String) {
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(line);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::block::{Block, Directive, Document, ListItem};
    use crate::parser::parse;

    fn roundtrip(source: &str) -> String {
        parse(source).to_markdown()
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(Document::default().to_markdown(), "");
    }

    #[test]
    fn test_paragraphs_and_headings() {
        assert_eq!(
            roundtrip("# Title\n\nfirst\nsecond\n"),
            "# Title\n\nfirst\nsecond\n"
        );
    }

    #[test]
    fn test_blank_runs_collapse() {
        assert_eq!(roundtrip("a\n\n\n\nb\n"), "a\n\nb\n");
    }

    #[test]
    fn test_directive_roundtrip() {
        assert_eq!(
            roundtrip(":::v2\nnew docs\n:::\n"),
            ":::v2\nnew docs\n:::\n"
        );
    }

    #[test]
    fn test_directive_args_preserved() {
        assert_eq!(
            roundtrip(":::tip[Remember]{.compact}\nbody\n:::\n"),
            ":::tip[Remember]{.compact}\nbody\n:::\n"
        );
    }

    #[test]
    fn test_nested_directive_keeps_colon_counts() {
        assert_eq!(
            roundtrip("::::outer\n:::inner\ndeep\n:::\n::::\n"),
            "::::outer\n:::inner\ndeep\n:::\n::::\n"
        );
    }

    #[test]
    fn test_empty_directive() {
        assert_eq!(roundtrip(":::v1\n:::\n"), ":::v1\n:::\n");
    }

    #[test]
    fn test_code_fence_verbatim() {
        assert_eq!(
            roundtrip("```rust\nfn main() {}\n```\n"),
            "```rust\nfn main() {}\n```\n"
        );
    }

    #[test]
    fn test_front_matter_verbatim() {
        assert_eq!(
            roundtrip("---\ntitle: Intro\n---\n\nbody\n"),
            "---\ntitle: Intro\n---\n\nbody\n"
        );
    }

    #[test]
    fn test_quote_prefixing() {
        assert_eq!(roundtrip("> one\n> two\n"), "> one\n> two\n");
        assert_eq!(roundtrip("> one\n>\n> two\n"), "> one\n>\n> two\n");
    }

    #[test]
    fn test_list_indentation() {
        assert_eq!(roundtrip("- one\n- two\n"), "- one\n- two\n");
        assert_eq!(
            roundtrip("- first line\n  continued\n- second\n"),
            "- first line\n  continued\n- second\n"
        );
    }

    #[test]
    fn test_ordered_list_markers() {
        assert_eq!(roundtrip("1. first\n2. second\n"), "1. first\n2. second\n");
    }

    #[test]
    fn test_directive_in_list_item() {
        // Item-internal blocks get the normal blank-line separator.
        assert_eq!(
            roundtrip("- item\n  :::v2\n  nested docs\n  :::\n"),
            "- item\n\n  :::v2\n  nested docs\n  :::\n"
        );
    }

    #[test]
    fn test_heading_without_text() {
        let document = Document::new(vec![Block::Heading {
            level: 2,
            text: String::new(),
        }]);
        assert_eq!(document.to_markdown(), "##\n");
    }

    #[test]
    fn test_reparse_is_stable() {
        let source = "# Guide\n\nintro\n\n:::v2\n- a\n  :::note\n  inner\n  :::\n- b\n:::\n\n> quoted\n\n```\n:::v1\n```\n";
        let once = roundtrip(source);
        let twice = parse(&once).to_markdown();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reparse_preserves_tree() {
        let source = ":::v2\n- item\n  :::v1\n  old\n  :::\n:::\n";
        let tree = parse(source);
        let reparsed = parse(&tree.to_markdown());
        assert_eq!(tree.blocks, reparsed.blocks);
    }

    #[test]
    fn test_hand_built_tree() {
        let document = Document::new(vec![
            Block::heading(1, "Title"),
            Block::Directive(Directive::new("v2", vec![Block::paragraph("body")])),
            Block::List {
                ordered: false,
                items: vec![ListItem::new(vec![Block::paragraph("x")])],
            },
        ]);
        assert_eq!(
            document.to_markdown(),
            "# Title\n\n:::v2\nbody\n:::\n\n- x\n"
        );
    }
}
