//! Line-oriented block parser.
//!
//! Builds the [`Block`] tree from markdown text in one pass over its lines.
//! Container directives (`:::name`), blockquotes, and list items nest
//! arbitrarily; code fences are opaque, so directive markers inside them are
//! content. Directive markers are recognized at any indentation, with or
//! without blank lines around them.
//!
//! Malformed input never fails: unclosed directives run to the end of their
//! scope, stray closing markers stay in the text as paragraph lines, and each
//! case is reported through [`Document::warnings`].

use crate::block::{Block, Directive, Document, ListItem, ParseWarning};

/// A source line paired with its 1-indexed position in the original input.
///
/// Nested content (quote interiors, dedented list items) keeps the original
/// numbers so warnings point at the right place.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    number: usize,
    text: &'a str,
}

/// Parse markdown source into a block tree.
///
/// Never fails; structural problems are recorded as warnings on the returned
/// [`Document`].
#[must_use]
pub fn parse(source: &str) -> Document {
    let mut warnings = Vec::new();
    let all: Vec<Line<'_>> = source
        .lines()
        .enumerate()
        .map(|(idx, text)| Line {
            number: idx + 1,
            text,
        })
        .collect();

    let mut blocks = Vec::new();
    let mut rest: &[Line<'_>] = &all;

    // Front matter is only recognized at the very start of a document.
    if let Some((front, consumed)) = take_front_matter(rest) {
        blocks.push(front);
        rest = &rest[consumed..];
    }

    blocks.append(&mut parse_blocks(rest, &mut warnings));

    Document { blocks, warnings }
}

fn parse_blocks(lines: &[Line<'_>], warnings: &mut Vec<ParseWarning>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while pos < lines.len() {
        let line = &lines[pos];
        let trimmed = line.text.trim_start();

        if trimmed.is_empty() {
            pos += 1;
            continue;
        }

        if let Some((ch, len)) = detect_fence(trimmed) {
            let (block, consumed) = take_code_fence(&lines[pos..], ch, len, warnings);
            blocks.push(block);
            pos += consumed;
            continue;
        }

        if let Some(marker) = parse_marker(line.text) {
            match marker {
                Marker::Open { name, args, colons } => {
                    let (directive, consumed) =
                        take_directive(&lines[pos..], name, args, colons, warnings);
                    blocks.push(Block::Directive(directive));
                    pos += consumed;
                }
                Marker::Close { .. } => {
                    warnings.push(ParseWarning::new(
                        line.number,
                        "stray ::: with no opening directive",
                    ));
                    blocks.push(Block::Paragraph {
                        lines: vec![line.text.to_owned()],
                    });
                    pos += 1;
                }
            }
            continue;
        }

        if let Some((level, text)) = parse_heading(trimmed) {
            blocks.push(Block::Heading { level, text });
            pos += 1;
            continue;
        }

        // Before the list check: `- - -` is a break, not a bullet.
        if is_thematic_break(trimmed) {
            blocks.push(Block::ThematicBreak {
                raw: trimmed.trim_end().to_owned(),
            });
            pos += 1;
            continue;
        }

        if trimmed.starts_with('>') {
            let (block, consumed) = take_quote(&lines[pos..], warnings);
            blocks.push(block);
            pos += consumed;
            continue;
        }

        if let Some(marker) = parse_list_marker(line.text) {
            let (block, consumed) = take_list(&lines[pos..], &marker, warnings);
            blocks.push(block);
            pos += consumed;
            continue;
        }

        let (block, consumed) = take_paragraph(&lines[pos..]);
        blocks.push(block);
        pos += consumed;
    }

    blocks
}

/// Take front matter opened by `---` on the first line.
///
/// Returns `None` unless a closing `---` or `...` exists; an unpaired opening
/// line is an ordinary thematic break.
fn take_front_matter(lines: &[Line<'_>]) -> Option<(Block, usize)> {
    let first = lines.first()?;
    if first.text.trim_end() != "---" {
        return None;
    }

    for (idx, line) in lines.iter().enumerate().skip(1) {
        let trimmed = line.text.trim_end();
        if trimmed == "---" || trimmed == "..." {
            return Some((
                Block::FrontMatter {
                    lines: collect_texts(&lines[..=idx]),
                },
                idx + 1,
            ));
        }
    }

    None
}

/// Take a fenced code block starting at `lines[0]`.
fn take_code_fence(
    lines: &[Line<'_>],
    ch: char,
    len: usize,
    warnings: &mut Vec<ParseWarning>,
) -> (Block, usize) {
    for (idx, line) in lines.iter().enumerate().skip(1) {
        if is_fence_close(line.text.trim_start(), ch, len) {
            return (
                Block::CodeFence {
                    lines: collect_texts(&lines[..=idx]),
                },
                idx + 1,
            );
        }
    }

    warnings.push(ParseWarning::new(lines[0].number, "unclosed code fence"));
    (
        Block::CodeFence {
            lines: collect_texts(lines),
        },
        lines.len(),
    )
}

/// Take a container directive whose opening marker is `lines[0]`.
///
/// An unclosed directive consumes the rest of the current scope and is
/// reported as a warning.
fn take_directive(
    lines: &[Line<'_>],
    name: &str,
    args: &str,
    colons: usize,
    warnings: &mut Vec<ParseWarning>,
) -> (Directive, usize) {
    let (interior, consumed) = match find_directive_end(&lines[1..]) {
        Some(offset) => (&lines[1..=offset], offset + 2),
        None => {
            warnings.push(ParseWarning::new(
                lines[0].number,
                format!("unclosed container directive :::{name} (missing closing :::)"),
            ));
            (&lines[1..], lines.len())
        }
    };

    let children = parse_blocks(interior, warnings);
    (
        Directive {
            name: name.to_owned(),
            args: args.to_owned(),
            colons,
            children,
        },
        consumed,
    )
}

/// Find the closing marker pairing with an already-consumed opening marker.
///
/// A closing marker pairs with the innermost open directive, so nested opens
/// seen along the way each absorb one closer. Fences are skipped. Returns the
/// offset of the closing marker within `lines`, or `None` if input ends first.
fn find_directive_end(lines: &[Line<'_>]) -> Option<usize> {
    let mut depth = 1usize;
    let mut fence: Option<(char, usize)> = None;

    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.text.trim_start();

        if let Some((ch, len)) = fence {
            if is_fence_close(trimmed, ch, len) {
                fence = None;
            }
            continue;
        }
        if let Some(open) = detect_fence(trimmed) {
            fence = Some(open);
            continue;
        }

        match parse_marker(line.text) {
            Some(Marker::Open { .. }) => depth += 1,
            Some(Marker::Close { .. }) => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            None => {}
        }
    }

    None
}

/// Take a run of `>`-prefixed lines as a blockquote.
fn take_quote(lines: &[Line<'_>], warnings: &mut Vec<ParseWarning>) -> (Block, usize) {
    let mut inner: Vec<Line<'_>> = Vec::new();

    for line in lines {
        let Some(rest) = line.text.trim_start().strip_prefix('>') else {
            break;
        };
        inner.push(Line {
            number: line.number,
            text: rest.strip_prefix(' ').unwrap_or(rest),
        });
    }

    let consumed = inner.len();
    (
        Block::Quote {
            children: parse_blocks(&inner, warnings),
        },
        consumed,
    )
}

/// Take a list starting with the item marker at `lines[0]`.
///
/// Consecutive items of the same kind (same bullet character, or ordered with
/// the same delimiter) form one list, blank lines between items included.
fn take_list(
    lines: &[Line<'_>],
    first: &ListMarker<'_>,
    warnings: &mut Vec<ParseWarning>,
) -> (Block, usize) {
    let kind = first.kind();
    let mut items = Vec::new();
    let mut pos = 0;
    let mut end = 0;

    while pos < lines.len() {
        if lines[pos].text.trim().is_empty() {
            pos += 1;
            continue;
        }
        let Some(marker) = parse_list_marker(lines[pos].text) else {
            break;
        };
        if marker.kind() != kind {
            break;
        }

        let (item, consumed) = take_list_item(&lines[pos..], &marker, warnings);
        items.push(item);
        pos += consumed;
        end = pos;
    }

    (
        Block::List {
            ordered: first.ordered,
            items,
        },
        end,
    )
}

/// Take one list item: the marker line plus every following line indented to
/// the item's content column. Content is dedented and re-parsed, which is how
/// directives nested in items end up as item children.
fn take_list_item(
    lines: &[Line<'_>],
    marker: &ListMarker<'_>,
    warnings: &mut Vec<ParseWarning>,
) -> (ListItem, usize) {
    let col = marker.content_col;
    let head = lines[0].text;
    let first_text = if head.len() > col { &head[col..] } else { "" };

    // Find the exclusive end of the item's content. Blank lines stay inside
    // only when more indented content follows.
    let mut end = 1;
    let mut scan = 1;
    while scan < lines.len() {
        let text = lines[scan].text;
        if text.trim().is_empty() {
            scan += 1;
            continue;
        }
        if leading_spaces(text) >= col {
            scan += 1;
            end = scan;
        } else {
            break;
        }
    }

    let mut inner: Vec<Line<'_>> = Vec::with_capacity(end);
    inner.push(Line {
        number: lines[0].number,
        text: first_text,
    });
    for line in &lines[1..end] {
        inner.push(Line {
            number: line.number,
            text: if line.text.trim().is_empty() {
                ""
            } else {
                &line.text[col..]
            },
        });
    }

    (
        ListItem {
            marker: marker.marker.to_owned(),
            children: parse_blocks(&inner, warnings),
        },
        end,
    )
}

/// Take a run of plain lines as a paragraph.
fn take_paragraph(lines: &[Line<'_>]) -> (Block, usize) {
    let mut collected = Vec::new();

    for line in lines {
        let trimmed = line.text.trim_start();
        if trimmed.is_empty() || is_structural(line.text, trimmed) {
            break;
        }
        collected.push(line.text.to_owned());
    }

    let consumed = collected.len();
    (Block::Paragraph { lines: collected }, consumed)
}

/// Whether a line starts a non-paragraph block, ending any open paragraph.
fn is_structural(text: &str, trimmed: &str) -> bool {
    detect_fence(trimmed).is_some()
        || parse_marker(text).is_some()
        || parse_heading(trimmed).is_some()
        || is_thematic_break(trimmed)
        || trimmed.starts_with('>')
        || parse_list_marker(text).is_some()
}

fn collect_texts(lines: &[Line<'_>]) -> Vec<String> {
    lines.iter().map(|line| line.text.to_owned()).collect()
}

fn leading_spaces(text: &str) -> usize {
    text.len() - text.trim_start_matches(' ').len()
}

// ── directive markers ────────────────────────────────────────────────────────

/// A directive marker line, borrowed from its source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker<'a> {
    /// Opening marker: `:::name[label]{attrs}`.
    Open {
        name: &'a str,
        args: &'a str,
        colons: usize,
    },
    /// Closing marker: bare colons.
    Close { colons: usize },
}

/// Parse a whole line as a directive marker.
///
/// Returns `None` if the line is not a marker; a `:::` line whose name fails
/// validation is ordinary text.
fn parse_marker(line: &str) -> Option<Marker<'_>> {
    let trimmed = line.trim();
    if !trimmed.starts_with(":::") {
        return None;
    }

    let colons = trimmed.chars().take_while(|&c| c == ':').count();
    let after = trimmed[colons..].trim_start();

    if after.is_empty() {
        return Some(Marker::Close { colons });
    }

    // Name ends at a bracket, a brace, or whitespace.
    let name_end = after
        .find(|c: char| c == '[' || c == '{' || c.is_whitespace())
        .unwrap_or(after.len());
    let name = &after[..name_end];
    if !is_valid_name(name) {
        return None;
    }

    Some(Marker::Open {
        name,
        args: after[name_end..].trim_end(),
        colons,
    })
}

/// Valid directive names contain only alphanumerics, hyphens, and underscores.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

// ── code fences ──────────────────────────────────────────────────────────────

/// Detect an opening fence: three or more backticks or tildes.
fn detect_fence(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }

    let len = trimmed.chars().take_while(|&c| c == first).count();
    (len >= 3).then_some((first, len))
}

/// A closing fence uses the opening character, is at least as long, and has
/// nothing but whitespace after it.
fn is_fence_close(trimmed: &str, ch: char, min_len: usize) -> bool {
    if !trimmed.starts_with(ch) {
        return false;
    }
    let len = trimmed.chars().take_while(|&c| c == ch).count();
    len >= min_len && trimmed[len..].trim().is_empty()
}

// ── headings and breaks ──────────────────────────────────────────────────────

/// Parse an ATX heading: one to six `#` followed by a space (or nothing).
fn parse_heading(trimmed: &str) -> Option<(u8, String)> {
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }

    let rest = &trimmed[hashes..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }

    let level = u8::try_from(hashes).ok()?;
    Some((level, rest.trim().to_owned()))
}

/// A thematic break is three or more of the same `-`, `*`, or `_`, spaces
/// between them allowed.
fn is_thematic_break(trimmed: &str) -> bool {
    let mut chars = trimmed.chars().filter(|c| !c.is_whitespace());
    let Some(first) = chars.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }

    let mut count = 1;
    for c in chars {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

// ── list markers ─────────────────────────────────────────────────────────────

/// A parsed list item marker.
#[derive(Debug, Clone, Copy)]
struct ListMarker<'a> {
    marker: &'a str,
    ordered: bool,
    /// Byte column where item content starts: indent, marker, one space.
    content_col: usize,
}

impl ListMarker<'_> {
    /// Marker kind: the bullet character, or the delimiter for ordered items.
    /// Items of differing kinds start separate lists.
    fn kind(&self) -> char {
        if self.ordered {
            self.marker.chars().last().unwrap_or('.')
        } else {
            self.marker.chars().next().unwrap_or('-')
        }
    }
}

/// Parse a list item marker: `-`, `*`, `+`, or up to nine digits followed by
/// `.` or `)`, then a space or the end of the line.
fn parse_list_marker(text: &str) -> Option<ListMarker<'_>> {
    let indent = leading_spaces(text);
    let rest = &text[indent..];
    let first = rest.chars().next()?;

    let marker_len = if matches!(first, '-' | '*' | '+') {
        1
    } else if first.is_ascii_digit() {
        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        if digits > 9 {
            return None;
        }
        match rest[digits..].chars().next() {
            Some('.' | ')') => digits + 1,
            _ => return None,
        }
    } else {
        return None;
    };

    match rest[marker_len..].chars().next() {
        None | Some(' ') => {}
        Some(_) => return None,
    }

    Some(ListMarker {
        marker: &rest[..marker_len],
        ordered: first.is_ascii_digit(),
        content_col: indent + marker_len + 1,
    })
}
