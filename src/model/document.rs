//! Document and line-role structures for script conversion

use crate::convert::patterns::{
    CALL_STATEMENT_RE, END_RE, FOR_OPEN_RE, IF_OPEN_RE, INDENT_RE, WHILE_OPEN_RE,
};
use crate::utils::strings::{normalize_line_endings, split_lines_preserve_trailing};

/// Kind of structural block opened by a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Loop,        // for ... do / while ... do
    Conditional, // if ... then
}

/// Structural role of a single line
///
/// Roles are inferred from the shape of the trimmed line every time they are
/// asked for; they are never stored alongside the text.
///
/// | Role | Shape |
/// |------|-------|
/// | `BlockOpen(Loop)` | `for i = 0, N do`, `while cond do` |
/// | `BlockOpen(Conditional)` | `if cond then` |
/// | `BlockClose` | `end` |
/// | `Call` | `obj.draw()` (whole-line call) |
/// | `Plain` | anything else |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    BlockOpen(BlockKind),
    BlockClose,
    Call,
    Plain,
}

impl LineRole {
    /// Classify a line by its syntactic shape
    pub fn classify(line: &str) -> Self {
        if FOR_OPEN_RE.is_match(line) || WHILE_OPEN_RE.is_match(line) {
            LineRole::BlockOpen(BlockKind::Loop)
        } else if IF_OPEN_RE.is_match(line) {
            LineRole::BlockOpen(BlockKind::Conditional)
        } else if END_RE.is_match(line) {
            LineRole::BlockClose
        } else if CALL_STATEMENT_RE.is_match(line) {
            LineRole::Call
        } else {
            LineRole::Plain
        }
    }

    pub fn is_block_open(&self) -> bool {
        matches!(self, LineRole::BlockOpen(_))
    }
}

/// An in-memory script: ordered lines plus the trailing-newline flag
///
/// # Line Endings
/// - Parsing treats `\r\n`, `\r` and `\n` alike as line terminators
/// - Rendering always joins with `\n`, so CRLF and CR input come out as LF
/// - A final `\n` is emitted only if the source ended with one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub lines: Vec<String>,
    pub trailing_newline: bool,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        let text = normalize_line_endings(text);
        let lines = split_lines_preserve_trailing(&text)
            .into_iter()
            .map(str::to_string)
            .collect();

        Self {
            lines,
            trailing_newline: text.ends_with('\n'),
        }
    }

    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Role of the line at `idx`, `Plain` when out of range
    pub fn role(&self, idx: usize) -> LineRole {
        self.lines
            .get(idx)
            .map(|l| LineRole::classify(l))
            .unwrap_or(LineRole::Plain)
    }

    /// Leading whitespace of the line at `idx`
    pub fn indent_of(&self, idx: usize) -> &str {
        self.lines.get(idx).map(|l| leading_indent(l)).unwrap_or("")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    /// Replace the inclusive range `[start, end]` with `replacement`
    pub fn splice_span(&mut self, start: usize, end: usize, replacement: Vec<String>) {
        self.lines.splice(start..=end, replacement);
    }

    pub fn insert(&mut self, idx: usize, line: String) {
        self.lines.insert(idx, line);
    }

    /// Put `block` in front of every existing line
    pub fn prepend(&mut self, block: &str) {
        let mut head: Vec<String> = block.split('\n').map(str::to_string).collect();
        // A block ending in "\n" leaves an empty tail that belongs to the next line
        if block.ends_with('\n') {
            head.pop();
        }
        head.append(&mut self.lines);
        self.lines = head;
    }
}

/// Leading whitespace of a line
pub fn leading_indent(line: &str) -> &str {
    INDENT_RE
        .find(line)
        .map(|m| m.as_str())
        .unwrap_or("")
}
