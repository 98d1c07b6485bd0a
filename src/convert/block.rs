//! # Block Span Matcher
//!
//! Finds the terminator of a nested block using a depth stack over line
//! roles. The matcher knows nothing about why a block is wanted; the
//! putpixel rewriter and the draw batcher both call it unchanged.
//!
//! ## Tracked Structures
//!
//! | Start Shape | End Shape |
//! |-------------|-----------|
//! | `for ... do` | `end` |
//! | `while ... do` | `end` |
//! | `if ... then` | `end` |
//!
//! `else`, `elseif`, one-line blocks and anything else are transparent.
//! There is no grammar behind this: an unrecognized opener (a `function`
//! header, say) does not push, so its `end` closes the enclosing block
//! early. Callers only act on spans the matcher actually returns.

use crate::model::{BlockKind, Document, LineRole};

/// Inclusive line range from a block opener to its terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub start: usize,
    pub end: usize,
}

impl BlockSpan {
    pub fn contains(&self, idx: usize) -> bool {
        self.start <= idx && idx <= self.end
    }
}

/// Find the terminator of the block opened at `start`
///
/// Returns `None` when `start` is not an opener or when the document ends
/// before the stack seeded by `start` empties.
pub fn find_block_end(doc: &Document, start: usize) -> Option<usize> {
    if !doc.role(start).is_block_open() {
        return None;
    }

    let mut stack: Vec<BlockKind> = Vec::new();
    for idx in start..doc.len() {
        match doc.role(idx) {
            LineRole::BlockOpen(kind) => stack.push(kind),
            LineRole::BlockClose => {
                stack.pop();
                if stack.is_empty() {
                    return Some(idx);
                }
            }
            LineRole::Call | LineRole::Plain => {}
        }
    }
    None
}

/// Find the whole span of the block opened at `start`
pub fn find_block_span(doc: &Document, start: usize) -> Option<BlockSpan> {
    find_block_end(doc, start).map(|end| BlockSpan { start, end })
}
