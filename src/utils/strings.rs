//! String utility functions

use std::borrow::Cow;

/// Convert `\r\n` and bare `\r` line endings to `\n`
///
/// # Examples
///
/// ```
/// use a2conv::utils::strings::normalize_line_endings;
///
/// assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
/// ```
pub fn normalize_line_endings(s: &str) -> Cow<'_, str> {
    if !s.contains('\r') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Split text into lines without losing trailing blank lines.
///
/// A single final `\n` terminates the last line; every additional `\n`
/// contributes an empty line. `str::lines()` collapses those, which would
/// change the line count of a converted script.
///
/// # Examples
///
/// ```
/// use a2conv::utils::strings::split_lines_preserve_trailing;
///
/// assert_eq!(split_lines_preserve_trailing("a\nb"), vec!["a", "b"]);
/// assert_eq!(split_lines_preserve_trailing("a\n"), vec!["a"]);
/// assert_eq!(split_lines_preserve_trailing("a\n\n"), vec!["a", ""]);
/// assert_eq!(split_lines_preserve_trailing(""), Vec::<&str>::new());
/// ```
pub fn split_lines_preserve_trailing(s: &str) -> Vec<&str> {
    let body = s.strip_suffix('\n').unwrap_or(s);
    if s.is_empty() {
        return Vec::new();
    }
    body.split('\n').collect()
}

/// Find the byte index of the `)` closing the call whose `(` is at `open`.
///
/// Quoted strings (either quote style, with backslash escapes) are skipped
/// so parentheses inside literals do not count. Returns `None` when the call
/// does not close on this line.
pub fn find_call_end(line: &str, open: usize) -> Option<usize> {
    let bytes = line.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }

    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut escaped = false;

    for (idx, &b) in bytes.iter().enumerate().skip(open) {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'"' | b'\'' => quote = Some(b),
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}
