//! # Line Pattern Rewriter
//!
//! Single-line rules, applied in order to every line:
//!
//! 1. [`replace_blend_numbers`] - `setoption("blend", 3)` -> `"mul"`
//! 2. [`remove_movie_alpha_flag`] - drop the 4th `load("movie", ...)` argument
//! 3. [`replace_buffer_tokens`] - `"tmp"` -> `"tempbuffer"` in buffer calls
//! 4. [`annotate_unsupported_apis`] - mark calls with no v2 equivalent
//!
//! Each rule returns the line unchanged when it does not match. Every
//! rule's output is already in canonical form, so running the rules twice
//! changes nothing the second time.

use regex::Captures;
use std::borrow::Cow;
use tracing::debug;

use super::patterns::{
    BLEND_NUMERIC_CALL_RE, BUFFER_TOKEN_DOUBLE_RE, BUFFER_TOKEN_SINGLE_RE,
    MOVIE_LOAD_4ARG_CALL_RE,
};
use super::Pass;
use crate::model::{ConversionReport, Document, RewriteKind};

/// Marker appended to lines that call an API with no successor equivalent
pub const UNSUPPORTED_MARKER: &str = "[A2_TODO]";

/// Full trailing comment appended by [`annotate_unsupported_apis`]
pub const UNSUPPORTED_COMMENT: &str =
    " -- [A2_TODO] AviUtl2 unsupported; migrate to pixelshader/computeshader";

/// Calls that have no direct successor equivalent
pub const UNSUPPORTED_APIS: [&str; 5] = [
    "obj.putpixel",
    "obj.copypixel",
    "obj.getpixeldata",
    "obj.putpixeldata",
    "obj.filter",
];

/// Calls whose string arguments name buffers
const BUFFER_CONTEXT_CALLS: [&str; 3] = ["obj.copybuffer", "obj.pixeloption", "obj.setoption"];

/// Symbolic name for a legacy numeric blend code
pub fn blend_name(code: &str) -> Option<&'static str> {
    match code {
        "0" => Some("none"),
        "1" => Some("add"),
        "2" => Some("sub"),
        "3" => Some("mul"),
        "4" => Some("screen"),
        "5" => Some("overlay"),
        "6" => Some("light"),
        "7" => Some("dark"),
        "8" => Some("brightness"),
        "9" => Some("chroma"),
        _ => None,
    }
}

/// Long-form buffer name for a short token; unknown tokens map to themselves
fn buffer_name(token: &str) -> &str {
    match token {
        "obj" => "object",
        "tmp" => "tempbuffer",
        "frm" => "framebuffer",
        other => other,
    }
}

/// `obj.setoption("blend", <code>[, "force"])` -> `obj.setoption("blend", "<name>"[, "force"])`
pub fn replace_blend_numbers(line: &str, report: &mut ConversionReport) -> String {
    let mut converted = 0;
    let out = BLEND_NUMERIC_CALL_RE.replace_all(line, |caps: &Captures| {
        let Some(name) = blend_name(&caps[1]) else {
            return caps[0].to_string();
        };
        converted += 1;
        let force = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        format!("obj.setoption(\"blend\", \"{}\"{})", name, force)
    });
    report.add(RewriteKind::BlendConverted, converted);
    out.into_owned()
}

/// `obj.load("movie", file, time, flag)` -> `obj.load("movie", file, time)`
pub fn remove_movie_alpha_flag(line: &str, report: &mut ConversionReport) -> String {
    if !line.contains("obj.load") || !(line.contains("\"movie\"") || line.contains("'movie'")) {
        return line.to_string();
    }

    let mut removed = 0;
    let out = MOVIE_LOAD_4ARG_CALL_RE.replace_all(line, |caps: &Captures| {
        removed += 1;
        format!(
            "obj.load(\"movie\", {}, {})",
            caps[1].trim(),
            caps[2].trim()
        )
    });
    report.add(RewriteKind::MovieFlagRemoved, removed);
    out.into_owned()
}

/// Rename `"obj"`/`"tmp"`/`"frm"` when the line calls a buffer-taking API
///
/// The same tokens elsewhere (a plain string table, a log message) are left
/// alone: without one of the context calls on the line nothing changes.
pub fn replace_buffer_tokens(line: &str, report: &mut ConversionReport) -> String {
    if !BUFFER_CONTEXT_CALLS.iter().any(|call| line.contains(call)) {
        return line.to_string();
    }

    let mut replaced = 0;
    let mut rename = |caps: &Captures, quote: char| {
        let token = &caps[1];
        let name = buffer_name(token);
        if name != token {
            replaced += 1;
        }
        format!("{q}{}{q}", name, q = quote)
    };

    let pass1: Cow<str> = BUFFER_TOKEN_DOUBLE_RE.replace_all(line, |caps: &Captures| rename(caps, '"'));
    let pass2 = BUFFER_TOKEN_SINGLE_RE
        .replace_all(&pass1, |caps: &Captures| rename(caps, '\''))
        .into_owned();

    report.add(RewriteKind::BufferTokensReplaced, replaced);
    pass2
}

/// Append the unsupported-API marker to lines calling an API with no v2 equivalent
pub fn annotate_unsupported_apis(line: &str, report: &mut ConversionReport) -> String {
    let Some(api) = UNSUPPORTED_APIS.iter().find(|api| line.contains(*api)) else {
        return line.to_string();
    };
    if line.contains(UNSUPPORTED_MARKER) {
        return line.to_string();
    }

    debug!(api, "annotating unsupported call");
    report.bump(RewriteKind::UnsupportedCalls);
    format!("{}{}", line.trim_end(), UNSUPPORTED_COMMENT)
}

/// Run every line rule, in order, on one line
pub fn rewrite_line(line: &str, report: &mut ConversionReport) -> String {
    let line = replace_blend_numbers(line, report);
    let line = remove_movie_alpha_flag(&line, report);
    let line = replace_buffer_tokens(&line, report);
    annotate_unsupported_apis(&line, report)
}

/// Pass wrapper applying [`rewrite_line`] to the whole document
pub struct LineRewriter;

impl Pass for LineRewriter {
    fn name(&self) -> &'static str {
        "line-rules"
    }

    fn run(&self, doc: &mut Document, report: &mut ConversionReport) {
        for line in doc.lines.iter_mut() {
            *line = rewrite_line(line, report);
        }
    }
}
