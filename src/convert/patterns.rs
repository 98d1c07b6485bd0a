//! # Script Regex Patterns
//!
//! All regex patterns used by the conversion passes.
//!
//! ## Pattern Naming Convention
//!
//! - `*_OPEN_RE` - Line shape that opens a block
//! - `*_CALL_RE` - A call somewhere inside a line
//! - `*_LINE_RE` - A call that occupies the whole line
//!
//! ## Regex Notes
//!
//! Rust's `regex` crate does not support backreferences, so string
//! arguments accept either quote on each side (`["']`). Scripts in the wild
//! never mix them, and a mismatched pair is still the same call.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // =========================================================================
    // Line Shapes
    // =========================================================================

    /// Matches a loop opener: `for <var> = ... do` with nothing after `do`
    pub static ref FOR_OPEN_RE: Regex = Regex::new(
        r#"^\s*for\s+\w+\s*=.*\bdo\s*$"#
    ).unwrap();

    /// Matches a while loop opener: `while <cond> do`
    pub static ref WHILE_OPEN_RE: Regex = Regex::new(
        r#"^\s*while\b.*\bdo\s*$"#
    ).unwrap();

    /// Matches a conditional opener: `if <cond> then`
    pub static ref IF_OPEN_RE: Regex = Regex::new(
        r#"^\s*if\b.*\bthen\s*$"#
    ).unwrap();

    /// Matches a bare block terminator: `end`
    pub static ref END_RE: Regex = Regex::new(
        r#"^\s*end\s*$"#
    ).unwrap();

    /// Matches a line that starts a block terminator or alternative branch
    pub static ref END_OR_ELSE_RE: Regex = Regex::new(
        r#"^\s*(?:end|else)\b"#
    ).unwrap();

    /// Matches a whole-line call statement: `obj.draw()`, `t.f(a, b)`
    pub static ref CALL_STATEMENT_RE: Regex = Regex::new(
        r#"^\s*[A-Za-z_][\w.:]*\(.*\)\s*$"#
    ).unwrap();

    /// Leading whitespace of a line
    pub static ref INDENT_RE: Regex = Regex::new(r#"^\s*"#).unwrap();

    // =========================================================================
    // Line Rules
    // =========================================================================

    /// Matches `obj.setoption("blend", <code>[, "force"])`
    ///
    /// Captures:
    /// - Group 1: numeric blend code
    /// - Group 2: optional `, "force"` suffix (kept verbatim)
    pub static ref BLEND_NUMERIC_CALL_RE: Regex = Regex::new(
        r#"obj\.setoption\(\s*["']blend["']\s*,\s*(\d+)\s*(,\s*["']force["']\s*)?\)"#
    ).unwrap();

    /// Matches a four-argument movie load: `obj.load("movie", file, time, flag)`
    ///
    /// Captures:
    /// - Group 1: file argument
    /// - Group 2: time argument
    /// - Group 3: legacy alpha flag (dropped)
    pub static ref MOVIE_LOAD_4ARG_CALL_RE: Regex = Regex::new(
        r#"obj\.load\(\s*["']movie["']\s*,\s*([^,)]+)\s*,\s*([^,)]+)\s*,\s*([^)]+)\)"#
    ).unwrap();

    /// Matches the short buffer tokens in double quotes: `"obj"`, `"tmp"`, `"frm"`
    pub static ref BUFFER_TOKEN_DOUBLE_RE: Regex = Regex::new(
        r#""(obj|tmp|frm)""#
    ).unwrap();

    /// Matches the short buffer tokens in single quotes: `'obj'`, `'tmp'`, `'frm'`
    pub static ref BUFFER_TOKEN_SINGLE_RE: Regex = Regex::new(
        r#"'(obj|tmp|frm)'"#
    ).unwrap();

    // =========================================================================
    // Structural Patterns
    // =========================================================================

    /// Matches the outer per-pixel loop: `for i=0,MS-1 do`
    pub static ref PUTPIXEL_LOOP_OPEN_RE: Regex = Regex::new(
        r#"^\s*for\s+i\s*=\s*0\s*,\s*MS-1\s*do\s*$"#
    ).unwrap();

    /// Matches a helper factory head: `local drawpolyT=(function()`
    ///
    /// Captures:
    /// - Group 1: helper name
    pub static ref HELPER_FACTORY_OPEN_RE: Regex = Regex::new(
        r#"^local\s+(\w+)\s*=\s*\(\s*function\s*\(\s*\)"#
    ).unwrap();

    /// Matches the returned function's signature: `return function(x0, y0, ..., v0, v1)`
    ///
    /// Captures:
    /// - Group 1: indentation
    pub static ref RETURN_FUNCTION_UV_RE: Regex = Regex::new(
        r#"^(\s*)return\s+function\(.*v0\s*,\s*v1\)\s*$"#
    ).unwrap();

    /// Matches a whole-line draw: `obj.drawpoly(<args>)`
    ///
    /// Captures:
    /// - Group 1: indentation
    /// - Group 2: argument text
    pub static ref DRAWPOLY_LINE_RE: Regex = Regex::new(
        r#"^(\s*)obj\.drawpoly\((.*)\)\s*$"#
    ).unwrap();

    /// Whole-word interpolation parameter names inside draw arguments
    pub static ref UV_VC_RE: Regex = Regex::new(r#"\bvc\b"#).unwrap();
    pub static ref UV_V0_RE: Regex = Regex::new(r#"\bv0\b"#).unwrap();
    pub static ref UV_V1_RE: Regex = Regex::new(r#"\bv1\b"#).unwrap();

    /// Matches the batched call-site loop: `for i=0,N do`
    ///
    /// Captures:
    /// - Group 1: indentation
    pub static ref BATCH_LOOP_OPEN_RE: Regex = Regex::new(
        r#"^(\s*)for\s+i\s*=\s*0\s*,\s*N\s*do\s*$"#
    ).unwrap();

    // =========================================================================
    // Segment Patterns
    // =========================================================================

    /// Matches a read-source switch to the off-screen buffer: `obj.load("tempbuffer")`
    pub static ref TEMPBUFFER_LOAD_CALL_RE: Regex = Regex::new(
        r#"obj\.load\(\s*["']tempbuffer["']\s*\)"#
    ).unwrap();

    /// Matches an explicit draw: `obj.draw()`
    pub static ref DRAW_CALL_RE: Regex = Regex::new(
        r#"obj\.draw\(\)"#
    ).unwrap();

    /// Matches a render-target switch into the off-screen buffer
    pub static ref DRAWTARGET_TEMPBUFFER_CALL_RE: Regex = Regex::new(
        r#"obj\.setoption\(\s*["']drawtarget["']\s*,\s*["']tempbuffer["']"#
    ).unwrap();

    /// Matches any render-target switch
    pub static ref DRAWTARGET_CALL_RE: Regex = Regex::new(
        r#"obj\.setoption\(\s*["']drawtarget["']\s*,"#
    ).unwrap();

    /// Matches a sampler-mode statement
    pub static ref SAMPLER_CALL_RE: Regex = Regex::new(
        r#"obj\.setoption\(\s*["']sampler["']\s*,"#
    ).unwrap();

    /// Matches the head of any blend-mode statement, up to the first argument
    pub static ref BLEND_CALL_HEAD_RE: Regex = Regex::new(
        r#"obj\.setoption\(\s*["']blend["']\s*,"#
    ).unwrap();
}
