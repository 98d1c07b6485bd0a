//! # Vertex Batching Transformer
//!
//! Scripts often wrap `obj.drawpoly` in a helper factory and call the
//! helper once per loop iteration, which costs one draw per quad on the
//! successor engine. This pass turns that into one draw per loop.
//!
//! ## Helper rewrite
//!
//! ```text
//! local drawpolyT=(function()                 local drawpolyT=(function()
//!     return function(x0,y0,x1,y1,v0,v1)          return function(x0,y0,x1,y1,v0,v1)
//!         obj.drawpoly(x0,y0,0, ..., u,v1)   =>       local eps=0.5; local v0e=v0+eps; ...
//!     end                                             table.insert(vertex, {x0,y0,0, ..., u,v1e})
//! end)()                                          end
//!                                             end)()
//! ```
//!
//! The `v0`/`v1`/`vc` renaming only touches the draw arguments; the rest of
//! the function body keeps the original names.
//!
//! ## Call-site batching
//!
//! ```text
//! for i=0,N do            vertex = {}
//!     drawpolyT(...)  =>  for i=0,N do
//! end                         drawpolyT(...)
//!                         end
//!                         obj.drawpoly(vertex)
//! ```

use tracing::{debug, warn};

use super::block::find_block_end;
use super::patterns::{
    BATCH_LOOP_OPEN_RE, DRAWPOLY_LINE_RE, HELPER_FACTORY_OPEN_RE, RETURN_FUNCTION_UV_RE,
    UV_V0_RE, UV_V1_RE, UV_VC_RE,
};
use super::Pass;
use crate::model::{ConversionReport, ConversionWarning, Document, RewriteKind};

/// Aliases nudging the interpolation parameters inward to hide seams
pub const EPS_ALIASES: &str =
    "local eps=0.5; local v0e=v0+eps; local v1e=v1-eps; local vce=(v0e+v1e)/2";

const VERTEX_RESET: &str = "vertex = {}";
const VERTEX_FLUSH: &str = "obj.drawpoly(vertex)";

pub struct DrawpolyBatchPass;

impl Pass for DrawpolyBatchPass {
    fn name(&self) -> &'static str {
        "batch-drawpoly"
    }

    fn run(&self, doc: &mut Document, report: &mut ConversionReport) {
        let helpers = rewrite_helpers(doc);
        if helpers.is_empty() {
            return;
        }
        let batched = batch_call_sites(doc, &helpers, report);
        report.add(RewriteKind::DrawpolyBatchedLoops, batched);
    }
}

/// Helper factory being scanned, with its edits held until it closes
struct HelperScan {
    name: String,
    aliases_in_scope: bool,
    alias_insert: Option<(usize, String)>,
    draw_rewrites: Vec<(usize, String)>,
}

impl HelperScan {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases_in_scope: false,
            alias_insert: None,
            draw_rewrites: Vec::new(),
        }
    }

    /// Apply the held edits; returns the number of lines inserted
    fn apply(self, doc: &mut Document) -> usize {
        for (idx, line) in self.draw_rewrites {
            doc.lines[idx] = line;
        }
        match self.alias_insert {
            Some((idx, line)) => {
                doc.insert(idx, line);
                1
            }
            None => 0,
        }
    }
}

/// `end)()` closes the factory; so does `end` ... `)()` on one line
fn is_factory_close(trimmed: &str) -> bool {
    (trimmed.starts_with("end") && trimmed.ends_with(")()")) || trimmed.ends_with("end)()")
}

fn rename_uv_args(args: &str) -> String {
    let args = UV_VC_RE.replace_all(args, "vce");
    let args = UV_V0_RE.replace_all(&args, "v0e");
    UV_V1_RE.replace_all(&args, "v1e").into_owned()
}

/// Rewrite draw calls inside helper factories
///
/// Returns the names of helpers whose body had at least one draw rewritten.
/// A helper that was already converted rewrites nothing and is not
/// returned, so its call sites are not wrapped a second time. Edits are
/// applied only when the factory closes; a factory still open at the end
/// of the document is left untouched.
pub fn rewrite_helpers(doc: &mut Document) -> Vec<String> {
    let mut registered = Vec::new();
    let mut current: Option<HelperScan> = None;
    let mut idx = 0;

    while idx < doc.len() {
        let trimmed = doc.lines[idx].trim();

        if current.is_none() {
            if let Some(caps) = HELPER_FACTORY_OPEN_RE.captures(trimmed) {
                current = Some(HelperScan::new(&caps[1]));
            }
            idx += 1;
            continue;
        }
        let Some(helper) = current.as_mut() else {
            break;
        };

        if is_factory_close(trimmed) {
            if let Some(helper) = current.take() {
                let name = helper.name.clone();
                let rewrote_draw = !helper.draw_rewrites.is_empty();
                idx += helper.apply(doc);
                if rewrote_draw {
                    debug!(helper = %name, "helper now accumulates into vertex");
                    registered.push(name);
                }
            }
            idx += 1;
            continue;
        }

        if let Some(caps) = RETURN_FUNCTION_UV_RE.captures(&doc.lines[idx]) {
            helper.aliases_in_scope = true;
            let present = doc
                .lines
                .get(idx + 1)
                .is_some_and(|next| next.trim() == EPS_ALIASES);
            if !present {
                let alias_line = format!("{}\t{}", &caps[1], EPS_ALIASES);
                helper.alias_insert = Some((idx + 1, alias_line));
            }
            idx += 1;
            continue;
        }

        if trimmed.contains("obj.drawpoly(") && !trimmed.starts_with("--") {
            if let Some(caps) = DRAWPOLY_LINE_RE.captures(&doc.lines[idx]) {
                let args = if helper.aliases_in_scope {
                    rename_uv_args(&caps[2])
                } else {
                    caps[2].to_string()
                };
                let rewritten = format!("{}table.insert(vertex, {{{}}})", &caps[1], args);
                helper.draw_rewrites.push((idx, rewritten));
            }
        }
        idx += 1;
    }

    if let Some(helper) = current {
        warn!(helper = %helper.name, "helper factory never closes, left as is");
    }
    registered
}

/// True when `line` calls `name(` as a whole identifier
fn calls_function(line: &str, name: &str) -> bool {
    let needle = format!("{}(", name);
    line.match_indices(&needle).any(|(pos, _)| {
        line[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_' || c == '.' || c == ':'))
    })
}

/// Wrap `for i=0,N do` loops that call a registered helper
pub fn batch_call_sites(
    doc: &mut Document,
    helpers: &[String],
    report: &mut ConversionReport,
) -> usize {
    let mut batched = 0;
    let mut i = 0;

    while i < doc.len() {
        let Some(caps) = BATCH_LOOP_OPEN_RE.captures(&doc.lines[i]) else {
            i += 1;
            continue;
        };
        let indent = caps[1].to_string();

        let Some(end) = find_block_end(doc, i) else {
            warn!(line = i + 1, "batch loop has no matching end, left as is");
            report.add_warning(ConversionWarning::new(
                i + 1,
                "`for i=0,N do` loop has no matching `end`; not batched",
            ));
            i += 1;
            continue;
        };

        let calls_helper = doc.lines[i..=end]
            .iter()
            .any(|line| helpers.iter().any(|h| calls_function(line, h)));
        let already_wrapped = i > 0 && doc.lines[i - 1].trim() == VERTEX_RESET;
        if !calls_helper || already_wrapped {
            i += 1;
            continue;
        }

        debug!(start = i + 1, end = end + 1, "batching draw loop");
        doc.insert(i, format!("{}{}", indent, VERTEX_RESET));
        let end = end + 1;
        doc.insert(end + 1, format!("{}{}", indent, VERTEX_FLUSH));

        batched += 1;
        i = end + 2;
    }
    batched
}
