//! # Segment-State-Aware Injector
//!
//! Three passes around the off-screen `tempbuffer` render target:
//!
//! | Pass | Trigger | Companion | Window |
//! |------|---------|-----------|--------|
//! | [`DrawAfterLoadPass`] | `obj.load("tempbuffer")` | `obj.draw()` | 12 lines, stops at `end`/`else` |
//! | [`SamplerClampPass`] | `setoption("drawtarget","tempbuffer")` | `setoption("sampler","clamp")` | 6 lines |
//! | [`ForceBlendNonePass`] | inside a tempbuffer segment | `setoption("blend","none")` | until next drawtarget |
//!
//! The injectors look ahead before inserting so an existing companion is
//! never duplicated. The blend pass threads the segment state through a
//! fold; nothing is kept between files.

use tracing::debug;

use super::patterns::{
    BLEND_CALL_HEAD_RE, DRAWTARGET_CALL_RE, DRAWTARGET_TEMPBUFFER_CALL_RE, DRAW_CALL_RE,
    END_OR_ELSE_RE, SAMPLER_CALL_RE, TEMPBUFFER_LOAD_CALL_RE,
};
use super::Pass;
use crate::model::{ConversionReport, Document, RewriteKind};
use crate::utils::strings::find_call_end;

/// Lookahead for a draw after loading the tempbuffer (trigger line included)
pub const DRAW_LOOKAHEAD: usize = 12;

/// Lookahead for a sampler statement after a drawtarget switch (trigger line included)
pub const SAMPLER_LOOKAHEAD: usize = 6;

const DRAW_STATEMENT: &str = "obj.draw()";
const SAMPLER_CLAMP_STATEMENT: &str = "obj.setoption(\"sampler\",\"clamp\")";
const BLEND_NONE_CALL: &str = "obj.setoption(\"blend\", \"none\")";

/// Insert `obj.draw()` after a tempbuffer load that is not followed by one
pub struct DrawAfterLoadPass;

impl Pass for DrawAfterLoadPass {
    fn name(&self) -> &'static str {
        "draw-after-load"
    }

    fn run(&self, doc: &mut Document, report: &mut ConversionReport) {
        let mut injected = 0;
        let mut i = 0;
        while i < doc.len() {
            if TEMPBUFFER_LOAD_CALL_RE.is_match(&doc.lines[i]) && !has_draw_ahead(doc, i) {
                debug!(line = i + 1, "injecting draw after tempbuffer load");
                let line = format!("{}{}", doc.indent_of(i), DRAW_STATEMENT);
                doc.insert(i + 1, line);
                injected += 1;
                i += 1;
            }
            i += 1;
        }
        report.add(RewriteKind::InsertedDrawAfterTempbufferLoad, injected);
    }
}

/// A draw within the window, before the current branch ends
fn has_draw_ahead(doc: &Document, idx: usize) -> bool {
    let limit = (idx + DRAW_LOOKAHEAD).min(doc.len());
    for line in &doc.lines[idx + 1..limit] {
        if DRAW_CALL_RE.is_match(line) {
            return true;
        }
        if END_OR_ELSE_RE.is_match(line) {
            return false;
        }
    }
    false
}

/// Insert a clamp sampler after switching the render target to the tempbuffer
pub struct SamplerClampPass;

impl Pass for SamplerClampPass {
    fn name(&self) -> &'static str {
        "sampler-clamp"
    }

    fn run(&self, doc: &mut Document, report: &mut ConversionReport) {
        let mut injected = 0;
        let mut i = 0;
        while i < doc.len() {
            if DRAWTARGET_TEMPBUFFER_CALL_RE.is_match(&doc.lines[i]) && !has_sampler_ahead(doc, i)
            {
                debug!(line = i + 1, "injecting clamp sampler");
                let line = format!("{}{}", doc.indent_of(i), SAMPLER_CLAMP_STATEMENT);
                doc.insert(i + 1, line);
                injected += 1;
                i += 1;
            }
            i += 1;
        }
        report.add(RewriteKind::InsertedSamplerClamp, injected);
    }
}

fn has_sampler_ahead(doc: &Document, idx: usize) -> bool {
    let limit = (idx + SAMPLER_LOOKAHEAD).min(doc.len());
    doc.lines[idx + 1..limit]
        .iter()
        .any(|line| SAMPLER_CALL_RE.is_match(line))
}

/// Whether the current line lies inside a tempbuffer render segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentState {
    #[default]
    Outside,
    InsideTempbuffer,
}

impl SegmentState {
    /// State after `line`, or `None` when `line` does not switch targets
    pub fn transition(self, line: &str) -> Option<SegmentState> {
        if DRAWTARGET_TEMPBUFFER_CALL_RE.is_match(line) {
            Some(SegmentState::InsideTempbuffer)
        } else if DRAWTARGET_CALL_RE.is_match(line) {
            Some(SegmentState::Outside)
        } else {
            None
        }
    }
}

/// Force every blend statement inside a tempbuffer segment to `"none"`
pub struct ForceBlendNonePass;

impl Pass for ForceBlendNonePass {
    fn name(&self) -> &'static str {
        "force-blend-none"
    }

    fn run(&self, doc: &mut Document, report: &mut ConversionReport) {
        let forced = doc
            .lines
            .iter_mut()
            .enumerate()
            .fold(
                (SegmentState::Outside, 0usize),
                |(state, forced), (idx, line)| {
                    if let Some(next) = state.transition(line) {
                        return (next, forced);
                    }
                    if state != SegmentState::InsideTempbuffer {
                        return (state, forced);
                    }
                    let changed = force_blend_none(line);
                    if changed > 0 {
                        debug!(line = idx + 1, "forcing blend none inside tempbuffer segment");
                    }
                    (state, forced + changed)
                },
            )
            .1;
        report.add(RewriteKind::ForcedTempbufferBlendNone, forced);
    }
}

/// Replace every blend call on `line` with the `"none"` form
///
/// Only the call text changes; code before and after it on the line is
/// kept. Returns the number of calls actually changed.
pub fn force_blend_none(line: &mut String) -> usize {
    let mut changed = 0;
    let mut from = 0;

    while let Some(start) = BLEND_CALL_HEAD_RE
        .find_at(line.as_str(), from)
        .map(|m| m.start())
    {
        let open = start + "obj.setoption".len();
        let Some(close) = find_call_end(line.as_str(), open) else {
            break;
        };
        if &line[start..=close] == BLEND_NONE_CALL {
            from = close + 1;
            continue;
        }
        line.replace_range(start..=close, BLEND_NONE_CALL);
        from = start + BLEND_NONE_CALL.len();
        changed += 1;
    }
    changed
}
