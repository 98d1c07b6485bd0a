//! # Loop-to-Call Rewriter
//!
//! Collapses the per-pixel `obj.putpixel` loop nest into one pixel shader
//! invocation:
//!
//! ```text
//! for i=0,MS-1 do                      local constants = {MS, Cx, Cy, Rot, Rb, ALL}
//!     for j=0,MS-1 do             =>   for i=0,ALL do table.insert(constants, dA[i]) end
//!         ...                          obj.pixelshader("ps_puyopuyo_map","object",nil,constants,"copy")
//!         obj.putpixel(i,j,r,g,b,a)
//!     end
//! end
//! ```
//!
//! Only the exact `for i=0,MS-1 do` outer loop is recognized. A write with
//! no such enclosing loop, or whose loop has no terminator, stays as it is
//! and is listed as a conversion warning.

use tracing::{debug, warn};

use super::block::find_block_span;
use super::kernel::{invocation_lines, KERNEL_BLOCK, KERNEL_TAG};
use super::line_rules::{UNSUPPORTED_APIS, UNSUPPORTED_COMMENT};
use super::patterns::PUTPIXEL_LOOP_OPEN_RE;
use super::Pass;
use crate::model::{ConversionReport, ConversionWarning, Document, RewriteKind};

const PUTPIXEL_CALL: &str = "obj.putpixel(";

pub struct PutpixelShaderPass;

impl Pass for PutpixelShaderPass {
    fn name(&self) -> &'static str {
        "putpixel-shader"
    }

    fn run(&self, doc: &mut Document, report: &mut ConversionReport) {
        let replaced = replace_putpixel_loops(doc, report);
        if replaced == 0 {
            return;
        }

        strip_stale_annotations(doc);
        if !doc.contains(KERNEL_TAG) {
            debug!("prepending pixel shader kernel");
            doc.prepend(KERNEL_BLOCK);
        }
        report.add(RewriteKind::PutpixelLoopReplaced, replaced);
    }
}

/// Nearest `for i=0,MS-1 do` at or above `idx`
fn find_loop_opener(doc: &Document, idx: usize) -> Option<usize> {
    (0..=idx)
        .rev()
        .find(|&k| PUTPIXEL_LOOP_OPEN_RE.is_match(&doc.lines[k]))
}

/// Replace every recognized loop nest; returns the number replaced
pub fn replace_putpixel_loops(doc: &mut Document, report: &mut ConversionReport) -> usize {
    if !doc.contains(PUTPIXEL_CALL) {
        return 0;
    }

    let mut replaced = 0;
    let mut i = 0;
    while i < doc.len() {
        if !doc.lines[i].contains(PUTPIXEL_CALL) {
            i += 1;
            continue;
        }

        let Some(start) = find_loop_opener(doc, i) else {
            warn!(line = i + 1, "putpixel outside a recognized loop, left as is");
            report.add_warning(ConversionWarning::new(
                i + 1,
                "obj.putpixel outside a `for i=0,MS-1 do` loop; not vectorized",
            ));
            i += 1;
            continue;
        };

        let Some(span) = find_block_span(doc, start).filter(|span| span.contains(i)) else {
            warn!(line = start + 1, "putpixel loop has no matching end, left as is");
            report.add_warning(ConversionWarning::new(
                start + 1,
                "putpixel loop has no matching `end`; not vectorized",
            ));
            i += 1;
            continue;
        };

        let replacement = invocation_lines(doc.indent_of(start));
        let inserted = replacement.len();
        debug!(
            start = span.start + 1,
            end = span.end + 1,
            "replacing putpixel loop with pixel shader call"
        );
        doc.splice_span(span.start, span.end, replacement);

        replaced += 1;
        i = start + inserted;
    }
    replaced
}

/// Drop the unsupported-API comment from lines that no longer call such an API
fn strip_stale_annotations(doc: &mut Document) {
    for line in doc.lines.iter_mut() {
        if !line.contains(UNSUPPORTED_COMMENT) {
            continue;
        }
        if UNSUPPORTED_APIS.iter().any(|api| line.contains(api)) {
            continue;
        }
        *line = line.replacen(UNSUPPORTED_COMMENT, "", 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOOP: &str = "\
local MS = 256
for i=0,MS-1 do
\tfor j=0,MS-1 do
\t\tlocal c = f(i, j)
\t\tif c > 0 then
\t\t\tobj.putpixel(i, j, c, 1) -- [A2_TODO] AviUtl2 unsupported; migrate to pixelshader/computeshader
\t\tend
\tend
end
obj.draw()
";

    fn run(text: &str) -> (Document, ConversionReport) {
        let mut doc = Document::parse(text);
        let mut report = ConversionReport::new("t.anm");
        PutpixelShaderPass.run(&mut doc, &mut report);
        (doc, report)
    }

    #[test]
    fn test_loop_replaced_by_three_lines() {
        let (doc, report) = run(LOOP);
        assert_eq!(report.get(RewriteKind::PutpixelLoopReplaced), 1);

        let text = doc.render();
        assert!(text.starts_with("--[[pixelshader@ps_puyopuyo_map:"));
        assert!(!text.contains("obj.putpixel("));

        let body: Vec<&str> = text.split("]]\n\n").nth(1).unwrap().lines().collect();
        assert_eq!(
            body,
            vec![
                "local MS = 256",
                "local constants = {MS, Cx, Cy, Rot, Rb, ALL}",
                "for i=0,ALL do table.insert(constants, dA[i]) end",
                "obj.pixelshader(\"ps_puyopuyo_map\",\"object\",nil,constants,\"copy\")",
                "obj.draw()",
            ]
        );
    }

    #[test]
    fn test_indentation_follows_opener() {
        let text = "if a then\n  for i = 0, MS-1 do\n    obj.putpixel(i,0,c,1)\n  end\nend\n";
        let (doc, _) = run(text);
        assert!(doc
            .lines
            .contains(&"  local constants = {MS, Cx, Cy, Rot, Rb, ALL}".to_string()));
        assert_eq!(doc.lines.last().map(String::as_str), Some("end"));
    }

    #[test]
    fn test_kernel_not_duplicated() {
        let text = format!("{}{}", KERNEL_BLOCK, LOOP);
        let (doc, report) = run(&text);
        assert_eq!(report.get(RewriteKind::PutpixelLoopReplaced), 1);
        assert_eq!(doc.render().matches(KERNEL_TAG).count(), 1);
    }

    #[test]
    fn test_unterminated_loop_untouched() {
        let text = "for i=0,MS-1 do\n\tobj.putpixel(i,0,c,1)\n";
        let (doc, report) = run(text);
        assert_eq!(doc.render(), text);
        assert_eq!(report.total(), 0);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_write_without_loop_untouched() {
        let text = "for j=0,9 do\n\tobj.putpixel(j,0,c,1)\nend\n";
        let (doc, report) = run(text);
        assert_eq!(doc.render(), text);
        assert_eq!(report.total(), 0);
        assert_eq!(report.warnings[0].line_number, 2);
    }

    #[test]
    fn test_non_enclosing_loop_ignored() {
        let text = "for i=0,MS-1 do\n\tx = i\nend\nobj.putpixel(0,0,c,1)\n";
        let (doc, report) = run(text);
        assert_eq!(doc.render(), text);
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn test_stale_annotation_stripped() {
        let mut doc = Document::parse(&format!(
            "local s = 1{}\nobj.copypixel(0,0,1,1){}\n",
            UNSUPPORTED_COMMENT, UNSUPPORTED_COMMENT
        ));
        strip_stale_annotations(&mut doc);
        assert_eq!(doc.lines[0], "local s = 1");
        assert!(doc.lines[1].ends_with(UNSUPPORTED_COMMENT));
    }
}
