//! # Convert Module
//!
//! Rewrites one legacy script into its successor form.
//!
//! ## Architecture Overview
//!
//! ```text
//! convert/
//! ├── mod.rs          - This file: Pass trait + Pipeline factory
//! ├── patterns.rs     - Regex patterns (BLEND_*, PUTPIXEL_*, DRAWTARGET_*, etc.)
//! ├── block.rs        - Block span matcher (for/while/if ... end)
//! ├── line_rules.rs   - Single-line rules (blend, movie, tokens, annotation)
//! ├── kernel.rs       - Pixel shader kernel + invocation lines
//! ├── putpixel.rs     - Per-pixel loop -> shader call
//! ├── batching.rs     - Helper drawpoly -> vertex accumulation
//! └── segment.rs      - Tempbuffer segment injectors
//! ```
//!
//! ## Pass Order
//!
//! | # | Pass | Config switch |
//! |---|------|---------------|
//! | 1 | [`line_rules::LineRewriter`] | always on |
//! | 2 | [`putpixel::PutpixelShaderPass`] | `passes.putpixel_shader` |
//! | 3 | [`batching::DrawpolyBatchPass`] | `passes.batch_drawpoly` |
//! | 4 | [`segment::DrawAfterLoadPass`] | `passes.draw_after_load` |
//! | 5 | [`segment::SamplerClampPass`] | `passes.sampler_clamp` |
//! | 6 | [`segment::ForceBlendNonePass`] | `passes.force_blend_none` |
//!
//! Every pass fails open: a shape it does not recognize is left untouched.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use a2conv::convert::convert_text;
//! use a2conv::model::{ConversionReport, PassConfig};
//!
//! let mut report = ConversionReport::new("effect.anm");
//! let out = convert_text(&source, &PassConfig::default(), &mut report);
//! for (kind, n) in report.nonzero() {
//!     println!("{}: {}", kind, n);
//! }
//! ```

pub mod batching;
pub mod block;
pub mod kernel;
pub mod line_rules;
pub mod patterns;
pub mod putpixel;
pub mod segment;

pub use batching::DrawpolyBatchPass;
pub use line_rules::LineRewriter;
pub use putpixel::PutpixelShaderPass;
pub use segment::{DrawAfterLoadPass, ForceBlendNonePass, SamplerClampPass};

use tracing::trace;

use crate::model::{ConversionReport, Document, PassConfig};

/// One whole-document rewriting stage.
///
/// A pass mutates the document in place and records what it did on the
/// report. It must leave lines it does not recognize unchanged.
pub trait Pass: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Rewrite `doc`, counting each rewrite on `report`
    fn run(&self, doc: &mut Document, report: &mut ConversionReport);
}

/// Ordered list of passes applied to every document
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
}

impl Pipeline {
    /// Build the pipeline for a pass configuration.
    ///
    /// The line rules always run first; the structural passes follow in
    /// fixed order, each only when enabled.
    pub fn from_config(config: &PassConfig) -> Self {
        let mut passes: Vec<Box<dyn Pass>> = vec![Box::new(LineRewriter)];
        if config.putpixel_shader {
            passes.push(Box::new(PutpixelShaderPass));
        }
        if config.batch_drawpoly {
            passes.push(Box::new(DrawpolyBatchPass));
        }
        if config.draw_after_load {
            passes.push(Box::new(DrawAfterLoadPass));
        }
        if config.sampler_clamp {
            passes.push(Box::new(SamplerClampPass));
        }
        if config.force_blend_none {
            passes.push(Box::new(ForceBlendNonePass));
        }
        Self { passes }
    }

    /// Pass names, in run order
    pub fn names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    pub fn run(&self, doc: &mut Document, report: &mut ConversionReport) {
        for pass in &self.passes {
            trace!(pass = pass.name(), "running pass");
            pass.run(doc, report);
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::from_config(&PassConfig::default())
    }
}

/// Run the configured pipeline over a parsed document
pub fn convert_document(doc: &mut Document, config: &PassConfig, report: &mut ConversionReport) {
    Pipeline::from_config(config).run(doc, report);
}

/// Convert decoded script text; returns the rewritten text
pub fn convert_text(text: &str, config: &PassConfig, report: &mut ConversionReport) -> String {
    let mut doc = Document::parse(text);
    convert_document(&mut doc, config, report);
    doc.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RewriteKind;

    fn convert(text: &str) -> (String, ConversionReport) {
        let mut report = ConversionReport::new("t.anm");
        let out = convert_text(text, &PassConfig::default(), &mut report);
        (out, report)
    }

    #[test]
    fn test_default_pipeline_order() {
        assert_eq!(
            Pipeline::default().names(),
            vec![
                "line-rules",
                "putpixel-shader",
                "batch-drawpoly",
                "draw-after-load",
                "sampler-clamp",
                "force-blend-none",
            ]
        );
    }

    #[test]
    fn test_disabled_passes_skipped() {
        let config = PassConfig {
            putpixel_shader: false,
            batch_drawpoly: false,
            draw_after_load: true,
            sampler_clamp: false,
            force_blend_none: false,
        };
        assert_eq!(
            Pipeline::from_config(&config).names(),
            vec!["line-rules", "draw-after-load"]
        );
    }

    #[test]
    fn test_blend_code_converted() {
        let (out, report) = convert("obj.setoption(\"blend\", 3)\n");
        assert_eq!(out, "obj.setoption(\"blend\", \"mul\")\n");
        assert_eq!(report.get(RewriteKind::BlendConverted), 1);
    }

    #[test]
    fn test_plain_text_passes_through() {
        let text = "local x = 1\r\nobj.draw()\r\n\r\n";
        let (out, report) = convert(text);
        assert_eq!(out, "local x = 1\nobj.draw()\n\n");
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn test_blend_converted_before_segment_forcing() {
        let text = "\
obj.setoption(\"drawtarget\",\"tmp\",w,h)
obj.setoption(\"blend\", 1)
obj.load(\"tempbuffer\")
";
        let (out, report) = convert(text);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "obj.setoption(\"drawtarget\",\"tempbuffer\",w,h)");
        assert_eq!(lines[1], "obj.setoption(\"sampler\",\"clamp\")");
        assert_eq!(lines[2], "obj.setoption(\"blend\", \"none\")");
        assert_eq!(lines[3], "obj.load(\"tempbuffer\")");
        assert_eq!(lines[4], "obj.draw()");
        assert_eq!(report.get(RewriteKind::BlendConverted), 1);
        assert_eq!(report.get(RewriteKind::BufferTokensReplaced), 1);
        assert_eq!(report.get(RewriteKind::InsertedSamplerClamp), 1);
        assert_eq!(report.get(RewriteKind::ForcedTempbufferBlendNone), 1);
        assert_eq!(report.get(RewriteKind::InsertedDrawAfterTempbufferLoad), 1);
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let text = "\
obj.setoption(\"blend\", 4, \"force\")
obj.load(\"movie\", f, t, true)
obj.copybuffer(\"tmp\", \"obj\")
obj.copypixel(0,0,1,1)
for i=0,MS-1 do
\tfor j=0,MS-1 do
\t\tobj.putpixel(i,j,c,1)
\tend
end
obj.setoption(\"drawtarget\",\"tempbuffer\",w,h)
obj.setoption(\"blend\", \"add\")
obj.load(\"tempbuffer\")
";
        let (once, first) = convert(text);
        assert!(first.total() > 0);

        let (twice, second) = convert(&once);
        assert_eq!(twice, once);
        assert_eq!(second.total(), 0);
    }
}
