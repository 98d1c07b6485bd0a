//! Integration tests for the conversion pipeline

use a2conv::convert::block::find_block_end;
use a2conv::convert::kernel::KERNEL_TAG;
use a2conv::model::PassConfig;
use a2conv::{convert_text, ConversionReport, Document, RewriteKind};

fn convert(text: &str) -> (String, ConversionReport) {
    let mut report = ConversionReport::new("test.anm");
    let out = convert_text(text, &PassConfig::default(), &mut report);
    (out, report)
}

const LEGACY_SCRIPT: &str = "\
--track0:Size,1,512,256
local MS = obj.track0
obj.setoption(\"blend\", 3)
obj.load(\"movie\", path, obj.time, true)
obj.copybuffer(\"tmp\", \"obj\")
for i=0,MS-1 do
\tfor j=0,MS-1 do
\t\tlocal r, g = calc(i, j)
\t\tobj.putpixel(i, j, r, g, 0, 1)
\tend
end
obj.setoption(\"drawtarget\", \"tmp\", MS, MS)
obj.setoption(\"blend\", 1)
obj.load(\"tempbuffer\")
obj.setoption(\"drawtarget\", \"framebuffer\")
obj.setoption(\"blend\", 2)
";

#[test]
fn test_full_legacy_script() {
    let (out, report) = convert(LEGACY_SCRIPT);

    assert!(out.starts_with("--[[pixelshader@ps_puyopuyo_map:"));
    assert!(!out.contains("obj.putpixel("));
    assert!(!out.contains("[A2_TODO]"));
    assert!(out.contains("obj.setoption(\"blend\", \"mul\")\n"));
    assert!(out.contains("obj.copybuffer(\"tempbuffer\", \"object\")\n"));
    assert!(out.contains("obj.load(\"movie\", path, obj.time)\n"));
    assert!(out.ends_with(
        "obj.setoption(\"drawtarget\", \"tempbuffer\", MS, MS)
obj.setoption(\"sampler\",\"clamp\")
obj.setoption(\"blend\", \"none\")
obj.load(\"tempbuffer\")
obj.draw()
obj.setoption(\"drawtarget\", \"framebuffer\")
obj.setoption(\"blend\", \"sub\")
"
    ));

    assert_eq!(report.get(RewriteKind::BlendConverted), 3);
    assert_eq!(report.get(RewriteKind::MovieFlagRemoved), 1);
    assert_eq!(report.get(RewriteKind::BufferTokensReplaced), 3);
    assert_eq!(report.get(RewriteKind::UnsupportedCalls), 1);
    assert_eq!(report.get(RewriteKind::PutpixelLoopReplaced), 1);
    assert_eq!(report.get(RewriteKind::InsertedSamplerClamp), 1);
    assert_eq!(report.get(RewriteKind::InsertedDrawAfterTempbufferLoad), 1);
    assert_eq!(report.get(RewriteKind::ForcedTempbufferBlendNone), 1);
    assert_eq!(report.get(RewriteKind::DrawpolyBatchedLoops), 0);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_pipeline_is_idempotent() {
    let (once, _) = convert(LEGACY_SCRIPT);
    let (twice, report) = convert(&once);

    assert_eq!(twice, once);
    assert_eq!(report.total(), 0);
    assert_eq!(twice.matches(KERNEL_TAG).count(), 1);
}

#[test]
fn test_putpixel_loop_becomes_three_lines() {
    let text = "for i=0,MS-1 do\n\tfor j=0,MS-1 do\n\t\tobj.putpixel(i,j,c,1)\n\tend\nend\n";
    let (out, report) = convert(text);

    let body = out.split("]]\n\n").nth(1).unwrap();
    assert_eq!(body.lines().count(), 3);
    assert_eq!(report.get(RewriteKind::PutpixelLoopReplaced), 1);
}

#[test]
fn test_drawpoly_helper_batched() {
    let text = "\
local drawpolyA=(function()
\treturn function(x0,y0,x1,y1,v0,v1)
\t\tobj.drawpoly(x0,y0,0,x1,y0,0,x1,y1,0,x0,y1,0,0,v0,1,v0,1,v1,0,v1)
\tend
end)()
for i=0,N do
\tdrawpolyA(i,0,i+1,1,i,i+1)
end
";
    let (out, report) = convert(text);
    assert_eq!(report.get(RewriteKind::DrawpolyBatchedLoops), 1);
    assert!(out.contains("\t\ttable.insert(vertex, {x0,y0,0,x1,y0,0,x1,y1,0,x0,y1,0,0,v0e,1,v0e,1,v1e,0,v1e})\n"));
    assert!(out.ends_with("vertex = {}\nfor i=0,N do\n\tdrawpolyA(i,0,i+1,1,i,i+1)\nend\nobj.drawpoly(vertex)\n"));
}

#[test]
fn test_unrecognized_shapes_pass_through() {
    let text = "\
for k=1,10 do
\tobj.putpixel(k,0,0xffffff,1)
end
local names = {\"tmp\", \"obj\"}
obj.setoption(\"blend\", 12)
";
    let (out, report) = convert(text);

    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[1].ends_with("[A2_TODO] AviUtl2 unsupported; migrate to pixelshader/computeshader"));
    assert_eq!(lines[3], "local names = {\"tmp\", \"obj\"}");
    assert_eq!(lines[4], "obj.setoption(\"blend\", 12)");
    assert_eq!(report.get(RewriteKind::UnsupportedCalls), 1);
    assert_eq!(report.get(RewriteKind::PutpixelLoopReplaced), 0);
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn test_bare_cr_line_endings_become_lf() {
    let (out, report) = convert("a = 1\robj.setoption(\"blend\", 3)\r");
    assert_eq!(out, "a = 1\nobj.setoption(\"blend\", \"mul\")\n");
    assert_eq!(report.get(RewriteKind::BlendConverted), 1);
}

#[test]
fn test_unclosed_helper_factory_left_alone() {
    let text = "\
local drawpolyT=(function()
\treturn function(a,v0,v1)
\t\tobj.drawpoly(a,v0,v1)
\tend
for i=0,N do
\tdrawpolyT(1,0,1)
end
";
    let (out, report) = convert(text);
    assert_eq!(out, text);
    assert_eq!(report.total(), 0);
}

#[test]
fn test_block_matcher_on_nested_document() {
    let doc = Document::parse(
        "\
for a=1,2 do
\tif a then
\t\twhile b do
\t\t\tfor c=1,2 do
\t\t\t\tif c then
\t\t\t\t\tx()
\t\t\t\tend
\t\t\tend
\t\tend
\tend
end
",
    );
    assert_eq!(find_block_end(&doc, 0), Some(10));
    assert_eq!(find_block_end(&doc, 2), Some(8));
    assert_eq!(find_block_end(&doc, 4), Some(6));
    assert_eq!(find_block_end(&doc, 5), None);
}

#[test]
fn test_disabled_passes_leave_structure() {
    let config = PassConfig {
        putpixel_shader: false,
        batch_drawpoly: false,
        draw_after_load: false,
        sampler_clamp: false,
        force_blend_none: false,
    };
    let mut report = ConversionReport::new("a.anm");
    let out = convert_text(LEGACY_SCRIPT, &config, &mut report);

    assert!(out.contains("obj.putpixel("));
    assert!(!out.contains(KERNEL_TAG));
    assert_eq!(report.get(RewriteKind::BlendConverted), 3);
    assert_eq!(report.get(RewriteKind::PutpixelLoopReplaced), 0);
}
