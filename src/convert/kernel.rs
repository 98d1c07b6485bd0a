//! Pixel shader kernel injected when a per-pixel loop is vectorized
//!
//! The kernel lives inside a Lua block comment tagged
//! `pixelshader@<name>:` where the successor engine picks it up. It
//! reproduces the polar displacement map the legacy loop computed pixel by
//! pixel from `MS`, `Cx`, `Cy`, `Rot`, `Rb`, `ALL` and the `dA[]` table.

/// Entry point name of the injected kernel
pub const KERNEL_NAME: &str = "ps_puyopuyo_map";

/// Tag the engine uses to find the kernel source; its presence means the
/// kernel is already defined
pub const KERNEL_TAG: &str = "pixelshader@ps_puyopuyo_map";

/// Kernel definition block, prepended verbatim (ends with a blank line)
pub const KERNEL_BLOCK: &str = "\
--[[pixelshader@ps_puyopuyo_map:
cbuffer constant0 : register(b0) {
    float MS; float Cx; float Cy; float Rot; float Rb; float ALL; float _pad0; float _pad1;
    float dA[256];
};
float4 ps_puyopuyo_map(float4 pos : SV_Position) : SV_Target {
    float i = pos.x;
    float j = pos.y;
    float x = i - Cx;
    float y = j - Cy;
    float fai = atan2(y, x);
    float r = 127.5 * sqrt(x*x + y*y) / Rb;
    float th = frac((fai / 3.14159265 + 1.0) * 0.5 - Rot / 360.0) * ALL;
    int th1 = (int)floor(th);
    float th2 = th - th1;
    float da = dA[th1];
    if (th2 > 0.0) da = lerp(dA[th1], dA[th1+1], th2);
    r *= da;
    float rr = 127.5 - r * cos(fai);
    float gg = 127.5 - r * sin(fai);
    return float4(rr/255.0, gg/255.0, 0.0, 1.0);
}
]]

";

/// The three statements that replace the loop, at `indent`
pub fn invocation_lines(indent: &str) -> Vec<String> {
    vec![
        format!("{}local constants = {{MS, Cx, Cy, Rot, Rb, ALL}}", indent),
        format!(
            "{}for i=0,ALL do table.insert(constants, dA[i]) end",
            indent
        ),
        format!(
            "{}obj.pixelshader(\"{}\",\"object\",nil,constants,\"copy\")",
            indent, KERNEL_NAME
        ),
    ]
}
