//! Text decoding with an ordered fallback chain
//!
//! Legacy scripts are usually Shift_JIS (code page 932) but UTF-8 files are
//! common too. Each configured encoding is tried strictly, without
//! replacement characters; the first clean decode wins. When nothing fits
//! the bytes are read as Latin-1, which maps every byte to a code point and
//! therefore cannot fail.

use encoding_rs::Encoding;
use tracing::warn;

/// Pseudo-label for UTF-8 with a byte-order mark
pub const UTF8_BOM_LABEL: &str = "utf-8-bom";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Name reported when the Latin-1 fallback was used
pub const LATIN1_NAME: &str = "latin-1";

/// Decoded text plus the name of the encoding that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub encoding: String,
}

#[derive(Debug, Clone, Copy)]
enum Candidate {
    Utf8Bom,
    Whatwg(&'static Encoding),
}

fn resolve_label(label: &str) -> Option<Candidate> {
    if label.eq_ignore_ascii_case(UTF8_BOM_LABEL) || label.eq_ignore_ascii_case("utf-8-sig") {
        return Some(Candidate::Utf8Bom);
    }
    Encoding::for_label(label.trim().as_bytes()).map(Candidate::Whatwg)
}

fn try_decode(bytes: &[u8], candidate: Candidate) -> Option<Decoded> {
    match candidate {
        Candidate::Utf8Bom => {
            let rest = bytes.strip_prefix(UTF8_BOM)?;
            let text = std::str::from_utf8(rest).ok()?;
            Some(Decoded {
                text: text.to_string(),
                encoding: "UTF-8 (BOM)".to_string(),
            })
        }
        Candidate::Whatwg(encoding) => encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| Decoded {
                text: text.into_owned(),
                encoding: encoding.name().to_string(),
            }),
    }
}

/// Decode `bytes` using the labels in order, falling back to Latin-1
pub fn decode_with_fallback<S: AsRef<str>>(bytes: &[u8], labels: &[S]) -> Decoded {
    for label in labels {
        let label = label.as_ref();
        let Some(candidate) = resolve_label(label) else {
            warn!(label, "unknown encoding label, skipping");
            continue;
        };
        if let Some(decoded) = try_decode(bytes, candidate) {
            return decoded;
        }
    }

    Decoded {
        text: bytes.iter().map(|&b| b as char).collect(),
        encoding: LATIN1_NAME.to_string(),
    }
}
