//! a2conv - AviUtl1 to AviUtl2 Script Converter
//!
//! Rewrites legacy AviUtl1 Lua effect scripts (`.anm`, `.obj`, `.cam`,
//! `.scn`, `.tra`) into the form AviUtl2 expects.
//!
//! # Features
//!
//! - Map numeric blend modes to their symbolic names
//! - Drop the removed alpha flag from movie loads
//! - Rename short buffer tokens (`"tmp"` -> `"tempbuffer"`)
//! - Mark calls with no AviUtl2 equivalent
//! - Replace per-pixel `obj.putpixel` loops with a pixel shader call
//! - Batch `obj.drawpoly` helpers into one draw per loop
//! - Fix up draws, samplers and blend modes around the tempbuffer
//! - Decode Shift_JIS or UTF-8 input, write UTF-8 output

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod utils;

pub use convert::{convert_text, Pass, Pipeline};
pub use error::{ConvertError, ConvertResult};
pub use model::{Config, ConversionReport, Document, RewriteKind};
