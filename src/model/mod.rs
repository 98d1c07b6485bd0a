//! Core data models for a2conv

mod config;
mod document;
mod report;
mod script;

pub use config::{Config, InputConfig, OutputConfig, PassConfig, UiConfig};
pub use document::{leading_indent, BlockKind, Document, LineRole};
pub use report::{ConversionReport, ConversionWarning, ReportFile, RewriteKind};
pub use script::{map_extension_to_v2, ScriptKind};
