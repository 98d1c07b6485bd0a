//! Per-file conversion report

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Kind of rewrite applied by the pipeline, one counter each
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteKind {
    BlendConverted,
    BufferTokensReplaced,
    MovieFlagRemoved,
    UnsupportedCalls,
    PutpixelLoopReplaced,
    DrawpolyBatchedLoops,
    InsertedDrawAfterTempbufferLoad,
    InsertedSamplerClamp,
    ForcedTempbufferBlendNone,
}

impl RewriteKind {
    pub const ALL: [RewriteKind; 9] = [
        RewriteKind::BlendConverted,
        RewriteKind::BufferTokensReplaced,
        RewriteKind::MovieFlagRemoved,
        RewriteKind::UnsupportedCalls,
        RewriteKind::PutpixelLoopReplaced,
        RewriteKind::DrawpolyBatchedLoops,
        RewriteKind::InsertedDrawAfterTempbufferLoad,
        RewriteKind::InsertedSamplerClamp,
        RewriteKind::ForcedTempbufferBlendNone,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RewriteKind::BlendConverted => "blend_converted",
            RewriteKind::BufferTokensReplaced => "buffer_tokens_replaced",
            RewriteKind::MovieFlagRemoved => "movie_flag_removed",
            RewriteKind::UnsupportedCalls => "unsupported_calls",
            RewriteKind::PutpixelLoopReplaced => "putpixel_loop_replaced",
            RewriteKind::DrawpolyBatchedLoops => "drawpoly_batched_loops",
            RewriteKind::InsertedDrawAfterTempbufferLoad => "inserted_draw_after_tempbuffer_load",
            RewriteKind::InsertedSamplerClamp => "inserted_sampler_clamp",
            RewriteKind::ForcedTempbufferBlendNone => "forced_tempbuffer_blend_none",
        }
    }
}

impl std::fmt::Display for RewriteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for RewriteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RewriteKind::ALL
            .iter()
            .copied()
            .find(|k| k.key() == s)
            .ok_or_else(|| format!("Unknown rewrite kind: {}", s))
    }
}

/// A recognized shape the pipeline had to leave untouched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversionWarning {
    /// 1-based line number in the document at the time of the pass
    pub line_number: usize,
    pub message: String,
}

impl ConversionWarning {
    pub fn new(line_number: usize, message: impl Into<String>) -> Self {
        Self {
            line_number,
            message: message.into(),
        }
    }
}

/// Conversion report for a single file
///
/// Counters are only ever incremented while the pipeline runs; the summary
/// printer and the report writer read them afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionReport {
    pub source: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    pub input_encoding: String,
    pub output_encoding: String,
    #[serde(default)]
    pub counters: BTreeMap<RewriteKind, usize>,
    #[serde(default)]
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionReport {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_encoding: "utf-8".to_string(),
            ..Default::default()
        }
    }

    pub fn bump(&mut self, kind: RewriteKind) {
        self.add(kind, 1);
    }

    pub fn add(&mut self, kind: RewriteKind, n: usize) {
        if n == 0 {
            return;
        }
        *self.counters.entry(kind).or_insert(0) += n;
    }

    pub fn get(&self, kind: RewriteKind) -> usize {
        self.counters.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counters.values().sum()
    }

    pub fn add_warning(&mut self, warning: ConversionWarning) {
        self.warnings.push(warning);
    }

    /// Non-zero counters in declaration order
    pub fn nonzero(&self) -> impl Iterator<Item = (RewriteKind, usize)> + '_ {
        RewriteKind::ALL
            .iter()
            .map(|k| (*k, self.get(*k)))
            .filter(|(_, n)| *n > 0)
    }
}

/// Every report of one invocation, as written by `--report`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportFile {
    #[serde(default)]
    pub files: Vec<ConversionReport>,
}

impl ReportFile {
    pub fn new(files: Vec<ConversionReport>) -> Self {
        Self { files }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
