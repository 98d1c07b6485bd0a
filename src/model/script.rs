//! Script kinds and their successor-dialect extensions

use std::path::{Path, PathBuf};

/// Legacy script kinds recognized by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    Animation,
    Object,
    Camera,
    Scene,
    Transition,
}

impl ScriptKind {
    pub const ALL: [ScriptKind; 5] = [
        ScriptKind::Animation,
        ScriptKind::Object,
        ScriptKind::Camera,
        ScriptKind::Scene,
        ScriptKind::Transition,
    ];

    /// Detect the script kind from a file extension (case-insensitive, no dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "anm" => Some(ScriptKind::Animation),
            "obj" => Some(ScriptKind::Object),
            "cam" => Some(ScriptKind::Camera),
            "scn" => Some(ScriptKind::Scene),
            "tra" => Some(ScriptKind::Transition),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Legacy extension, lowercase, without the dot
    pub fn legacy_extension(&self) -> &'static str {
        match self {
            ScriptKind::Animation => "anm",
            ScriptKind::Object => "obj",
            ScriptKind::Camera => "cam",
            ScriptKind::Scene => "scn",
            ScriptKind::Transition => "tra",
        }
    }

    /// Extension used by the successor engine (`anm` -> `anm2`)
    pub fn v2_extension(&self) -> String {
        format!("{}2", self.legacy_extension())
    }
}

impl std::fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, ".{}", self.legacy_extension())
    }
}

/// Map a path's extension to the successor convention
///
/// Recognized legacy extensions gain the version suffix; any other extension
/// (or none) passes through unchanged.
pub fn map_extension_to_v2(path: &Path) -> PathBuf {
    match ScriptKind::from_path(path) {
        Some(kind) => path.with_extension(kind.v2_extension()),
        None => path.to_path_buf(),
    }
}
