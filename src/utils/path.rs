//! Path utilities

use std::path::{Component, Path, PathBuf};

use crate::error::{ConvertError, ConvertResult};
use crate::model::map_extension_to_v2;

/// Path of `src` as it should appear under the output root
///
/// Relative inputs are used as given. Absolute inputs are made relative to
/// `cwd` when they live below it; otherwise their root and prefix
/// components are dropped so `join` cannot escape the output root.
pub fn relative_source(src: &Path, cwd: &Path) -> PathBuf {
    if src.is_relative() {
        return strip_parent_dirs(src);
    }
    if let Ok(rel) = src.strip_prefix(cwd) {
        return rel.to_path_buf();
    }
    src.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

// `../x.anm` would otherwise land beside the output root
fn strip_parent_dirs(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::ParentDir | Component::CurDir))
        .collect()
}

/// Output path for `src` under `out_root`, with the v2 extension applied
pub fn output_path_for(src: &Path, out_root: &Path, cwd: &Path) -> PathBuf {
    map_extension_to_v2(&out_root.join(relative_source(src, cwd)))
}

/// Read raw bytes with proper error handling
pub fn read_bytes(path: &Path) -> ConvertResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| ConvertError::io(path, e))
}

/// Write file content, creating parent directories
pub fn write_file(path: &Path, content: &str) -> ConvertResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConvertError::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| ConvertError::io(path, e))
}
