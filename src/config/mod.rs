//! Configuration management module

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConvertResult;
use crate::model::Config;

/// Resolve the configuration file to read: `explicit` if given, else the default location
pub fn config_file(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::config_path)
}

/// Load configuration, falling back to defaults when the file does not exist
pub fn load_config(explicit: Option<&Path>) -> ConvertResult<Config> {
    let path = config_file(explicit);
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    debug!(path = %path.display(), "loading config");
    Config::load_from(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_path_wins() {
        let path = Path::new("/tmp/custom.toml");
        assert_eq!(config_file(Some(path)), path);
        assert_eq!(config_file(None), Config::config_path());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("converted"));
        assert_eq!(config.passes, Config::default().passes);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a2conv.toml");
        std::fs::write(&path, "[output]\ndir = \"out2\"\n\n[passes]\nsampler_clamp = false\n")
            .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("out2"));
        assert!(!config.passes.sampler_clamp);
        assert!(config.passes.draw_after_load);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[output\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConvertError::Config { .. }));
    }
}
