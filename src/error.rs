//! Library error type

use std::path::{Path, PathBuf};

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors that abort a conversion
///
/// Pattern misses never show up here; the passes skip what they do not
/// recognize. Only I/O, configuration and report serialization fail.
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("report error: {0}")]
    Report(String),
}

impl ConvertError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn config(path: impl AsRef<Path>, message: impl std::fmt::Display) -> Self {
        Self::Config {
            path: path.as_ref().to_path_buf(),
            message: message.to_string(),
        }
    }

    pub fn report(message: impl std::fmt::Display) -> Self {
        Self::Report(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_path() {
        let err = ConvertError::io(
            "out/a.anm2",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let text = err.to_string();
        assert!(text.contains("out/a.anm2"));
        assert!(text.contains("denied"));
    }

    #[test]
    fn display_prefixes_are_stable() {
        assert!(ConvertError::config("c.toml", "bad")
            .to_string()
            .starts_with("invalid configuration"));
        assert!(ConvertError::report("x")
            .to_string()
            .starts_with("report error:"));
    }
}
