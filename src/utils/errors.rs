use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PagepackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot list page directory {}: {source}", dir.display())]
    Discovery {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to clean output directory {}: {source}", path.display())]
    Clean {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PagepackError {
    pub fn discovery(dir: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Discovery {
            dir: dir.into(),
            source,
        }
    }

    pub fn copy(from: impl Into<PathBuf>, to: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Copy {
            from: from.into(),
            to: to.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the failure happened before any configuration was produced
    pub fn is_discovery(&self) -> bool {
        matches!(self, Self::Discovery { .. })
    }
}

pub type Result<T> = std::result::Result<T, PagepackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_message_names_directory() {
        let err = PagepackError::discovery(
            "/nope/app",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.is_discovery());
        assert!(err.to_string().contains("/nope/app"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_copy_keeps_source_error() {
        let err = PagepackError::copy(
            "a",
            "b",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "denied");
    }
}
