use std::path::PathBuf;

pub type TreemapResult<T> = Result<T, TreemapError>;

#[derive(thiserror::Error, Debug)]
pub enum TreemapError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tree JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tree: {0}")]
    InvalidTree(String),

    #[error("no tree available at '{0}'")]
    MissingTree(String),

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl TreemapError {
    pub fn invalid_tree(msg: impl Into<String>) -> Self {
        Self::InvalidTree(msg.into())
    }

    pub fn missing_tree(path: impl Into<String>) -> Self {
        Self::MissingTree(path.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(TreemapError::invalid_tree("x")
            .to_string()
            .contains("invalid tree:"));
        assert!(TreemapError::missing_tree("/a")
            .to_string()
            .contains("no tree available at '/a'"));
    }

    #[test]
    fn io_error_keeps_source() {
        let err = TreemapError::Io {
            path: PathBuf::from("db/filetree.json"),
            source: std::io::Error::other("boom"),
        };
        assert!(err.to_string().contains("db/filetree.json"));
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("boom"));
    }
}
