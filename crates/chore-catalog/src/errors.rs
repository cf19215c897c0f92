//! Catalog error type.

use std::path::Path;

/// Errors from loading or validating a catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The document could not be read.
    #[error("failed to read catalog at {path}: {source}")]
    Read {
        /// Document path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML or is missing a required key.
    #[error("malformed catalog at {}: {source}", .path.as_deref().unwrap_or("<inline>"))]
    Parse {
        /// Document path, when parsing came from a file.
        path: Option<String>,
        /// Underlying parse error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A chore entry resolved to an empty id.
    #[error("chore group '{group}' contains a chore with an empty id")]
    EmptyChoreId {
        /// Id of the offending group.
        group: String,
    },
}

impl From<serde_yaml::Error> for CatalogError {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse { path: None, source }
    }
}

impl CatalogError {
    /// Attach the originating file path to a parse error.
    pub(crate) fn with_path(self, path: &Path) -> Self {
        match self {
            Self::Parse { path: None, source } => Self::Parse {
                path: Some(path.display().to_string()),
                source,
            },
            other => other,
        }
    }
}
