//! Build error type.

use chore_catalog::CatalogError;
use chore_rota::RotaError;

/// Errors from staging or publishing a site build.
///
/// Any variant raised during staging aborts the whole build with the
/// scratch directory discarded and the live output untouched. [`Publish`]
/// is the exception: it is raised after the old output has been removed, so
/// the live state is undefined and must be inspected manually.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A chore catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A rotation could not be assigned.
    #[error(transparent)]
    Rota(#[from] RotaError),

    /// A template failed to load or render.
    #[error("failed to render template '{template}': {source}")]
    Render {
        /// Template name.
        template: String,
        /// Underlying engine error.
        #[source]
        source: minijinja::Error,
    },

    /// A staging filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path involved.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The live-directory swap failed; output state is undefined.
    #[error("failed to publish to {path}: {source}")]
    Publish {
        /// Output path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
