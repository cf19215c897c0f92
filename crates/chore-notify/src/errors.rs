//! Notification error type.
//!
//! Delivery failures are deliberately *not* errors — they are reported in
//! [`crate::Delivery`] outcomes so one bad endpoint cannot abort the batch.
//! This enum covers the genuinely fatal cases: a client that cannot be
//! built and an endpoint table that cannot be read or written.

/// Errors from notification setup and endpoint-table handling.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {reason}")]
    ClientBuild {
        /// Error description.
        reason: String,
    },

    /// Failed to read the endpoint table file.
    #[error("failed to read endpoints at {path}: {source}")]
    EndpointsRead {
        /// Table path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The endpoint table is not valid JSON of the expected shape.
    #[error("malformed endpoints at {path}: {source}")]
    EndpointsParse {
        /// Table path.
        path: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize an endpoint table.
    #[error("failed to serialize endpoints: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Serialized output was not UTF-8 (indent bytes must be ASCII).
    #[error("failed to encode endpoints: {0}")]
    Encode(#[from] std::string::FromUtf8Error),
}
