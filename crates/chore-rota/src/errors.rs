//! Rotation error type.

/// Errors from rotation assignment.
#[derive(Debug, thiserror::Error)]
pub enum RotaError {
    /// A group has no people to rotate through, so no chore can be assigned.
    #[error("chore group '{group}' has an empty roster")]
    EmptyRoster {
        /// Id of the offending group.
        group: String,
    },
}
