use thiserror::Error;

/// Outcome taxonomy for one server round trip.
///
/// `NotFound` is deliberately separate from `Logical`: the reconciler treats
/// it as a normal disappearance signal, never as a user-facing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Rejected before any network call was made.
    #[error("{0}")]
    Validation(String),
    /// Network, timeout, or response-decoding failure.
    #[error("transport error: {0}")]
    Transport(String),
    /// Server answered but reported failure, with its own message.
    #[error("{0}")]
    Logical(String),
    /// Server has no record of the requested job.
    #[error("not found")]
    NotFound,
}
