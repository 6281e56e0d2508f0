use thiserror::Error;

/// Errors returned by the clustering operations in this crate.
///
/// Pure geometric computations (distance, hulls) never fail; every variant
/// here is a caller-side argument problem and should not be retried.
#[derive(Debug, Error)]
pub enum Error {
    /// A centroid was requested for an empty point set.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
