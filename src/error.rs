pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// The core performs no I/O, so the taxonomy is a single recoverable
/// variant. Validation happens before any mutation, so a rejected call
/// never leaves the ledger partially updated.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
