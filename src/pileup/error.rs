use thiserror::Error;

/// Errors that can occur while reconstructing a pileup block.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PileupError {
    /// Block layout or row contents violate the viewer text contract.
    #[error("malformed pileup input: {0}")]
    MalformedInput(String),

    /// Window or depth configuration is invalid.
    #[error("invalid pileup configuration: {0}")]
    Config(String),

    /// The sequence accessor could not satisfy the requested range.
    #[error("failed to fetch {contig}:{start}-{end}: {reason}")]
    FetchFailure {
        /// Contig that was requested.
        contig: String,
        /// First requested position (1-based, inclusive).
        start: u64,
        /// Last requested position (1-based, inclusive).
        end: u64,
        /// Underlying failure reported by the accessor.
        reason: String,
    },
}

impl PileupError {
    /// Helper for constructing malformed-input errors.
    pub fn malformed(msg: impl Into<String>) -> Self {
        PileupError::MalformedInput(msg.into())
    }

    /// Helper for constructing configuration errors.
    pub fn config(msg: impl Into<String>) -> Self {
        PileupError::Config(msg.into())
    }

    /// Helper for constructing fetch failures.
    pub fn fetch_failure(contig: &str, start: u64, end: u64, reason: impl ToString) -> Self {
        PileupError::FetchFailure {
            contig: contig.to_string(),
            start,
            end,
            reason: reason.to_string(),
        }
    }
}
