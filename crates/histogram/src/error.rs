//! Result and Error types for the saxs-histogram crate

/// Type alias for `Result<T, histogram::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `saxs-histogram`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A partial distribution's size did not match the master axis when merging
    #[error(transparent)]
    Distribution(#[from] saxs_distribution::Error),

    /// A calculator job was enqueued with an invalid scaling factor
    #[error(transparent)]
    Calculator(#[from] saxs_calculator::Error),

    /// `calculate_all()` was called on a manager whose caches `calculate()`
    /// has not yet populated
    #[error("calculate_all() requires calculate() to have run at least once")]
    StateError,

    /// A requested q-axis index was outside the configured table
    #[error("q-axis index {index} out of range (axis has {len} entries)")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Number of entries in the axis
        len: usize,
    },
}
