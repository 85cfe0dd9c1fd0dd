//! Result and Error types for the saxs-distribution crate

/// Type alias for `Result<T, distribution::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `saxs-distribution`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Two distributions were combined (`+=`/`-=`) with incompatible bin axes
    #[error("size mismatch combining distributions: {lhs} bins vs {rhs} bins")]
    SizeMismatch {
        /// Length of the left-hand distribution
        lhs: usize,
        /// Length of the right-hand distribution
        rhs: usize,
    },
}
