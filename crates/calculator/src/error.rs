//! Result and Error types for the saxs-calculator crate

/// Type alias for `Result<T, calculator::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `saxs-calculator`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A job was enqueued with a scaling factor outside `1..=MAX_SCALING`
    #[error("scaling factor {scaling} out of range 1..={max}")]
    ScalingOutOfRange {
        /// The requested scaling factor
        scaling: u32,
        /// The maximum supported scaling factor
        max: u32,
    },
}
