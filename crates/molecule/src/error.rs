//! Result and Error types for the saxs-molecule crate

/// Type alias for `Result<T, molecule::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `saxs-molecule`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A body index was used that does not exist in the molecule
    #[error("body index {index} out of range (molecule has {body_count} bodies)")]
    BodyIndexOutOfRange {
        /// The offending index
        index: usize,
        /// Number of bodies actually present
        body_count: usize,
    },
}
