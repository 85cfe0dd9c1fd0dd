//! Result and Error types for the saxs-gridvol crate

/// Type alias for `Result<T, gridvol::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `saxs-gridvol`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The requested voxel width was not strictly positive
    #[error("voxel width must be positive, got {0}")]
    InvalidVoxelWidth(f64),
}
