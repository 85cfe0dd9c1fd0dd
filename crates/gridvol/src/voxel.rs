/// Classification of one occupied voxel in an excluded-volume grid
///
/// Unoccupied voxels are not stored at all; every [VoxelKind] the grid
/// reports is therefore occupied by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoxelKind {
    /// Occupied, with all 6 face neighbors also occupied
    Interior,
    /// Occupied, with at least one empty or out-of-grid face neighbor
    Surface,
}
