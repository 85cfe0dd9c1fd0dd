use std::collections::{HashMap, HashSet};

use saxs_molecule::Atom;

use crate::error::{Error, Result};
use crate::voxel::VoxelKind;

type Index3 = [i64; 3];

const FACE_NEIGHBORS: [Index3; 6] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
];

/// A uniform voxel grid overlaid on a set of atoms, classified into
/// [VoxelKind::Interior] and [VoxelKind::Surface] occupied voxels
///
/// Every occupied voxel's kind is decided by a single pass over its 6
/// face-neighbors after voxelization, per [Grid::build]'s doc.
#[derive(Debug, Clone)]
pub struct Grid {
    voxel_width: f64,
    origin: [f64; 3],
    voxels: HashMap<Index3, VoxelKind>,
}

impl Grid {
    /// Voxelize `atoms` and classify every occupied voxel
    ///
    /// An atom occupies whichever voxel its center falls in. A voxel is
    /// [VoxelKind::Interior] when all 6 face-adjacent voxels are also
    /// occupied, and [VoxelKind::Surface] otherwise (including voxels at the
    /// edge of the occupied region, whose neighbor is implicitly empty).
    ///
    /// An empty atom set produces an empty grid, not an error.
    ///
    /// ```rust
    /// # use saxs_molecule::{Atom, FormFactor};
    /// # use saxs_gridvol::{Grid, VoxelKind};
    /// // A 3x3x3 block of atoms has exactly one interior voxel: the center
    /// let mut atoms = Vec::new();
    /// for x in -1..=1 {
    ///     for y in -1..=1 {
    ///         for z in -1..=1 {
    ///             atoms.push(Atom::new([x as f64, y as f64, z as f64], 1.0, FormFactor::C));
    ///         }
    ///     }
    /// }
    /// let grid = Grid::build(&atoms, 1.0).unwrap();
    /// assert_eq!(grid.count(VoxelKind::Interior), 1);
    /// assert_eq!(grid.count(VoxelKind::Surface), 26);
    /// ```
    pub fn build(atoms: &[Atom], voxel_width: f64) -> Result<Self> {
        if voxel_width <= 0.0 {
            return Err(Error::InvalidVoxelWidth(voxel_width));
        }

        let origin = [0.0, 0.0, 0.0];
        let mut occupied: HashSet<Index3> = HashSet::new();
        for atom in atoms {
            occupied.insert(voxel_index_of(atom.position, origin, voxel_width));
        }

        let mut voxels = HashMap::with_capacity(occupied.len());
        for &idx in &occupied {
            let is_interior = FACE_NEIGHBORS
                .iter()
                .all(|d| occupied.contains(&[idx[0] + d[0], idx[1] + d[1], idx[2] + d[2]]));
            let kind = if is_interior { VoxelKind::Interior } else { VoxelKind::Surface };
            voxels.insert(idx, kind);
        }

        Ok(Self { voxel_width, origin, voxels })
    }

    /// Voxel edge length, Angstrom
    pub fn voxel_width(&self) -> f64 {
        self.voxel_width
    }

    /// Volume of a single voxel, cubic Angstrom
    pub fn voxel_volume(&self) -> f64 {
        self.voxel_width.powi(3)
    }

    /// Total number of occupied voxels
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Whether the grid has no occupied voxels
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Number of occupied voxels of a given kind
    pub fn count(&self, kind: VoxelKind) -> usize {
        self.voxels.values().filter(|&&k| k == kind).count()
    }

    /// World-space centers of every occupied voxel of the given kind
    pub fn centers(&self, kind: VoxelKind) -> Vec<[f64; 3]> {
        self.voxels
            .iter()
            .filter(|(_, &k)| k == kind)
            .map(|(idx, _)| voxel_center(*idx, self.origin, self.voxel_width))
            .collect()
    }
}

fn voxel_index_of(position: [f64; 3], origin: [f64; 3], voxel_width: f64) -> Index3 {
    [
        ((position[0] - origin[0]) / voxel_width).floor() as i64,
        ((position[1] - origin[1]) / voxel_width).floor() as i64,
        ((position[2] - origin[2]) / voxel_width).floor() as i64,
    ]
}

fn voxel_center(idx: Index3, origin: [f64; 3], voxel_width: f64) -> [f64; 3] {
    [
        origin[0] + (idx[0] as f64 + 0.5) * voxel_width,
        origin[1] + (idx[1] as f64 + 0.5) * voxel_width,
        origin[2] + (idx[2] as f64 + 0.5) * voxel_width,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use saxs_molecule::FormFactor;

    #[test]
    fn empty_atoms_give_empty_grid() {
        let grid = Grid::build(&[], 1.0).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn single_atom_is_all_surface() {
        let atoms = vec![Atom::new([0.0, 0.0, 0.0], 1.0, FormFactor::C)];
        let grid = Grid::build(&atoms, 1.0).unwrap();
        assert_eq!(grid.count(VoxelKind::Surface), 1);
        assert_eq!(grid.count(VoxelKind::Interior), 0);
    }

    #[test]
    fn rejects_nonpositive_voxel_width() {
        let atoms = vec![Atom::new([0.0; 3], 1.0, FormFactor::C)];
        assert!(Grid::build(&atoms, 0.0).is_err());
        assert!(Grid::build(&atoms, -1.0).is_err());
    }
}
