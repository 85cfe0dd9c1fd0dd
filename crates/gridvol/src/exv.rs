use saxs_calculator::SimpleCalculator;
use saxs_coord::CompactCoordinate;
use saxs_distribution::Distribution1D;
use saxs_molecule::{Atom, Water};

use crate::grid::Grid;
use crate::voxel::VoxelKind;

/// The excluded-volume distance channels derived from a voxelized [Grid]
///
/// `xx_i/xx_c/xx_s` are the interior-interior, interior-surface (cross) and
/// surface-surface pair-distance distributions among the grid's own voxels.
/// `ax_i/ax_s` and `wx_i/wx_s` are atom-voxel and water-voxel cross
/// distributions, split the same way.
#[derive(Debug, Clone)]
pub struct GridExvHistograms {
    /// Interior-interior voxel pair distances
    pub xx_i: Distribution1D,
    /// Interior-surface voxel pair distances
    pub xx_c: Distribution1D,
    /// Surface-surface voxel pair distances
    pub xx_s: Distribution1D,
    /// Atom-to-interior-voxel distances
    pub ax_i: Distribution1D,
    /// Atom-to-surface-voxel distances
    pub ax_s: Distribution1D,
    /// Water-to-interior-voxel distances
    pub wx_i: Distribution1D,
    /// Water-to-surface-voxel distances
    pub wx_s: Distribution1D,
}

/// Build every excluded-volume channel for a voxelized grid
///
/// `water_density` is the solvent electron density (electrons per cubic
/// Angstrom); each voxel's scattering weight is `water_density * voxel_volume`.
#[allow(clippy::too_many_arguments)]
pub fn grid_excluded_volume_histograms(
    grid: &Grid,
    atoms: &[Atom],
    waters: &[Water],
    water_density: f64,
    bin_width: f64,
    bin_count: usize,
    job_size: usize,
) -> GridExvHistograms {
    let voxel_weight = water_density * grid.voxel_volume();

    let interior = voxel_coords(grid, VoxelKind::Interior, voxel_weight);
    let surface = voxel_coords(grid, VoxelKind::Surface, voxel_weight);
    let atom_coords: Vec<CompactCoordinate> =
        atoms.iter().map(|a| CompactCoordinate::new(a.position, a.weight)).collect();
    let water_coords: Vec<CompactCoordinate> =
        waters.iter().map(|w| CompactCoordinate::new(w.position, w.weight)).collect();

    let mut calc = SimpleCalculator::new(bin_width, bin_count).with_job_size(job_size);
    let h_xx_i = calc.enqueue_self(interior.clone(), 1).unwrap();
    let h_xx_s = calc.enqueue_self(surface.clone(), 1).unwrap();
    let h_xx_c = calc.enqueue_cross(interior.clone(), surface.clone(), 1).unwrap();
    let h_ax_i = calc.enqueue_cross(atom_coords.clone(), interior.clone(), 1).unwrap();
    let h_ax_s = calc.enqueue_cross(atom_coords, surface.clone(), 1).unwrap();
    let h_wx_i = calc.enqueue_cross(water_coords.clone(), interior, 1).unwrap();
    let h_wx_s = calc.enqueue_cross(water_coords, surface, 1).unwrap();

    let results = calc.run();

    GridExvHistograms {
        xx_i: results[h_xx_i.index()].clone(),
        xx_c: results[h_xx_c.index()].clone(),
        xx_s: results[h_xx_s.index()].clone(),
        ax_i: results[h_ax_i.index()].clone(),
        ax_s: results[h_ax_s.index()].clone(),
        wx_i: results[h_wx_i.index()].clone(),
        wx_s: results[h_wx_s.index()].clone(),
    }
}

fn voxel_coords(grid: &Grid, kind: VoxelKind, weight: f64) -> Vec<CompactCoordinate> {
    grid.centers(kind)
        .into_iter()
        .map(|c| CompactCoordinate::new(c, weight))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use saxs_calculator::SimpleCalculator as Calc;
    use saxs_molecule::FormFactor;

    fn cube_atoms() -> Vec<Atom> {
        let mut atoms = Vec::new();
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    atoms.push(Atom::new([x as f64, y as f64, z as f64], 1.0, FormFactor::C));
                }
            }
        }
        atoms
    }

    #[test]
    fn split_sums_bit_identically_to_unsplit() {
        let atoms = cube_atoms();
        let grid = Grid::build(&atoms, 1.0).unwrap();
        let channels = grid_excluded_volume_histograms(&grid, &atoms, &[], 0.334, 0.1, 200, 200);

        let mut calc = Calc::new(0.1, 200);
        let all_coords: Vec<CompactCoordinate> = grid
            .centers(VoxelKind::Interior)
            .into_iter()
            .chain(grid.centers(VoxelKind::Surface))
            .map(|c| CompactCoordinate::new(c, 0.334))
            .collect();
        let handle = calc.enqueue_self(all_coords, 1).unwrap();
        let unsplit = &calc.run()[handle.index()];

        let mut split_sum = channels.xx_i.clone();
        split_sum += &channels.xx_c;
        split_sum += &channels.xx_s;

        assert_eq!(split_sum.counts(), unsplit.counts());
    }
}
