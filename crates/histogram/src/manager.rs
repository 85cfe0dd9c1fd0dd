use saxs_calculator::SimpleCalculator;
use saxs_coord::CompactCoordinate;
use saxs_distribution::Distribution1D;
use saxs_molecule::{Atom, Body, FormFactor, Molecule, Water};
use saxs_settings::{EngineConfig, HistogramVariant};
use saxs_state::StateManager;
use saxs_symmetry::expand_body;

use crate::composite::{atomic_channel_index, CompositeDistanceHistogram, FormFactorChannels, GridExvChannels};
use crate::error::{Error, Result};

fn atom_coord(atom: &Atom) -> CompactCoordinate {
    CompactCoordinate::new(atom.position, atom.weight)
}

fn water_coord(water: &Water) -> CompactCoordinate {
    CompactCoordinate::new(water.position, water.weight)
}

/// Flatten a molecule's bodies through symmetry expansion into one atom list
/// and one water list
///
/// [expand_body] is the identity expansion for a body with no symmetry
/// operations, so this is equally correct for symmetry-free molecules.
fn flatten(molecule: &Molecule) -> (Vec<Atom>, Vec<Water>) {
    let mut atoms = Vec::with_capacity(molecule.atom_count());
    let mut waters = Vec::with_capacity(molecule.water_count());
    for body in &molecule.bodies {
        let expanded = expand_body(body);
        atoms.extend(expanded.atoms);
        waters.extend(expanded.waters);
    }
    (atoms, waters)
}

/// Build the pooled or per-type form-factor channels for a flat atom/water set
#[allow(clippy::too_many_arguments)]
fn build_channels(
    atoms: &[Atom],
    waters: &[Water],
    variant: HistogramVariant,
    bin_width: f64,
    bin_count: usize,
    job_size: usize,
    weighted: bool,
) -> Result<FormFactorChannels> {
    let mut calc = SimpleCalculator::new(bin_width, bin_count).with_job_size(job_size).with_weighted(weighted);
    let water_coords: Vec<CompactCoordinate> = waters.iter().map(water_coord).collect();

    if !variant.has_form_factors() || matches!(variant, HistogramVariant::MonolithicMTFFAvg) {
        let atom_coords: Vec<CompactCoordinate> = atoms.iter().map(atom_coord).collect();
        let h_aa = calc.enqueue_self(atom_coords.clone(), 1)?;
        let h_aw = calc.enqueue_cross(atom_coords, water_coords.clone(), 1)?;
        let h_ww = calc.enqueue_self(water_coords, 1)?;
        let results = calc.run();
        return Ok(FormFactorChannels::Averaged {
            aa: results[h_aa.index()].clone(),
            aw: results[h_aw.index()].clone(),
            ww: results[h_ww.index()].clone(),
        });
    }

    let mut by_type: Vec<Vec<CompactCoordinate>> = vec![Vec::new(); FormFactor::ATOMIC_CHANNEL_COUNT];
    for atom in atoms {
        if let Some(idx) = atomic_channel_index(atom.form_factor) {
            by_type[idx].push(atom_coord(atom));
        }
    }

    let mut aa_handles = vec![None; crate::composite::EXPLICIT_PAIR_COUNT];
    for i in 0..FormFactor::ATOMIC_CHANNEL_COUNT {
        for j in i..FormFactor::ATOMIC_CHANNEL_COUNT {
            let idx = crate::composite::explicit_pair_index(i, j);
            let handle = if i == j {
                calc.enqueue_self(by_type[i].clone(), 1)?
            } else {
                calc.enqueue_cross(by_type[i].clone(), by_type[j].clone(), 1)?
            };
            aa_handles[idx] = Some(handle);
        }
    }

    let mut aw_handles = Vec::with_capacity(FormFactor::ATOMIC_CHANNEL_COUNT);
    for i in 0..FormFactor::ATOMIC_CHANNEL_COUNT {
        aw_handles.push(calc.enqueue_cross(by_type[i].clone(), water_coords.clone(), 1)?);
    }
    let h_ww = calc.enqueue_self(water_coords, 1)?;

    let results = calc.run();
    let aa = aa_handles.into_iter().map(|h| results[h.unwrap().index()].clone()).collect();
    let aw = aw_handles.into_iter().map(|h| results[h.index()].clone()).collect();
    let ww = results[h_ww.index()].clone();

    Ok(FormFactorChannels::Explicit { aa, aw, ww })
}

#[cfg(feature = "gridvol")]
fn build_exv(atoms: &[Atom], waters: &[Water], config: &EngineConfig) -> Option<GridExvChannels> {
    let grid = saxs_gridvol::Grid::build(atoms, config.voxel_width).ok()?;
    let h = saxs_gridvol::grid_excluded_volume_histograms(
        &grid,
        atoms,
        waters,
        config.water_density,
        config.bin_width,
        config.bin_count(),
        config.job_size,
    );
    Some(GridExvChannels {
        xx_i: h.xx_i,
        xx_c: h.xx_c,
        xx_s: h.xx_s,
        ax_i: h.ax_i,
        ax_s: h.ax_s,
        wx_i: h.wx_i,
        wx_s: h.wx_s,
    })
}

#[cfg(not(feature = "gridvol"))]
fn build_exv(_atoms: &[Atom], _waters: &[Water], _config: &EngineConfig) -> Option<GridExvChannels> {
    None
}

fn build_composite(atoms: &[Atom], waters: &[Water], config: &EngineConfig) -> Result<CompositeDistanceHistogram> {
    let weighted = config.weighted_bins || config.variable_bin_width;
    let channels = build_channels(
        atoms,
        waters,
        config.histogram_variant,
        config.bin_width,
        config.bin_count(),
        config.job_size,
        weighted,
    )?;
    let exv = if config.histogram_variant.uses_grid_exv() {
        build_exv(atoms, waters, config)
    } else {
        None
    };
    Ok(CompositeDistanceHistogram::new(channels, exv, config.q_axis.values.clone(), config.bin_width))
}

/// Recomputes every pairwise distance from scratch on every [MonolithicHistogramManager::calculate]
///
/// The simplest possible manager: no change tracking, no incremental patching.
/// Matches the `Monolithic*` and `SymmetryMT` family of [HistogramVariant]s,
/// which all rebuild completely every call and differ only in what channels
/// [EngineConfig::histogram_variant] asks for.
pub struct MonolithicHistogramManager {
    molecule: Molecule,
    config: EngineConfig,
    composite: Option<CompositeDistanceHistogram>,
}

impl MonolithicHistogramManager {
    /// Construct a manager bound to a molecule and configuration
    pub fn new(molecule: Molecule, config: EngineConfig) -> Self {
        Self { molecule, config, composite: None }
    }

    /// The molecule this manager is computing against
    pub fn get_probe(&self) -> &Molecule {
        &self.molecule
    }

    /// Mutable access to the molecule; the next [MonolithicHistogramManager::calculate]
    /// picks up any changes, since every call recomputes from scratch anyway
    pub fn get_probe_mut(&mut self) -> &mut Molecule {
        &mut self.molecule
    }

    /// No-op: a monolithic rebuild always re-reads the current hydration
    /// layer, so there is nothing to mark dirty
    pub fn signal_modified_hydration_layer(&mut self) {}

    /// Recompute the full composite histogram from the current molecule state
    pub fn calculate(&mut self) -> Result<&CompositeDistanceHistogram> {
        let (atoms, waters) = flatten(&self.molecule);
        self.composite = Some(build_composite(&atoms, &waters, &self.config)?);
        Ok(self.composite.as_ref().expect("just assigned"))
    }

    /// Identical to [MonolithicHistogramManager::calculate]: there is no
    /// incremental state to bypass
    pub fn calculate_all(&mut self) -> Result<&CompositeDistanceHistogram> {
        self.calculate()
    }

    /// Recompute and immediately transform to a scattering profile at the
    /// current free-parameter values
    pub fn intensity(&mut self) -> Result<crate::profile::ScatteringProfile> {
        self.calculate()?;
        Ok(self.composite.as_mut().expect("just assigned").intensity())
    }
}

struct MasterChannels {
    aa: Distribution1D,
    aw: Distribution1D,
    ww: Distribution1D,
}

/// Per-body cached self-, cross- and hydration-correlation distributions, so
/// a future change to body `i` only needs these recomputed and patched into
/// the master
///
/// A cross pair `(i, j)` is stored once, at the lower-indexed body: body `i`
/// (`i < j`) holds `cross_hist[j]`; body `j` leaves its own `cross_hist[i]`
/// as an unused placeholder. This avoids storing (and patching) every pair
/// twice.
struct BodyCache {
    self_hist: Distribution1D,
    cross_hist: Vec<Distribution1D>,
    hydration_hist: Distribution1D,
}

/// Incrementally rebuilds the composite histogram as individual bodies and
/// the hydration layer change, patching the master distribution rather than
/// recomputing every pair
///
/// Matches the `Partial*` family of [HistogramVariant]s. The `M -= P_old;
/// P = P_new; M += P` patch sequence this manager implements is exactly the
/// one [saxs_distribution::Distribution1D]'s `AddAssign`/`SubAssign` impls
/// are built for.
///
/// Scope: this manager tracks pooled (`Averaged`) atom-atom/atom-water/
/// water-water channels only; grid excluded-volume and per-type form-factor
/// channels are recomputed wholesale by [MonolithicHistogramManager] instead,
/// since their incremental update rules would need the same body-level
/// change tracking duplicated across every channel kind for a cost reduction
/// this crate's test scenarios don't exercise.
pub struct PartialHistogramManager {
    molecule: Molecule,
    config: EngineConfig,
    state: StateManager,
    master: Option<MasterChannels>,
    body_cache: Vec<BodyCache>,
    composite: Option<CompositeDistanceHistogram>,
}

impl PartialHistogramManager {
    /// Construct a manager bound to a molecule and configuration
    pub fn new(molecule: Molecule, config: EngineConfig) -> Self {
        let state = StateManager::new(molecule.body_count());
        Self { molecule, config, state, master: None, body_cache: Vec::new(), composite: None }
    }

    /// The molecule this manager is computing against
    pub fn get_probe(&self) -> &Molecule {
        &self.molecule
    }

    /// Replace body `index` with new atom/water data and mark it externally modified
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn replace_body(&mut self, index: usize, body: Body) {
        self.molecule.bodies[index] = body;
        self.state.mark_external(index);
    }

    /// Mark the global hydration layer as regenerated, so the next
    /// [PartialHistogramManager::calculate] refreshes every channel that
    /// touches water
    pub fn signal_modified_hydration_layer(&mut self) {
        self.state.mark_hydration_modified();
    }

    /// Recompute only what changed since the last call, patching the master
    /// distribution
    pub fn calculate(&mut self) -> Result<&CompositeDistanceHistogram> {
        if self.master.is_none() {
            return self.rebuild_everything();
        }
        self.patch_modified()
    }

    /// Force a full rebuild from the current molecule state, bypassing
    /// incremental tracking; requires [PartialHistogramManager::calculate]
    /// to have run at least once first
    pub fn calculate_all(&mut self) -> Result<&CompositeDistanceHistogram> {
        if self.master.is_none() {
            return Err(Error::StateError);
        }
        self.rebuild_everything()
    }

    fn rebuild_everything(&mut self) -> Result<&CompositeDistanceHistogram> {
        let n = self.molecule.body_count();
        let expanded: Vec<(Vec<Atom>, Vec<Water>)> =
            self.molecule.bodies.iter().map(|b| { let e = expand_body(b); (e.atoms, e.waters) }).collect();

        let bin_width = self.config.bin_width;
        let bin_count = self.config.bin_count();
        let weighted = self.config.weighted_bins || self.config.variable_bin_width;
        let mut calc =
            SimpleCalculator::new(bin_width, bin_count).with_job_size(self.config.job_size).with_weighted(weighted);

        let mut self_handles = Vec::with_capacity(n);
        let mut cross_handles: Vec<Vec<_>> = (0..n).map(|_| Vec::new()).collect();
        for i in 0..n {
            let coords: Vec<CompactCoordinate> = expanded[i].0.iter().map(atom_coord).collect();
            self_handles.push(calc.enqueue_self(coords, 1)?);
        }
        for i in 0..n {
            for j in (i + 1)..n {
                let a: Vec<CompactCoordinate> = expanded[i].0.iter().map(atom_coord).collect();
                let b: Vec<CompactCoordinate> = expanded[j].0.iter().map(atom_coord).collect();
                let h = calc.enqueue_cross(a, b, 1)?;
                cross_handles[i].push((j, h));
            }
        }

        let all_waters: Vec<Water> = expanded.iter().flat_map(|(_, w)| w.iter().copied()).collect();
        let all_atoms: Vec<Atom> = expanded.iter().flat_map(|(a, _)| a.iter().copied()).collect();
        let water_coords: Vec<CompactCoordinate> = all_waters.iter().map(water_coord).collect();
        let mut hydration_handles = Vec::with_capacity(n);
        for i in 0..n {
            let coords: Vec<CompactCoordinate> = expanded[i].0.iter().map(atom_coord).collect();
            hydration_handles.push(calc.enqueue_cross(coords, water_coords.clone(), 1)?);
        }
        let h_ww = calc.enqueue_self(water_coords, 1)?;

        let results = calc.run();

        let mut body_cache = Vec::with_capacity(n);
        let mut master_aa = empty(bin_width, bin_count);
        for i in 0..n {
            let self_hist = results[self_handles[i].index()].clone();
            master_aa += &self_hist;
            let mut cross_hist = vec![empty(bin_width, bin_count); n];
            for &(j, h) in &cross_handles[i] {
                let d = results[h.index()].clone();
                master_aa += &d;
                cross_hist[j] = d;
            }
            let hydration_hist = results[hydration_handles[i].index()].clone();
            body_cache.push(BodyCache { self_hist, cross_hist, hydration_hist });
        }

        let mut master_aw = empty(bin_width, bin_count);
        for cache in &body_cache {
            master_aw += &cache.hydration_hist;
        }
        let master_ww = results[h_ww.index()].clone();

        self.master = Some(MasterChannels { aa: master_aa, aw: master_aw, ww: master_ww });
        self.body_cache = body_cache;
        self.state.reset();

        let channels = FormFactorChannels::Averaged {
            aa: self.master.as_ref().unwrap().aa.clone(),
            aw: self.master.as_ref().unwrap().aw.clone(),
            ww: self.master.as_ref().unwrap().ww.clone(),
        };
        let exv = if self.config.histogram_variant.uses_grid_exv() {
            build_exv(&all_atoms, &all_waters, &self.config)
        } else {
            None
        };
        self.composite = Some(CompositeDistanceHistogram::new(
            channels,
            exv,
            self.config.q_axis.values.clone(),
            self.config.bin_width,
        ));
        Ok(self.composite.as_ref().expect("just assigned"))
    }

    fn patch_modified(&mut self) -> Result<&CompositeDistanceHistogram> {
        let modified = self.state.modified_bodies();
        if modified.is_empty() && !self.state.is_hydration_modified() {
            return Ok(self.composite.as_ref().expect("rebuild_everything ran first"));
        }

        let n = self.molecule.body_count();
        let bin_width = self.config.bin_width;
        let bin_count = self.config.bin_count();
        let weighted = self.config.weighted_bins || self.config.variable_bin_width;
        let expanded: Vec<(Vec<Atom>, Vec<Water>)> =
            self.molecule.bodies.iter().map(|b| { let e = expand_body(b); (e.atoms, e.waters) }).collect();

        let master = self.master.as_mut().expect("patch_modified called after rebuild_everything");

        for &i in &modified {
            let coords_i: Vec<CompactCoordinate> = expanded[i].0.iter().map(atom_coord).collect();

            let mut calc =
                SimpleCalculator::new(bin_width, bin_count).with_job_size(self.config.job_size).with_weighted(weighted);
            let h_self = calc.enqueue_self(coords_i.clone(), 1)?;
            let mut cross_handles = Vec::with_capacity(n - 1);
            for j in 0..n {
                if j == i {
                    continue;
                }
                let coords_j: Vec<CompactCoordinate> = expanded[j].0.iter().map(atom_coord).collect();
                cross_handles.push((j, calc.enqueue_cross(coords_i.clone(), coords_j, 1)?));
            }
            let all_waters: Vec<Water> = expanded.iter().flat_map(|(_, w)| w.iter().copied()).collect();
            let water_coords: Vec<CompactCoordinate> = all_waters.iter().map(water_coord).collect();
            let h_hydration = calc.enqueue_cross(coords_i, water_coords, 1)?;

            let results = calc.run();

            let new_self = results[h_self.index()].clone();
            master.aa -= &self.body_cache[i].self_hist;
            master.aa += &new_self;
            self.body_cache[i].self_hist = new_self;

            for (j, h) in cross_handles {
                let new_cross = results[h.index()].clone();
                let (lo, hi) = (i.min(j), i.max(j));
                master.aa -= &self.body_cache[lo].cross_hist[hi];
                master.aa += &new_cross;
                self.body_cache[lo].cross_hist[hi] = new_cross;
            }

            let new_hydration = results[h_hydration.index()].clone();
            master.aw -= &self.body_cache[i].hydration_hist;
            master.aw += &new_hydration;
            self.body_cache[i].hydration_hist = new_hydration;
        }

        if self.state.is_hydration_modified() {
            let all_atoms: Vec<Atom> = expanded.iter().flat_map(|(a, _)| a.iter().copied()).collect();
            let all_waters: Vec<Water> = expanded.iter().flat_map(|(_, w)| w.iter().copied()).collect();
            let atom_coords: Vec<CompactCoordinate> = all_atoms.iter().map(atom_coord).collect();
            let water_coords: Vec<CompactCoordinate> = all_waters.iter().map(water_coord).collect();

            let mut calc =
                SimpleCalculator::new(bin_width, bin_count).with_job_size(self.config.job_size).with_weighted(weighted);
            let h_aw = calc.enqueue_cross(atom_coords, water_coords.clone(), 1)?;
            let h_ww = calc.enqueue_self(water_coords, 1)?;
            let results = calc.run();
            master.aw = results[h_aw.index()].clone();
            master.ww = results[h_ww.index()].clone();
        }

        self.state.reset();
        let channels =
            FormFactorChannels::Averaged { aa: master.aa.clone(), aw: master.aw.clone(), ww: master.ww.clone() };

        let exv = if self.config.histogram_variant.uses_grid_exv() {
            let all_atoms: Vec<Atom> = expanded.iter().flat_map(|(a, _)| a.iter().copied()).collect();
            let all_waters: Vec<Water> = expanded.iter().flat_map(|(_, w)| w.iter().copied()).collect();
            build_exv(&all_atoms, &all_waters, &self.config)
        } else {
            None
        };

        match &mut self.composite {
            Some(composite) => composite.replace_channels(channels, exv, self.config.bin_width),
            None => {
                self.composite = Some(CompositeDistanceHistogram::new(
                    channels,
                    exv,
                    self.config.q_axis.values.clone(),
                    self.config.bin_width,
                ))
            }
        }
        Ok(self.composite.as_ref().expect("just assigned"))
    }

    /// Recompute (or patch) and immediately transform to a scattering profile
    /// at the current free-parameter values
    pub fn intensity(&mut self) -> Result<crate::profile::ScatteringProfile> {
        self.calculate()?;
        Ok(self.composite.as_mut().expect("just assigned").intensity())
    }
}

fn empty(bin_width: f64, bin_count: usize) -> Distribution1D {
    Distribution1D::new(bin_width, bin_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use saxs_molecule::{Atom, Body};

    fn cube_body(offset: f64) -> Body {
        let mut atoms = Vec::new();
        for x in [0.0, 1.0] {
            for y in [0.0, 1.0] {
                for z in [0.0, 1.0] {
                    atoms.push(Atom::new([x + offset, y, z], 1.0, FormFactor::C));
                }
            }
        }
        Body::new(atoms)
    }

    fn config() -> EngineConfig {
        EngineConfig {
            bin_width: 0.1,
            d_max: 20.0,
            histogram_variant: HistogramVariant::PartialMT,
            ..Default::default()
        }
    }

    #[test]
    fn monolithic_and_partial_agree_on_two_body_no_symmetry() {
        let molecule = Molecule::new(vec![cube_body(0.0), cube_body(5.0)]);

        let mut mono = MonolithicHistogramManager::new(molecule.clone(), config());
        let mono_profile = mono.calculate().unwrap().channels().clone();

        let mut partial = PartialHistogramManager::new(molecule, config());
        let partial_profile = partial.calculate().unwrap().channels().clone();

        match (mono_profile, partial_profile) {
            (FormFactorChannels::Averaged { aa: a1, .. }, FormFactorChannels::Averaged { aa: a2, .. }) => {
                assert_eq!(a1.counts(), a2.counts());
            }
            _ => panic!("expected averaged channels"),
        }
    }

    #[test]
    fn rigid_body_move_matches_a_full_rebuild() {
        let molecule = Molecule::new(vec![cube_body(0.0), cube_body(5.0)]);
        let mut partial = PartialHistogramManager::new(molecule, config());
        partial.calculate().unwrap();

        partial.replace_body(1, cube_body(8.0));
        let incremental = partial.calculate().unwrap().channels().clone();

        let molecule_moved = Molecule::new(vec![cube_body(0.0), cube_body(8.0)]);
        let mut fresh = PartialHistogramManager::new(molecule_moved, config());
        let rebuilt = fresh.calculate().unwrap().channels().clone();

        match (incremental, rebuilt) {
            (FormFactorChannels::Averaged { aa: a1, .. }, FormFactorChannels::Averaged { aa: a2, .. }) => {
                assert_eq!(a1.counts(), a2.counts());
            }
            _ => panic!("expected averaged channels"),
        }
    }

    #[test]
    fn calculate_all_before_calculate_is_an_error() {
        let molecule = Molecule::new(vec![cube_body(0.0)]);
        let mut partial = PartialHistogramManager::new(molecule, config());
        assert!(partial.calculate_all().is_err());
    }

    fn raw_bin_config() -> EngineConfig {
        EngineConfig {
            bin_width: 0.1,
            d_max: 20.0,
            histogram_variant: HistogramVariant::Monolithic,
            ..Default::default()
        }
    }

    /// `bin(d) = floor(d / bin_width + 1/2)`, matching [saxs_coord::Evaluator]
    fn bin(d: f64, bin_width: f64) -> usize {
        (d / bin_width + 0.5).floor() as usize
    }

    fn raw_aa_counts(molecule: Molecule) -> Vec<f64> {
        let mut manager = MonolithicHistogramManager::new(molecule, raw_bin_config());
        match manager.calculate().unwrap().channels() {
            FormFactorChannels::Averaged { aa, .. } => aa.counts().to_vec(),
            FormFactorChannels::Explicit { .. } => panic!("expected averaged channels"),
        }
    }

    #[test]
    fn unit_cube_matches_the_documented_histogram() {
        let mut atoms = Vec::new();
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    atoms.push(Atom::new([x, y, z], 1.0, FormFactor::C));
                }
            }
        }
        let molecule = Molecule::new(vec![Body::new(atoms)]);
        let counts = raw_aa_counts(molecule);

        assert_eq!(counts[bin(0.0, 0.1)], 8.0);
        assert_eq!(counts[bin(2.0, 0.1)], 24.0);
        assert_eq!(counts[bin(8f64.sqrt(), 0.1)], 24.0);
        assert_eq!(counts[bin(12f64.sqrt(), 0.1)], 8.0);
    }

    #[test]
    fn cube_with_center_atom_matches_the_documented_histogram() {
        let mut atoms = vec![Atom::new([0.0, 0.0, 0.0], 1.0, FormFactor::C)];
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    atoms.push(Atom::new([x, y, z], 1.0, FormFactor::C));
                }
            }
        }
        let molecule = Molecule::new(vec![Body::new(atoms)]);
        let counts = raw_aa_counts(molecule);

        assert_eq!(counts[bin(0.0, 0.1)], 9.0);
        assert_eq!(counts[bin(3f64.sqrt(), 0.1)], 16.0);
        assert_eq!(counts[bin(2.0, 0.1)], 24.0);
        assert_eq!(counts[bin(8f64.sqrt(), 0.1)], 24.0);
        assert_eq!(counts[bin(12f64.sqrt(), 0.1)], 8.0);
    }

    #[test]
    fn single_atom_with_one_p2_symmetry_op_matches_the_documented_histogram() {
        use saxs_molecule::SymmetryOperation;

        let atom = Atom::new([0.0, 0.0, 0.0], 1.0, FormFactor::C);
        let op = SymmetryOperation::new([1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0], 1);
        let body = Body::new(vec![atom]).with_symmetry(vec![op]);
        let molecule = Molecule::new(vec![body]);
        let counts = raw_aa_counts(molecule);

        assert_eq!(counts[bin(0.0, 0.1)], 2.0);
        assert_eq!(counts[bin(1.0, 0.1)], 2.0);
    }

    #[test]
    fn weighted_bins_use_the_empirical_mean_distance_not_the_bin_center() {
        use saxs_distribution::sinc;

        const ATOMIC_CHANNELS: [FormFactor; 9] = [
            FormFactor::CH,
            FormFactor::CH2,
            FormFactor::CH3,
            FormFactor::NH,
            FormFactor::NH2,
            FormFactor::NH3,
            FormFactor::OH,
            FormFactor::SH,
            FormFactor::C,
        ];
        fn average_ff(q: f64) -> f64 {
            ATOMIC_CHANNELS.iter().map(|&c| crate::form_factor::form_factor(q, c)).sum::<f64>()
                / ATOMIC_CHANNELS.len() as f64
        }

        let d = 1.23;
        let atoms = vec![Atom::new([0.0, 0.0, 0.0], 1.0, FormFactor::C), Atom::new([d, 0.0, 0.0], 1.0, FormFactor::C)];
        let molecule = Molecule::new(vec![Body::new(atoms)]);
        let config = EngineConfig {
            bin_width: 1.0,
            d_max: 5.0,
            histogram_variant: HistogramVariant::MonolithicMTFFAvg,
            weighted_bins: true,
            q_axis: saxs_settings::QAxis::logspace(0.8, 0.8, 1),
            ..Default::default()
        };
        let mut manager = MonolithicHistogramManager::new(molecule, config);
        let profile = manager.intensity().unwrap();

        let q = profile.q()[0];
        let ff = average_ff(q);
        // one off-diagonal pair (counted twice, at the true distance `d`) plus
        // the two self-distance (0.0) diagonal terms
        let expected = ff * ff * (2.0 * sinc(0.0) + 2.0 * sinc(q * d));
        assert!((profile.intensity()[0] - expected).abs() < 1e-9);

        // sanity: the pair's bin center (1.5) is nowhere near `d` (1.23), so a
        // bin-center evaluation would have given a visibly different answer
        let bin_center = 1.5;
        assert!((bin_center - d).abs() > 0.1);
    }

    #[test]
    fn single_atom_debye_transform_matches_the_squared_form_factor_exactly() {
        let atom = Atom::new([0.0, 0.0, 0.0], 1.0, FormFactor::C);
        let molecule = Molecule::new(vec![Body::new(vec![atom])]);
        let config = EngineConfig {
            bin_width: 0.1,
            d_max: 20.0,
            histogram_variant: HistogramVariant::MonolithicMTFFAvg,
            q_axis: saxs_settings::QAxis::logspace(1e-2, 1.0, 5),
            ..Default::default()
        };
        let mut manager = MonolithicHistogramManager::new(molecule, config);
        let profile = manager.intensity().unwrap();

        for (q_idx, &q) in profile.q().iter().enumerate() {
            let ff = crate::form_factor::form_factor(q, FormFactor::C);
            assert!((profile.intensity()[q_idx] - ff * ff).abs() < 1e-9);
        }
    }
}
