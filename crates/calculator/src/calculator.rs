use rayon::prelude::*;

use saxs_coord::{CompactCoordinate, Evaluator};
use saxs_distribution::Distribution1D;

use crate::error::{Error, Result};
use crate::job::{Job, JobHandle};
use crate::scaling::{dispatch_scaled, dispatch_scaled_weighted, MAX_SCALING};

/// Default number of atoms handed to one rayon task at a time
///
/// Small enough that the thread pool stays balanced even for a handful of
/// large bodies, large enough that per-task overhead stays negligible next to
/// the O(n) pairwise work each task does.
pub const DEFAULT_JOB_SIZE: usize = 200;

/// A threaded queue of pairwise distance-histogram jobs
///
/// Jobs are enqueued with [SimpleCalculator::enqueue_self] (all pairs within
/// one atom set) or [SimpleCalculator::enqueue_cross] (all pairs between two
/// atom sets), each carrying an integer scaling factor applied to every
/// contribution. [SimpleCalculator::run] drains the queue across rayon's
/// global thread pool and returns one histogram per job, in enqueue order.
///
/// ```rust
/// # use saxs_coord::CompactCoordinate;
/// # use saxs_calculator::SimpleCalculator;
/// let mut calc = SimpleCalculator::new(0.1, 50);
/// let atoms = vec![
///     CompactCoordinate::new([0.0, 0.0, 0.0], 1.0),
///     CompactCoordinate::new([1.0, 0.0, 0.0], 1.0),
/// ];
/// let handle = calc.enqueue_self(atoms, 1).unwrap();
/// let results = calc.run();
/// let hist = &results[handle.index()];
/// assert_eq!(hist.counts()[10], 2.0); // one off-diagonal pair, counted twice
/// ```
pub struct SimpleCalculator {
    evaluator: Evaluator,
    job_size: usize,
    weighted: bool,
    jobs: Vec<Job>,
}

impl SimpleCalculator {
    /// Construct a calculator for a fixed-width axis of `bin_count` bins
    pub fn new(bin_width: f64, bin_count: usize) -> Self {
        Self {
            evaluator: Evaluator::new(bin_width, bin_count),
            job_size: DEFAULT_JOB_SIZE,
            weighted: false,
            jobs: Vec::new(),
        }
    }

    /// Override the batching granularity used by [SimpleCalculator::run]
    pub fn with_job_size(mut self, job_size: usize) -> Self {
        self.job_size = job_size.max(1);
        self
    }

    /// Track each bin's empirical mean contributing distance instead of just
    /// its count
    ///
    /// Routes every pair through the full (unrounded) evaluator so the raw
    /// distance is available to fold into the running mean via
    /// `Distribution1D::add_weighted`; callers select this from the
    /// `weighted_bins` / `variable_bin_width` settings.
    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Enqueue a self-correlation job: every pair within `atoms`
    ///
    /// `scaling` multiplies every contribution, including the diagonal
    /// (`i == j`) term; it must be in `1..=saxs_calculator::MAX_SCALING`.
    pub fn enqueue_self(&mut self, atoms: Vec<CompactCoordinate>, scaling: u32) -> Result<JobHandle> {
        validate_scaling(scaling)?;
        let handle = JobHandle(self.jobs.len());
        self.jobs.push(Job::SelfCorrelation { atoms, scaling });
        Ok(handle)
    }

    /// Enqueue a cross-correlation job: every pair between `a` and `b`
    ///
    /// `scaling` must be in `1..=saxs_calculator::MAX_SCALING`.
    pub fn enqueue_cross(
        &mut self,
        a: Vec<CompactCoordinate>,
        b: Vec<CompactCoordinate>,
        scaling: u32,
    ) -> Result<JobHandle> {
        validate_scaling(scaling)?;
        let handle = JobHandle(self.jobs.len());
        self.jobs.push(Job::CrossCorrelation { a, b, scaling });
        Ok(handle)
    }

    /// Number of jobs currently queued
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Run every queued job across the thread pool and drain the queue
    ///
    /// Returns one histogram per job, ordered to match the [JobHandle]s
    /// handed out at enqueue time.
    pub fn run(&mut self) -> Vec<Distribution1D> {
        let jobs = std::mem::take(&mut self.jobs);
        jobs.par_iter()
            .map(|job| match job {
                Job::SelfCorrelation { atoms, scaling } => {
                    self.run_self(atoms, *scaling)
                }
                Job::CrossCorrelation { a, b, scaling } => self.run_cross(a, b, *scaling),
            })
            .collect()
    }

    fn empty_distribution(&self) -> Distribution1D {
        if self.weighted {
            Distribution1D::weighted(self.evaluator.bin_width(), self.evaluator.bin_count())
        } else {
            Distribution1D::new(self.evaluator.bin_width(), self.evaluator.bin_count())
        }
    }

    fn run_self(&self, atoms: &[CompactCoordinate], scaling: u32) -> Distribution1D {
        let n = atoms.len();
        if n == 0 {
            return self.empty_distribution();
        }

        let indices: Vec<usize> = (0..n).collect();
        let mut dist = indices
            .par_chunks(self.job_size)
            .map(|chunk| {
                let mut local = self.empty_distribution();
                for &i in chunk {
                    accumulate_row(&self.evaluator, atoms[i], &atoms[i + 1..], scaling, &mut local, 2.0, self.weighted);
                }
                local
            })
            .reduce(|| self.empty_distribution(), |mut acc, d| { acc += &d; acc });

        let diagonal_weight: f64 = atoms.iter().map(|c| (c.w as f64) * (c.w as f64)).sum();
        // every atom's self-distance is exactly 0, so the diagonal term's
        // representative distance is 0 regardless of the weighted flag
        if self.weighted {
            dispatch_scaled_weighted(scaling, &mut dist, 0, diagonal_weight, 0.0);
        } else {
            dispatch_scaled(scaling, &mut dist, 0, diagonal_weight);
        }
        dist
    }

    fn run_cross(&self, a: &[CompactCoordinate], b: &[CompactCoordinate], scaling: u32) -> Distribution1D {
        if a.is_empty() || b.is_empty() {
            return self.empty_distribution();
        }

        let indices: Vec<usize> = (0..a.len()).collect();
        indices
            .par_chunks(self.job_size)
            .map(|chunk| {
                let mut local = self.empty_distribution();
                for &i in chunk {
                    accumulate_row(&self.evaluator, a[i], b, scaling, &mut local, 1.0, self.weighted);
                }
                local
            })
            .reduce(|| self.empty_distribution(), |mut acc, d| { acc += &d; acc })
    }
}

/// Evaluate `a` against every coordinate in `others`, folding weighted bin
/// contributions (each pre-multiplied by the runtime `factor`, e.g. `2.0` for
/// an `i < j` pair that represents both `(i, j)` and `(j, i)`) into `dist`
/// through the compile-time-specialized scaling dispatch
///
/// `weighted` selects the full evaluator path, which carries the raw
/// distance into [Distribution1D::add_weighted] instead of just the bin
/// count; `dist` must itself have been constructed with
/// [Distribution1D::weighted] for that to have any effect.
#[allow(clippy::too_many_arguments)]
fn accumulate_row(
    evaluator: &Evaluator,
    a: CompactCoordinate,
    others: &[CompactCoordinate],
    scaling: u32,
    dist: &mut Distribution1D,
    factor: f64,
    weighted: bool,
) {
    if weighted {
        accumulate_row_weighted(evaluator, a, others, scaling, dist, factor);
        return;
    }

    let mut chunks = others.chunks_exact(8);
    for chunk in chunks.by_ref() {
        let block: [CompactCoordinate; 8] = chunk.try_into().unwrap();
        for r in evaluator.evaluate_octo_rounded(a, block) {
            dispatch_scaled(scaling, dist, r.bin as usize, r.weight as f64 * factor);
        }
    }

    let remainder = chunks.remainder();
    let mut quad_chunks = remainder.chunks_exact(4);
    for chunk in quad_chunks.by_ref() {
        let block: [CompactCoordinate; 4] = chunk.try_into().unwrap();
        for r in evaluator.evaluate_quad_rounded(a, block) {
            dispatch_scaled(scaling, dist, r.bin as usize, r.weight as f64 * factor);
        }
    }

    for &other in quad_chunks.remainder() {
        let r = evaluator.evaluate_rounded(a, other);
        dispatch_scaled(scaling, dist, r.bin as usize, r.weight as f64 * factor);
    }
}

/// Weighted-bin counterpart of [accumulate_row]: the same batching, through
/// [Evaluator::evaluate_octo]/[Evaluator::evaluate_quad]/[Evaluator::evaluate]
/// so each contribution keeps its raw distance for the running per-bin mean
fn accumulate_row_weighted(
    evaluator: &Evaluator,
    a: CompactCoordinate,
    others: &[CompactCoordinate],
    scaling: u32,
    dist: &mut Distribution1D,
    factor: f64,
) {
    let mut chunks = others.chunks_exact(8);
    for chunk in chunks.by_ref() {
        let block: [CompactCoordinate; 8] = chunk.try_into().unwrap();
        for r in evaluator.evaluate_octo(a, block) {
            dispatch_scaled_weighted(scaling, dist, r.bin as usize, r.weight as f64 * factor, r.distance as f64);
        }
    }

    let remainder = chunks.remainder();
    let mut quad_chunks = remainder.chunks_exact(4);
    for chunk in quad_chunks.by_ref() {
        let block: [CompactCoordinate; 4] = chunk.try_into().unwrap();
        for r in evaluator.evaluate_quad(a, block) {
            dispatch_scaled_weighted(scaling, dist, r.bin as usize, r.weight as f64 * factor, r.distance as f64);
        }
    }

    for &other in quad_chunks.remainder() {
        let r = evaluator.evaluate(a, other);
        dispatch_scaled_weighted(scaling, dist, r.bin as usize, r.weight as f64 * factor, r.distance as f64);
    }
}

fn validate_scaling(scaling: u32) -> Result<()> {
    if scaling == 0 || scaling > MAX_SCALING {
        return Err(Error::ScalingOutOfRange { scaling, max: MAX_SCALING });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(x: f32) -> CompactCoordinate {
        CompactCoordinate::new([x as f64, 0.0, 0.0], 1.0)
    }

    #[test]
    fn self_correlation_counts_diagonal_and_off_diagonal() {
        let mut calc = SimpleCalculator::new(0.1, 50);
        let atoms = vec![coord(0.0), coord(1.0)];
        let h = calc.enqueue_self(atoms, 1).unwrap();
        let results = calc.run();
        let hist = &results[h.index()];
        assert_eq!(hist.counts()[0], 2.0); // diagonal: 1^2 + 1^2
        assert_eq!(hist.counts()[10], 2.0); // off-diagonal, counted both ways
    }

    #[test]
    fn cross_correlation_has_no_diagonal() {
        let mut calc = SimpleCalculator::new(0.1, 50);
        let a = vec![coord(0.0)];
        let b = vec![coord(1.0)];
        let h = calc.enqueue_cross(a, b, 1).unwrap();
        let results = calc.run();
        assert_eq!(results[h.index()].counts()[10], 1.0);
    }

    #[test]
    fn scaling_multiplies_every_contribution() {
        let mut calc = SimpleCalculator::new(0.1, 50);
        let a = vec![coord(0.0)];
        let b = vec![coord(1.0)];
        let h = calc.enqueue_cross(a, b, 5).unwrap();
        let results = calc.run();
        assert_eq!(results[h.index()].counts()[10], 5.0);
    }

    #[test]
    fn out_of_range_scaling_is_rejected() {
        let mut calc = SimpleCalculator::new(0.1, 50);
        assert!(calc.enqueue_self(vec![coord(0.0)], 0).is_err());
        assert!(calc.enqueue_self(vec![coord(0.0)], MAX_SCALING + 1).is_err());
    }

    #[test]
    fn empty_atom_set_yields_empty_histogram() {
        let mut calc = SimpleCalculator::new(0.1, 50);
        let h = calc.enqueue_self(Vec::new(), 1).unwrap();
        let results = calc.run();
        assert!(results[h.index()].counts().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn job_size_batching_does_not_affect_result() {
        let atoms: Vec<CompactCoordinate> = (0..37).map(|i| coord(i as f32 * 0.37)).collect();

        let mut small = SimpleCalculator::new(0.1, 400).with_job_size(3);
        let h_small = small.enqueue_self(atoms.clone(), 1).unwrap();
        let small_result = small.run();

        let mut big = SimpleCalculator::new(0.1, 400).with_job_size(1000);
        let h_big = big.enqueue_self(atoms, 1).unwrap();
        let big_result = big.run();

        assert_eq!(
            small_result[h_small.index()].counts(),
            big_result[h_big.index()].counts()
        );
    }

    #[test]
    fn weighted_counts_match_unweighted_but_also_track_the_mean() {
        let a = vec![coord(0.0)];
        let b = vec![coord(1.0), coord(1.2)];

        let mut plain = SimpleCalculator::new(0.5, 10);
        let h_plain = plain.enqueue_cross(a.clone(), b.clone(), 1).unwrap();
        let plain_result = plain.run();

        let mut weighted = SimpleCalculator::new(0.5, 10).with_weighted(true);
        let h_weighted = weighted.enqueue_cross(a, b, 1).unwrap();
        let weighted_result = weighted.run();

        assert_eq!(
            plain_result[h_plain.index()].counts(),
            weighted_result[h_weighted.index()].counts()
        );
        assert!(weighted_result[h_weighted.index()].is_weighted());
        // both 1.0 and 1.2 bin to 2 at width 0.5; the mean should sit between them
        let mean = weighted_result[h_weighted.index()].mean(2).unwrap();
        assert!((mean - 1.1).abs() < 1e-4);
    }

    #[test]
    fn weighted_self_diagonal_has_distance_zero() {
        let atoms = vec![coord(0.0), coord(1.0)];
        let mut calc = SimpleCalculator::new(0.5, 10).with_weighted(true);
        let h = calc.enqueue_self(atoms, 1).unwrap();
        let results = calc.run();
        let hist = &results[h.index()];
        assert_eq!(hist.counts()[0], 2.0);
        assert_eq!(hist.mean(0), Some(0.0));
    }
}
