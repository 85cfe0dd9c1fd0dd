use std::ops::{AddAssign, SubAssign};

/// An ordered sequence of nonnegative distance-bin counts
///
/// Bin `i` covers `[i * bin_width, (i+1) * bin_width)` under the fixed-width
/// convention. When constructed with [Distribution1D::weighted], each bin
/// additionally tracks the running mean of the distances that actually landed
/// in it, so downstream sinc lookups can use that empirical mean instead of
/// the bin center.
///
/// The mean is only ever defined where the bin count is positive; an empty
/// bin reports `None` from [Distribution1D::mean].
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution1D {
    bin_width: f64,
    counts: Vec<f64>,
    means: Option<Vec<f64>>,
}

impl Distribution1D {
    /// Construct an all-zero fixed-bin distribution of `n` bins
    pub fn new(bin_width: f64, n: usize) -> Self {
        Self {
            bin_width,
            counts: vec![0.0; n],
            means: None,
        }
    }

    /// Construct an all-zero distribution that also tracks per-bin means
    pub fn weighted(bin_width: f64, n: usize) -> Self {
        Self {
            bin_width,
            counts: vec![0.0; n],
            means: Some(vec![0.0; n]),
        }
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the distribution has zero bins
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Bin width, Angstrom
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Whether this distribution tracks per-bin means
    pub fn is_weighted(&self) -> bool {
        self.means.is_some()
    }

    /// Raw bin counts
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// The bin center, `i * bin_width + bin_width / 2`
    pub fn bin_center(&self, i: usize) -> f64 {
        (i as f64 + 0.5) * self.bin_width
    }

    /// Empirical mean distance for bin `i`, or `None` if the bin is empty or
    /// this distribution does not track means
    pub fn mean(&self, i: usize) -> Option<f64> {
        match &self.means {
            Some(means) if self.counts[i] > 0.0 => Some(means[i]),
            _ => None,
        }
    }

    /// The distance used by the Debye transform for bin `i`: the empirical
    /// mean if tracked and the bin has contributions, otherwise the bin center
    pub fn representative_distance(&self, i: usize) -> f64 {
        self.mean(i).unwrap_or_else(|| self.bin_center(i))
    }

    /// Accumulate `weight` into bin `i`
    ///
    /// # Panics
    /// Panics if `i` is out of range; the distance-bin evaluator already
    /// saturates indices to the axis length, so an out-of-range bin here
    /// indicates an internal invariant was broken upstream.
    pub fn add(&mut self, i: usize, weight: f64) {
        self.counts[i] += weight;
    }

    /// Accumulate `weight` into bin `i` and fold `distance` into the running
    /// mean for that bin using a Welford-style weighted update
    ///
    /// Requires [Distribution1D::is_weighted]; no-op on the mean otherwise.
    ///
    /// ```rust
    /// # use saxs_distribution::Distribution1D;
    /// let mut d = Distribution1D::weighted(0.1, 10);
    /// d.add_weighted(5, 1.0, 0.51);
    /// d.add_weighted(5, 1.0, 0.49);
    /// assert!((d.mean(5).unwrap() - 0.50).abs() < 1e-12);
    /// ```
    pub fn add_weighted(&mut self, i: usize, weight: f64, distance: f64) {
        let previous_total = self.counts[i];
        self.counts[i] += weight;
        if let Some(means) = &mut self.means {
            let new_total = previous_total + weight;
            if new_total > 0.0 {
                means[i] += (distance - means[i]) * (weight / new_total);
            }
        }
    }

    /// Resize to `n` bins, zero-padding or truncating as needed
    pub fn resize(&mut self, n: usize) {
        self.counts.resize(n, 0.0);
        if let Some(means) = &mut self.means {
            means.resize(n, 0.0);
        }
    }

    /// Shrink to the index past the last nonzero bin, never below `min_size`
    ///
    /// Bounds the cost of everything downstream (notably the Debye
    /// transform) to the structure's actual diameter.
    pub fn truncate_trailing_zeros(&mut self, min_size: usize) {
        let last_nonzero = self.counts.iter().rposition(|&c| c != 0.0);
        let target = last_nonzero.map(|i| i + 1).unwrap_or(0).max(min_size);
        self.resize(target.min(self.counts.len().max(target)));
    }
}

impl AddAssign<&Distribution1D> for Distribution1D {
    /// Merge another distribution's counts (and means, if both track them)
    ///
    /// The shorter operand is treated as zero-padded; this mirrors the
    /// engine's own behaviour of growing the master distribution as partials
    /// covering a larger diameter are folded in.
    fn add_assign(&mut self, other: &Distribution1D) {
        if other.counts.len() > self.counts.len() {
            self.resize(other.counts.len());
        }
        for (i, &c) in other.counts.iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            match (&mut self.means, &other.means) {
                (Some(_), Some(other_means)) => self.add_weighted(i, c, other_means[i]),
                _ => self.add(i, c),
            }
        }
    }
}

impl SubAssign<&Distribution1D> for Distribution1D {
    /// Remove another distribution's counts
    ///
    /// Used by the partial histogram manager's master-patch sequence
    /// (`M -= P_old; P = P_new; M += P`). Means are not reconstructed on
    /// subtraction; only the count channel is exact after a `-=`.
    fn sub_assign(&mut self, other: &Distribution1D) {
        if other.counts.len() > self.counts.len() {
            self.resize(other.counts.len());
        }
        for (i, &c) in other.counts.iter().enumerate() {
            self.counts[i] -= c;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assign_grows_and_sums() {
        let mut a = Distribution1D::new(0.1, 4);
        let mut b = Distribution1D::new(0.1, 6);
        a.add(0, 1.0);
        b.add(5, 2.0);
        a += &b;
        assert_eq!(a.len(), 6);
        assert_eq!(a.counts()[0], 1.0);
        assert_eq!(a.counts()[5], 2.0);
    }

    #[test]
    fn patch_round_trip_restores_master() {
        let mut master = Distribution1D::new(0.1, 4);
        master.add(1, 5.0);

        let mut old_partial = Distribution1D::new(0.1, 4);
        old_partial.add(1, 2.0);
        let mut new_partial = Distribution1D::new(0.1, 4);
        new_partial.add(1, 9.0);

        master -= &old_partial;
        master += &new_partial;
        assert_eq!(master.counts()[1], 12.0);
    }

    #[test]
    fn truncate_keeps_minimum_size() {
        let mut d = Distribution1D::new(0.1, 100);
        d.add(3, 1.0);
        d.truncate_trailing_zeros(10);
        assert_eq!(d.len(), 10);

        let mut d = Distribution1D::new(0.1, 100);
        d.add(40, 1.0);
        d.truncate_trailing_zeros(10);
        assert_eq!(d.len(), 41);
    }

    #[test]
    fn empty_bin_has_no_mean() {
        let d = Distribution1D::weighted(0.1, 5);
        assert_eq!(d.mean(2), None);
    }
}
