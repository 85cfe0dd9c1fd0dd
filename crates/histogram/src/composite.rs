use saxs_distribution::{sinc, Distribution1D, SincTable};
use saxs_molecule::FormFactor;

use crate::error::{Error, Result};
use crate::free_parameters::{debye_waller, CacheValidity, FreeParameters};
use crate::form_factor::form_factor;
use crate::profile::ScatteringProfile;

/// The nine atomic form-factor channels, in the fixed order used to build
/// every explicit `(f1, f2)` channel pair
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

/// A single averaged atomic form factor: the mean amplitude of the nine
/// atomic channels
///
/// The `MonolithicMTFFAvg` variant tracks one pooled atom-atom distribution
/// rather than one per `(f1, f2)` type pair, so it needs a single
/// representative atomic scattering amplitude rather than nine.
fn average_atomic_form_factor(q: f64) -> f64 {
    ATOMIC_CHANNELS.iter().map(|&c| form_factor(q, c)).sum::<f64>() / ATOMIC_CHANNELS.len() as f64
}

/// Atom-atom and atom-water channel bookkeeping, either pooled or typed
///
/// `Averaged` mirrors `MonolithicMTFFAvg`: every atom-atom pair falls into a
/// single `aa` channel regardless of the two atoms' form factors, scaled at
/// combination time by [average_atomic_form_factor]. `Explicit` mirrors
/// `MonolithicMTFFExplicit`: atom-atom pairs are bucketed by their unordered
/// `(f1, f2)` type pair, and atom-water pairs by the atom's type, so each
/// channel is scaled by its own pair of form factors.
#[derive(Debug, Clone)]
pub enum FormFactorChannels {
    /// One pooled atom-atom, one pooled atom-water, one water-water channel
    Averaged {
        /// Pooled atom-atom distances
        aa: Distribution1D,
        /// Pooled atom-water distances
        aw: Distribution1D,
        /// Water-water distances
        ww: Distribution1D,
    },
    /// Per-type-pair atom-atom and per-type atom-water channels
    Explicit {
        /// Atom-atom distances, keyed by unordered type pair index
        /// (`i <= j` into [ATOMIC_CHANNELS])
        aa: Vec<Distribution1D>,
        /// Atom-water distances, keyed by atom type index into [ATOMIC_CHANNELS]
        aw: Vec<Distribution1D>,
        /// Water-water distances
        ww: Distribution1D,
    },
}

/// Index into the upper triangle of a 9x9 type-pair matrix, `i <= j`
///
/// ```rust
/// # use saxs_histogram::explicit_pair_index;
/// assert_eq!(explicit_pair_index(0, 0), 0);
/// assert_eq!(explicit_pair_index(0, 1), explicit_pair_index(1, 0));
/// ```
pub fn explicit_pair_index(i: usize, j: usize) -> usize {
    let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
    // triangular number offset for row `lo`, plus the column within it
    (lo * (2 * ATOMIC_CHANNELS.len() - lo + 1)) / 2 + (hi - lo)
}

/// Number of distinct unordered type pairs among the nine atomic channels
pub const EXPLICIT_PAIR_COUNT: usize = ATOMIC_CHANNELS.len() * (ATOMIC_CHANNELS.len() + 1) / 2;

/// The index into the nine atomic channels an atom's form factor belongs to,
/// or `None` for [FormFactor::Water] / [FormFactor::ExcludedVolume]
pub fn atomic_channel_index(form_factor: FormFactor) -> Option<usize> {
    let i = form_factor.index();
    (i < FormFactor::ATOMIC_CHANNEL_COUNT).then_some(i)
}

/// Grid excluded-volume channels, split into interior/surface/cross
/// (atom-voxel and water-voxel channels have no cross term: a voxel itself
/// is never half-interior, half-surface)
#[derive(Debug, Clone)]
pub struct GridExvChannels {
    /// Interior-interior voxel distances
    pub xx_i: Distribution1D,
    /// Interior-surface voxel distances
    pub xx_c: Distribution1D,
    /// Surface-surface voxel distances
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

/// Precomputed `Σ_bin p(bin) * sinc(q * d_bin)` for every q on the axis, for
/// one channel's distribution
///
/// A [weighted](Distribution1D::is_weighted) distribution uses each bin's
/// empirical [representative_distance](Distribution1D::representative_distance)
/// instead of the sinc table's fixed bin-center row, since that per-bin mean
/// is exactly what `weighted_bins`/`variable_bin_width` exist to capture;
/// `sinc` is recomputed per `(q, bin)` pair on that path rather than looked
/// up, as the table is keyed on bin centers only.
fn channel_sums(dist: &Distribution1D, sinc_table: &SincTable, q_axis: &[f64]) -> Vec<f64> {
    let n_d = dist.len().min(sinc_table.n_d());
    if dist.is_weighted() {
        return q_axis
            .iter()
            .map(|&q| {
                (0..n_d)
                    .map(|d| {
                        let c = dist.counts()[d];
                        if c == 0.0 {
                            0.0
                        } else {
                            c * sinc(q * dist.representative_distance(d))
                        }
                    })
                    .sum()
            })
            .collect();
    }

    (0..sinc_table.n_q())
        .map(|q_idx| {
            let row = sinc_table.row(q_idx);
            (0..n_d).map(|d| dist.counts()[d] * row[d]).sum()
        })
        .collect()
}

fn zero_sums(n_q: usize) -> Vec<f64> {
    vec![0.0; n_q]
}

/// The full composite pair-distance histogram for a scattering computation:
/// per-form-factor-channel distributions plus the free parameters that
/// recombine them into a scattering profile
///
/// Construct once per computed geometry (a fresh instance per
/// [`calculate`](crate) call from a histogram manager), then tune the five
/// [FreeParameters] against experimental data via the `apply_*` setters and
/// re-read [CompositeDistanceHistogram::intensity] as needed; recombination
/// from cached channel sums is cheap; only channel recomputation (a fresh
/// [FormFactorChannels]) requires rebuilding the sinc table.
pub struct CompositeDistanceHistogram {
    channels: FormFactorChannels,
    exv: Option<GridExvChannels>,
    q_axis: Vec<f64>,
    sinc: SincTable,
    params: FreeParameters,
    cache: CacheValidity,
    cached: Option<ScatteringProfile>,
}

impl CompositeDistanceHistogram {
    /// Build a composite histogram from computed channels and a q-axis
    ///
    /// The sinc table spans the widest channel distribution present; shorter
    /// channels are treated as zero beyond their own length.
    pub fn new(channels: FormFactorChannels, exv: Option<GridExvChannels>, q_axis: Vec<f64>, bin_width: f64) -> Self {
        let max_bins = max_bin_count(&channels, &exv);
        let d_values: Vec<f64> = (0..max_bins).map(|i| (i as f64 + 0.5) * bin_width).collect();
        let sinc = SincTable::new(&q_axis, &d_values);
        Self {
            channels,
            exv,
            q_axis,
            sinc,
            params: FreeParameters::default(),
            cache: CacheValidity::invalid(),
            cached: None,
        }
    }

    /// The q-axis this histogram was built against
    pub fn q_axis(&self) -> &[f64] {
        &self.q_axis
    }

    /// Current free-parameter values
    pub fn parameters(&self) -> FreeParameters {
        self.params
    }

    /// Set the hydration contrast scale `c_w`
    pub fn apply_c_w(&mut self, value: f64) {
        self.params.c_w = value;
        self.cache.invalidate_c_w();
    }

    /// Set the excluded-volume contrast scale `c_x`
    pub fn apply_c_x(&mut self, value: f64) {
        self.params.c_x = value;
        self.cache.invalidate_c_x();
    }

    /// Set the grid excluded-volume surface scale `c_s`
    pub fn apply_c_s(&mut self, value: f64) {
        self.params.c_s = value;
        self.cache.invalidate_c_s();
    }

    /// Set the atomic Debye-Waller exponent `B_a`
    pub fn apply_b_a(&mut self, value: f64) {
        self.params.b_a = value;
        self.cache.invalidate_b_a();
    }

    /// Set the excluded-volume Debye-Waller exponent `B_x`
    pub fn apply_b_x(&mut self, value: f64) {
        self.params.b_x = value;
        self.cache.invalidate_b_x();
    }

    /// Replace the underlying channel distributions, invalidating every cache
    ///
    /// Called by a histogram manager after recomputing or patching the
    /// pair-distance channels; rebuilds the sinc table if the widest channel
    /// grew.
    pub fn replace_channels(&mut self, channels: FormFactorChannels, exv: Option<GridExvChannels>, bin_width: f64) {
        let max_bins = max_bin_count(&channels, &exv).max(self.sinc.n_d());
        if max_bins != self.sinc.n_d() {
            let d_values: Vec<f64> = (0..max_bins).map(|i| (i as f64 + 0.5) * bin_width).collect();
            self.sinc = SincTable::new(&self.q_axis, &d_values);
        }
        self.channels = channels;
        self.exv = exv;
        self.cache.invalidate_all();
        self.cached = None;
    }

    /// The underlying form-factor channels
    pub fn channels(&self) -> &FormFactorChannels {
        &self.channels
    }

    /// The grid excluded-volume channels, if this histogram tracks them
    pub fn exv(&self) -> Option<&GridExvChannels> {
        self.exv.as_ref()
    }

    /// Evaluate the Debye transform at every q-axis point
    ///
    /// `I(q) = Σ_f1,f2 ff_f1(q)·ff_f2(q)·DW(q) · Σ_i p_f1,f2(d_i)·sinc(q·d_i)`,
    /// decomposed into atom, hydration and excluded-volume channels with
    /// their own Debye-Waller attenuation and cross terms using the
    /// geometric mean of the two channels' factors.
    ///
    /// ```rust
    /// # use saxs_distribution::Distribution1D;
    /// # use saxs_histogram::{CompositeDistanceHistogram, FormFactorChannels};
    /// let mut aa = Distribution1D::new(0.1, 10);
    /// aa.add(0, 4.0); // two identical atoms, weight 2 each: diagonal-only
    /// let channels = FormFactorChannels::Averaged {
    ///     aa,
    ///     aw: Distribution1D::new(0.1, 10),
    ///     ww: Distribution1D::new(0.1, 10),
    /// };
    /// let mut hist = CompositeDistanceHistogram::new(channels, None, vec![0.0], 0.1);
    /// let profile = hist.intensity();
    /// assert!(profile.intensity()[0] > 0.0);
    /// ```
    pub fn intensity(&mut self) -> ScatteringProfile {
        if self.cache.is_fully_valid() {
            if let Some(cached) = &self.cached {
                return cached.clone();
            }
        }

        let n_q = self.q_axis.len();
        let (aa, aw, ww) = self.pooled_channel_sums();
        let (xx_i, xx_c, xx_s, ax_i, ax_s, wx_i, wx_s) = self.exv_channel_sums(n_q);

        let mut intensity = vec![0.0; n_q];
        for q_idx in 0..n_q {
            let q = self.q_axis[q_idx];
            let ff_w = form_factor(q, FormFactor::Water);
            let ff_x = form_factor(q, FormFactor::ExcludedVolume);

            let dw_a = debye_waller(self.params.b_a, q);
            let dw_x = debye_waller(self.params.b_x, q);
            let dw_aa = dw_a * dw_a;
            let dw_ax = dw_a * dw_x;
            let dw_xx = dw_x * dw_x;

            let atomic = self.atomic_contribution(q_idx, q, dw_aa, &aa);
            let aw_term = 2.0 * self.params.c_w * dw_aa * aw_form_factor(&self.channels, q, q_idx) * aw[q_idx];
            let ww_term = self.params.c_w * self.params.c_w * dw_aa * ff_w * ff_w * ww[q_idx];

            let xx_sum = xx_i[q_idx] + self.params.c_s * xx_c[q_idx] + self.params.c_s * self.params.c_s * xx_s[q_idx];
            let ax_sum = ax_i[q_idx] + self.params.c_s * ax_s[q_idx];
            let wx_sum = wx_i[q_idx] + self.params.c_s * wx_s[q_idx];

            let xx_term = self.params.c_x * self.params.c_x * dw_xx * ff_x * ff_x * xx_sum;
            let ax_term = -2.0 * self.params.c_x * dw_ax * ff_x * ax_sum * average_atomic_form_factor(q);
            let wx_term = -2.0 * self.params.c_x * self.params.c_w * dw_ax * ff_x * ff_w * wx_sum;

            intensity[q_idx] = atomic + aw_term + ww_term + xx_term + ax_term + wx_term;
        }

        let profile = ScatteringProfile::new(self.q_axis.clone(), intensity);
        self.cache.validate_all();
        self.cached = Some(profile.clone());
        profile
    }

    fn atomic_contribution(&self, q_idx: usize, q: f64, dw_aa: f64, aa: &[f64]) -> f64 {
        match &self.channels {
            FormFactorChannels::Averaged { .. } => {
                let ff = average_atomic_form_factor(q);
                dw_aa * ff * ff * aa[q_idx]
            }
            FormFactorChannels::Explicit { .. } => dw_aa * aa[q_idx],
        }
    }

    /// Channel sums for `aa`, `aw`, `ww`; for [FormFactorChannels::Explicit]
    /// the per-type-pair form factors are folded in here so the caller always
    /// sees one `Σ p·sinc` series per pooled channel
    fn pooled_channel_sums(&self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let n_q = self.q_axis.len();
        match &self.channels {
            FormFactorChannels::Averaged { aa, aw, ww } => (
                channel_sums(aa, &self.sinc, &self.q_axis),
                channel_sums(aw, &self.sinc, &self.q_axis),
                channel_sums(ww, &self.sinc, &self.q_axis),
            ),
            FormFactorChannels::Explicit { aa, aw, ww } => {
                use itertools::Itertools;

                let mut aa_sum = zero_sums(n_q);
                for pair in (0..ATOMIC_CHANNELS.len()).combinations_with_replacement(2) {
                    let (i, j) = (pair[0], pair[1]);
                    let idx = explicit_pair_index(i, j);
                    if idx >= aa.len() {
                        continue;
                    }
                    let sums = channel_sums(&aa[idx], &self.sinc, &self.q_axis);
                    let multiplicity = if i == j { 1.0 } else { 2.0 };
                    for (q_idx, &q) in self.q_axis.iter().enumerate() {
                        let ff = form_factor(q, ATOMIC_CHANNELS[i]) * form_factor(q, ATOMIC_CHANNELS[j]);
                        aa_sum[q_idx] += multiplicity * ff * sums[q_idx];
                    }
                }

                let mut aw_sum = zero_sums(n_q);
                let ff_w: Vec<f64> = self.q_axis.iter().map(|&q| form_factor(q, FormFactor::Water)).collect();
                for (i, channel) in ATOMIC_CHANNELS.iter().enumerate() {
                    if i >= aw.len() {
                        continue;
                    }
                    let sums = channel_sums(&aw[i], &self.sinc, &self.q_axis);
                    for (q_idx, &q) in self.q_axis.iter().enumerate() {
                        aw_sum[q_idx] += form_factor(q, *channel) * ff_w[q_idx] * sums[q_idx];
                    }
                }

                (aa_sum, aw_sum, channel_sums(ww, &self.sinc, &self.q_axis))
            }
        }
    }

    #[allow(clippy::type_complexity)]
    fn exv_channel_sums(
        &self,
        n_q: usize,
    ) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        match &self.exv {
            Some(exv) => (
                channel_sums(&exv.xx_i, &self.sinc, &self.q_axis),
                channel_sums(&exv.xx_c, &self.sinc, &self.q_axis),
                channel_sums(&exv.xx_s, &self.sinc, &self.q_axis),
                channel_sums(&exv.ax_i, &self.sinc, &self.q_axis),
                channel_sums(&exv.ax_s, &self.sinc, &self.q_axis),
                channel_sums(&exv.wx_i, &self.sinc, &self.q_axis),
                channel_sums(&exv.wx_s, &self.sinc, &self.q_axis),
            ),
            None => (
                zero_sums(n_q),
                zero_sums(n_q),
                zero_sums(n_q),
                zero_sums(n_q),
                zero_sums(n_q),
                zero_sums(n_q),
                zero_sums(n_q),
            ),
        }
    }

    /// `I(q_axis[index])` without recomputing or caching the whole profile
    pub fn intensity_at(&mut self, index: usize) -> Result<f64> {
        if index >= self.q_axis.len() {
            return Err(Error::OutOfRange { index, len: self.q_axis.len() });
        }
        Ok(self.intensity().intensity()[index])
    }
}

/// `ff_aw(q)` for the [FormFactorChannels::Averaged] case; the explicit case
/// already folds per-type form factors into its pooled `aw` series, so this
/// only applies when the channel itself is still pooled
fn aw_form_factor(channels: &FormFactorChannels, q: f64, _q_idx: usize) -> f64 {
    match channels {
        FormFactorChannels::Averaged { .. } => average_atomic_form_factor(q) * form_factor(q, FormFactor::Water),
        FormFactorChannels::Explicit { .. } => 1.0,
    }
}

fn max_bin_count(channels: &FormFactorChannels, exv: &Option<GridExvChannels>) -> usize {
    let mut max = match channels {
        FormFactorChannels::Averaged { aa, aw, ww } => [aa.len(), aw.len(), ww.len()].into_iter().max().unwrap_or(0),
        FormFactorChannels::Explicit { aa, aw, ww } => aa
            .iter()
            .chain(aw.iter())
            .map(Distribution1D::len)
            .chain(std::iter::once(ww.len()))
            .max()
            .unwrap_or(0),
    };
    if let Some(exv) = exv {
        max = max.max(exv.xx_i.len()).max(exv.xx_c.len()).max(exv.xx_s.len());
        max = max.max(exv.ax_i.len()).max(exv.ax_s.len()).max(exv.wx_i.len()).max(exv.wx_s.len());
    }
    max.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pooled(aa_weight: f64) -> FormFactorChannels {
        let mut aa = Distribution1D::new(0.1, 10);
        aa.add(0, aa_weight);
        FormFactorChannels::Averaged {
            aa,
            aw: Distribution1D::new(0.1, 10),
            ww: Distribution1D::new(0.1, 10),
        }
    }

    #[test]
    fn q_zero_sums_to_squared_total_weight_for_a_single_bin() {
        // at q=0, sinc(0)=1, B=0 makes the Debye-Waller factor 1, and the
        // hydration/exv channels are all-zero here, leaving only the atomic
        // term: I(0) == ff(0)^2 * aa[0]
        let mut hist = CompositeDistanceHistogram::new(pooled(4.0), None, vec![0.0], 0.1);
        let profile = hist.intensity();
        let ff = average_atomic_form_factor(0.0);
        assert!((profile.intensity()[0] - ff * ff * 4.0).abs() < 1e-9);
    }

    #[test]
    fn debye_waller_identity_at_b_zero_matches_undamped() {
        let mut hist = CompositeDistanceHistogram::new(pooled(4.0), None, vec![0.1, 0.5], 0.1);
        let undamped = hist.intensity();
        hist.apply_b_a(0.0);
        hist.apply_b_x(0.0);
        let still = hist.intensity();
        assert_eq!(undamped.intensity(), still.intensity());
    }

    #[test]
    fn changing_c_w_invalidates_only_the_cached_profile_not_the_channel_sums() {
        let mut hist = CompositeDistanceHistogram::new(pooled(4.0), None, vec![0.1], 0.1);
        let first = hist.intensity();
        hist.apply_c_w(2.0);
        let second = hist.intensity();
        assert_ne!(first.intensity()[0], second.intensity()[0]);
    }

    #[test]
    fn explicit_pair_index_is_symmetric_and_dense() {
        let mut seen = std::collections::HashSet::new();
        for i in 0..ATOMIC_CHANNELS.len() {
            for j in i..ATOMIC_CHANNELS.len() {
                seen.insert(explicit_pair_index(i, j));
            }
        }
        assert_eq!(seen.len(), EXPLICIT_PAIR_COUNT);
    }
}
