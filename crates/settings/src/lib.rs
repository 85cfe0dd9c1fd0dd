//! Engine-wide configuration for the distance-histogram compute engine
//!
//! [EngineConfig] replaces the module-scope globals (bin width, thread count,
//! ...) that the reference implementation keeps as process state. Every
//! histogram manager is constructed from an explicit config so a process can
//! run more than one engine with different settings.

mod variant;

#[doc(inline)]
pub use variant::HistogramVariant;

/// Axis and threading configuration for a histogram computation session
///
/// All lengths are in Angstrom, matching the convention used throughout the
/// data model.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Width of each fixed-width distance bin, in Angstrom
    pub bin_width: f64,
    /// Maximum resolvable distance; sets the number of bins on the distance axis
    pub d_max: f64,
    /// Reciprocal-space axis the Debye transform is evaluated on
    pub q_axis: QAxis,
    /// Which histogram manager implementation to construct
    pub histogram_variant: HistogramVariant,
    /// Track the per-bin mean contributing distance instead of the bin center
    pub weighted_bins: bool,
    /// Allow bins of non-uniform width (implies `weighted_bins`)
    pub variable_bin_width: bool,
    /// Worker count for the pairwise-distance thread pool
    pub threads: usize,
    /// Atoms per thread-pool job in the pairwise kernel
    pub job_size: usize,
    /// Width of a voxel in the grid excluded-volume model, in Angstrom
    pub voxel_width: f64,
    /// Electron density of bulk water, in electrons/Angstrom^3
    pub water_density: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bin_width: 0.1,
            d_max: 500.0,
            q_axis: QAxis::logspace(1e-4, 1.0, 1000),
            histogram_variant: HistogramVariant::PartialMT,
            weighted_bins: false,
            variable_bin_width: false,
            threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            job_size: 200,
            voxel_width: 1.0,
            water_density: 0.334,
        }
    }
}

impl EngineConfig {
    /// Number of bins on the distance axis implied by `d_max` / `bin_width`
    ///
    /// ```rust
    /// # use saxs_settings::EngineConfig;
    /// let settings = EngineConfig { bin_width: 0.1, d_max: 10.0, ..Default::default() };
    /// assert_eq!(settings.bin_count(), 100);
    /// ```
    pub fn bin_count(&self) -> usize {
        (self.d_max / self.bin_width).ceil() as usize
    }
}

/// A fixed reciprocal-space grid the scattering profile is evaluated on
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QAxis {
    /// `q` values in ascending order, in inverse Angstrom
    pub values: Vec<f64>,
}

impl QAxis {
    /// Build a logarithmically-spaced axis of `n` points spanning `[low, high]`
    ///
    /// ```rust
    /// # use saxs_settings::QAxis;
    /// let axis = QAxis::logspace(1e-2, 1.0, 3);
    /// assert_eq!(axis.values.len(), 3);
    /// assert!((axis.values[0] - 1e-2).abs() < 1e-12);
    /// assert!((axis.values[2] - 1.0).abs() < 1e-12);
    /// ```
    pub fn logspace(low: f64, high: f64, n: usize) -> Self {
        assert!(n > 0, "QAxis::logspace: need at least one point");
        let (log_low, log_high) = (low.log10(), high.log10());
        let values = if n == 1 {
            vec![low]
        } else {
            let step = (log_high - log_low) / (n - 1) as f64;
            (0..n).map(|i| 10f64.powf(log_low + step * i as f64)).collect()
        };
        Self { values }
    }

    /// Number of points on the axis
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the axis has no points
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Restrict to the closed sub-range `[q_min, q_max]`, preserving indices
    /// of the returned slice relative to the sub-range (not the original axis)
    pub fn sub_range(&self, q_min: f64, q_max: f64) -> &[f64] {
        let start = self.values.partition_point(|&q| q < q_min);
        let end = self.values.partition_point(|&q| q <= q_max);
        &self.values[start..end]
    }
}
