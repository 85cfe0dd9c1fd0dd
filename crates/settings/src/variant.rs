/// Selects the concrete histogram manager constructed for a computation
///
/// This is a tagged-variant selection rather than a trait object: the public
/// surface each variant exposes is identical (`calculate`, `calculate_all`,
/// `get_probe`, `signal_modified_hydration_layer`), so callers never need to
/// match on the variant themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum HistogramVariant {
    /// Recompute every pair on every call, single-threaded
    Monolithic,
    /// Recompute every pair on every call, thread-pooled
    MonolithicMT,
    /// Monolithic + per-form-factor channels, averaged form factors
    MonolithicMTFFAvg,
    /// Monolithic + per-form-factor channels, explicit per-atom form factors
    MonolithicMTFFExplicit,
    /// Monolithic + grid-based excluded volume
    MonolithicMTFFGrid,
    /// Monolithic + grid-based excluded volume with surface/interior split
    MonolithicMTFFGridSurface,
    /// Incremental rebuild, single-threaded
    Partial,
    /// Incremental rebuild, thread-pooled
    PartialMT,
    /// Thread-pooled, symmetry-expanded, monolithic rebuild
    SymmetryMT,
    /// Thread-pooled, symmetry-expanded, incremental rebuild
    PartialSymmetryMT,
}

impl HistogramVariant {
    /// Whether this variant maintains partial distributions and rebuilds incrementally
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            Self::Partial | Self::PartialMT | Self::PartialSymmetryMT
        )
    }

    /// Whether this variant expands bodies through the symmetry manager
    pub fn is_symmetry_aware(&self) -> bool {
        matches!(self, Self::SymmetryMT | Self::PartialSymmetryMT)
    }

    /// Whether this variant retains per-form-factor channels
    pub fn has_form_factors(&self) -> bool {
        matches!(
            self,
            Self::MonolithicMTFFAvg
                | Self::MonolithicMTFFExplicit
                | Self::MonolithicMTFFGrid
                | Self::MonolithicMTFFGridSurface
        )
    }

    /// Whether this variant uses the grid excluded-volume model
    pub fn uses_grid_exv(&self) -> bool {
        matches!(
            self,
            Self::MonolithicMTFFGrid | Self::MonolithicMTFFGridSurface
        )
    }
}
