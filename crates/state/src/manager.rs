use crate::flags::ChangeFlags;
use crate::signaller::{BoundSignaller, Signaller};

/// Tracks which bodies changed and whether the hydration layer changed, since
/// the last histogram rebuild
///
/// A [StateManager] owns one [Signaller] per body plus a single hydration
/// flag shared by the whole molecule, since hydration is regenerated as one
/// global layer rather than per body. The partial histogram manager consults
/// this after every parameter update to decide which self- and
/// cross-distance blocks need recomputing, then calls [StateManager::reset]
/// once it has folded the changes into the master distribution.
#[derive(Debug, Default)]
pub struct StateManager {
    bodies: Vec<Signaller>,
    hydration_modified: bool,
}

impl StateManager {
    /// A state manager with `n` bodies, all initially unmodified
    pub fn new(n_bodies: usize) -> Self {
        Self {
            bodies: (0..n_bodies).map(|_| Signaller::new()).collect(),
            hydration_modified: false,
        }
    }

    /// Number of bodies tracked
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether no bodies are tracked
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Register a new body, returning a bound signaller the body can be
    /// given to report its own future changes
    ///
    /// ```rust
    /// # use saxs_state::StateManager;
    /// let mut state = StateManager::new(0);
    /// let handle = state.register_body();
    /// handle.signaller().mark_external_change();
    /// assert!(state.flags(handle.index()).is_externally_modified());
    /// ```
    pub fn register_body(&mut self) -> BoundSignaller {
        let index = self.bodies.len();
        let signaller = Signaller::new();
        self.bodies.push(signaller.clone());
        BoundSignaller::new(index, signaller)
    }

    /// Current change flags for body `index`
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn flags(&self, index: usize) -> ChangeFlags {
        self.bodies[index].flags()
    }

    /// Directly mark body `index` as internally modified
    pub fn mark_internal(&self, index: usize) {
        self.bodies[index].mark_internal_change();
    }

    /// Directly mark body `index` as externally modified
    pub fn mark_external(&self, index: usize) {
        self.bodies[index].mark_external_change();
    }

    /// Mark the global hydration layer as regenerated
    pub fn mark_hydration_modified(&mut self) {
        self.hydration_modified = true;
    }

    /// Whether the hydration layer changed since the last reset
    pub fn is_hydration_modified(&self) -> bool {
        self.hydration_modified
    }

    /// Indices of every body with a pending change, in ascending order
    pub fn modified_bodies(&self) -> Vec<usize> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, s)| s.flags().is_modified())
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether anything at all — any body or the hydration layer — changed
    pub fn is_dirty(&self) -> bool {
        self.hydration_modified || self.bodies.iter().any(|s| s.flags().is_modified())
    }

    /// Clear all flags, as after a rebuild has consumed them
    pub fn reset(&mut self) {
        for s in &self.bodies {
            s.clear();
        }
        self.hydration_modified = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_manager_is_clean() {
        let state = StateManager::new(3);
        assert!(!state.is_dirty());
        assert!(state.modified_bodies().is_empty());
    }

    #[test]
    fn mark_and_reset_round_trip() {
        let mut state = StateManager::new(3);
        state.mark_internal(1);
        state.mark_hydration_modified();
        assert_eq!(state.modified_bodies(), vec![1]);
        assert!(state.is_dirty());

        state.reset();
        assert!(!state.is_dirty());
    }

    #[test]
    fn external_change_is_also_reported_as_internal() {
        let state = StateManager::new(1);
        state.mark_external(0);
        assert!(state.flags(0).is_internally_modified());
    }
}
