use std::sync::{Arc, Mutex};

use crate::flags::ChangeFlags;

/// Shared, lock-protected change flags for a single body
///
/// A body construct that lives outside the state manager (for example while
/// being edited by a caller before it has been registered with a molecule)
/// can hold a [Signaller] and mark changes on itself without a back-reference
/// into [StateManager](crate::StateManager). Once the body is registered, the
/// manager takes the same [Signaller] so both sides observe the same flags.
#[derive(Debug, Clone, Default)]
pub struct Signaller {
    flags: Arc<Mutex<ChangeFlags>>,
}

impl Signaller {
    /// A fresh signaller with no pending changes
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an internal change
    pub fn mark_internal_change(&self) {
        self.flags.lock().unwrap().mark_internal();
    }

    /// Record an external change
    pub fn mark_external_change(&self) {
        self.flags.lock().unwrap().mark_external();
    }

    /// Snapshot the current flags
    pub fn flags(&self) -> ChangeFlags {
        *self.flags.lock().unwrap()
    }

    /// Clear the flags, as after a rebuild consumes them
    pub fn clear(&self) {
        self.flags.lock().unwrap().clear();
    }
}

/// A [Signaller] paired with the body index it reports for
///
/// This is what [StateManager](crate::StateManager) actually stores; the
/// index lets the manager route a signal back to the right slot in its own
/// bookkeeping without the signaller itself needing to know its position.
#[derive(Debug, Clone)]
pub struct BoundSignaller {
    pub(crate) index: usize,
    pub(crate) signaller: Signaller,
}

impl BoundSignaller {
    pub(crate) fn new(index: usize, signaller: Signaller) -> Self {
        Self { index, signaller }
    }

    /// The body index this signaller reports for
    pub fn index(&self) -> usize {
        self.index
    }

    /// The underlying signaller handle
    pub fn signaller(&self) -> &Signaller {
        &self.signaller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_the_same_flags() {
        let a = Signaller::new();
        let b = a.clone();
        a.mark_internal_change();
        assert!(b.flags().is_internally_modified());
    }
}
