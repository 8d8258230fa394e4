//! Encounter detection by diffing neighbor sets across ticks.

use dtn_core::NodeId;

/// Remembers last tick's neighbors so the next query can report only the
/// nodes that came into range since.
#[derive(Debug, Default, Clone)]
pub struct ContactTracker {
    /// Sorted, deduplicated neighbor ids from the previous query.
    last: Vec<NodeId>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the remembered set with `current` and return the members of
    /// `current` that were not in the previous set.
    ///
    /// The first call after construction returns all of `current`.
    pub fn update(&mut self, mut current: Vec<NodeId>) -> Vec<NodeId> {
        current.sort_unstable();
        current.dedup();
        let fresh = current
            .iter()
            .copied()
            .filter(|id| self.last.binary_search(id).is_err())
            .collect();
        self.last = current;
        fresh
    }

    /// Neighbor set recorded by the previous `update`.
    pub fn last_neighbors(&self) -> &[NodeId] {
        &self.last
    }
}
