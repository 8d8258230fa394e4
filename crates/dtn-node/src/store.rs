//! The two-phase per-node message buffer.

use std::collections::{HashMap, HashSet};

use dtn_core::{MessageId, NodeId};

/// Per-node message buffers.
///
/// | Buffer          | Meaning                                                  |
/// |-----------------|----------------------------------------------------------|
/// | `in_hand`       | copies carried now; the only buffer forwarding reads     |
/// | `pending_merge` | copies received this tick, folded in by [`merge`]        |
/// | `delivered`     | messages this node has already handed to their destination |
///
/// Duplicate detection compares a reception against `in_hand` only.  Two
/// receptions of the same message inside one tick therefore do not count as
/// duplicates of each other; only a copy arriving after an earlier one was
/// merged does.
///
/// [`merge`]: MessageStore::merge
#[derive(Debug, Default, Clone)]
pub struct MessageStore {
    in_hand:       HashMap<MessageId, u32>,
    pending_merge: HashMap<MessageId, u32>,
    delivered:     HashSet<MessageId>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one received copy of `msg`.
    ///
    /// Returns `true` if the node already carried a merged copy; the caller
    /// counts that as a duplicate.
    pub fn receive(&mut self, msg: MessageId) -> bool {
        *self.pending_merge.entry(msg).or_insert(0) += 1;
        self.in_hand(msg) > 0
    }

    /// Fold every pending copy into `in_hand` and empty the pending buffer.
    pub fn merge(&mut self) {
        for (msg, count) in self.pending_merge.drain() {
            *self.in_hand.entry(msg).or_insert(0) += count;
        }
    }

    /// Place a newly created message straight into `in_hand`.
    pub fn originate(&mut self, msg: MessageId) {
        *self.in_hand.entry(msg).or_insert(0) += 1;
    }

    /// Give up one carried copy of `msg` and remember that it was delivered.
    ///
    /// Returns `false` (and changes nothing) if no copy is carried.
    pub fn hand_off(&mut self, msg: MessageId) -> bool {
        let Some(count) = self.in_hand.get_mut(&msg) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.in_hand.remove(&msg);
        }
        self.delivered.insert(msg);
        true
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Every message with at least one carried copy, ascending.
    pub fn messages(&self) -> Vec<MessageId> {
        let mut out: Vec<MessageId> = self
            .in_hand
            .iter()
            .filter(|&(_, &n)| n > 0)
            .map(|(&m, _)| m)
            .collect();
        out.sort_unstable();
        out
    }

    /// Carried messages still waiting to reach a destination other than
    /// `owner` and not yet handed off by this node.
    pub fn pending_messages(&self, owner: NodeId) -> Vec<MessageId> {
        self.messages()
            .into_iter()
            .filter(|m| !m.is_for(owner) && !self.delivered.contains(m))
            .collect()
    }

    /// Carried messages addressed to `owner` itself.
    pub fn accepted_messages(&self, owner: NodeId) -> Vec<MessageId> {
        self.messages().into_iter().filter(|m| m.is_for(owner)).collect()
    }

    /// Carried copies of `msg`.
    #[inline]
    pub fn in_hand(&self, msg: MessageId) -> u32 {
        self.in_hand.get(&msg).copied().unwrap_or(0)
    }

    /// Copies of `msg` received this tick and not yet merged.
    #[inline]
    pub fn pending_merge(&self, msg: MessageId) -> u32 {
        self.pending_merge.get(&msg).copied().unwrap_or(0)
    }

    /// Number of distinct messages waiting in the pending-merge buffer.
    pub fn pending_merge_len(&self) -> usize {
        self.pending_merge.len()
    }

    #[inline]
    pub fn is_delivered(&self, msg: MessageId) -> bool {
        self.delivered.contains(&msg)
    }

    pub fn delivered_count(&self) -> usize {
        self.delivered.len()
    }

    /// Total carried copies across all messages.
    pub fn carried_copies(&self) -> u64 {
        self.in_hand.values().map(|&n| n as u64).sum()
    }
}
