//! A single mobile node and its routing state.

use dtn_core::{MessageId, NodeId, Position};
use dtn_mobility::Mobility;

use crate::{ContactTracker, MessageStore};

/// Monotonic per-node traffic counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NodeCounters {
    /// Successful hand-offs made by this node.
    pub tx:  u64,
    /// Copies received by this node.
    pub rx:  u64,
    /// Receptions of a message this node already carried (post-merge).
    pub dup: u64,
}

/// A mobile node running the carry-only policy.
///
/// Owns its mobility model, message buffers, contact memory and counters.
/// Cross-node operations (proximity, forwarding) live on
/// [`Population`](crate::Population), which can borrow two nodes at once.
pub struct CarryNode {
    id:       NodeId,
    range:    f64,
    mobility: Box<dyn Mobility>,
    pub(crate) store:    MessageStore,
    pub(crate) contacts: ContactTracker,
    pub(crate) counters: NodeCounters,
}

impl CarryNode {
    /// Assemble a node from already-validated parts.  Use
    /// [`NodeBuilder`](crate::NodeBuilder) for checked construction.
    pub(crate) fn new(id: NodeId, range: f64, mobility: Box<dyn Mobility>) -> Self {
        Self {
            id,
            range,
            mobility,
            store:    MessageStore::new(),
            contacts: ContactTracker::new(),
            counters: NodeCounters::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Communication range (half side of the axis-aligned contact box).
    #[inline]
    pub fn range(&self) -> f64 {
        self.range
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.mobility.current_position()
    }

    /// Advance the mobility model by `delta_secs`.
    pub(crate) fn move_by(&mut self, delta_secs: f64) {
        self.mobility.move_by(delta_secs);
    }

    #[inline]
    pub fn counters(&self) -> NodeCounters {
        self.counters
    }

    #[inline]
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Neighbor set seen on the previous encounter query.
    pub fn last_neighbors(&self) -> &[NodeId] {
        self.contacts.last_neighbors()
    }

    // ── Message operations ────────────────────────────────────────────────

    /// Accept one copy of `msg` from another node.
    ///
    /// The copy lands in the pending-merge buffer; it is not forwardable until
    /// the driver calls [`merge`](Self::merge).
    pub fn receive(&mut self, msg: MessageId) {
        self.counters.rx += 1;
        if self.store.receive(msg) {
            self.counters.dup += 1;
        }
    }

    /// Make this tick's received copies visible to forwarding.
    pub fn merge(&mut self) {
        self.store.merge();
    }

    /// Create `msg` at this node (normally its source).
    pub fn originate(&mut self, msg: MessageId) {
        self.store.originate(msg);
    }

    pub fn messages(&self) -> Vec<MessageId> {
        self.store.messages()
    }

    pub fn pending_messages(&self) -> Vec<MessageId> {
        self.store.pending_messages(self.id)
    }

    pub fn accepted_messages(&self) -> Vec<MessageId> {
        self.store.accepted_messages(self.id)
    }
}

impl std::fmt::Debug for CarryNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarryNode")
            .field("id", &self.id)
            .field("range", &self.range)
            .field("position", &self.position())
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}
