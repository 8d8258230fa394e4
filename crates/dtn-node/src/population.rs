//! The node population and every operation that spans more than one node:
//! grid registration, proximity query, encounter detection, forwarding.

use std::collections::HashMap;

use dtn_core::{NodeId, Tick};
use dtn_spatial::GridIndex;

use crate::{CarryNode, Monitor, NodeError, NodeResult};

/// Aggregate delivery figures across a population.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryStats {
    pub tx:       u64,
    pub rx:       u64,
    pub dup:      u64,
    /// Distinct messages sitting at their destination.
    pub accepted: u64,
    /// Carried copies addressed to some other node, handed off or not.
    pub in_transit: u64,
}

/// What one node's forwarding step did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Forwarded {
    /// Nodes newly met this tick.
    pub encounters: usize,
    /// Messages handed to their destination.
    pub handed:     usize,
}

/// All nodes of a run, addressable by [`NodeId`].
///
/// Nodes are kept in registration order; that order is also the order in
/// which a driver should advance them, which makes runs reproducible.
#[derive(Debug, Default)]
pub struct Population {
    nodes: Vec<CarryNode>,
    index: HashMap<NodeId, usize>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Membership ────────────────────────────────────────────────────────

    /// Add `node`.  Fails if its id is already taken.
    pub fn insert(&mut self, node: CarryNode) -> NodeResult<NodeId> {
        let id = node.id();
        if self.index.contains_key(&id) {
            return Err(NodeError::DuplicateId(id));
        }
        self.index.insert(id, self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> NodeResult<&CarryNode> {
        let &i = self.index.get(&id).ok_or(NodeError::UnknownNode(id))?;
        Ok(&self.nodes[i])
    }

    pub fn get_mut(&mut self, id: NodeId) -> NodeResult<&mut CarryNode> {
        let &i = self.index.get(&id).ok_or(NodeError::UnknownNode(id))?;
        Ok(&mut self.nodes[i])
    }

    /// Node ids in registration order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(CarryNode::id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CarryNode> {
        self.nodes.iter()
    }

    /// Two distinct nodes borrowed mutably at once.
    fn pair_mut(&mut self, a: NodeId, b: NodeId) -> NodeResult<(&mut CarryNode, &mut CarryNode)> {
        let &ia = self.index.get(&a).ok_or(NodeError::UnknownNode(a))?;
        let &ib = self.index.get(&b).ok_or(NodeError::UnknownNode(b))?;
        debug_assert_ne!(ia, ib, "a node never forwards to itself");
        if ia < ib {
            let (lo, hi) = self.nodes.split_at_mut(ib);
            Ok((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.nodes.split_at_mut(ia);
            Ok((&mut hi[0], &mut lo[ib]))
        }
    }

    // ── Grid ──────────────────────────────────────────────────────────────

    /// Rebuild `grid` for `tick` from every node's current position.
    ///
    /// This is the registration barrier: proximity queries for `tick` are
    /// valid only after it returns.  [`advance`](Self::advance) keeps the
    /// grid current from then on as nodes move.
    pub fn rebuild_grid(&self, grid: &mut GridIndex, tick: Tick) {
        grid.clear(tick);
        for node in &self.nodes {
            grid.register_at(node.id(), node.position());
        }
    }

    fn require_grid<'g>(&self, grid: Option<&'g GridIndex>) -> NodeResult<&'g GridIndex> {
        let grid = grid.ok_or(NodeError::GridNotBuilt)?;
        if grid.len() != self.nodes.len() {
            return Err(NodeError::GridIncomplete {
                registered: grid.len(),
                population: self.nodes.len(),
            });
        }
        Ok(grid)
    }

    // ── Proximity ─────────────────────────────────────────────────────────

    /// Nodes within `id`'s communication range this tick, ascending.
    ///
    /// Scans the 3×3 block of cells around `id`'s current position and keeps
    /// every other node whose position is within `range` on both axes.
    /// Read-only.
    ///
    /// # Errors
    ///
    /// [`NodeError::GridNotBuilt`] / [`NodeError::GridIncomplete`] if the
    /// grid is missing or was not built from the whole population.
    pub fn neighbors(&self, id: NodeId, grid: Option<&GridIndex>) -> NodeResult<Vec<NodeId>> {
        let grid = self.require_grid(grid)?;
        let node = self.get(id)?;
        let center = node.position();
        let range = node.range();

        let mut found: Vec<NodeId> = grid
            .candidates(grid.cell_of(center))
            .filter(|&other| other != id)
            .filter(|&other| {
                self.get(other)
                    .map(|n| n.position().within_box(center, range))
                    .unwrap_or(false)
            })
            .collect();
        found.sort_unstable();
        found.dedup();
        Ok(found)
    }

    /// Nodes that came into range of `id` since its previous query.
    ///
    /// Updates `id`'s remembered neighbor set.  Call once per node per tick.
    pub fn encounters(&mut self, id: NodeId, grid: Option<&GridIndex>) -> NodeResult<Vec<NodeId>> {
        let current = self.neighbors(id, grid)?;
        Ok(self.get_mut(id)?.contacts.update(current))
    }

    // ── Forwarding ────────────────────────────────────────────────────────

    /// Run the carry-only policy for `id`.
    ///
    /// For every newly met node that is the destination of a pending message
    /// the message is handed over synchronously: the receiver queues a copy,
    /// the sender counts a transmission, `monitor` hears about it, and the
    /// sender releases one copy and marks the message delivered.
    pub fn forward<M: Monitor + ?Sized>(
        &mut self,
        id:      NodeId,
        grid:    Option<&GridIndex>,
        monitor: &mut M,
    ) -> NodeResult<Forwarded> {
        let fresh = self.encounters(id, grid)?;
        let mut out = Forwarded { encounters: fresh.len(), handed: 0 };
        if fresh.is_empty() {
            return Ok(out);
        }
        let pending = self.get(id)?.pending_messages();

        for contact in fresh {
            for &msg in pending.iter().filter(|m| m.is_for(contact)) {
                let (sender, receiver) = self.pair_mut(id, contact)?;
                receiver.receive(msg);
                sender.counters.tx += 1;
                monitor.on_forward(sender, receiver, msg);
                monitor.on_status_change(sender);
                monitor.on_status_change(receiver);
                if !sender.store.hand_off(msg) {
                    return Err(NodeError::NotCarried { node: id, msg });
                }
                tracing::trace!(from = %id, to = %contact, %msg, "handed off");
                out.handed += 1;
            }
        }
        Ok(out)
    }

    /// Per-tick entry point for one node: move by `delta_secs`, report the
    /// move, then [`forward`](Self::forward).  Does not merge.
    ///
    /// The moved node is relocated to its new cell in `grid` before it
    /// queries, so every later query this tick sees where it is now.
    pub fn advance<M: Monitor + ?Sized>(
        &mut self,
        id:         NodeId,
        delta_secs: f64,
        grid:       Option<&mut GridIndex>,
        monitor:    &mut M,
    ) -> NodeResult<Forwarded> {
        let grid = grid.ok_or(NodeError::GridNotBuilt)?;
        self.require_grid(Some(&*grid))?;

        let node = self.get_mut(id)?;
        let from = grid.cell_of(node.position());
        node.move_by(delta_secs);
        let to = grid.cell_of(node.position());
        monitor.on_move(node);

        if !grid.relocate(id, from, to) {
            return Err(NodeError::NotInGrid { node: id, cell: from });
        }
        self.forward(id, Some(&*grid), monitor)
    }

    // ── Merge ─────────────────────────────────────────────────────────────

    /// Merge every node's pending buffer.  Run once per tick after all
    /// advances and before the next grid rebuild.
    pub fn merge_all(&mut self) {
        #[cfg(not(feature = "parallel"))]
        {
            for node in &mut self.nodes {
                node.merge();
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.nodes.par_iter_mut().for_each(CarryNode::merge);
        }
    }

    // ── Statistics ────────────────────────────────────────────────────────

    pub fn delivery_stats(&self) -> DeliveryStats {
        let mut stats = DeliveryStats::default();
        for node in &self.nodes {
            let c = node.counters();
            stats.tx += c.tx;
            stats.rx += c.rx;
            stats.dup += c.dup;
            stats.accepted += node.accepted_messages().len() as u64;
            stats.in_transit += node
                .store()
                .messages()
                .into_iter()
                .filter(|m| !m.is_for(node.id()))
                .map(|m| node.store().in_hand(m) as u64)
                .sum::<u64>();
        }
        stats
    }
}
