//! Uniform grid over the simulation plane.
//!
//! # Layout
//!
//! The plane is cut into square cells of side `S` (`cell_size`).  A position
//! `(x, y)` belongs to cell
//!
//! ```text
//! (i, j) = (max(0, ⌊x / S⌋), max(0, ⌊y / S⌋))
//! ```
//!
//! Negative coordinates collapse onto row/column 0; there is no wraparound.
//! Each occupied cell maps to the list of nodes registered there this tick.
//!
//! # Neighborhood guarantee
//!
//! If every node's communication range is at most `S`, any node within range
//! of a node in cell `(i, j)` lies in one of the nine cells `(i±1, j±1)`, so a
//! proximity query only has to scan that 3×3 block.
//!
//! # Lifecycle
//!
//! The driver owns the index and rebuilds it once per tick:
//! [`clear`](GridIndex::clear) then one [`register`](GridIndex::register) per
//! node.  Queries must not start before every node of the tick is registered.
//! A node that moves during the tick is moved to its new bucket with
//! [`relocate`](GridIndex::relocate), so the index stays complete and current.

use dtn_core::{NodeId, Position, Tick};

use crate::{SpatialError, SpatialResult};

#[cfg(not(feature = "fx-hash"))]
type CellMap = std::collections::HashMap<Cell, Vec<NodeId>>;
#[cfg(feature = "fx-hash")]
type CellMap = rustc_hash::FxHashMap<Cell, Vec<NodeId>>;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// Integer grid coordinate.  `i` is the column (from `x`), `j` the row (from
/// `y`); both are non-negative by construction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub i: u32,
    pub j: u32,
}

impl Cell {
    #[inline]
    pub fn new(i: u32, j: u32) -> Self {
        Self { i, j }
    }

    /// The up-to-nine cells `(i±1, j±1)` including `self`.
    ///
    /// Cells that would have a negative (or overflowing) coordinate are
    /// skipped, so a corner cell yields four cells and an edge cell six.
    pub fn neighborhood(self) -> impl Iterator<Item = Cell> {
        (-1i32..=1).flat_map(move |di| {
            (-1i32..=1).filter_map(move |dj| {
                let i = self.i.checked_add_signed(di)?;
                let j = self.j.checked_add_signed(dj)?;
                Some(Cell { i, j })
            })
        })
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.i, self.j)
    }
}

// ── GridIndex ─────────────────────────────────────────────────────────────────

/// Cell → node bucket map, rebuilt by the driver every tick.
#[derive(Debug)]
pub struct GridIndex {
    cell_size: f64,
    buckets:   CellMap,
    /// Tick the current contents were registered for.
    built_at:  Tick,
    /// Total registrations since the last `clear`.
    len:       usize,
}

impl GridIndex {
    /// Create an empty index with cells of side `cell_size`.
    pub fn new(cell_size: f64) -> SpatialResult<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SpatialError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            cell_size,
            buckets:  CellMap::default(),
            built_at: Tick::ZERO,
            len:      0,
        })
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cell containing `(x, y)`, clamped to non-negative indices.
    ///
    /// `f64 as u32` saturates, so huge coordinates land in the last column
    /// and NaN lands in column 0.
    #[inline]
    pub fn cell_at(&self, x: f64, y: f64) -> Cell {
        Cell {
            i: (x / self.cell_size).floor().max(0.0) as u32,
            j: (y / self.cell_size).floor().max(0.0) as u32,
        }
    }

    #[inline]
    pub fn cell_of(&self, pos: Position) -> Cell {
        self.cell_at(pos.x, pos.y)
    }

    /// Drop all registrations and start building the index for `tick`.
    pub fn clear(&mut self, tick: Tick) {
        self.buckets.clear();
        self.built_at = tick;
        self.len = 0;
    }

    /// Append `node` to the bucket at `cell`.
    pub fn register(&mut self, node: NodeId, cell: Cell) {
        self.buckets.entry(cell).or_default().push(node);
        self.len += 1;
    }

    /// Register `node` in the cell containing `pos` and return that cell.
    pub fn register_at(&mut self, node: NodeId, pos: Position) -> Cell {
        let cell = self.cell_of(pos);
        self.register(node, cell);
        cell
    }

    /// Move `node` from the bucket at `from` to the bucket at `to`.
    ///
    /// Returns `false`, leaving the index untouched, if `node` is not
    /// registered at `from`.  The registration count never changes.
    pub fn relocate(&mut self, node: NodeId, from: Cell, to: Cell) -> bool {
        if from == to {
            return self.nodes_in(from).contains(&node);
        }
        let Some(bucket) = self.buckets.get_mut(&from) else {
            return false;
        };
        let Some(slot) = bucket.iter().position(|&n| n == node) else {
            return false;
        };
        bucket.swap_remove(slot);
        if bucket.is_empty() {
            self.buckets.remove(&from);
        }
        self.buckets.entry(to).or_default().push(node);
        true
    }

    /// Nodes registered in exactly `cell` (empty if none).
    #[inline]
    pub fn nodes_in(&self, cell: Cell) -> &[NodeId] {
        self.buckets.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every node registered in the 3×3 block around `cell`, in bucket order.
    ///
    /// This is the candidate set of a proximity query; callers still filter
    /// by distance and remove the querying node itself.
    pub fn candidates(&self, cell: Cell) -> impl Iterator<Item = NodeId> + '_ {
        cell.neighborhood()
            .flat_map(move |c| self.nodes_in(c).iter().copied())
    }

    /// Tick the current registrations belong to.
    #[inline]
    pub fn built_at(&self) -> Tick {
        self.built_at
    }

    /// Number of registrations since the last `clear`.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of cells holding at least one node.
    pub fn occupied_cells(&self) -> usize {
        self.buckets.len()
    }
}
