//! CSV scenario loaders.
//!
//! # Node table
//!
//! One row per node.  `range`, `vx` and `vy` may be left empty.
//!
//! ```csv
//! node_id,x,y,range,vx,vy
//! 1,0,0,,,
//! 2,10,0,80,1.5,0
//! 3,500,0,,,
//! ```
//!
//! | Column      | Meaning                                                  |
//! |-------------|----------------------------------------------------------|
//! | `node_id`   | `NodeId`, unique within the table                        |
//! | `x`, `y`    | starting position in metres                              |
//! | `range`     | communication range; empty → the run's default           |
//! | `vx`, `vy`  | constant velocity in m/s; both empty or 0 → stationary   |
//!
//! # Message table
//!
//! ```csv
//! source,destination,seq,tick
//! 1,2,0,0
//! 1,3,1,25
//! ```
//!
//! Each row becomes one `MessageId` originated at `source` when the run
//! reaches `tick`.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use dtn_core::{MessageId, NodeId, Position, SeqNo, Tick};
use dtn_mobility::{Area, LinearMobility, Mobility, Stationary};

use crate::{InjectionQueue, ScenarioError, ScenarioResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    node_id: u32,
    x:       f64,
    y:       f64,
    range:   Option<f64>,
    vx:      Option<f64>,
    vy:      Option<f64>,
}

#[derive(Deserialize)]
struct MessageRecord {
    source:      u32,
    destination: u32,
    seq:         u32,
    tick:        u64,
}

// ── NodeSpec ──────────────────────────────────────────────────────────────────

/// One node placement read from a scenario table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeSpec {
    pub id:       NodeId,
    pub position: Position,
    /// `None` means "use the run's default range".
    pub range:    Option<f64>,
    pub vx:       f64,
    pub vy:       f64,
}

impl NodeSpec {
    pub fn is_stationary(&self) -> bool {
        self.vx == 0.0 && self.vy == 0.0
    }

    /// The mobility model this placement describes.
    ///
    /// Moving nodes bounce off `bounds` when one is given and travel freely
    /// otherwise.
    pub fn mobility(&self, bounds: Option<Area>) -> ScenarioResult<Box<dyn Mobility>> {
        if self.is_stationary() {
            return Ok(Box::new(Stationary(self.position)));
        }
        match bounds {
            None => Ok(Box::new(LinearMobility::new(self.position, self.vx, self.vy))),
            Some(area) => LinearMobility::bounded(self.position, self.vx, self.vy, area)
                .map(|m| Box::new(m) as Box<dyn Mobility>)
                .map_err(|source| ScenarioError::Mobility { node: self.id, source }),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load node placements from a CSV file, in file order.
pub fn load_nodes_csv(path: &Path) -> ScenarioResult<Vec<NodeSpec>> {
    let file = std::fs::File::open(path)?;
    load_nodes_reader(file)
}

/// Like [`load_nodes_csv`] but accepts any `Read` source.
pub fn load_nodes_reader<R: Read>(reader: R) -> ScenarioResult<Vec<NodeSpec>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut seen = HashSet::new();
    let mut specs = Vec::new();

    for result in csv_reader.deserialize::<NodeRecord>() {
        let row = result.map_err(|e| ScenarioError::Parse(e.to_string()))?;
        let id = NodeId(row.node_id);
        if id == NodeId::INVALID {
            return Err(ScenarioError::Parse(format!("node id {} is reserved", row.node_id)));
        }
        if !seen.insert(id) {
            return Err(ScenarioError::DuplicateNode(id));
        }
        if !(row.x.is_finite() && row.y.is_finite()) {
            return Err(ScenarioError::Parse(format!(
                "{id}: position ({}, {}) is not finite",
                row.x, row.y
            )));
        }
        specs.push(NodeSpec {
            id,
            position: Position::new(row.x, row.y),
            range:    row.range,
            vx:       row.vx.unwrap_or(0.0),
            vy:       row.vy.unwrap_or(0.0),
        });
    }

    Ok(specs)
}

/// Load scheduled messages from a CSV file.
pub fn load_messages_csv(path: &Path) -> ScenarioResult<InjectionQueue> {
    let file = std::fs::File::open(path)?;
    load_messages_reader(file)
}

/// Like [`load_messages_csv`] but accepts any `Read` source.
///
/// A message addressed to its own source is rejected: the node would carry
/// it as already accepted and it could never be forwarded.
pub fn load_messages_reader<R: Read>(reader: R) -> ScenarioResult<InjectionQueue> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut queue = InjectionQueue::new();

    for result in csv_reader.deserialize::<MessageRecord>() {
        let row = result.map_err(|e| ScenarioError::Parse(e.to_string()))?;
        if row.source == row.destination {
            return Err(ScenarioError::Parse(format!(
                "message {}:{}:{} is addressed to its own source",
                row.source, row.destination, row.seq
            )));
        }
        let msg = MessageId::new(NodeId(row.source), NodeId(row.destination), SeqNo(row.seq));
        queue.push(Tick(row.tick), msg);
    }

    Ok(queue)
}
