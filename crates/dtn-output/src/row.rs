//! Plain data row types written by output backends.

/// One hand-off from a carrier to a message's destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardRow {
    pub tick:        u64,
    pub sender:      u32,
    pub receiver:    u32,
    pub source:      u32,
    pub destination: u32,
    pub seq:         u32,
}

/// A snapshot of one node at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSnapshotRow {
    pub node_id:  u32,
    pub tick:     u64,
    pub x:        f64,
    pub y:        f64,
    /// Distinct messages still waiting for their destination.
    pub carried:  u32,
    /// Distinct messages addressed to this node.
    pub accepted: u32,
    pub tx:       u64,
    pub rx:       u64,
    pub dup:      u64,
}

/// Totals for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub unix_time_secs: i64,
    pub injected:       u64,
    pub encounters:     u64,
    pub handed:         u64,
}
