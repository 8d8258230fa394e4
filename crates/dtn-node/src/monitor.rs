//! Event sink for forwarding, status and movement events.

use dtn_core::MessageId;

use crate::CarryNode;

/// Receives routing events as they happen.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Node references are read-only views
/// taken at the moment of the event.
pub trait Monitor {
    /// `sender` just handed `msg` to `receiver`.  Called after the receiver
    /// queued the copy and before the sender released its own.
    fn on_forward(&mut self, _sender: &CarryNode, _receiver: &CarryNode, _msg: MessageId) {}

    /// A node's buffers or counters changed.
    fn on_status_change(&mut self, _node: &CarryNode) {}

    /// A node's mobility model advanced.
    fn on_move(&mut self, _node: &CarryNode) {}
}

/// A [`Monitor`] that ignores every event.
pub struct NoopMonitor;

impl Monitor for NoopMonitor {}
