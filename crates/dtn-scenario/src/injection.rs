//! `InjectionQueue`: messages waiting for the tick at which they are created.

use std::collections::BTreeMap;

use dtn_core::{MessageId, Tick};

/// Maps creation ticks to the messages originated at that tick.
///
/// Within one tick messages come out in insertion order.
#[derive(Debug, Default, Clone)]
pub struct InjectionQueue {
    inner: BTreeMap<Tick, Vec<MessageId>>,
    /// Cached total message count for O(1) `len()`.
    total: usize,
}

impl InjectionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `msg` to be originated at its source node at `tick`.
    pub fn push(&mut self, tick: Tick, msg: MessageId) {
        self.inner.entry(tick).or_default().push(msg);
        self.total += 1;
    }

    /// Remove and return every message due at or before `tick`, oldest tick
    /// first.  Entries scheduled before the run started come out on the
    /// first call.
    pub fn drain_due(&mut self, tick: Tick) -> Vec<MessageId> {
        let later = match tick.0.checked_add(1) {
            Some(next) => self.inner.split_off(&Tick(next)),
            None => BTreeMap::new(),
        };
        let due = std::mem::replace(&mut self.inner, later);
        let out: Vec<MessageId> = due.into_values().flatten().collect();
        self.total -= out.len();
        out
    }

    /// The earliest tick with at least one queued message.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct ticks with queued messages.
    pub fn tick_count(&self) -> usize {
        self.inner.len()
    }

    /// Every queued entry in tick order, without draining.
    pub fn iter(&self) -> impl Iterator<Item = (Tick, MessageId)> + '_ {
        self.inner
            .iter()
            .flat_map(|(&t, msgs)| msgs.iter().map(move |&m| (t, m)))
    }
}

impl FromIterator<(Tick, MessageId)> for InjectionQueue {
    fn from_iter<I: IntoIterator<Item = (Tick, MessageId)>>(iter: I) -> Self {
        let mut queue = Self::new();
        for (tick, msg) in iter {
            queue.push(tick, msg);
        }
        queue
    }
}
