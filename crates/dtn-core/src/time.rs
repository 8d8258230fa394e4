//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to wall-clock time is held in `SimClock`:
//!
//!   wall_time = start_unix_secs + tick * tick_duration_secs
//!
//! One tick is one discrete contact round: every node moves once, looks for
//! new encounters once, and merges its receive buffer once.  The default tick
//! duration is 1 s; mobility models scale their movement by it.

use std::fmt;

use crate::{DtnError, DtnResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and Unix wall-clock seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: i64,
    /// How many simulated seconds one tick represents.
    pub tick_duration_secs: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start_unix_secs: i64, tick_duration_secs: u32) -> Self {
        Self {
            start_unix_secs,
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Length of one tick in seconds, as handed to mobility models.
    #[inline]
    pub fn tick_delta(&self) -> f64 {
        self.tick_duration_secs as f64
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> i64 {
        self.current_tick.0 as i64 * self.tick_duration_secs as i64
    }

    /// Unix timestamp for an arbitrary tick.
    #[inline]
    pub fn unix_secs_at(&self, tick: Tick) -> i64 {
        self.start_unix_secs + tick.0 as i64 * self.tick_duration_secs as i64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{}s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate (with the
/// `serde` feature) and passed to the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Unix timestamp for tick 0.
    pub start_unix_secs: i64,

    /// Seconds per tick.  Default: 1.
    pub tick_duration_secs: u32,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Side length of one grid cell in metres.  Also the hard upper bound on
    /// every node's communication range: the 3×3 neighborhood scan only
    /// finds every in-range node while `range <= cell_size`.
    pub cell_size: f64,

    /// Communication range given to nodes that do not set one explicitly.
    pub default_range: f64,

    /// Write a node snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl SimConfig {
    pub const DEFAULT_CELL_SIZE: f64 = 200.0;
    pub const DEFAULT_RANGE: f64 = 50.0;

    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs, self.tick_duration_secs)
    }

    /// Reject configurations the grid or the node builder cannot honour.
    pub fn validate(&self) -> DtnResult<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(DtnError::Config(format!(
                "cell_size must be a positive finite number, got {}",
                self.cell_size
            )));
        }
        if !(self.default_range > 0.0 && self.default_range <= self.cell_size) {
            return Err(DtnError::Config(format!(
                "default_range {} must lie in (0, cell_size = {}]",
                self.default_range, self.cell_size
            )));
        }
        if self.tick_duration_secs == 0 {
            return Err(DtnError::Config("tick_duration_secs must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_unix_secs:       0,
            tick_duration_secs:    1,
            total_ticks:           1_000,
            seed:                  0,
            cell_size:             Self::DEFAULT_CELL_SIZE,
            default_range:         Self::DEFAULT_RANGE,
            output_interval_ticks: 0,
        }
    }
}
