//! The `Sim` struct and its tick loop.

use dtn_core::{MessageId, NodeId, SimClock, SimConfig, Tick};
use dtn_mobility::Area;
use dtn_node::{CarryNode, DeliveryStats, NodeBuilder, NodeResult, Population, Scheduler};
use dtn_scenario::{InjectionQueue, NodeSpec};
use dtn_spatial::GridIndex;

use crate::{SimError, SimObserver, SimResult, TickSummary};

/// The main simulation runner.
///
/// `Sim` owns every node, the shared spatial grid and the injection queue,
/// and drives the tick loop:
///
/// 1. **Inject**: messages due this tick are originated at their source.
/// 2. **Register**: the grid is rebuilt from every node's current position.
///    No proximity query runs before this barrier.
/// 3. **Advance** (ascending registration order): each node moves, reports
///    the move, detects new encounters and hands messages to destinations.
/// 4. **Merge**: every node folds its received copies into its carried set.
///
/// `Sim` is the [`Scheduler`] nodes are built against; use
/// [`spawn`](Self::spawn) or [`NodeBuilder::build`] directly.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
#[derive(Debug)]
pub struct Sim {
    /// Global configuration (total ticks, seed, cell size, …).
    pub config: SimConfig,

    /// Simulation clock: tracks the current tick and maps it to wall time.
    pub clock: SimClock,

    /// Every node, in registration order.
    pub population: Population,

    /// Messages waiting for their creation tick.
    pub injections: InjectionQueue,

    grid:       GridIndex,
    /// Set by the first rebuild; before it no proximity query is valid.
    grid_ready: bool,
}

impl Sim {
    pub(crate) fn new(config: SimConfig, grid: GridIndex, injections: InjectionQueue) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            population: Population::new(),
            injections,
            grid,
            grid_ready: false,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Build and register a node.
    pub fn spawn(&mut self, builder: NodeBuilder) -> SimResult<NodeId> {
        Ok(builder.build(self)?)
    }

    /// Build and register the node described by `spec`.  Moving nodes bounce
    /// off `bounds` when given.
    pub fn spawn_spec(&mut self, spec: &NodeSpec, bounds: Option<Area>) -> SimResult<NodeId> {
        let mut builder = NodeBuilder::new()
            .id(spec.id)
            .boxed_mobility(spec.mobility(bounds)?);
        if let Some(range) = spec.range {
            builder = builder.range(range);
        }
        self.spawn(builder)
    }

    /// Schedule `msg` to be created at its source when the run reaches `tick`.
    pub fn inject(&mut self, tick: Tick, msg: MessageId) {
        self.injections.push(tick, msg);
    }

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<DeliveryStats> {
        tracing::info!(
            nodes       = self.population.len(),
            messages    = self.injections.len(),
            total_ticks = self.config.total_ticks,
            seed        = self.config.seed,
            "simulation started"
        );

        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);

        let stats = self.population.delivery_stats();
        tracing::info!(
            final_tick = %self.clock.current_tick,
            tx         = stats.tx,
            rx         = stats.rx,
            dup        = stats.dup,
            accepted   = stats.accepted,
            in_transit = stats.in_transit,
            "simulation finished"
        );
        Ok(stats)
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// The grid as of the end of the most recent tick: built at its start,
    /// then kept current as nodes moved.
    pub fn grid(&self) -> Option<&GridIndex> {
        self.grid_ready.then_some(&self.grid)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.process_tick(now, observer)?;
        observer.on_tick_end(now, &summary);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.population);
        }
        self.clock.advance();
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<TickSummary> {
        let mut summary = TickSummary { tick: now, ..TickSummary::default() };

        // ── Phase 1: originate due messages ───────────────────────────────
        for msg in self.injections.drain_due(now) {
            let source = self
                .population
                .get_mut(msg.source)
                .map_err(|_| SimError::UnknownSource(msg))?;
            source.originate(msg);
            if !self.population.contains(msg.destination) {
                tracing::warn!(%msg, "destination is not in the population; message can never be delivered");
            }
            tracing::trace!(tick = %now, %msg, "message injected");
            summary.injected += 1;
        }

        // ── Phase 2: registration barrier ─────────────────────────────────
        self.population.rebuild_grid(&mut self.grid, now);
        self.grid_ready = true;

        // ── Phase 3: advance every node in registration order ─────────────
        //
        // Each move relocates the node in the grid before it queries.  A copy
        // received here stays in the receiver's pending-merge buffer until
        // phase 4, so no message moves more than one hop per tick.
        let delta = Scheduler::tick_delta(self);
        for id in self.population.ids() {
            let out = self.population.advance(id, delta, Some(&mut self.grid), observer)?;
            summary.encounters += out.encounters;
            summary.handed += out.handed;
        }

        // ── Phase 4: merge ────────────────────────────────────────────────
        self.population.merge_all();

        tracing::debug!(
            tick       = %now,
            injected   = summary.injected,
            encounters = summary.encounters,
            handed     = summary.handed,
            "tick complete"
        );
        Ok(summary)
    }
}

impl Scheduler for Sim {
    fn population_size(&self) -> usize {
        self.population.len()
    }

    fn register_node(&mut self, node: CarryNode) -> NodeResult<NodeId> {
        let id = self.population.insert(node)?;
        tracing::trace!(node = %id, "node registered");
        Ok(id)
    }

    fn grid_index(&self) -> Option<&GridIndex> {
        self.grid()
    }

    fn tick_delta(&self) -> f64 {
        self.clock.tick_delta()
    }

    fn cell_size(&self) -> f64 {
        self.config.cell_size
    }

    fn default_range(&self) -> f64 {
        self.config.default_range
    }
}
