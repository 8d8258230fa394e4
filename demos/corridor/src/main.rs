//! corridor: a long, narrow strip with fixed kiosks and wandering couriers.
//!
//! Kiosks stand at fixed points along a 2 km corridor and shuttles run back
//! and forth along it.  Walkers pick random waypoints.  Every kiosk sends one
//! message to every shuttle and walkers exchange a handful of messages among
//! themselves.  Under carry-only routing a message arrives only if its source
//! ever meets its destination.
//!
//! ```text
//! cargo run -p corridor                  # built-in configuration
//! cargo run -p corridor -- config.json   # SimConfig as JSON
//! RUST_LOG=debug cargo run -p corridor   # per-tick summaries
//! ```

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use dtn_core::{MessageId, NodeId, NodeRng, SeqNo, SimConfig, SimRng, Tick};
use dtn_mobility::{Area, RandomWaypoint};
use dtn_node::{CarryNode, Monitor, NodeBuilder, Population};
use dtn_output::{CsvWriter, OutputWriter, SimOutputObserver};
use dtn_scenario::{load_messages_reader, load_nodes_reader};
use dtn_sim::{SimBuilder, SimObserver, TickSummary};

// ── Constants ─────────────────────────────────────────────────────────────────

const CORRIDOR_LENGTH: f64 = 2_000.0;
const CORRIDOR_WIDTH:  f64 = 100.0;
const WALKER_COUNT:    u32 = 12;
const WALKER_SPEED:    (f64, f64) = (0.8, 2.0); // m/s
const OUTPUT_DIR:      &str = "output/corridor";

// ── Scenario tables ───────────────────────────────────────────────────────────

// Kiosks 1–5 (stationary, 80 m radios) and shuttles 6–8 (constant speed,
// bouncing off the corridor ends).
const NODES_CSV: &str = "\
node_id,x,y,range,vx,vy\n\
1,100,50,80,,\n\
2,550,50,80,,\n\
3,1000,50,80,,\n\
4,1450,50,80,,\n\
5,1900,50,80,,\n\
6,0,20,,6,0\n\
7,2000,50,,-4,0\n\
8,1000,80,,9,0.5\n\
";

// Kiosk → shuttle traffic, created at staggered ticks.
const MESSAGES_CSV: &str = "\
source,destination,seq,tick\n\
1,6,0,0\n\
1,7,1,0\n\
2,8,0,30\n\
3,6,0,60\n\
3,7,1,60\n\
4,8,0,90\n\
5,6,0,120\n\
5,7,1,120\n\
";

// ── Observer wrapper to count events ──────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:        SimOutputObserver<W>,
    forwards:     usize,
    summary_rows: usize,
    injected:     usize,
    peak_handed:  (Tick, usize),
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, forwards: 0, summary_rows: 0, injected: 0, peak_handed: (Tick::ZERO, 0) }
    }
}

impl<W: OutputWriter> Monitor for CountingObserver<W> {
    fn on_forward(&mut self, sender: &CarryNode, receiver: &CarryNode, msg: MessageId) {
        self.forwards += 1;
        self.inner.on_forward(sender, receiver, msg);
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.summary_rows += 1;
        self.injected += summary.injected;
        if summary.handed > self.peak_handed.1 {
            self.peak_handed = (tick, summary.handed);
        }
        self.inner.on_tick_end(tick, summary);
    }

    fn on_snapshot(&mut self, tick: Tick, population: &Population) {
        self.inner.on_snapshot(tick, population);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig {
            start_unix_secs:       1_700_000_000,
            tick_duration_secs:    5,
            total_ticks:           720, // one hour
            seed:                  42,
            cell_size:             SimConfig::DEFAULT_CELL_SIZE,
            default_range:         SimConfig::DEFAULT_RANGE,
            output_interval_ticks: 60,
        });
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config: SimConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    let corridor = Area::sized(CORRIDOR_LENGTH, CORRIDOR_WIDTH)?;

    // 1. Kiosks, shuttles and their messages from the embedded tables.
    let specs = load_nodes_reader(Cursor::new(NODES_CSV))?;
    let mut injections = load_messages_reader(Cursor::new(MESSAGES_CSV))?;
    let fixed_nodes = specs.len() as u32;

    // 2. Walkers: random start and a deterministic per-node RNG.  Each one
    //    addresses a message to another walker chosen by the scenario RNG.
    let walker_ids: Vec<NodeId> = (1..=WALKER_COUNT).map(|i| NodeId(fixed_nodes + i)).collect();
    let mut scenario_rng = SimRng::new(config.seed);
    for (seq, &src) in walker_ids.iter().enumerate() {
        let others: Vec<NodeId> = walker_ids.iter().copied().filter(|&w| w != src).collect();
        if let Some(&dst) = scenario_rng.choose(&others) {
            let tick = Tick(scenario_rng.gen_range(0..config.total_ticks.max(1)));
            injections.push(tick, MessageId::new(src, dst, SeqNo(seq as u32)));
        }
    }

    // 3. Build the sim and register every node.
    let mut sim = SimBuilder::new(config.clone())
        .nodes(specs)
        .bounds(corridor)
        .injections(injections)
        .build()?;

    for &id in &walker_ids {
        let mut rng = NodeRng::new(config.seed, id);
        let start = corridor.random_point(&mut rng);
        let model = RandomWaypoint::new(start, corridor, WALKER_SPEED.0, WALKER_SPEED.1, rng)?;
        sim.spawn(NodeBuilder::new().id(id).mobility(model))?;
    }

    tracing::info!(
        nodes    = sim.population.len(),
        messages = sim.injections.len(),
        cell     = config.cell_size,
        "corridor scenario ready"
    );

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer, &config));

    // 5. Run.
    let t0 = Instant::now();
    let stats = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        tracing::error!(error = %e, "output incomplete");
    }

    // 6. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  forwards.csv       : {} rows", obs.forwards);
    println!("  tick_summaries.csv : {} rows", obs.summary_rows);
    println!("  busiest tick       : {} ({} hand-offs)", obs.peak_handed.0, obs.peak_handed.1);
    println!(
        "  delivered {} / {} messages, {} copies still carried",
        stats.accepted,
        obs.injected,
        stats.in_transit
    );
    println!();

    println!("{:<8} {:>10} {:>8} {:>5} {:>5} {:>9}", "Node", "x", "y", "tx", "rx", "accepted");
    println!("{}", "-".repeat(50));
    for node in sim.population.iter() {
        let pos = node.position();
        let c = node.counters();
        println!(
            "{:<8} {:>10.1} {:>8.1} {:>5} {:>5} {:>9}",
            node.id().0,
            pos.x,
            pos.y,
            c.tx,
            c.rx,
            node.accepted_messages().len(),
        );
    }

    Ok(())
}
