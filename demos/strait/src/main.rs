//! strait: patrol coverage of a strait that widens away from the home port.
//!
//! ```text
//! strait [world.json] [fleet.csv]
//! ```
//!
//! Without arguments the default world and the embedded fleet below are
//! used.  Pool counts, transit events and periodic agent snapshots go to
//! `output/strait/`, plus a `summary.json` of the run.  Set `RUST_LOG` to
//! change verbosity (`RUST_LOG=ps_fleet=debug` traces every sortie).

use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ps_config::{load_fleet_csv, load_fleet_reader, load_world_json, ScenarioConfig, WorldConfig};
use ps_core::{SimConfig, Team, Tick};
use ps_fleet::TransitEvent;
use ps_output::{CsvWriter, OutputWriter, SimOutputObserver};
use ps_sim::{SimBuilder, SimObserver, TickReport, WorldSnapshot};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                    u64  = 42;
const TOTAL_TICKS:             u64  = 2_000;
const TIME_DELTA:              f64  = 1.0;
const SNAPSHOT_INTERVAL_TICKS: u64  = 100;
const OUTPUT_DIR:              &str = "output/strait";

// Twelve cutters hold three zones and six helicopters two on the default
// world; thirty smugglers keep the crossing busy.
const FLEET_CSV: &str = "\
model,team,radius,quantity,speed,endurance,maintenance_time,color,skill_level,operating_domain,air_visibility,surface_visibility\n\
cutter,searcher,20,12,12,14000,48,steelblue,advanced,surface,,\n\
heli,searcher,40,6,60,18000,24,orange,basic,air,,\n\
smuggler,traveller,0,30,25,inf,0,crimson,,,small,medium\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

/// Forwards to the output observer and keeps running totals for the summary.
struct Tally<W: OutputWriter> {
    inner:          SimOutputObserver<W>,
    exits:          usize,
    detections:     usize,
    time_in_system: f64,
    min_searchers:  usize,
}

impl<W: OutputWriter> Tally<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, exits: 0, detections: 0, time_in_system: 0.0, min_searchers: usize::MAX }
    }

    fn crossings(&self) -> usize {
        self.exits + self.detections
    }
}

impl<W: OutputWriter> SimObserver for Tally<W> {
    fn on_transit_event(&mut self, event: &TransitEvent) {
        if event.detected {
            self.detections += 1;
        } else {
            self.exits += 1;
        }
        self.time_in_system += event.time_in_system;
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        self.min_searchers = self.min_searchers.min(report.active(Team::Searcher));
        self.inner.on_tick_end(report);
    }

    fn on_snapshot(&mut self, snapshot: &WorldSnapshot) {
        self.inner.on_snapshot(snapshot);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // 1. Scenario.
    let mut args = std::env::args().skip(1);
    let world = match args.next() {
        Some(path) => load_world_json(Path::new(&path)).with_context(|| format!("loading world {path}"))?,
        None => WorldConfig::default(),
    };
    let models = match args.next() {
        Some(path) => load_fleet_csv(Path::new(&path)).with_context(|| format!("loading fleet {path}"))?,
        None => load_fleet_reader(Cursor::new(FLEET_CSV))?,
    };

    println!("=== strait: patrol coverage simulation ===");
    println!(
        "Area: {} × {} ({}° widening)  |  Seed: {SEED}  |  Ticks: {TOTAL_TICKS}",
        world.area.width, world.area.baseline_height, world.area.angle_deg
    );
    for m in &models {
        println!("  {:<10} {:<9} × {:>3}  speed {:>5}  endurance {}", m.name, m.team.as_str(), m.quantity, m.speed, m.endurance);
    }
    println!();

    // 2. Build: tessellation, routes, initial deployment.
    let config = SimConfig {
        total_ticks:             TOTAL_TICKS,
        time_delta:              TIME_DELTA,
        seed:                    SEED,
        snapshot_interval_ticks: SNAPSHOT_INTERVAL_TICKS,
    };
    let t0 = Instant::now();
    let mut sim = SimBuilder::from_scenario(config, ScenarioConfig { world, models })?.build()?;
    println!(
        "Tessellation: {} zones over {} receptors, score {:.4} ({:.2} s)",
        sim.zones.len(),
        sim.grid.len(),
        sim.tessellation_score,
        t0.elapsed().as_secs_f64()
    );
    for zone in &sim.zones {
        let model = &sim.fleet.pool(zone.model)?.name;
        println!(
            "  zone {:>2}  {:<8} {:<12} {:>4} receptors  route {:>4} waypoints",
            zone.id.0,
            model,
            zone.color,
            zone.receptors.len(),
            zone.coverage.len()
        );
    }
    println!();

    // 3. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = Tally::new(SimOutputObserver::new(writer));

    // 4. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();
    info!(ticks = TOTAL_TICKS, secs = elapsed.as_secs_f64(), "run complete");

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    let crossings = obs.crossings();
    let detection_rate = if crossings > 0 { obs.detections as f64 / crossings as f64 } else { 0.0 };
    let mean_time = if crossings > 0 { obs.time_in_system / crossings as f64 } else { 0.0 };

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  crossings finished : {crossings}");
    println!("  detected           : {} ({:.1} %)", obs.detections, detection_rate * 100.0);
    println!("  mean time in area  : {mean_time:.1}");
    println!("  fewest on patrol   : {}", obs.min_searchers);
    println!();

    println!("{:<10} {:>7} {:>9} {:>12}", "Model", "Active", "Inactive", "Maintenance");
    println!("{}", "-".repeat(41));
    for pool in sim.fleet.pools() {
        let c = pool.counts();
        println!("{:<10} {:>7} {:>9} {:>12}", pool.name, c.active, c.inactive, c.maintenance);
    }

    let summary = json!({
        "seed": SEED,
        "ticks": TOTAL_TICKS,
        "zones": sim.zones.len(),
        "tessellation_score": sim.tessellation_score,
        "crossings": crossings,
        "detections": obs.detections,
        "exits": obs.exits,
        "detection_rate": detection_rate,
        "mean_time_in_system": mean_time,
        "min_searchers_on_patrol": obs.min_searchers,
    });
    let file = File::create(Path::new(OUTPUT_DIR).join("summary.json"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &summary)?;

    Ok(())
}
