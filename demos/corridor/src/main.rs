//! corridor — a morning peak on a three-link bicycle path.
//!
//! Samples a heterogeneous cyclist population, splits the links into
//! segments, and drives everyone from the upstream end to the downstream
//! end.  A narrow middle link acts as a bottleneck, so fast cyclists are
//! forced to follow and some entries are deferred.

use std::io::Cursor;
use std::time::Instant;

use anyhow::Result;

use fff_core::{CyclistId, FffConfig, SegmentId, SimRng, SimTime};
use fff_cyclist::CyclistSampler;
use fff_link::load_links_reader;
use fff_sim::{CorridorBuilder, SimObserver, TravelTimeLog};

// ── Constants ─────────────────────────────────────────────────────────────────

const CYCLIST_COUNT:     usize = 2_000;
const SEED:              u64   = 42;
const MEAN_HEADWAY_SECS: f64   = 1.2;
const END_TIME_SECS:     f64   = 2.0 * 3_600.0;
const REPORT_EVERY_SECS: f64   = 600.0;

// ── Link table ────────────────────────────────────────────────────────────────

// `width` derives the lane count; `pseudo_lanes` overrides it.
const LINKS_CSV: &str = "\
id,length,width,pseudo_lanes\n\
approach,420,2.5,\n\
bridge,180,1.2,\n\
harbour_front,650,,3\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

/// Travel-time log plus a periodic progress line.
struct Report {
    log:         TravelTimeLog,
    next_report: f64,
    moved:       usize,
}

impl SimObserver for Report {
    fn on_entered(&mut self, cyclist: CyclistId, now: SimTime) {
        self.log.on_entered(cyclist, now);
    }

    fn on_arrived(&mut self, cyclist: CyclistId, now: SimTime) {
        self.log.on_arrived(cyclist, now);
    }

    fn on_deferred(&mut self, cyclist: CyclistId, segment: SegmentId, retry: SimTime) {
        self.log.on_deferred(cyclist, segment, retry);
    }

    fn on_step_end(&mut self, now: SimTime, moved: usize) {
        self.moved += moved;
        if now.secs() >= self.next_report {
            println!(
                "  {now}: {:>5} arrived, {:>6} moves, {:>5} deferrals",
                self.log.completed(),
                self.moved,
                self.log.total_deferrals(),
            );
            self.next_report += REPORT_EVERY_SECS;
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== corridor — fast-or-forced-to-follow ===");
    println!("Cyclists: {CYCLIST_COUNT}  |  Seed: {SEED}");
    println!();

    let config = FffConfig { end_time_secs: END_TIME_SECS, seed: SEED, ..FffConfig::default() };

    // 1. Links.
    let links = load_links_reader(Cursor::new(LINKS_CSV))?;
    println!("Loaded {} links", links.len());

    // 2. Departure times (uniform headways around the mean); the population
    //    is sampled from the same seed when the corridor is built.
    let mut rng = SimRng::new(config.seed);
    let mut clock = 0.0;
    let departures: Vec<SimTime> = (0..CYCLIST_COUNT)
        .map(|_| {
            let t = SimTime::from_secs(clock);
            clock += rng.gen_range(0.0..2.0 * MEAN_HEADWAY_SECS);
            t
        })
        .collect();

    // 3. Corridor.
    let mut corridor = CorridorBuilder::new(config)
        .links(links)
        .sampled_cyclists(CyclistSampler::default(), departures)
        .build()?;
    println!("Segments:");
    for segment in corridor.segments() {
        println!(
            "  {:<16} {:>6.1} m × {} lanes  (capacity {:.1} PCE)",
            segment.id(),
            segment.length(),
            segment.number_of_pseudo_lanes(),
            segment.storage_capacity(corridor.config.bicycle_pce),
        );
    }
    println!();

    // 4. Run.
    let mut report = Report { log: TravelTimeLog::new(), next_report: REPORT_EVERY_SECS, moved: 0 };
    let started = Instant::now();
    let summary = corridor.run(&mut report);
    let elapsed = started.elapsed();

    println!();
    println!(
        "Finished after {} steps in {:.2?}: {} arrived, {} en route, {} waiting",
        summary.steps, elapsed, summary.arrived, summary.en_route, summary.waiting,
    );
    if let Some(mean) = report.log.mean_travel_time() {
        println!("Mean travel time: {mean:.1} s");
    }
    println!("Deferrals: {}", report.log.total_deferrals());

    Ok(())
}
