//! xsmall — smallest example for the epigrid epidemic simulator.
//!
//! Synthesizes about 2 000 agents from a generated household table onto a
//! 60 x 60 grid and runs four replications for six weeks.  Schools close
//! and households quarantine after two weeks.  Writes CSV output to the
//! directory given as the first argument (default `./output`).

use std::io::Cursor;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{LevelFilter, info};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

use epi_behavior::MeasureBehavior;
use epi_core::SimConfig;
use epi_output::{CsvWriter, write_batch};
use epi_population::sample_table;
use epi_runner::run_batch;
use epi_schedule::{SectorTables, load_probability_table_reader, load_timetable_reader};
use epi_sim::{EpidemicParams, ReferenceData};

// ── Constants ─────────────────────────────────────────────────────────────────

const HOUSEHOLDS:       usize = 400;
const TARGET_AGENTS:    usize = 2_000;
const INITIAL_INFECTED: usize = 10;
const SEED:             u64   = 42;
const SIM_DAYS:         u32   = 42;
const REPLICATIONS:     usize = 4;
const PER_HOUR:         f64   = 0.05;
const GRID_SIDE:        u32   = 60;

// ── Embedded tables ───────────────────────────────────────────────────────────

const TIMETABLE_CSV: &str = "\
date,regime,quarantine,work_from_home,sector_lockdown,short_time_work,school,kindergarten,university,supermarket\n\
2020-03-01,open,none,wfh_low,,,1.0,1.0,1.0,1.0\n\
2020-03-16,lockdown,household,wfh_high,closed,reduced,0.0,0.1,0.0,0.8\n\
";

// Keyed by division.
const WORK_FROM_HOME_CSV: &str = "\
nace2,wfh_low,wfh_high\n\
47,0.05,0.2\n\
62,0.4,0.9\n\
64,0.3,0.8\n\
85,0.1,0.6\n\
86,0.0,0.05\n\
";

// Keyed by section.
const LOCKDOWN_CSV: &str = "\
section,closed\n\
7,0.5\n\
9,0.9\n\
18,0.9\n\
";

const SHORT_TIME_WORK_CSV: &str = "\
section,reduced\n\
3,0.2\n\
7,0.3\n\
9,0.5\n\
";

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging() -> Result<()> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging()?;
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    // 1. Reference data.
    let sectors = SectorTables {
        work_from_home: load_probability_table_reader(Cursor::new(WORK_FROM_HOME_CSV))?,
        lockdown: load_probability_table_reader(Cursor::new(LOCKDOWN_CSV))?,
        short_time_work: load_probability_table_reader(Cursor::new(SHORT_TIME_WORK_CSV))?,
    };
    let households = sample_table(HOUSEHOLDS, SEED);
    info!(
        "household table: {} households, {} persons",
        households.households.len(),
        households.person_count()
    );
    let reference = ReferenceData::new(households, sectors);

    // 2. Calendar and parameters.
    let start = NaiveDate::from_ymd_opt(2020, 3, 2)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("invalid start date")?;
    let config = SimConfig::new(start, SIM_DAYS, SEED);

    let timetable = load_timetable_reader(Cursor::new(TIMETABLE_CSV))?;
    let mut params = EpidemicParams::new(PER_HOUR, INITIAL_INFECTED, TARGET_AGENTS, timetable);
    params.n_internal_runs = REPLICATIONS;
    params.grid_width = GRID_SIDE;
    params.grid_height = GRID_SIDE;
    params.random_infection_rate = 0.5;
    params.empirical_day0_per_100k = Some(5.0);

    let behavior = MeasureBehavior;

    // 3. Run.
    let t0 = Instant::now();
    let batch = run_batch(&config, &reference, &params, &behavior)?;
    info!("{REPLICATIONS} replications in {:.2?}", t0.elapsed());

    for (i, r) in batch.replications.iter().enumerate() {
        let last = r.records.last();
        info!(
            "replication {i}: population {}, {} cases, {} infected",
            r.population,
            last.map_or(0, |d| d.cumulative_cases),
            r.infected_ages.len()
        );
    }

    // 4. Write.
    let mut writer = CsvWriter::new(&out_dir)?;
    write_batch(&mut writer, &batch)?;
    info!("output written to {}", out_dir.display());
    Ok(())
}
