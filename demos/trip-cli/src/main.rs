//! `trip-cli` — plan HOS-compliant trips from the command line.
//!
//! Plans one trip (`--distance`) or a CSV batch (`--batch`), prints a JSON or
//! table summary, and optionally writes the daily logs as CSV (`--out`).
//!
//! Run with:
//!   cargo run -p trip-cli -- --distance 1200 --cycle-used 20 --start 2024-03-04T06:00:00
//!   cargo run -p trip-cli -- --batch trips.csv --out ./logs --format json
//!
//! Rules and limits come from `--config hos.toml` (see `demos/trip-cli/hos.toml`)
//! or the FMCSA property-carrying defaults.  `RUST_LOG` controls log output.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hos_core::PlannerConfig;
use hos_output::{CsvWriter, LogSheetHeader, write_trip_plan};
use hos_trip::{TripPlan, TripPlanner, TripRequest, load_trips_csv, parse_start_time};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
#[command(name = "trip-cli")]
#[command(version)]
#[command(about = "Plan a truck trip under hours-of-service rules and build daily logs")]
struct Cli {
    /// Trip distance in miles
    #[arg(long, short = 'd', required_unless_present = "batch")]
    distance: Option<f64>,

    /// Hours already used in the current 70-hour cycle
    #[arg(long, default_value_t = 0.0)]
    cycle_used: f64,

    /// Departure time, e.g. 2024-03-04T06:00:00 (default: now)
    #[arg(long, value_parser = parse_start)]
    start: Option<NaiveDateTime>,

    /// CSV file of trips (distance_miles,start_time,current_cycle_used_hours)
    #[arg(long, conflicts_with = "distance")]
    batch: Option<PathBuf>,

    /// TOML file with [rules] and [limits] overrides
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Directory to write daily_logs.csv / timeline.csv into
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t)]
    format: OutputFormat,

    /// Also write log_header.csv with these details (placeholders otherwise)
    #[arg(long)]
    header: bool,

    #[arg(long)]
    driver: Option<String>,

    #[arg(long)]
    carrier: Option<String>,

    #[arg(long)]
    truck: Option<String>,

    #[arg(long)]
    trailer: Option<String>,

    /// Origin, for the log header
    #[arg(long)]
    from: Option<String>,

    /// Destination, for the log header
    #[arg(long)]
    to: Option<String>,
}

impl Cli {
    fn log_header(&self) -> Option<LogSheetHeader> {
        if !self.header {
            return None;
        }
        let mut h = LogSheetHeader::default();
        if let Some(v) = &self.driver  { h.driver_name = v.clone(); }
        if let Some(v) = &self.carrier { h.carrier_name = v.clone(); }
        if let Some(v) = &self.truck   { h.truck_number = v.clone(); }
        if let Some(v) = &self.trailer { h.trailer_number = v.clone(); }
        Some(h.route(
            self.from.clone().unwrap_or_default(),
            self.to.clone().unwrap_or_default(),
        ))
    }

    fn requests(&self) -> Result<Vec<TripRequest>> {
        if let Some(path) = &self.batch {
            let trips = load_trips_csv(path)
                .with_context(|| format!("loading trips from {}", path.display()))?;
            if trips.is_empty() {
                bail!("{} contains no trips", path.display());
            }
            return Ok(trips);
        }
        let Some(distance) = self.distance else {
            bail!("either --distance or --batch is required");
        };
        let mut request = TripRequest::new(distance, self.cycle_used);
        request.start_time = self.start;
        Ok(vec![request])
    }
}

fn parse_start(s: &str) -> Result<NaiveDateTime, String> {
    parse_start_time(s)
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD HH:MM:SS, got {s:?}"))
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PlannerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => PlannerConfig::default(),
    };
    let planner = TripPlanner::new(config).context("invalid planner configuration")?;
    let requests = cli.requests()?;
    let header = cli.log_header();

    let t0 = Instant::now();
    let results = planner.plan_batch(&requests);
    info!(trips = requests.len(), elapsed_ms = t0.elapsed().as_millis() as u64, "planning done");

    let mut plans: Vec<TripPlan> = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for (i, result) in results.into_iter().enumerate() {
        match result {
            Ok(plan) => plans.push(plan),
            Err(e) if requests.len() == 1 => return Err(e).context("trip could not be planned"),
            Err(e) => {
                warn!(trip = i + 1, error = %e, "trip skipped");
                failures += 1;
            }
        }
    }

    if let Some(dir) = &cli.out {
        write_logs(dir, &plans, header.as_ref())?;
    }

    match cli.format {
        OutputFormat::Json => {
            let json = if plans.len() == 1 && cli.batch.is_none() {
                serde_json::to_string_pretty(&plans[0])?
            } else {
                serde_json::to_string_pretty(&plans)?
            };
            println!("{json}");
        }
        OutputFormat::Table => {
            for (i, plan) in plans.iter().enumerate() {
                if plans.len() > 1 {
                    println!("── Trip {} ──", i + 1);
                }
                print_table(plan);
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} trips could not be planned", requests.len());
    }
    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

/// One trip goes straight into `dir`; a batch gets `dir/trip-N/` per plan.
fn write_logs(dir: &Path, plans: &[TripPlan], header: Option<&LogSheetHeader>) -> Result<()> {
    for (i, plan) in plans.iter().enumerate() {
        let target = if plans.len() == 1 { dir.to_path_buf() } else { dir.join(format!("trip-{}", i + 1)) };
        fs::create_dir_all(&target)
            .with_context(|| format!("creating {}", target.display()))?;
        let mut writer = CsvWriter::new(&target)?;
        write_trip_plan(&mut writer, plan, header)?;
        info!(dir = %target.display(), days = plan.num_days, "daily logs written");
    }
    Ok(())
}

fn print_table(plan: &TripPlan) {
    println!("Distance           : {:.1} mi", plan.total_distance);
    println!("Start              : {}", plan.start_time);
    println!("Arrive             : {}", plan.end_time());
    println!("Driving time       : {:.2} h", plan.total_driving_time);
    println!("On-duty time       : {:.2} h", plan.total_on_duty_time);
    println!("Total duration     : {:.2} h", plan.estimated_duration_hours);
    println!("Rest breaks        : {}", plan.num_rest_breaks);
    println!("Fuel stops         : {}", plan.num_fuel_stops);
    println!(
        "Cycle hours        : {:.1} used, {:.1} available, {:.1} left after trip",
        plan.cycle_hours_used,
        plan.cycle_hours_available,
        plan.cycle_hours_remaining()
    );

    let d = &plan.diagnostics;
    if d.truncated {
        println!("WARNING: plan truncated, {:.1} mi unplanned", d.unplanned_miles);
    }
    if d.cycle_limit_exceeded {
        println!("WARNING: trip exceeds the cycle limit");
    }
    if d.logs_dropped > 0 {
        println!("WARNING: {} segments not logged (day limit)", d.logs_dropped);
    }

    println!();
    println!(
        "{:<12} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "date", "miles", "driving", "on-duty", "off-duty", "sleeper"
    );
    for log in &plan.daily_logs {
        println!(
            "{:<12} {:>8.1} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
            log.date.to_string(),
            log.total_miles,
            log.driving_hours,
            log.on_duty_hours,
            log.off_duty_hours,
            log.sleeper_hours,
        );
    }
    println!();
}
