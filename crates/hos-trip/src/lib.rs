//! `hos-trip` — plans a whole trip: segments, daily logs, and summary.
//!
//! # Pipeline
//!
//! ```text
//! TripRequest ──validate──▶ SegmentPlanner ──segments──▶ DailyLogAggregator
//!                                                              │
//!                              TripPlan ◀──summary + diagnostics┘
//! ```
//!
//! Invalid input is the only error.  Everything else that can go wrong
//! (time arithmetic falling back, an undatable segment, the iteration or
//! log cap being reached) still produces a plan and is reported in
//! [`PlanDiagnostics`].
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | [`TripPlanner::plan_batch`] runs on Rayon's thread pool.|
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hos_trip::{TripPlanner, TripRequest};
//!
//! let planner = TripPlanner::with_default_rules();
//! let plan = planner.plan(&TripRequest::new(1_200.0, 20.0))?;
//! println!("{} days, {} fuel stops", plan.num_days, plan.num_fuel_stops);
//! ```

pub mod batch;
pub mod loader;
pub mod orchestrator;
pub mod plan;


pub use loader::{load_trips_csv, load_trips_reader, parse_start_time};
pub use orchestrator::TripPlanner;
pub use plan::{PlanDiagnostics, TripPlan, TripRequest};
