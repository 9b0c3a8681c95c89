//! `hos-core` — foundational types for the `rust_hos` trip planner.
//!
//! This crate is a dependency of every other `hos-*` crate.  It has no
//! `hos-*` dependencies of its own.
//!
//! # What lives here
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`time`]    | `add_hours`, `TimeStep`, `TimeFallback`, range helpers     |
//! | [`rules`]   | `HosRules`, `PlannerLimits`, `PlannerConfig` (TOML)        |
//! | [`duty`]    | `SegmentKind`, `DutyStatus` (ELD status codes 1–4)         |
//! | [`error`]   | `HosError`, `HosResult`                                    |
//!
//! # Rule sets are values
//!
//! Nothing in the workspace reads a global constant for an HOS limit.  The
//! planner, aggregator, and orchestrator all receive a [`PlannerConfig`]
//! (or one of its halves) by reference, so an alternate jurisdiction is a
//! different value, not a different build.

pub mod duty;
pub mod error;
pub mod rules;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use duty::{DutyStatus, SegmentKind};
pub use error::{HosError, HosResult};
pub use rules::{HosRules, PlannerConfig, PlannerLimits};
pub use time::{TimeFallback, TimeStep, add_hours, add_hours_capped};
