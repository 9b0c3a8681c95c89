//! Planner observer trait for diagnostics and instrumentation.

use chrono::NaiveDateTime;
use hos_core::TimeFallback;

use crate::{DutyCycle, Segment};

/// Callbacks invoked by [`SegmentPlanner::plan_observed`][crate::SegmentPlanner::plan_observed]
/// as the plan is built.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: rest counter
///
/// ```rust,ignore
/// struct RestCounter(usize);
///
/// impl PlanObserver for RestCounter {
///     fn on_rest(&mut self, _at: NaiveDateTime, _closed: &DutyCycle) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait PlanObserver {
    /// Called after every segment is appended.
    fn on_segment(&mut self, _segment: &Segment) {}

    /// Called when a rest break starts, with the duty cycle it closes.
    fn on_rest(&mut self, _at: NaiveDateTime, _closed: &DutyCycle) {}

    /// Called when the clock could not be advanced exactly.
    fn on_time_fallback(&mut self, _at: NaiveDateTime, _reason: TimeFallback) {}

    /// Called once if the iteration cap stops the loop before arrival.
    fn on_truncated(&mut self, _remaining_miles: f64, _iterations: u32) {}
}

/// A [`PlanObserver`] that does nothing.
pub struct NoopObserver;

impl PlanObserver for NoopObserver {}
