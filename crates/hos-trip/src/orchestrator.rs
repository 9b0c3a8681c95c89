//! `TripPlanner`: validation, planning, aggregation, summary.

use chrono::NaiveDateTime;
use hos_core::time;
use hos_core::{HosError, HosResult, PlannerConfig};
use hos_log::DailyLogAggregator;
use hos_plan::{NoopObserver, PlanObserver, SegmentPlanner};
use tracing::{info, warn};

use crate::{PlanDiagnostics, TripPlan, TripRequest};

/// Plans trips under one [`PlannerConfig`].
///
/// Owns only immutable configuration, so one planner can serve any number of
/// requests, from any number of threads.
#[derive(Clone, Debug)]
pub struct TripPlanner {
    config: PlannerConfig,
}

impl TripPlanner {
    /// A planner for `config`, which is validated first.
    pub fn new(config: PlannerConfig) -> HosResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// A planner for the FMCSA property-carrying rules and default limits.
    pub fn with_default_rules() -> Self {
        Self { config: PlannerConfig::default() }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan one trip.
    ///
    /// # Errors
    ///
    /// [`HosError::InvalidInput`] if the distance is not in
    /// `(0, limits.max_trip_miles]` or the used cycle hours are negative or
    /// not finite.  Nothing is planned in that case.
    pub fn plan(&self, request: &TripRequest) -> HosResult<TripPlan> {
        self.plan_observed(request, &mut NoopObserver)
    }

    /// Like [`plan`][Self::plan] but forwards planner events to `observer`.
    pub fn plan_observed<O: PlanObserver>(
        &self,
        request:  &TripRequest,
        observer: &mut O,
    ) -> HosResult<TripPlan> {
        self.validate(request)?;

        let rules = &self.config.rules;
        let limits = &self.config.limits;
        let distance = request.distance_miles;
        let cycle_used = request.current_cycle_used_hours;
        let (start_time, start_fallback) = resolve_start(request.start_time);

        // ── Closed-form totals ────────────────────────────────────────────
        let num_fuel_stops = rules.fuel_stops_for(distance);
        let total_driving_time = rules.hours_for_miles(distance);
        let total_on_duty_time = total_driving_time
            + 2.0 * rules.pickup_dropoff_hours
            + num_fuel_stops as f64 * rules.fuel_stop_hours;

        // ── Segments and logs ─────────────────────────────────────────────
        let segment_plan =
            SegmentPlanner::new(rules, limits).plan_observed(distance, start_time, observer);
        let book = DailyLogAggregator::from_limits(limits).aggregate(&segment_plan.segments, start_time);

        let cycle_limit_exceeded = cycle_used + segment_plan.on_duty_hours() > rules.max_cycle_hours;
        if cycle_limit_exceeded {
            warn!(
                cycle_used,
                trip_on_duty = segment_plan.on_duty_hours(),
                max_cycle_hours = rules.max_cycle_hours,
                "trip would exceed the duty cycle limit"
            );
        }

        let diagnostics = PlanDiagnostics {
            truncated:       segment_plan.truncated,
            unplanned_miles: segment_plan.unplanned_miles,
            time_fallbacks:  segment_plan.time_fallbacks + u32::from(start_fallback),
            date_fallbacks:  book.date_fallbacks,
            logs_dropped:    book.segments_dropped,
            cycle_limit_exceeded,
        };

        let logged_miles = book.total_miles();
        let plan = TripPlan {
            start_time,
            total_distance:           distance,
            total_driving_time,
            total_on_duty_time,
            estimated_duration_hours: segment_plan.total_hours(),
            num_rest_breaks:          segment_plan.rest_breaks(),
            num_fuel_stops,
            num_days:                 book.logs.len(),
            segments:                 segment_plan.segments,
            daily_logs:               book.logs,
            cycle_hours_used:         cycle_used,
            cycle_hours_available:    rules.max_cycle_hours - cycle_used,
            diagnostics,
        };

        info!(
            distance,
            logged_miles,
            segments = plan.segments.len(),
            days = plan.num_days,
            rests = plan.num_rest_breaks,
            fuel_stops = plan.num_fuel_stops,
            hours = plan.estimated_duration_hours,
            clean = plan.diagnostics.is_clean(),
            "trip planned"
        );
        Ok(plan)
    }

    fn validate(&self, request: &TripRequest) -> HosResult<()> {
        let distance = request.distance_miles;
        let max_miles = self.config.limits.max_trip_miles;
        if !distance.is_finite() || distance <= 0.0 {
            return Err(HosError::InvalidInput(format!(
                "distance must be a positive number of miles, got {distance}"
            )));
        }
        if distance > max_miles {
            return Err(HosError::InvalidInput(format!(
                "distance {distance} mi exceeds the {max_miles} mi limit"
            )));
        }

        let used = request.current_cycle_used_hours;
        if !used.is_finite() || used < 0.0 {
            return Err(HosError::InvalidInput(format!(
                "current cycle used hours must be >= 0, got {used}"
            )));
        }
        Ok(())
    }
}

/// The departure time to plan from, and whether it had to be substituted.
fn resolve_start(requested: Option<NaiveDateTime>) -> (NaiveDateTime, bool) {
    match requested {
        None => (time::now(), false),
        Some(t) if time::in_range(&t) => (t, false),
        Some(t) => {
            warn!(start = %t, "start time outside representable range; using current time");
            (time::now(), true)
        }
    }
}
