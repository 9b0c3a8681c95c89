//! The `SegmentPlanner` and its step loop.

use chrono::NaiveDateTime;
use hos_core::time::add_hours_capped;
use hos_core::{HosRules, PlannerLimits};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Activity, DutyCycle, NoopObserver, PlanObserver, Segment};

// ── SegmentPlan ───────────────────────────────────────────────────────────────

/// Output of one planning run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentPlan {
    /// Pickup first, Dropoff last, contiguous in time.
    pub segments:        Vec<Segment>,
    /// `true` if the iteration cap stopped the loop before arrival.
    pub truncated:       bool,
    /// Distance left untraveled: the sub-threshold residual on a normal
    /// finish, or everything remaining when `truncated`.
    pub unplanned_miles: f64,
    /// Clock advances that degraded to a fallback value.
    pub time_fallbacks:  u32,
    /// Loop steps taken (Pickup and Dropoff excluded).
    pub iterations:      u32,
}

impl SegmentPlan {
    pub fn rest_breaks(&self) -> usize {
        self.segments.iter().filter(|s| s.is_rest()).count()
    }

    pub fn fuel_stops(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.activity == Activity::FuelStop)
            .count()
    }

    pub fn planned_miles(&self) -> f64 {
        self.segments.iter().map(|s| s.distance_miles).sum()
    }

    /// Sum of all segment durations.
    pub fn total_hours(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_hours).sum()
    }

    /// Sum of driving and on-duty segment durations.
    pub fn on_duty_hours(&self) -> f64 {
        self.segments
            .iter()
            .filter(|s| s.kind.is_on_duty())
            .map(|s| s.duration_hours)
            .sum()
    }

    /// End of the Dropoff segment.
    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.segments.last().map(Segment::end_time)
    }
}

// ── SegmentPlanner ────────────────────────────────────────────────────────────

/// Splits a trip into driving, fuel, and rest segments under a rule set.
///
/// Holds only borrowed, immutable configuration; construct one per call or
/// share it freely across threads.
#[derive(Copy, Clone, Debug)]
pub struct SegmentPlanner<'a> {
    rules:  &'a HosRules,
    limits: &'a PlannerLimits,
}

impl<'a> SegmentPlanner<'a> {
    pub fn new(rules: &'a HosRules, limits: &'a PlannerLimits) -> Self {
        Self { rules, limits }
    }

    /// Plan `distance_miles` starting at `start_time`.
    pub fn plan(&self, distance_miles: f64, start_time: NaiveDateTime) -> SegmentPlan {
        self.plan_observed(distance_miles, start_time, &mut NoopObserver)
    }

    /// Like [`plan`][Self::plan] but reports progress to `observer`.
    ///
    /// A non-finite or negative distance is planned as zero (Pickup then
    /// Dropoff); rejecting bad trips is the orchestrator's job.
    pub fn plan_observed<O: PlanObserver>(
        &self,
        distance_miles: f64,
        start_time:     NaiveDateTime,
        observer:       &mut O,
    ) -> SegmentPlan {
        let distance = if distance_miles.is_finite() { distance_miles.max(0.0) } else { 0.0 };
        let mut run = Run::new(self.rules, self.limits, distance, start_time, observer);

        run.emit(Segment::stationary(
            Activity::Pickup,
            run.now,
            self.rules.pickup_dropoff_hours,
        ));
        run.cycle.record_on_duty(self.rules.pickup_dropoff_hours);

        let mut finished = false;
        while run.iterations < self.limits.max_iterations {
            match run.next_step() {
                Step::Finish => {
                    finished = true;
                    break;
                }
                step => {
                    run.apply(step);
                    run.iterations += 1;
                }
            }
        }

        // The cap may land exactly on arrival; only unfinished work counts.
        let truncated = !finished && !matches!(run.next_step(), Step::Finish);
        if truncated {
            warn!(
                remaining_miles = run.remaining_miles,
                iterations = run.iterations,
                "iteration cap reached; plan truncated"
            );
            run.observer.on_truncated(run.remaining_miles, run.iterations);
        }
        let unplanned_miles = run.remaining_miles.max(0.0);

        // The dropoff is on-duty time too and must fit in the last window.
        if run.cycle.on_duty_headroom(self.rules) < self.rules.pickup_dropoff_hours {
            run.apply(Step::Rest);
        }
        run.emit(Segment::stationary(
            Activity::Dropoff,
            run.now,
            self.rules.pickup_dropoff_hours,
        ));

        SegmentPlan {
            segments: run.segments,
            truncated,
            unplanned_miles,
            time_fallbacks: run.time_fallbacks,
            iterations: run.iterations,
        }
    }
}

// ── Step machine ──────────────────────────────────────────────────────────────

/// One transition of the planning loop.
#[derive(Copy, Clone, PartialEq, Debug)]
enum Step {
    Drive { miles: f64, hours: f64 },
    Refuel,
    Rest,
    Finish,
}

/// Mutable state of a single planning run.
struct Run<'p, 'o, O: PlanObserver> {
    rules:                &'p HosRules,
    limits:               &'p PlannerLimits,
    observer:             &'o mut O,
    segments:             Vec<Segment>,
    now:                  NaiveDateTime,
    cycle:                DutyCycle,
    remaining_miles:      f64,
    fuel_stops_remaining: u32,
    /// Distance to the next fuel-interval odometer mark.
    miles_to_fuel:        f64,
    time_fallbacks:       u32,
    iterations:           u32,
}

impl<'p, 'o, O: PlanObserver> Run<'p, 'o, O> {
    fn new(
        rules:      &'p HosRules,
        limits:     &'p PlannerLimits,
        distance:   f64,
        start_time: NaiveDateTime,
        observer:   &'o mut O,
    ) -> Self {
        Self {
            rules,
            limits,
            observer,
            segments:             Vec::new(),
            now:                  start_time,
            cycle:                DutyCycle::default(),
            remaining_miles:      distance,
            fuel_stops_remaining: rules.fuel_stops_for(distance),
            miles_to_fuel:        rules.fuel_interval_miles,
            time_fallbacks:       0,
            iterations:           0,
        }
    }

    /// Decide the next transition from the current state.  Pure.
    fn next_step(&self) -> Step {
        let rules = self.rules;
        let min_hours = self.limits.min_segment_hours;
        let on_duty_headroom = self.cycle.on_duty_headroom(rules);

        // A mark closer than one minimum segment is refuelled now rather than
        // reached with a sliver of driving.
        if self.fuel_stops_remaining > 0 && self.miles_to_fuel <= rules.miles_for_hours(min_hours) {
            return if on_duty_headroom < rules.fuel_stop_hours { Step::Rest } else { Step::Refuel };
        }

        if self.remaining_miles <= self.limits.arrival_tolerance_miles {
            return Step::Finish;
        }
        let remaining_hours = rules.hours_for_miles(self.remaining_miles);
        if remaining_hours <= min_hours {
            // Residual below one minimum segment is dropped, not driven.
            return Step::Finish;
        }

        if on_duty_headroom <= 0.0 {
            return Step::Rest;
        }
        let drivable = self
            .cycle
            .driving_headroom(rules)
            .min(on_duty_headroom)
            .min(remaining_hours);
        if drivable <= min_hours {
            return Step::Rest;
        }

        let mut miles = rules.miles_for_hours(drivable).min(self.remaining_miles);
        if self.fuel_stops_remaining > 0 {
            miles = miles.min(self.miles_to_fuel);
        }
        Step::Drive { miles, hours: rules.hours_for_miles(miles) }
    }

    fn apply(&mut self, step: Step) {
        match step {
            Step::Drive { miles, hours } => {
                self.emit(Segment::driving(self.now, hours, miles));
                self.cycle.record_driving(hours);
                self.remaining_miles -= miles;
                if self.fuel_stops_remaining > 0 {
                    self.miles_to_fuel -= miles;
                }
            }
            Step::Refuel => {
                self.emit(Segment::stationary(
                    Activity::FuelStop,
                    self.now,
                    self.rules.fuel_stop_hours,
                ));
                self.cycle.record_on_duty(self.rules.fuel_stop_hours);
                self.fuel_stops_remaining -= 1;
                // Keep marks on the odometer even when refuelled a little early.
                self.miles_to_fuel += self.rules.fuel_interval_miles;
            }
            Step::Rest => {
                self.observer.on_rest(self.now, &self.cycle);
                self.emit(Segment::stationary(
                    Activity::RestBreak,
                    self.now,
                    self.rules.min_rest_hours,
                ));
                self.cycle.reset();
            }
            Step::Finish => {}
        }
    }

    /// Append `segment` (which must start at `self.now`) and advance the clock.
    fn emit(&mut self, segment: Segment) {
        let step = add_hours_capped(
            self.now,
            segment.duration_hours,
            self.limits.max_time_step_hours,
        );
        if let Some(reason) = step.fallback {
            self.time_fallbacks += 1;
            self.observer.on_time_fallback(self.now, reason);
        }

        debug!(
            activity = %segment.activity,
            start = %segment.start_time,
            hours = segment.duration_hours,
            miles = segment.distance_miles,
            "segment planned"
        );
        self.observer.on_segment(&segment);
        self.segments.push(segment);
        self.now = step.time;
    }
}
