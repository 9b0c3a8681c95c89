//! Unit tests for hos-plan.

use chrono::{NaiveDate, NaiveDateTime};
use hos_core::{HosRules, PlannerLimits};

use crate::{Activity, SegmentPlan, SegmentPlanner};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Monday 2024-03-04 06:00.
fn monday_6am() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 4)
        .unwrap()
        .and_hms_opt(6, 0, 0)
        .unwrap()
}

fn plan(distance: f64) -> SegmentPlan {
    let rules = HosRules::default();
    let limits = PlannerLimits::default();
    SegmentPlanner::new(&rules, &limits).plan(distance, monday_6am())
}

const EPS: f64 = 1e-9;

/// Assert every structural property a plan must have under `rules`.
fn check_invariants(plan: &SegmentPlan, distance: f64, rules: &HosRules) {
    let segs = &plan.segments;
    assert!(segs.len() >= 2);
    assert_eq!(segs.first().unwrap().activity, Activity::Pickup);
    assert_eq!(segs.last().unwrap().activity, Activity::Dropoff);

    for pair in segs.windows(2) {
        assert_eq!(pair[0].end_time(), pair[1].start_time, "gap after {:?}", pair[0]);
    }

    let (mut driving, mut on_duty) = (0.0, 0.0);
    for seg in segs {
        assert!(seg.duration_hours > 0.0, "empty segment {seg:?}");
        assert_eq!(seg.kind, seg.activity.kind());
        if seg.is_rest() {
            assert_eq!(seg.duration_hours, rules.min_rest_hours);
            driving = 0.0;
            on_duty = 0.0;
            continue;
        }
        if seg.is_driving() {
            driving += seg.duration_hours;
        } else {
            assert_eq!(seg.distance_miles, 0.0);
        }
        on_duty += seg.duration_hours;
        assert!(driving <= rules.max_driving_hours + EPS, "driving {driving} in one window");
        assert!(on_duty <= rules.max_on_duty_hours + EPS, "on duty {on_duty} in one window");
    }

    for fuel in segs.iter().filter(|s| s.activity == Activity::FuelStop) {
        assert_eq!(fuel.duration_hours, rules.fuel_stop_hours);
        assert_eq!(fuel.distance_miles, 0.0);
    }

    if !plan.truncated {
        assert_eq!(plan.fuel_stops() as u32, rules.fuel_stops_for(distance));
    }
    assert!((plan.planned_miles() + plan.unplanned_miles - distance).abs() < 1e-6);
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn short_trip_is_three_segments() {
        let p = plan(100.0);
        let acts: Vec<Activity> = p.segments.iter().map(|s| s.activity).collect();
        assert_eq!(acts, vec![Activity::Pickup, Activity::Driving, Activity::Dropoff]);

        assert_eq!(p.segments[0].duration_hours, 1.0);
        assert!((p.segments[1].duration_hours - 100.0 / 55.0).abs() < EPS);
        assert!((p.segments[1].distance_miles - 100.0).abs() < EPS);
        assert_eq!(p.segments[2].duration_hours, 1.0);
        assert!(!p.truncated);
        assert!(p.unplanned_miles < 1e-9);
        assert_eq!(p.time_fallbacks, 0);
    }

    #[test]
    fn twelve_hundred_miles_has_one_fuel_stop_between_drives() {
        let p = plan(1_200.0);
        assert_eq!(p.fuel_stops(), 1);
        let idx = p
            .segments
            .iter()
            .position(|s| s.activity == Activity::FuelStop)
            .unwrap();
        assert_eq!(p.segments[idx - 1].activity, Activity::Driving);
        assert_eq!(p.segments[idx + 1].activity, Activity::Driving);
        check_invariants(&p, 1_200.0, &HosRules::default());
    }

    #[test]
    fn fuel_stop_lands_on_the_thousand_mile_mark() {
        let p = plan(1_200.0);
        let idx = p
            .segments
            .iter()
            .position(|s| s.activity == Activity::FuelStop)
            .unwrap();
        let odometer: f64 = p.segments[..idx].iter().map(|s| s.distance_miles).sum();
        assert!((odometer - 1_000.0).abs() < 1e-6, "fuelled at {odometer}");
    }

    #[test]
    fn twelve_hundred_mile_sequence() {
        let acts: Vec<Activity> = plan(1_200.0).segments.iter().map(|s| s.activity).collect();
        assert_eq!(
            acts,
            vec![
                Activity::Pickup,
                Activity::Driving,   // 605 mi, 11 h
                Activity::RestBreak,
                Activity::Driving,   // 395 mi to the mark
                Activity::FuelStop,
                Activity::Driving,   // 200 mi
                Activity::Dropoff,
            ]
        );
    }

    #[test]
    fn two_thousand_miles_rests_and_spans_days() {
        let p = plan(2_000.0);
        assert!(p.rest_breaks() >= 1);
        let last_rest = p.segments.iter().rposition(|s| s.is_rest()).unwrap();
        assert!(last_rest < p.segments.len() - 1);
        assert_eq!(p.segments[last_rest].duration_hours, 10.0);
        assert!(p.end_time().unwrap().date() > monday_6am().date());
        check_invariants(&p, 2_000.0, &HosRules::default());
    }

    #[test]
    fn exact_interval_refuels_before_dropoff() {
        let p = plan(1_000.0);
        assert_eq!(p.fuel_stops(), 1);
        let n = p.segments.len();
        assert_eq!(p.segments[n - 2].activity, Activity::FuelStop);
    }

    #[test]
    fn just_under_interval_has_no_fuel_stop() {
        assert_eq!(plan(999.0).fuel_stops(), 0);
    }

    #[test]
    fn residual_after_fuel_mark_is_dropped() {
        let p = plan(1_003.0);
        assert_eq!(p.fuel_stops(), 1);
        assert!((p.unplanned_miles - 3.0).abs() < 1e-6);
        assert!(!p.truncated);
    }

    #[test]
    fn distance_within_tolerance_is_pickup_and_dropoff() {
        let p = plan(0.4);
        assert_eq!(p.segments.len(), 2);
        assert_eq!(p.iterations, 0);
    }

    #[test]
    fn non_finite_distance_plans_nothing() {
        let p = plan(f64::NAN);
        assert_eq!(p.segments.len(), 2);
        assert!(!p.truncated);
    }

    #[test]
    fn long_trip_well_under_cap() {
        let p = plan(5_000.0);
        assert!(!p.truncated);
        assert!(p.iterations < PlannerLimits::default().max_iterations);
        check_invariants(&p, 5_000.0, &HosRules::default());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn boundary_distances() {
        let rules = HosRules::default();
        for d in [
            0.1, 0.5, 0.6, 5.0, 5.6, 604.9, 605.0, 605.1, 999.99, 1_000.0, 1_000.3,
            1_003.0, 1_005.6, 1_210.0, 2_000.0, 3_333.3, 4_999.9, 5_000.0,
        ] {
            let p = plan(d);
            assert!(!p.truncated, "{d} mi truncated");
            check_invariants(&p, d, &rules);
        }
    }

    #[test]
    fn random_distances() {
        let rules = HosRules::default();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..300 {
            let d: f64 = rng.gen_range(0.01..=5_000.0);
            let p = plan(d);
            assert!(!p.truncated, "{d} mi truncated");
            check_invariants(&p, d, &rules);
        }
    }

    #[test]
    fn dropoff_never_breaks_on_duty_limit() {
        // Trips ending late in a window still fit the dropoff under 14 h.
        let rules = HosRules::default();
        for d in [600.0, 604.0, 1_590.0, 1_595.0, 1_600.0] {
            check_invariants(&plan(d), d, &rules);
        }
    }
}

// ── Alternate rule sets ───────────────────────────────────────────────────────

#[cfg(test)]
mod rule_sets {
    use chrono::NaiveDateTime;
    use hos_core::TimeFallback;

    use super::*;
    use crate::{DutyCycle, PlanObserver, Segment};

    #[test]
    fn shorter_driving_limit() {
        let rules = HosRules { max_driving_hours: 8.0, ..HosRules::default() };
        let limits = PlannerLimits::default();
        let p = SegmentPlanner::new(&rules, &limits).plan(900.0, monday_6am());
        let first_drive = p.segments.iter().find(|s| s.is_driving()).unwrap();
        assert!((first_drive.distance_miles - 440.0).abs() < 1e-6);
        check_invariants(&p, 900.0, &rules);
    }

    #[test]
    fn shorter_rest_and_slower_speed() {
        let rules = HosRules {
            min_rest_hours:    8.0,
            average_speed_mph: 45.0,
            ..HosRules::default()
        };
        let limits = PlannerLimits::default();
        let p = SegmentPlanner::new(&rules, &limits).plan(1_500.0, monday_6am());
        assert!(p.segments.iter().filter(|s| s.is_rest()).all(|s| s.duration_hours == 8.0));
        check_invariants(&p, 1_500.0, &rules);
    }

    #[test]
    fn dropoff_that_would_overrun_waits_for_rest() {
        let rules = HosRules { max_on_duty_hours: 12.0, ..HosRules::default() };
        let limits = PlannerLimits::default();
        let p = SegmentPlanner::new(&rules, &limits).plan(605.0, monday_6am());
        let acts: Vec<Activity> = p.segments.iter().map(|s| s.activity).collect();
        assert_eq!(
            acts,
            vec![Activity::Pickup, Activity::Driving, Activity::RestBreak, Activity::Dropoff]
        );
        check_invariants(&p, 605.0, &rules);
    }

    #[test]
    fn tiny_iteration_cap_truncates() {
        let rules = HosRules::default();
        let limits = PlannerLimits { max_iterations: 2, ..PlannerLimits::default() };
        let p = SegmentPlanner::new(&rules, &limits).plan(2_000.0, monday_6am());
        assert!(p.truncated);
        assert_eq!(p.iterations, 2);
        assert!(p.unplanned_miles > 1_000.0);
        assert_eq!(p.segments.first().unwrap().activity, Activity::Pickup);
        assert_eq!(p.segments.last().unwrap().activity, Activity::Dropoff);
    }

    #[test]
    fn cap_landing_on_arrival_is_not_truncation() {
        let rules = HosRules::default();
        // Pickup, one drive: the loop then only has Finish left.
        let limits = PlannerLimits { max_iterations: 1, ..PlannerLimits::default() };
        let p = SegmentPlanner::new(&rules, &limits).plan(100.0, monday_6am());
        assert!(!p.truncated);
        assert_eq!(p.segments.len(), 3);
    }

    #[derive(Default)]
    struct Recorder {
        segments:  usize,
        rests:     usize,
        fallbacks: Vec<TimeFallback>,
        truncated: Option<f64>,
    }

    impl PlanObserver for Recorder {
        fn on_segment(&mut self, _segment: &Segment) {
            self.segments += 1;
        }
        fn on_rest(&mut self, _at: NaiveDateTime, closed: &DutyCycle) {
            assert!(closed.on_duty_hours > 0.0);
            self.rests += 1;
        }
        fn on_time_fallback(&mut self, _at: NaiveDateTime, reason: TimeFallback) {
            self.fallbacks.push(reason);
        }
        fn on_truncated(&mut self, remaining_miles: f64, _iterations: u32) {
            self.truncated = Some(remaining_miles);
        }
    }

    #[test]
    fn observer_sees_every_segment() {
        let rules = HosRules::default();
        let limits = PlannerLimits::default();
        let mut rec = Recorder::default();
        let p = SegmentPlanner::new(&rules, &limits).plan_observed(2_500.0, monday_6am(), &mut rec);
        assert_eq!(rec.segments, p.segments.len());
        assert_eq!(rec.rests, p.rest_breaks());
        assert!(rec.fallbacks.is_empty());
        assert!(rec.truncated.is_none());
    }

    #[test]
    fn observer_told_about_truncation() {
        let rules = HosRules::default();
        let limits = PlannerLimits { max_iterations: 3, ..PlannerLimits::default() };
        let mut rec = Recorder::default();
        let p = SegmentPlanner::new(&rules, &limits).plan_observed(3_000.0, monday_6am(), &mut rec);
        assert_eq!(rec.truncated, Some(p.unplanned_miles));
    }

    #[test]
    fn end_of_calendar_degrades_instead_of_failing() {
        let start = NaiveDate::from_ymd_opt(9_999, 12, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let rules = HosRules::default();
        let limits = PlannerLimits::default();
        let mut rec = Recorder::default();
        let p = SegmentPlanner::new(&rules, &limits).plan_observed(2_000.0, start, &mut rec);
        assert!(p.time_fallbacks > 0);
        assert_eq!(rec.fallbacks.len() as u32, p.time_fallbacks);
        assert!(rec.fallbacks.iter().all(|f| *f == TimeFallback::ResultOutOfRange));
        assert_eq!(p.segments.last().unwrap().activity, Activity::Dropoff);
    }
}

// ── Serialization ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod serde_shape {
    use super::*;

    #[test]
    fn activity_labels() {
        assert_eq!(serde_json::to_string(&Activity::FuelStop).unwrap(), "\"Fuel Stop\"");
        assert_eq!(
            serde_json::to_string(&Activity::RestBreak).unwrap(),
            "\"Off Duty - Rest Break\""
        );
        assert_eq!(Activity::Pickup.to_string(), "Pickup");
    }

    #[test]
    fn segment_carries_kind() {
        let json = serde_json::to_value(&plan(100.0).segments[0]).unwrap();
        assert_eq!(json["kind"], "on_duty");
        assert_eq!(json["activity"], "Pickup");
        assert_eq!(json["distance_miles"], 0.0);
    }
}
