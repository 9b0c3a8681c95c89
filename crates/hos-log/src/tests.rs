//! Unit tests for hos-log.

use chrono::{NaiveDate, NaiveDateTime};
use hos_core::{DutyStatus, HosRules, PlannerLimits};
use hos_plan::{Activity, Segment, SegmentPlanner};

use crate::{DailyLogAggregator, LogBook, split_at_midnight};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

/// Monday 2024-03-04 06:00.
fn monday_6am() -> NaiveDateTime {
    at(2024, 3, 4, 6)
}

fn plan_segments(distance: f64) -> Vec<Segment> {
    let rules = HosRules::default();
    let limits = PlannerLimits::default();
    SegmentPlanner::new(&rules, &limits)
        .plan(distance, monday_6am())
        .segments
}

fn logs_for(distance: f64) -> LogBook {
    DailyLogAggregator::default().aggregate(&plan_segments(distance), monday_6am())
}

/// `n` back-to-back rest breaks of `hours` each.
fn rests(start: NaiveDateTime, n: usize, hours: f64) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::with_capacity(n);
    let mut t = start;
    for _ in 0..n {
        let seg = Segment::stationary(Activity::RestBreak, t, hours);
        t = seg.end_time();
        out.push(seg);
    }
    out
}

const EPS: f64 = 1e-6;

fn check_book(book: &LogBook) {
    for pair in book.logs.windows(2) {
        assert!(pair[0].date < pair[1].date, "dates out of order");
    }
    for log in &book.logs {
        let grid: f64 = log.status_hours().iter().sum();
        assert!((grid - 24.0).abs() < EPS, "{} grid sums to {grid}", log.date);
        assert!(log.driving_hours <= log.on_duty_hours + EPS);
        assert_eq!(log.sleeper_hours, 0.0);
        for entry in &log.timeline {
            assert_eq!(entry.start_time.date(), log.date);
            let h = entry.start_hour();
            assert!((0.0..24.0).contains(&h), "start hour {h}");
            assert!(entry.end_hour() <= 24.0 + EPS, "entry runs past midnight");
        }
        let miles: f64 = log.timeline.iter().map(|e| e.distance_miles).sum();
        assert!((miles - log.total_miles).abs() < EPS);
    }
}

// ── Midnight splitting ────────────────────────────────────────────────────────

#[cfg(test)]
mod splitting {
    use super::*;

    #[test]
    fn same_day_is_one_piece() {
        let pieces = split_at_midnight(at(2024, 3, 4, 6), 3.0);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(pieces[0].hours, 3.0);
    }

    #[test]
    fn ending_exactly_at_midnight_stays_on_one_day() {
        let pieces = split_at_midnight(at(2024, 3, 4, 22), 2.0);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].hours, 2.0);
    }

    #[test]
    fn crossing_midnight_cuts_in_two() {
        let pieces = split_at_midnight(at(2024, 3, 4, 20), 10.0);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].hours, 4.0);
        assert_eq!(pieces[1].start, at(2024, 3, 5, 0));
        assert!((pieces[1].hours - 6.0).abs() < EPS);
    }

    #[test]
    fn multi_day_stretch() {
        let pieces = split_at_midnight(at(2024, 3, 4, 22), 27.0);
        let hours: Vec<f64> = pieces.iter().map(|p| p.hours).collect();
        assert_eq!(pieces.len(), 3);
        assert!((hours[0] - 2.0).abs() < EPS);
        assert!((hours[1] - 24.0).abs() < EPS);
        assert!((hours[2] - 1.0).abs() < EPS);
        assert_eq!(pieces[2].date, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
    }

    #[test]
    fn end_of_calendar_is_not_split() {
        let pieces = split_at_midnight(at(9999, 12, 31, 22), 4.0);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].hours, 4.0);
    }

    #[test]
    fn non_finite_hours_stop_at_midnight() {
        for hours in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let pieces = split_at_midnight(at(2024, 3, 4, 6), hours);
            assert_eq!(pieces.len(), 1, "{hours}");
            assert_eq!(pieces[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
            assert_eq!(pieces[0].hours, 18.0);
        }
    }

    #[test]
    fn huge_hours_run_to_end_of_calendar() {
        let pieces = split_at_midnight(at(9999, 12, 30, 12), 1e300);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].hours, 12.0);
        assert_eq!(pieces[1].date, NaiveDate::from_ymd_opt(9999, 12, 31).unwrap());
        assert!(pieces[1].hours > 1e299);
    }

    #[test]
    fn zero_hours_still_yields_a_piece() {
        let pieces = split_at_midnight(at(2024, 3, 4, 6), 0.0);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].hours, 0.0);
    }
}

// ── Aggregation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod aggregation {
    use super::*;

    #[test]
    fn short_trip_is_one_day() {
        let book = logs_for(100.0);
        assert_eq!(book.num_days(), 1);
        let log = &book.logs[0];
        assert_eq!(log.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert!((log.total_miles - 100.0).abs() < EPS);
        assert!((log.driving_hours - 100.0 / 55.0).abs() < EPS);
        assert!((log.on_duty_hours - (2.0 + 100.0 / 55.0)).abs() < EPS);
        assert!((log.off_duty_hours - (22.0 - 100.0 / 55.0)).abs() < EPS);
        assert_eq!(log.timeline.len(), 3);
        assert_eq!(log.timeline[0].start_hour(), 6.0);
        assert_eq!(log.timeline[0].status, DutyStatus::OnDutyNotDriving);
        assert_eq!(log.timeline[1].status, DutyStatus::Driving);
        assert_eq!(log.hours_for(DutyStatus::Driving), log.driving_hours);
        assert_eq!(log.hours_for(DutyStatus::SleeperBerth), 0.0);
        assert!((log.hours_for(DutyStatus::OnDutyNotDriving) - 2.0).abs() < EPS);
        check_book(&book);
    }

    #[test]
    fn long_trip_spans_several_days() {
        let book = logs_for(2000.0);
        assert!(book.num_days() >= 2);
        assert_eq!(book.logs[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert!((book.total_miles() - 2000.0).abs() < 1e-3);
        assert_eq!(book.date_fallbacks, 0);
        assert_eq!(book.segments_dropped, 0);
        check_book(&book);
    }

    #[test]
    fn rest_over_midnight_lands_on_both_sheets() {
        // Pickup 06-07, drive 07-18, rest 18-04.
        let book = logs_for(2000.0);
        let first = &book.logs[0];
        let last = first.timeline.last().unwrap();
        assert_eq!(last.activity, Activity::RestBreak);
        assert!((last.start_hour() - 18.0).abs() < EPS);
        assert!((last.duration_hours - 6.0).abs() < EPS);

        let second = &book.logs[1];
        let head = &second.timeline[0];
        assert_eq!(head.activity, Activity::RestBreak);
        assert_eq!(head.start_hour(), 0.0);
        assert!((head.duration_hours - 4.0).abs() < EPS);
    }

    #[test]
    fn split_driving_prorates_miles() {
        let seg = Segment::driving(at(2024, 3, 4, 22), 4.0, 220.0);
        let book = DailyLogAggregator::default().aggregate(&[seg], at(2024, 3, 4, 22));
        assert_eq!(book.num_days(), 2);
        assert!((book.logs[0].total_miles - 110.0).abs() < EPS);
        assert!((book.logs[1].total_miles - 110.0).abs() < EPS);
        assert!((book.logs[1].driving_hours - 2.0).abs() < EPS);
        check_book(&book);
    }

    #[test]
    fn many_trip_lengths_keep_sheet_invariants() {
        for d in [1.0, 55.0, 605.0, 999.0, 1000.0, 1200.0, 2750.0, 4999.0, 5000.0] {
            let book = logs_for(d);
            assert!(book.num_days() >= 1, "{d} mi");
            check_book(&book);
        }
    }

    #[test]
    fn first_sheet_is_dated_by_first_segment() {
        let segs = rests(monday_6am(), 2, 4.0);
        let book = DailyLogAggregator::default().aggregate(&segs, at(2024, 3, 1, 6));
        assert_eq!(book.num_days(), 1);
        assert_eq!(book.logs[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(book.logs[0].timeline.len(), 2);
        assert_eq!(book.date_fallbacks, 0);
        check_book(&book);
    }

    #[test]
    fn empty_input_gives_empty_book() {
        let book = DailyLogAggregator::default().aggregate(&[], monday_6am());
        assert!(book.logs.is_empty());
        assert_eq!(book.segments_dropped, 0);
    }
}

// ── Caps and fallbacks ────────────────────────────────────────────────────────

#[cfg(test)]
mod limits {
    use super::*;

    #[test]
    fn default_cap_is_thirty_logs() {
        assert_eq!(DailyLogAggregator::default().max_daily_logs(), 30);
    }

    #[test]
    fn log_cap_drops_the_tail() {
        let segs = rests(monday_6am(), 80, 10.0);
        let book = DailyLogAggregator::default().aggregate(&segs, monday_6am());
        assert_eq!(book.num_days(), 30);
        assert!(book.segments_dropped > 0);
        assert!(book.segments_dropped < segs.len());
        check_book(&book);
    }

    #[test]
    fn small_cap() {
        let segs = rests(monday_6am(), 10, 10.0);
        let book = DailyLogAggregator::new(2).aggregate(&segs, monday_6am());
        assert_eq!(book.num_days(), 2);
        // Rests run 06-16, 16-02, 02-12, 12-22, 22-08: the fifth reaches day 3.
        assert_eq!(book.segments_dropped, 6);
    }

    #[test]
    fn zero_cap_logs_nothing() {
        let segs = rests(monday_6am(), 3, 10.0);
        let book = DailyLogAggregator::new(0).aggregate(&segs, monday_6am());
        assert!(book.logs.is_empty());
        assert_eq!(book.segments_dropped, 3);
    }

    #[test]
    fn undatable_segment_goes_on_open_sheet() {
        let start = at(9999, 12, 31, 20);
        let segs = vec![
            Segment::stationary(Activity::Pickup, start, 1.0),
            Segment::driving(at(10000, 1, 1, 1), 2.0, 110.0),
        ];
        let book = DailyLogAggregator::default().aggregate(&segs, start);
        assert_eq!(book.num_days(), 1);
        assert_eq!(book.date_fallbacks, 1);
        assert_eq!(book.logs[0].date, start.date());
        assert!((book.logs[0].total_miles - 110.0).abs() < EPS);
    }

    #[test]
    fn non_finite_duration_is_cut_at_midnight() {
        for hours in [f64::INFINITY, f64::NAN] {
            let segs = vec![
                Segment::stationary(Activity::Pickup, monday_6am(), 1.0),
                Segment::stationary(Activity::RestBreak, at(2024, 3, 4, 7), hours),
            ];
            let book = DailyLogAggregator::default().aggregate(&segs, monday_6am());
            assert_eq!(book.num_days(), 1, "{hours}");
            assert_eq!(book.date_fallbacks, 1);
            assert_eq!(book.segments_dropped, 0);
            assert!((book.logs[0].timeline[1].duration_hours - 17.0).abs() < EPS);
            check_book(&book);
        }
    }

    #[test]
    fn out_of_order_segment_is_a_fallback() {
        let segs = vec![
            Segment::stationary(Activity::Pickup, at(2024, 3, 5, 6), 1.0),
            Segment::stationary(Activity::Dropoff, at(2024, 3, 4, 6), 1.0),
        ];
        let book = DailyLogAggregator::default().aggregate(&segs, at(2024, 3, 5, 6));
        assert_eq!(book.num_days(), 1);
        assert_eq!(book.date_fallbacks, 1);
        assert!((book.logs[0].on_duty_hours - 2.0).abs() < EPS);
    }
}

// ── Serde shape ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod serde_shape {
    use super::*;

    #[test]
    fn timeline_entry_status_is_grid_code() {
        let book = logs_for(100.0);
        let json = serde_json::to_value(&book.logs[0]).unwrap();
        assert_eq!(json["date"], "2024-03-04");
        assert_eq!(json["timeline"][1]["status"], 3);
        assert_eq!(json["timeline"][1]["activity"], "Driving");
    }
}
