//! Core plan types: `Activity` and `Segment`.

use chrono::NaiveDateTime;
use hos_core::SegmentKind;
use hos_core::time::hours_to_duration;
use serde::{Deserialize, Serialize};

// ── Activity ──────────────────────────────────────────────────────────────────

/// What a segment is for.  Serialized as its log-sheet label.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Activity {
    Pickup,
    Driving,
    #[serde(rename = "Fuel Stop")]
    FuelStop,
    #[serde(rename = "Off Duty - Rest Break")]
    RestBreak,
    Dropoff,
}

impl Activity {
    /// The segment kind an activity is always recorded as.
    #[inline]
    pub fn kind(self) -> SegmentKind {
        match self {
            Activity::Driving   => SegmentKind::Driving,
            Activity::RestBreak => SegmentKind::Rest,
            Activity::Pickup | Activity::FuelStop | Activity::Dropoff => SegmentKind::OnDuty,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Activity::Pickup    => "Pickup",
            Activity::Driving   => "Driving",
            Activity::FuelStop  => "Fuel Stop",
            Activity::RestBreak => "Off Duty - Rest Break",
            Activity::Dropoff   => "Dropoff",
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── Segment ───────────────────────────────────────────────────────────────────

/// One contiguous block of the trip timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Always `activity.kind()`; stored so serialized plans carry it.
    pub kind:           SegmentKind,
    pub activity:       Activity,
    pub start_time:     NaiveDateTime,
    pub duration_hours: f64,
    /// Zero for every non-driving segment.
    pub distance_miles: f64,
}

impl Segment {
    /// A non-driving segment of `activity`.
    pub fn stationary(activity: Activity, start_time: NaiveDateTime, duration_hours: f64) -> Self {
        Self {
            kind: activity.kind(),
            activity,
            start_time,
            duration_hours,
            distance_miles: 0.0,
        }
    }

    /// A driving segment covering `distance_miles`.
    pub fn driving(start_time: NaiveDateTime, duration_hours: f64, distance_miles: f64) -> Self {
        Self {
            kind: SegmentKind::Driving,
            activity: Activity::Driving,
            start_time,
            duration_hours,
            distance_miles,
        }
    }

    /// `start_time + duration_hours`, or `start_time` if that overflows.
    pub fn end_time(&self) -> NaiveDateTime {
        self.start_time
            .checked_add_signed(hours_to_duration(self.duration_hours))
            .unwrap_or(self.start_time)
    }

    #[inline]
    pub fn is_rest(&self) -> bool {
        self.kind == SegmentKind::Rest
    }

    #[inline]
    pub fn is_driving(&self) -> bool {
        self.kind == SegmentKind::Driving
    }
}
