//! Segment kinds and ELD duty statuses.
//!
//! The planner reasons in three [`SegmentKind`]s; a log sheet has four
//! [`DutyStatus`] lines.  Sleeper berth has no segment kind because split
//! sleeper-berth provisions are not modelled.

use serde::{Deserialize, Serialize};

use crate::HosError;

// ── SegmentKind ───────────────────────────────────────────────────────────────

/// What the driver is doing during a planned segment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Driving,
    /// On duty, not driving (pickup, dropoff, fueling).
    OnDuty,
    /// Off duty.
    Rest,
}

impl SegmentKind {
    /// The log-sheet line this kind is drawn on.
    #[inline]
    pub fn duty_status(self) -> DutyStatus {
        match self {
            SegmentKind::Rest    => DutyStatus::OffDuty,
            SegmentKind::Driving => DutyStatus::Driving,
            SegmentKind::OnDuty  => DutyStatus::OnDutyNotDriving,
        }
    }

    /// `true` for kinds that count against the on-duty limit.
    #[inline]
    pub fn is_on_duty(self) -> bool {
        !matches!(self, SegmentKind::Rest)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Driving => "driving",
            SegmentKind::OnDuty  => "on_duty",
            SegmentKind::Rest    => "rest",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── DutyStatus ────────────────────────────────────────────────────────────────

/// The four canonical ELD duty statuses, serialized as their status code.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum DutyStatus {
    OffDuty          = 1,
    SleeperBerth     = 2,
    Driving          = 3,
    OnDutyNotDriving = 4,
}

impl DutyStatus {
    /// All statuses in log-sheet line order.
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::OffDuty,
        DutyStatus::SleeperBerth,
        DutyStatus::Driving,
        DutyStatus::OnDutyNotDriving,
    ];

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(DutyStatus::OffDuty),
            2 => Some(DutyStatus::SleeperBerth),
            3 => Some(DutyStatus::Driving),
            4 => Some(DutyStatus::OnDutyNotDriving),
            _ => None,
        }
    }

    /// Zero-based line index on the log grid.
    #[inline]
    pub fn line(self) -> usize {
        self as usize - 1
    }

    pub fn label(self) -> &'static str {
        match self {
            DutyStatus::OffDuty          => "Off Duty",
            DutyStatus::SleeperBerth     => "Sleeper Berth",
            DutyStatus::Driving          => "Driving",
            DutyStatus::OnDutyNotDriving => "On Duty (Not Driving)",
        }
    }
}

impl From<DutyStatus> for u8 {
    #[inline]
    fn from(status: DutyStatus) -> u8 {
        status.code()
    }
}

impl TryFrom<u8> for DutyStatus {
    type Error = HosError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        DutyStatus::from_code(code)
            .ok_or_else(|| HosError::Parse(format!("unknown duty status code {code}")))
    }
}

impl std::fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
