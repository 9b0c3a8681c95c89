//! HOS rule sets and planner safety limits.
//!
//! Typically loaded from a TOML file by the application crate and passed to
//! the trip planner:
//!
//! ```toml
//! [rules]
//! max_driving_hours = 11.0
//! max_on_duty_hours = 14.0
//! min_rest_hours    = 10.0
//!
//! [limits]
//! max_iterations = 100
//! ```
//!
//! Every field is `#[serde(default)]`, so a file only needs to name the
//! values it changes.  Missing sections fall back to the FMCSA
//! property-carrying defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{HosError, HosResult};

// ── HosRules ──────────────────────────────────────────────────────────────────

/// Regulatory limits and operating assumptions for one driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HosRules {
    /// Maximum driving hours between rest breaks.
    pub max_driving_hours:    f64,
    /// Maximum on-duty hours (driving included) between rest breaks.
    pub max_on_duty_hours:    f64,
    /// Length of every inserted rest break.
    pub min_rest_hours:       f64,
    /// Rolling on-duty budget over `cycle_days`.
    pub max_cycle_hours:      f64,
    pub cycle_days:           u32,
    pub average_speed_mph:    f64,
    /// Distance between fuel stops.
    pub fuel_interval_miles:  f64,
    pub fuel_stop_hours:      f64,
    /// Duration of the pickup and of the dropoff (each).
    pub pickup_dropoff_hours: f64,
}

impl HosRules {
    /// FMCSA property-carrying rules: 11/14/10, 70 hours over 8 days.
    pub fn property_carrying() -> Self {
        Self {
            max_driving_hours:    11.0,
            max_on_duty_hours:    14.0,
            min_rest_hours:       10.0,
            max_cycle_hours:      70.0,
            cycle_days:           8,
            average_speed_mph:    55.0,
            fuel_interval_miles:  1_000.0,
            fuel_stop_hours:      0.5,
            pickup_dropoff_hours: 1.0,
        }
    }

    /// Driving time for `miles` at the average speed.
    #[inline]
    pub fn hours_for_miles(&self, miles: f64) -> f64 {
        miles / self.average_speed_mph
    }

    /// Distance covered in `hours` at the average speed.
    #[inline]
    pub fn miles_for_hours(&self, hours: f64) -> f64 {
        hours * self.average_speed_mph
    }

    /// Number of fuel stops a trip of `miles` needs: one per full interval.
    pub fn fuel_stops_for(&self, miles: f64) -> u32 {
        (miles / self.fuel_interval_miles).floor().max(0.0) as u32
    }

    fn validate(&self) -> HosResult<()> {
        let positive = [
            ("max_driving_hours",    self.max_driving_hours),
            ("max_on_duty_hours",    self.max_on_duty_hours),
            ("min_rest_hours",       self.min_rest_hours),
            ("max_cycle_hours",      self.max_cycle_hours),
            ("average_speed_mph",    self.average_speed_mph),
            ("fuel_interval_miles",  self.fuel_interval_miles),
            ("fuel_stop_hours",      self.fuel_stop_hours),
            ("pickup_dropoff_hours", self.pickup_dropoff_hours),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(HosError::Config(format!(
                    "rules.{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.cycle_days == 0 {
            return Err(HosError::Config("rules.cycle_days must be > 0".into()));
        }
        if self.max_driving_hours > self.max_on_duty_hours {
            return Err(HosError::Config(format!(
                "rules.max_driving_hours ({}) exceeds rules.max_on_duty_hours ({})",
                self.max_driving_hours, self.max_on_duty_hours
            )));
        }
        if self.fuel_stop_hours > self.max_on_duty_hours {
            return Err(HosError::Config(format!(
                "rules.fuel_stop_hours ({}) cannot fit in one on-duty window ({})",
                self.fuel_stop_hours, self.max_on_duty_hours
            )));
        }
        Ok(())
    }
}

impl Default for HosRules {
    fn default() -> Self {
        Self::property_carrying()
    }
}

// ── PlannerLimits ─────────────────────────────────────────────────────────────

/// Safety thresholds that keep the planner finite and its output sane.
///
/// These are engineering limits, not regulation: they guard against date
/// overflow and floating-point noise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerLimits {
    /// Hard cap on planner loop iterations.
    pub max_iterations:          u32,
    /// Longest accepted trip.
    pub max_trip_miles:          f64,
    /// Remaining distance at or below this counts as arrived.
    pub arrival_tolerance_miles: f64,
    /// Shortest driving segment the planner will emit.
    pub min_segment_hours:       f64,
    /// Largest single clock advance (see [`crate::time::add_hours_capped`]).
    pub max_time_step_hours:     f64,
    /// Most daily logs produced for one trip.
    pub max_daily_logs:          usize,
}

impl PlannerLimits {
    fn validate(&self) -> HosResult<()> {
        if self.max_iterations == 0 {
            return Err(HosError::Config("limits.max_iterations must be > 0".into()));
        }
        if self.max_daily_logs == 0 {
            return Err(HosError::Config("limits.max_daily_logs must be > 0".into()));
        }
        let positive = [
            ("max_trip_miles",      self.max_trip_miles),
            ("min_segment_hours",   self.min_segment_hours),
            ("max_time_step_hours", self.max_time_step_hours),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(HosError::Config(format!(
                    "limits.{name} must be a positive number, got {value}"
                )));
            }
        }
        if !(self.arrival_tolerance_miles.is_finite() && self.arrival_tolerance_miles >= 0.0) {
            return Err(HosError::Config(format!(
                "limits.arrival_tolerance_miles must be >= 0, got {}",
                self.arrival_tolerance_miles
            )));
        }
        Ok(())
    }
}

impl Default for PlannerLimits {
    fn default() -> Self {
        Self {
            max_iterations:          100,
            max_trip_miles:          5_000.0,
            arrival_tolerance_miles: 0.5,
            min_segment_hours:       0.1,
            max_time_step_hours:     240.0,
            max_daily_logs:          30,
        }
    }
}

// ── PlannerConfig ─────────────────────────────────────────────────────────────

/// Top-level planner configuration: the rule set plus safety limits.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub rules:  HosRules,
    pub limits: PlannerLimits,
}

impl PlannerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> HosResult<Self> {
        let config: PlannerConfig =
            toml::from_str(text).map_err(|e| HosError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: &Path) -> HosResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject rule sets under which the planner could not make progress.
    ///
    /// Beyond per-field range checks, a rule set must allow a driving
    /// segment longer than `min_segment_hours` after a fresh rest, and fuel
    /// marks spaced further apart than such a segment covers.
    pub fn validate(&self) -> HosResult<()> {
        self.rules.validate()?;
        self.limits.validate()?;
        if self.rules.max_driving_hours <= self.limits.min_segment_hours {
            return Err(HosError::Config(format!(
                "rules.max_driving_hours ({}) must exceed limits.min_segment_hours ({})",
                self.rules.max_driving_hours, self.limits.min_segment_hours
            )));
        }
        let min_segment_miles = self.rules.miles_for_hours(self.limits.min_segment_hours);
        if self.rules.fuel_interval_miles <= min_segment_miles {
            return Err(HosError::Config(format!(
                "rules.fuel_interval_miles ({}) must exceed the distance of one minimum segment ({min_segment_miles})",
                self.rules.fuel_interval_miles
            )));
        }
        Ok(())
    }
}
