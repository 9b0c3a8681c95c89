//! Duty-cycle counters.
//!
//! A duty cycle is the stretch between two rest breaks.  The counters reset
//! when a rest segment is inserted and at no other time; midnight means
//! nothing here.

use hos_core::HosRules;
use serde::{Deserialize, Serialize};

/// Driving and on-duty hours accumulated since the last rest break.
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct DutyCycle {
    pub driving_hours: f64,
    /// Includes `driving_hours`.
    pub on_duty_hours: f64,
}

impl DutyCycle {
    /// Driving hours left before `rules.max_driving_hours`.
    #[inline]
    pub fn driving_headroom(&self, rules: &HosRules) -> f64 {
        rules.max_driving_hours - self.driving_hours
    }

    /// On-duty hours left before `rules.max_on_duty_hours`.
    #[inline]
    pub fn on_duty_headroom(&self, rules: &HosRules) -> f64 {
        rules.max_on_duty_hours - self.on_duty_hours
    }

    pub fn record_driving(&mut self, hours: f64) {
        self.driving_hours += hours;
        self.on_duty_hours += hours;
    }

    pub fn record_on_duty(&mut self, hours: f64) {
        self.on_duty_hours += hours;
    }

    pub fn reset(&mut self) {
        *self = DutyCycle::default();
    }
}
