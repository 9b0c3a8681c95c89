//! Log-sheet header details.

use serde::{Deserialize, Serialize};

/// The identifying block printed above the grid on every log sheet.
///
/// Not part of planning; callers that have real values supply them, others
/// get placeholders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSheetHeader {
    pub driver_name:    String,
    pub carrier_name:   String,
    pub main_office:    String,
    pub truck_number:   String,
    pub trailer_number: String,
    pub from_location:  String,
    pub to_location:    String,
}

impl Default for LogSheetHeader {
    fn default() -> Self {
        Self {
            driver_name:    "Driver".into(),
            carrier_name:   "Transport Company".into(),
            main_office:    "123 Main St, City, State".into(),
            truck_number:   "TRK-001".into(),
            trailer_number: "TRL-001".into(),
            from_location:  String::new(),
            to_location:    String::new(),
        }
    }
}

impl LogSheetHeader {
    pub fn route(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from_location = from.into();
        self.to_location = to.into();
        self
    }
}
