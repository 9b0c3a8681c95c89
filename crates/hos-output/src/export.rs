//! Drives an [`OutputWriter`] from a finished trip plan.

use hos_trip::TripPlan;
use tracing::debug;

use crate::{DailyLogRow, LogSheetHeader, OutputResult, OutputWriter, TimelineRow};

/// Write every daily log of `plan` (totals and timeline) to `writer`, plus
/// `header` if given, then finish the writer.
pub fn write_trip_plan<W: OutputWriter>(
    writer: &mut W,
    plan:   &TripPlan,
    header: Option<&LogSheetHeader>,
) -> OutputResult<()> {
    if let Some(header) = header {
        writer.write_header(header)?;
    }

    let totals: Vec<DailyLogRow> = plan.daily_logs.iter().map(DailyLogRow::from).collect();
    writer.write_daily_logs(&totals)?;

    let mut entries = 0;
    for log in &plan.daily_logs {
        let rows = TimelineRow::for_log(log);
        entries += rows.len();
        writer.write_timeline(&rows)?;
    }

    debug!(days = totals.len(), entries, "trip plan written");
    writer.finish()
}
