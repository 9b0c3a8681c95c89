//! CSV output backend.
//!
//! Creates in the configured output directory:
//! - `daily_logs.csv`
//! - `timeline.csv`
//! - `log_header.csv`, on the first [`write_header`][OutputWriter::write_header]

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DailyLogRow, LogSheetHeader, OutputResult, TimelineRow};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Writes plan output to CSV files.
pub struct CsvWriter {
    dir:       PathBuf,
    daily:     Writer<File>,
    timeline:  Writer<File>,
    header:    Option<Writer<File>>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut daily = Writer::from_path(dir.join("daily_logs.csv"))?;
        daily.write_record([
            "date", "total_miles", "driving_hours", "on_duty_hours", "off_duty_hours", "sleeper_hours",
        ])?;

        let mut timeline = Writer::from_path(dir.join("timeline.csv"))?;
        timeline.write_record([
            "date", "start_time", "start_hour", "duration_hours", "status", "activity", "distance_miles",
        ])?;

        Ok(Self {
            dir: dir.to_path_buf(),
            daily,
            timeline,
            header: None,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_header(&mut self, header: &LogSheetHeader) -> OutputResult<()> {
        if self.header.is_none() {
            let mut w = Writer::from_path(self.dir.join("log_header.csv"))?;
            w.write_record([
                "driver_name", "carrier_name", "main_office", "truck_number",
                "trailer_number", "from_location", "to_location",
            ])?;
            self.header = Some(w);
        }
        if let Some(writer) = &mut self.header {
            writer.write_record([
                &header.driver_name,
                &header.carrier_name,
                &header.main_office,
                &header.truck_number,
                &header.trailer_number,
                &header.from_location,
                &header.to_location,
            ])?;
        }
        Ok(())
    }

    fn write_daily_logs(&mut self, rows: &[DailyLogRow]) -> OutputResult<()> {
        for row in rows {
            self.daily.write_record(&[
                row.date.to_string(),
                format!("{:.2}", row.total_miles),
                format!("{:.4}", row.driving_hours),
                format!("{:.4}", row.on_duty_hours),
                format!("{:.4}", row.off_duty_hours),
                format!("{:.4}", row.sleeper_hours),
            ])?;
        }
        Ok(())
    }

    fn write_timeline(&mut self, rows: &[TimelineRow]) -> OutputResult<()> {
        for row in rows {
            self.timeline.write_record(&[
                row.date.to_string(),
                row.start_time.format(TIME_FORMAT).to_string(),
                format!("{:.4}", row.start_hour),
                format!("{:.4}", row.duration_hours),
                row.status.to_string(),
                row.activity.to_string(),
                format!("{:.2}", row.distance_miles),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.daily.flush()?;
        self.timeline.flush()?;
        if let Some(header) = &mut self.header {
            header.flush()?;
        }
        Ok(())
    }
}
