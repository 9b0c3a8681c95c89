//! `hos-log` — folds a segment list into calendar-day duty logs.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`daily_log`]   | `DailyLog`, `TimelineEntry`                            |
//! | [`calendar`]    | `CalendarBucketer`, `DayPiece`, `split_at_midnight`    |
//! | [`aggregator`]  | `DailyLogAggregator`, `LogBook`                        |
//!
//! # Calendar days, not duty cycles
//!
//! The planner's counters reset at rest breaks.  A log sheet covers
//! midnight to midnight.  This crate only knows about the second clock: a
//! segment that runs past midnight is cut in two and each piece is recorded
//! on the sheet for its own date.  The result is that every timeline entry
//! starts in `[0, 24)` on its sheet and no entry runs past the sheet's end.
//!
//! # Hour totals
//!
//! `on_duty_hours` includes `driving_hours`, matching how the totals are
//! reported.  The four grid lines are therefore
//!
//! ```text
//! off duty | sleeper | driving | on duty (not driving) = on_duty − driving
//! ```
//!
//! and those four sum to 24 on every sheet (see [`DailyLog::status_hours`]).

pub mod aggregator;
pub mod calendar;
pub mod daily_log;

#[cfg(test)]
mod tests;

pub use aggregator::{DailyLogAggregator, LogBook};
pub use calendar::{CalendarBucketer, DayPiece, split_at_midnight};
pub use daily_log::{DailyLog, TimelineEntry};
