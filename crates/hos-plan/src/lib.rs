//! `hos-plan` — turns a trip distance into an HOS-compliant segment list.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`segment`]   | `Activity`, `Segment`                                    |
//! | [`cycle`]     | `DutyCycle`: driving/on-duty counters reset by rest      |
//! | [`planner`]   | `SegmentPlanner`, `SegmentPlan`                          |
//! | [`observer`]  | `PlanObserver` trait, `NoopObserver`                     |
//!
//! # Planning loop (summary)
//!
//! ```text
//! emit Pickup
//! loop (bounded by limits.max_iterations):
//!   fuel mark reached    → Refuel   (Rest first if on-duty headroom is short)
//!   arrived / residual   → Finish
//!   no usable headroom   → Rest     (resets the DutyCycle)
//!   otherwise            → Drive    min(headroom × speed, remaining, to fuel mark)
//! emit Dropoff
//! ```
//!
//! Every `Drive` covers at least one minimum segment of distance and a `Rest`
//! always restores enough headroom for the next step to be something else,
//! so the loop terminates on its own.  The iteration cap only matters for
//! pathological rule sets, and hitting it is reported through
//! [`SegmentPlan::truncated`].
//!
//! The [`DutyCycle`] counters are *not* calendar days.  Grouping segments by
//! date is the job of `hos-log`.

pub mod cycle;
pub mod observer;
pub mod planner;
pub mod segment;

#[cfg(test)]
mod tests;

pub use cycle::DutyCycle;
pub use observer::{NoopObserver, PlanObserver};
pub use planner::{SegmentPlan, SegmentPlanner};
pub use segment::{Activity, Segment};
