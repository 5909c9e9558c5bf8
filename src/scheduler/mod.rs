//! Slot-filling engine and its planning policies.
//!
//! Places the open hours of one teacher + subject pair into a weekly
//! schedule, one fill call at a time.
//!
//! # Components
//!
//! - [`plan_blocks`]: splits weekly hours into contiguous blocks
//! - [`max_daily_load`]: per-day cap for a subject in a class
//! - [`build_fill_tasks`]: one task per block of open hours
//! - [`SlotFiller`]: randomized greedy placement with ordered passes
//! - [`FillSummary`]: required vs placed hours after a fill
//!
//! # Algorithm
//!
//! Greedy and randomized. The engine does not search for a global
//! optimum; blocks that fit nowhere stay open and are reported through
//! [`FillOutcome`] or [`FillSummary`], never as errors.

mod filler;
mod kpi;
mod load;
mod split;
mod tasks;

#[cfg(test)]
mod tests;

pub use filler::{FillOutcome, PlacedBlock, PlacementPass, SlotFiller};
pub use kpi::{ClassHours, FillSummary};
pub use load::max_daily_load;
pub use split::plan_blocks;
pub use tasks::{build_fill_tasks, placed_hours};
