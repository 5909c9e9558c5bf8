//! Timetable domain models.
//!
//! Provides the data types the slot-filling engine reads and writes.
//! All types are plain values with `serde` support, so the state layer
//! can persist them as JSON.
//!
//! # Domain Mappings
//!
//! | u-timetable | School |
//! |-------------|--------|
//! | TimeGrid / Day / Slot | Bell schedule |
//! | Teacher / SubjectLoad | Teaching assignment (hours per class) |
//! | WeeklySchedule | Class timetable |
//! | OffDayConstraint | Teacher unavailability for a subject |
//! | SplitPattern | Agreed lesson blocks ("3+2") |
//! | FillTask | One block waiting for a slot |

mod constraint;
mod grid;
mod schedule;
mod task;
mod teacher;

pub use constraint::{OffConstraints, OffDayConstraint, SplitConstraints, SplitPattern};
pub use grid::{Day, Slot, SlotCategory, TimeGrid};
pub use schedule::{ClassSession, ScheduleCell, Violation, ViolationType, WeeklySchedule};
pub use task::{FillTask, TaskState};
pub use teacher::{find_teacher, SubjectLoad, Teacher};
