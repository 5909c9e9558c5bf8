//! School timetable slot-filling.
//!
//! Fills the weekly hours of one teacher + subject pair into a shared
//! class timetable, respecting the bell grid, the teacher's other
//! lessons, per-day load caps, user-blocked days/periods and preferred
//! block splits. Each call is independent: the caller owns the schedule
//! and passes it in; the engine returns a new one.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeGrid`, `Day`, `Slot`, `Teacher`,
//!   `SubjectLoad`, `WeeklySchedule`, `ScheduleCell`, `OffConstraints`,
//!   `SplitConstraints`, `FillTask`
//! - **`scheduler`**: Split planner, daily-load policy, task builder and
//!   the randomized greedy `SlotFiller`
//! - **`config`**: School configuration and engine rules (JSON loadable)
//! - **`validation`**: Input integrity checks and schedule audit
//! - **`error`**: Crate error type
//!
//! # Example
//!
//! ```
//! use u_timetable::config::TimetableConfig;
//! use u_timetable::models::{OffConstraints, SplitConstraints, SubjectLoad, Teacher};
//! use u_timetable::scheduler::{FillSummary, SlotFiller};
//!
//! let config = TimetableConfig::default();
//! let filler = SlotFiller::from_config(&config);
//!
//! let teacher = Teacher::new("T1", "Budi", "BS").with_subject(
//!     SubjectLoad::new("Matematika", "MAT")
//!         .with_class("VII A", 5)
//!         .with_class("VII B", 5),
//! );
//! let split = SplitConstraints::new().with_parsed("MAT", "3+2").unwrap();
//!
//! let schedule = filler.fill(&filler.empty_schedule(), &teacher, "MAT", &OffConstraints::new(), &split);
//! let summary = FillSummary::calculate(&schedule, &teacher, "MAT", filler.classes());
//! assert!(summary.is_complete());
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, TimetableError};
