//! Weekly schedule (solution) model.
//!
//! A weekly schedule maps day → period → class → cell. Every position
//! holds exactly one [`ScheduleCell`]: free, blocked by a non-teaching
//! slot, or occupied by one class session.
//!
//! The schedule is a plain value. The engine clones it, fills the clone
//! and hands the clone back; callers replace their copy wholesale.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{SubjectLoad, Teacher, TimeGrid};
use crate::error::{Result, TimetableError};

/// A lesson occupying one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSession {
    /// Subject code.
    pub subject_code: String,
    /// Teacher short code.
    pub teacher_code: String,
    /// Teacher identifier.
    pub teacher_id: String,
    /// Teacher full name.
    pub teacher_name: String,
    /// Display color.
    pub color: String,
}

impl ClassSession {
    /// Builds the session written for a teacher teaching a subject.
    pub fn new(teacher: &Teacher, load: &SubjectLoad) -> Self {
        Self {
            subject_code: load.code.clone(),
            teacher_code: teacher.code.clone(),
            teacher_id: teacher.id.clone(),
            teacher_name: teacher.name.clone(),
            color: load.color.clone(),
        }
    }

    /// Whether this session belongs to the teacher + subject pair.
    #[inline]
    pub fn is(&self, teacher_id: &str, subject_code: &str) -> bool {
        self.teacher_id == teacher_id && self.subject_code == subject_code
    }
}

/// State of one (day, period, class) position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleCell {
    /// Free for placement.
    #[default]
    Empty,
    /// Non-teaching slot.
    Blocked {
        /// Why the slot is blocked (slot label).
        reason: String,
    },
    /// Occupied by a lesson.
    Class(ClassSession),
}

impl ScheduleCell {
    /// Whether the cell is free.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The session in this cell, if any.
    pub fn session(&self) -> Option<&ClassSession> {
        match self {
            Self::Class(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the cell holds a lesson by the given teacher.
    pub fn is_taught_by(&self, teacher_id: &str) -> bool {
        self.session().is_some_and(|s| s.teacher_id == teacher_id)
    }
}

type ClassCells = BTreeMap<String, ScheduleCell>;
type DayCells = BTreeMap<i32, ClassCells>;

/// Full weekly schedule: day → period → class → cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    days: BTreeMap<String, DayCells>,
}

impl WeeklySchedule {
    /// Creates the baseline schedule for a grid and class list.
    ///
    /// Every non-negative slot gets one cell per class: `Blocked` with the
    /// slot label as reason when the slot is not a learning period,
    /// `Empty` otherwise. Breaks (negative periods) get no cells.
    pub fn empty(grid: &TimeGrid, classes: &[String]) -> Self {
        let mut days = BTreeMap::new();
        for day in &grid.days {
            let mut periods = DayCells::new();
            for slot in day.slots.iter().filter(|s| s.has_cell()) {
                let cell = if slot.is_teachable() {
                    ScheduleCell::Empty
                } else {
                    ScheduleCell::Blocked {
                        reason: slot.label.clone(),
                    }
                };
                let row: ClassCells = classes.iter().map(|c| (c.clone(), cell.clone())).collect();
                periods.insert(slot.period, row);
            }
            days.insert(day.name.clone(), periods);
        }
        Self { days }
    }

    /// Cell at a position.
    pub fn cell(&self, day: &str, period: i32, class: &str) -> Option<&ScheduleCell> {
        self.days.get(day)?.get(&period)?.get(class)
    }

    pub(crate) fn cell_mut(&mut self, day: &str, period: i32, class: &str) -> Option<&mut ScheduleCell> {
        self.days.get_mut(day)?.get_mut(&period)?.get_mut(class)
    }

    /// Overwrites a cell (manual edit). Returns the previous content.
    ///
    /// Manual edits bypass every engine rule; run
    /// [`audit_schedule`](crate::validation::audit_schedule) afterwards to
    /// surface conflicts.
    pub fn set_cell(
        &mut self,
        day: &str,
        period: i32,
        class: &str,
        cell: ScheduleCell,
    ) -> Result<ScheduleCell> {
        let slot = self
            .cell_mut(day, period, class)
            .ok_or_else(|| TimetableError::UnknownCell {
                day: day.to_string(),
                period,
                class: class.to_string(),
            })?;
        Ok(std::mem::replace(slot, cell))
    }

    /// Day names present in the schedule.
    pub fn days(&self) -> impl Iterator<Item = &str> {
        self.days.keys().map(String::as_str)
    }

    /// Iterates every `(day, period, class, cell)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32, &str, &ScheduleCell)> {
        self.days.iter().flat_map(|(day, periods)| {
            periods.iter().flat_map(move |(&period, classes)| {
                classes
                    .iter()
                    .map(move |(class, cell)| (day.as_str(), period, class.as_str(), cell))
            })
        })
    }

    /// Cells of one class on one day, in period order.
    pub fn class_cells<'a>(&'a self, day: &str, class: &str) -> Vec<(i32, &'a ScheduleCell)> {
        self.days.get(day).map_or_else(Vec::new, |periods| {
            periods
                .iter()
                .filter_map(|(&period, classes)| Some((period, classes.get(class)?)))
                .collect()
        })
    }

    /// Whether the teacher holds any class at (day, period).
    pub fn teacher_busy_at(&self, teacher_id: &str, day: &str, period: i32) -> bool {
        self.days
            .get(day)
            .and_then(|p| p.get(&period))
            .is_some_and(|classes| classes.values().any(|c| c.is_taught_by(teacher_id)))
    }

    /// Whether the teacher has any lesson in the class on that day.
    pub fn teacher_in_class_on(&self, teacher_id: &str, class: &str, day: &str) -> bool {
        self.days.get(day).is_some_and(|periods| {
            periods
                .values()
                .filter_map(|classes| classes.get(class))
                .any(|c| c.is_taught_by(teacher_id))
        })
    }

    /// Hours of a subject code in a class on one day (any teacher).
    pub fn subject_hours_on(&self, subject_code: &str, class: &str, day: &str) -> u32 {
        self.days.get(day).map_or(0, |periods| {
            periods
                .values()
                .filter_map(|classes| classes.get(class)?.session())
                .filter(|s| s.subject_code == subject_code)
                .count() as u32
        })
    }

    /// Cells in a class held by the teacher + subject pair, whole week.
    pub fn count_matching(&self, teacher_id: &str, subject_code: &str, class: &str) -> u32 {
        self.iter()
            .filter(|(_, _, c, cell)| {
                *c == class && cell.session().is_some_and(|s| s.is(teacher_id, subject_code))
            })
            .count() as u32
    }

    /// Frees every cell held by the teacher + subject pair.
    ///
    /// Returns the number of cells cleared. Used by callers that reset
    /// a subject before filling it again.
    pub fn clear_teacher_subject(&mut self, teacher_id: &str, subject_code: &str) -> usize {
        let mut cleared = 0;
        for periods in self.days.values_mut() {
            for classes in periods.values_mut() {
                for cell in classes.values_mut() {
                    if cell.session().is_some_and(|s| s.is(teacher_id, subject_code)) {
                        *cell = ScheduleCell::Empty;
                        cleared += 1;
                    }
                }
            }
        }
        cleared
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.iter().filter(|(_, _, _, c)| c.session().is_some()).count()
    }
}

/// An advisory conflict found in a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity (teacher id or class).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of schedule conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// One teacher in two classes at the same time.
    TeacherDoubleBooked,
    /// More hours of a subject on one day than the daily cap allows.
    DailyLoadExceeded,
    /// Subject placed in a period its hard rule forbids.
    ForbiddenPeriod,
    /// Domain-specific violation.
    Custom(String),
}

impl Violation {
    /// Creates a double-booking violation.
    pub fn double_booked(teacher_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::TeacherDoubleBooked,
            entity_id: teacher_id.into(),
            message: message.into(),
            severity: 95,
        }
    }

    /// Creates a daily-load violation.
    pub fn daily_load_exceeded(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::DailyLoadExceeded,
            entity_id: class.into(),
            message: message.into(),
            severity: 60,
        }
    }

    /// Creates a forbidden-period violation.
    pub fn forbidden_period(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::ForbiddenPeriod,
            entity_id: class.into(),
            message: message.into(),
            severity: 80,
        }
    }
}
