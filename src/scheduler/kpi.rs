//! Fill progress metrics.
//!
//! The engine never reports under-fill as an error, so callers compare
//! required and placed hours themselves. [`FillSummary`] does that scan
//! for one teacher + subject pair.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Required | Weekly hours from the teacher's load |
//! | Placed | Cells held by the pair in the class |
//! | Missing | max(0, required - placed) |
//! | Completion rate | placed / required over all classes |

use crate::models::{Teacher, WeeklySchedule};

/// Required vs placed hours in one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHours {
    /// Class name.
    pub class: String,
    /// Weekly hours required.
    pub required: u32,
    /// Hours currently in the schedule.
    pub placed: u32,
}

impl ClassHours {
    /// Hours still open.
    pub fn missing(&self) -> u32 {
        self.required.saturating_sub(self.placed)
    }
}

/// Hour totals for a teacher + subject pair across classes.
#[derive(Debug, Clone, PartialEq)]
pub struct FillSummary {
    /// Teacher identifier.
    pub teacher_id: String,
    /// Subject code.
    pub subject_code: String,
    /// Per-class hours, in class order. Classes without a load are omitted.
    pub classes: Vec<ClassHours>,
}

impl FillSummary {
    /// Scans the schedule for the pair.
    ///
    /// An unknown subject code yields an empty (complete) summary.
    pub fn calculate(
        schedule: &WeeklySchedule,
        teacher: &Teacher,
        subject_code: &str,
        classes: &[String],
    ) -> Self {
        let rows = match teacher.subject(subject_code) {
            Some(load) => classes
                .iter()
                .filter(|c| load.hours_for(c) > 0)
                .map(|c| ClassHours {
                    class: c.clone(),
                    required: load.hours_for(c),
                    placed: schedule.count_matching(&teacher.id, subject_code, c),
                })
                .collect(),
            None => Vec::new(),
        };

        Self {
            teacher_id: teacher.id.clone(),
            subject_code: subject_code.to_string(),
            classes: rows,
        }
    }

    /// Total weekly hours required.
    pub fn total_required(&self) -> u32 {
        self.classes.iter().map(|c| c.required).sum()
    }

    /// Total hours placed.
    pub fn total_placed(&self) -> u32 {
        self.classes.iter().map(|c| c.placed).sum()
    }

    /// Total hours still open.
    pub fn missing_hours(&self) -> u32 {
        self.classes.iter().map(ClassHours::missing).sum()
    }

    /// Whether every class met its quota.
    pub fn is_complete(&self) -> bool {
        self.missing_hours() == 0
    }

    /// Fraction of required hours placed (1.0 when nothing is required).
    pub fn completion_rate(&self) -> f64 {
        let required = self.total_required();
        if required == 0 {
            return 1.0;
        }
        let satisfied = required - self.missing_hours();
        satisfied as f64 / required as f64
    }

    /// Classes with open hours.
    pub fn incomplete_classes(&self) -> Vec<&ClassHours> {
        self.classes.iter().filter(|c| c.missing() > 0).collect()
    }
}
