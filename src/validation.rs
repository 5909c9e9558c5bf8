//! Input validation and schedule audit.
//!
//! Two independent checks:
//!
//! - [`validate_input`]: structural integrity of the school setup before
//!   any fill (duplicate ids, loads on unknown classes, broken patterns).
//! - [`audit_schedule`]: advisory conflict scan of a schedule. Engine
//!   fills are conflict-free by construction; manual edits are not, and
//!   this is how callers surface them.

use std::collections::{BTreeMap, HashSet};

use crate::config::FillRules;
use crate::models::{find_teacher, SplitConstraints, Teacher, TimeGrid, Violation, WeeklySchedule};
use crate::scheduler::max_daily_load;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same id or name.
    DuplicateId,
    /// Two slots of one day share a period index.
    DuplicatePeriod,
    /// A subject load names a class that is not configured.
    UnknownClass,
    /// A split pattern is empty or has a zero-size block.
    InvalidPattern,
    /// A day has no learning periods.
    EmptyDay,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the school setup.
///
/// Checks:
/// 1. No duplicate day names, classes, or teacher ids
/// 2. No duplicate period index within a day
/// 3. Every day has at least one learning period
/// 4. No duplicate subject code within one teacher
/// 5. Every class in a subject load is configured
/// 6. Every split pattern is non-empty with positive blocks
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    grid: &TimeGrid,
    classes: &[String],
    roster: &[Teacher],
    split: &SplitConstraints,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut day_names = HashSet::new();
    for day in &grid.days {
        if !day_names.insert(day.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate day: {}", day.name),
            ));
        }

        let mut periods = HashSet::new();
        for slot in &day.slots {
            if !periods.insert(slot.period) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicatePeriod,
                    format!("Day '{}' has period {} twice", day.name, slot.period),
                ));
            }
        }

        if day.teachable_periods().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyDay,
                format!("Day '{}' has no learning periods", day.name),
            ));
        }
    }

    let mut class_set = HashSet::new();
    for class in classes {
        if !class_set.insert(class.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate class: {class}"),
            ));
        }
    }

    let mut teacher_ids = HashSet::new();
    for teacher in roster {
        if !teacher_ids.insert(teacher.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate teacher ID: {}", teacher.id),
            ));
        }

        let mut codes = HashSet::new();
        for load in &teacher.subjects {
            if !codes.insert(load.code.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Teacher '{}' lists subject '{}' twice", teacher.id, load.code),
                ));
            }
            for class in load.taught_classes() {
                if !class_set.contains(class) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownClass,
                        format!(
                            "Teacher '{}' subject '{}' references unknown class '{}'",
                            teacher.id, load.code, class
                        ),
                    ));
                }
            }
        }
    }

    for (code, patterns) in split.iter() {
        for pattern in patterns {
            if pattern.blocks.is_empty() || pattern.blocks.contains(&0) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPattern,
                    format!("Subject '{code}' has invalid split pattern '{pattern}'"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Scans a schedule for conflicts.
///
/// Reports:
/// - a teacher holding more than one class at the same (day, period)
/// - a (teacher, subject, class, day) over its daily cap
/// - a subject placed in a period a late-period rule forbids
///
/// Lessons without a matching load in the roster (unknown teacher,
/// subject or class) are still checked for double-booking and forbidden
/// periods, but not for the daily cap.
pub fn audit_schedule(
    schedule: &WeeklySchedule,
    roster: &[Teacher],
    split: &SplitConstraints,
    rules: &FillRules,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut at_slot: BTreeMap<(&str, i32, &str), Vec<&str>> = BTreeMap::new();
    let mut per_day: BTreeMap<(&str, &str, &str, &str), u32> = BTreeMap::new();

    for (day, period, class, cell) in schedule.iter() {
        let Some(session) = cell.session() else {
            continue;
        };
        at_slot
            .entry((day, period, session.teacher_id.as_str()))
            .or_default()
            .push(class);
        *per_day
            .entry((
                session.teacher_id.as_str(),
                session.subject_code.as_str(),
                class,
                day,
            ))
            .or_default() += 1;

        if rules.forbids(&session.subject_code, period) {
            violations.push(Violation::forbidden_period(
                class,
                format!("{} at {day} period {period} in {class}", session.subject_code),
            ));
        }
    }

    for ((day, period, teacher_id), classes) in &at_slot {
        if classes.len() > 1 {
            violations.push(Violation::double_booked(
                *teacher_id,
                format!(
                    "Teacher '{teacher_id}' in {} at {day} period {period}",
                    classes.join(", ")
                ),
            ));
        }
    }

    for ((teacher_id, code, class, day), hours) in &per_day {
        let Some(load) = find_teacher(roster, teacher_id).and_then(|t| t.subject(code)) else {
            continue;
        };
        let required = load.hours_for(class);
        if required == 0 {
            continue;
        }
        let cap = max_daily_load(required, code, split);
        if *hours > cap {
            violations.push(Violation::daily_load_exceeded(
                *class,
                format!("{code} by '{teacher_id}' has {hours}h on {day} in {class}, cap {cap}"),
            ));
        }
    }

    violations
}
