//! Task builder: turns open hours into placement tasks.
//!
//! Hours already in the schedule are counted on every call; only the
//! remainder is split into blocks, so repeated fills top up rather than
//! duplicate.

use rand::Rng;

use super::split::plan_blocks;
use crate::models::{FillTask, SplitConstraints, Teacher, WeeklySchedule};

/// Hours the teacher already holds for a subject in a class.
pub fn placed_hours(schedule: &WeeklySchedule, teacher_id: &str, subject_code: &str, class: &str) -> u32 {
    schedule.count_matching(teacher_id, subject_code, class)
}

/// Builds one task per block of open hours, largest blocks first.
///
/// Classes are visited in `classes` order; a class without a positive
/// load for the subject, or already at its quota, yields nothing. The
/// sort is stable, so equal-length blocks keep class order.
pub fn build_fill_tasks<R: Rng + ?Sized>(
    schedule: &WeeklySchedule,
    teacher: &Teacher,
    subject_code: &str,
    classes: &[String],
    constraints: &SplitConstraints,
    rng: &mut R,
) -> Vec<FillTask> {
    let Some(load) = teacher.subject(subject_code) else {
        return Vec::new();
    };

    let mut tasks = Vec::new();
    for class in classes {
        let required = load.hours_for(class);
        if required == 0 {
            continue;
        }
        let placed = placed_hours(schedule, &teacher.id, subject_code, class);
        if placed >= required {
            continue;
        }

        for block in plan_blocks(required - placed, subject_code, constraints, rng) {
            tasks.push(FillTask::new(&teacher.id, subject_code, class, block));
        }
    }

    tasks.sort_by(|a, b| b.priority.cmp(&a.priority));
    tasks
}
