//! Randomized greedy slot-filling engine.
//!
//! # Algorithm
//!
//! 1. Build tasks for the teacher + subject: one per block of open hours,
//!    largest blocks first.
//! 2. For each task, try the placement passes in order. Within a pass,
//!    visit the days in a freshly shuffled order.
//! 3. On each day, skip if the day is blocked for the pair, or if the
//!    block would push the class over its daily cap for the subject.
//! 4. Slide a window of the block's length over each run of contiguous
//!    learning periods. A window is valid when every period is allowed
//!    for the subject, not blocked by the user, free in the target class
//!    and free for the teacher in every class.
//! 5. Commit the first valid window. A task with no valid window in any
//!    pass is abandoned; its hours stay open.
//!
//! The input schedule is never touched: the engine fills a clone.
//!
//! # Complexity
//! O(t * p * d * w * c) where t=tasks, p=passes, d=days, w=periods per
//! day, c=classes (teacher busy check).

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, trace};

use super::load::max_daily_load;
use super::tasks::build_fill_tasks;
use crate::config::{FillRules, TimetableConfig};
use crate::models::{
    find_teacher, ClassSession, Day, FillTask, OffConstraints, OffDayConstraint, ScheduleCell,
    SplitConstraints, Teacher, TimeGrid, WeeklySchedule,
};

/// A placement strategy. Passes are tried in order for every task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementPass {
    /// Only days on which the teacher has no lesson in the target class.
    Strict,
    /// Any day, subject to the remaining rules.
    Relaxed,
}

impl PlacementPass {
    fn accepts_day(self, schedule: &WeeklySchedule, task: &FillTask, day: &str) -> bool {
        match self {
            Self::Strict => !schedule.teacher_in_class_on(&task.teacher_id, &task.class, day),
            Self::Relaxed => true,
        }
    }
}

/// A block committed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedBlock {
    /// Target class.
    pub class: String,
    /// Day name.
    pub day: String,
    /// Periods written, in order.
    pub periods: Vec<i32>,
    /// Pass that found the window.
    pub pass: PlacementPass,
}

/// Result of one fill call.
#[derive(Debug, Clone, PartialEq)]
pub struct FillOutcome {
    /// The new schedule.
    pub schedule: WeeklySchedule,
    /// Blocks committed, in placement order.
    pub placed: Vec<PlacedBlock>,
    /// Tasks no valid window was found for.
    pub abandoned: Vec<FillTask>,
}

impl FillOutcome {
    fn unchanged(schedule: WeeklySchedule) -> Self {
        Self {
            schedule,
            placed: Vec::new(),
            abandoned: Vec::new(),
        }
    }

    /// Hours written by this call.
    pub fn placed_hours(&self) -> u32 {
        self.placed.iter().map(|b| b.periods.len() as u32).sum()
    }

    /// Hours left open by this call.
    pub fn abandoned_hours(&self) -> u32 {
        self.abandoned.iter().map(|t| t.duration).sum()
    }

    /// Whether every task was placed.
    pub fn is_complete(&self) -> bool {
        self.abandoned.is_empty()
    }
}

/// Slot-filling engine for one school setup.
///
/// # Example
///
/// ```
/// use u_timetable::models::{OffConstraints, SplitConstraints, SubjectLoad, Teacher, TimeGrid};
/// use u_timetable::scheduler::SlotFiller;
///
/// let classes = vec!["VII A".to_string()];
/// let filler = SlotFiller::new(TimeGrid::standard(), classes.clone());
/// let teacher = Teacher::new("T1", "Budi", "BS")
///     .with_subject(SubjectLoad::new("Matematika", "MAT").with_class("VII A", 5));
///
/// let empty = filler.empty_schedule();
/// let filled = filler.fill(&empty, &teacher, "MAT", &OffConstraints::new(), &SplitConstraints::new());
/// assert_eq!(filled.count_matching("T1", "MAT", "VII A"), 5);
/// ```
#[derive(Debug, Clone)]
pub struct SlotFiller {
    grid: TimeGrid,
    classes: Vec<String>,
    rules: FillRules,
}

impl SlotFiller {
    /// Creates an engine with default rules.
    pub fn new(grid: TimeGrid, classes: Vec<String>) -> Self {
        Self {
            grid,
            classes,
            rules: FillRules::default(),
        }
    }

    /// Creates an engine from a school configuration.
    pub fn from_config(config: &TimetableConfig) -> Self {
        Self {
            grid: config.grid.clone(),
            classes: config.classes.clone(),
            rules: config.rules.clone(),
        }
    }

    /// Replaces the rules.
    pub fn with_rules(mut self, rules: FillRules) -> Self {
        self.rules = rules;
        self
    }

    /// The grid this engine places into.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Class list in fill order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Active rules.
    pub fn rules(&self) -> &FillRules {
        &self.rules
    }

    /// Baseline schedule for this engine's grid and classes.
    pub fn empty_schedule(&self) -> WeeklySchedule {
        WeeklySchedule::empty(&self.grid, &self.classes)
    }

    /// Fills the open hours of a teacher + subject pair.
    ///
    /// Returns a new schedule; hours that fit nowhere stay open.
    pub fn fill(
        &self,
        schedule: &WeeklySchedule,
        teacher: &Teacher,
        subject_code: &str,
        off: &OffConstraints,
        split: &SplitConstraints,
    ) -> WeeklySchedule {
        self.fill_with_rng(schedule, teacher, subject_code, off, split, &mut rand::rng())
    }

    /// [`fill`](Self::fill) with a caller-supplied random source.
    pub fn fill_with_rng<R: Rng + ?Sized>(
        &self,
        schedule: &WeeklySchedule,
        teacher: &Teacher,
        subject_code: &str,
        off: &OffConstraints,
        split: &SplitConstraints,
        rng: &mut R,
    ) -> WeeklySchedule {
        self.fill_with_report_rng(schedule, teacher, subject_code, off, split, rng)
            .schedule
    }

    /// Fills and reports which blocks were placed or abandoned.
    pub fn fill_with_report(
        &self,
        schedule: &WeeklySchedule,
        teacher: &Teacher,
        subject_code: &str,
        off: &OffConstraints,
        split: &SplitConstraints,
    ) -> FillOutcome {
        self.fill_with_report_rng(schedule, teacher, subject_code, off, split, &mut rand::rng())
    }

    /// [`fill_with_report`](Self::fill_with_report) with a caller-supplied
    /// random source.
    pub fn fill_with_report_rng<R: Rng + ?Sized>(
        &self,
        schedule: &WeeklySchedule,
        teacher: &Teacher,
        subject_code: &str,
        off: &OffConstraints,
        split: &SplitConstraints,
        rng: &mut R,
    ) -> FillOutcome {
        let mut working = schedule.clone();

        let Some(load) = teacher.subject(subject_code) else {
            debug!(teacher = %teacher.id, subject = subject_code, "subject not carried by teacher, nothing to fill");
            return FillOutcome::unchanged(working);
        };

        let mut tasks = build_fill_tasks(&working, teacher, subject_code, &self.classes, split, rng);
        if tasks.is_empty() {
            debug!(teacher = %teacher.id, subject = subject_code, "all hours already placed");
            return FillOutcome::unchanged(working);
        }

        let session = ClassSession::new(teacher, load);
        let off_day = off.get(&teacher.id, subject_code);
        let mut placed = Vec::new();
        let mut abandoned = Vec::new();

        for task in &mut tasks {
            let daily_cap = max_daily_load(load.hours_for(&task.class), subject_code, split);
            match self.place_task(&mut working, task, &session, off_day, daily_cap, rng) {
                Some(block) => {
                    debug!(
                        class = %block.class,
                        day = %block.day,
                        periods = ?block.periods,
                        pass = ?block.pass,
                        "placed block"
                    );
                    task.mark_placed();
                    placed.push(block);
                }
                None => {
                    debug!(class = %task.class, duration = task.duration, "no valid window, block left open");
                    task.mark_abandoned();
                    abandoned.push(task.clone());
                }
            }
        }

        let outcome = FillOutcome {
            schedule: working,
            placed,
            abandoned,
        };
        info!(
            teacher = %teacher.id,
            subject = subject_code,
            placed_hours = outcome.placed_hours(),
            open_hours = outcome.abandoned_hours(),
            "fill finished"
        );
        outcome
    }

    /// Fills for a teacher looked up by id.
    ///
    /// An unknown teacher id leaves the schedule unchanged.
    pub fn fill_for(
        &self,
        schedule: &WeeklySchedule,
        roster: &[Teacher],
        teacher_id: &str,
        subject_code: &str,
        off: &OffConstraints,
        split: &SplitConstraints,
    ) -> WeeklySchedule {
        self.fill_for_with_rng(schedule, roster, teacher_id, subject_code, off, split, &mut rand::rng())
    }

    /// [`fill_for`](Self::fill_for) with a caller-supplied random source.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_for_with_rng<R: Rng + ?Sized>(
        &self,
        schedule: &WeeklySchedule,
        roster: &[Teacher],
        teacher_id: &str,
        subject_code: &str,
        off: &OffConstraints,
        split: &SplitConstraints,
        rng: &mut R,
    ) -> WeeklySchedule {
        match find_teacher(roster, teacher_id) {
            Some(teacher) => self.fill_with_rng(schedule, teacher, subject_code, off, split, rng),
            None => {
                debug!(teacher = teacher_id, "teacher not in roster, nothing to fill");
                schedule.clone()
            }
        }
    }

    /// Tries every pass; commits the first valid window found.
    fn place_task<R: Rng + ?Sized>(
        &self,
        schedule: &mut WeeklySchedule,
        task: &FillTask,
        session: &ClassSession,
        off: Option<&OffDayConstraint>,
        daily_cap: u32,
        rng: &mut R,
    ) -> Option<PlacedBlock> {
        for &pass in &self.rules.passes {
            let mut days: Vec<&Day> = self.grid.days.iter().collect();
            days.shuffle(rng);

            for day in days {
                let Some(periods) = self.find_window(schedule, task, day, pass, off, daily_cap) else {
                    continue;
                };
                for &period in &periods {
                    if let Some(cell) = schedule.cell_mut(&day.name, period, &task.class) {
                        *cell = ScheduleCell::Class(session.clone());
                    }
                }
                return Some(PlacedBlock {
                    class: task.class.clone(),
                    day: day.name.clone(),
                    periods,
                    pass,
                });
            }
        }
        None
    }

    /// First valid window for the task on a day, if any.
    fn find_window(
        &self,
        schedule: &WeeklySchedule,
        task: &FillTask,
        day: &Day,
        pass: PlacementPass,
        off: Option<&OffDayConstraint>,
        daily_cap: u32,
    ) -> Option<Vec<i32>> {
        if task.duration == 0 {
            return None;
        }
        if off.is_some_and(|o| o.is_day_blocked(&day.name)) {
            trace!(day = %day.name, "day blocked for teacher and subject");
            return None;
        }
        if !pass.accepts_day(schedule, task, &day.name) {
            trace!(day = %day.name, ?pass, "teacher already in class that day");
            return None;
        }
        let current = schedule.subject_hours_on(&task.subject_code, &task.class, &day.name);
        if current + task.duration > daily_cap {
            trace!(day = %day.name, current, cap = daily_cap, "daily cap reached");
            return None;
        }

        let blocked: BTreeSet<i32> = off.map(|o| o.periods_on(&day.name)).unwrap_or_default();
        let len = task.duration as usize;

        day.teachable_runs().into_iter().find_map(|run| {
            run.windows(len)
                .find(|window| {
                    window
                        .iter()
                        .all(|&p| self.period_allowed(schedule, task, &day.name, p, &blocked))
                })
                .map(<[i32]>::to_vec)
        })
    }

    fn period_allowed(
        &self,
        schedule: &WeeklySchedule,
        task: &FillTask,
        day: &str,
        period: i32,
        blocked: &BTreeSet<i32>,
    ) -> bool {
        !self.rules.forbids(&task.subject_code, period)
            && !blocked.contains(&period)
            && schedule
                .cell(day, period, &task.class)
                .is_some_and(ScheduleCell::is_empty)
            && !schedule.teacher_busy_at(&task.teacher_id, day, period)
    }
}
