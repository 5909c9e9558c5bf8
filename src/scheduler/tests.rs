//! End-to-end fill scenarios on the standard grid.
//!
//! Every scenario runs over many seeds; the engine is randomized, so the
//! assertions are properties that must hold for any day order.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use tracing_subscriber::{fmt, EnvFilter};

use super::*;
use crate::config::FillRules;
use crate::models::{
    ClassSession, OffConstraints, OffDayConstraint, ScheduleCell, SplitConstraints, SubjectLoad,
    Teacher, TimeGrid, WeeklySchedule,
};
use crate::validation::audit_schedule;

const SEEDS: u64 = 50;

fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

fn all_classes() -> Vec<String> {
    ["VII A", "VII B", "VII C", "VIII A", "VIII B", "VIII C", "IX A", "IX B", "IX C"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn filler() -> SlotFiller {
    SlotFiller::new(TimeGrid::standard(), all_classes())
}

fn roster() -> Vec<Teacher> {
    vec![
        Teacher::new("T1", "Budi Santoso", "BS").with_subject(
            SubjectLoad::new("Matematika", "MAT")
                .with_color("#3b82f6")
                .with_class("VII A", 5)
                .with_class("VII B", 5)
                .with_class("VII C", 5),
        ),
        Teacher::new("T2", "Siti Aminah", "SA").with_subject(
            SubjectLoad::new("PJOK", "PJOK")
                .with_class("VIII A", 3)
                .with_class("VIII B", 3)
                .with_class("VIII C", 3),
        ),
        Teacher::new("T3", "Rahmat Hidayat", "RH")
            .with_subject(
                SubjectLoad::new("IPA", "IPA")
                    .with_class("VII A", 4)
                    .with_class("IX A", 4),
            )
            .with_subject(SubjectLoad::new("Bahasa Indonesia", "BIN").with_class("VII B", 6)),
    ]
}

/// Days on which the pair has at least one cell in the class.
fn days_with(schedule: &WeeklySchedule, teacher_id: &str, code: &str, class: &str) -> BTreeSet<String> {
    schedule
        .iter()
        .filter(|(_, _, c, cell)| *c == class && cell.session().is_some_and(|s| s.is(teacher_id, code)))
        .map(|(day, _, _, _)| day.to_string())
        .collect()
}

fn periods_on(schedule: &WeeklySchedule, teacher_id: &str, code: &str, class: &str, day: &str) -> Vec<i32> {
    schedule
        .class_cells(day, class)
        .into_iter()
        .filter(|(_, cell)| cell.session().is_some_and(|s| s.is(teacher_id, code)))
        .map(|(p, _)| p)
        .collect()
}

fn is_contiguous_run(grid: &TimeGrid, day: &str, periods: &[i32]) -> bool {
    grid.day(day).is_some_and(|d| {
        d.teachable_runs()
            .iter()
            .any(|run| run.windows(periods.len()).any(|w| w == periods))
    })
}

#[test]
fn test_math_five_hours_splits_over_two_days() {
    init_tracing();
    let roster = roster();
    let grid = TimeGrid::standard();

    for seed in 0..SEEDS {
        let mut rng = SmallRng::seed_from_u64(seed);
        let empty = filler().empty_schedule();
        let out = filler().fill_with_report_rng(
            &empty,
            &roster[0],
            "MAT",
            &OffConstraints::new(),
            &SplitConstraints::new(),
            &mut rng,
        );
        assert!(out.is_complete(), "seed {seed}");

        let s = &out.schedule;
        assert_eq!(s.count_matching("T1", "MAT", "VII A"), 5);

        let days = days_with(s, "T1", "MAT", "VII A");
        assert_eq!(days.len(), 2, "seed {seed}");

        let mut sizes: Vec<usize> = Vec::new();
        for day in &days {
            let periods = periods_on(s, "T1", "MAT", "VII A", day);
            assert!(periods.len() <= 3);
            assert!(is_contiguous_run(&grid, day, &periods), "seed {seed}: {day} {periods:?}");
            sizes.push(periods.len());
        }
        sizes.sort_unstable();
        assert_eq!(sizes, vec![2, 3]);
    }
}

#[test]
fn test_busy_teacher_slot_is_avoided() {
    let roster = roster();
    let t1 = &roster[0];
    let other = SubjectLoad::new("Informatika", "INF");

    for seed in 0..SEEDS {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut start = filler().empty_schedule();
        let busy = ScheduleCell::Class(ClassSession::new(t1, &other));
        start.set_cell("SENIN", 2, "VII B", busy.clone()).unwrap();

        let only_a = Teacher::new("T1", "Budi Santoso", "BS")
            .with_subject(SubjectLoad::new("Matematika", "MAT").with_class("VII A", 2));
        let out = filler().fill_with_rng(
            &start,
            &only_a,
            "MAT",
            &OffConstraints::new(),
            &SplitConstraints::new(),
            &mut rng,
        );

        assert_eq!(out.count_matching("T1", "MAT", "VII A"), 2);
        assert_eq!(out.cell("SENIN", 2, "VII A"), Some(&ScheduleCell::Empty), "seed {seed}");
        assert_eq!(out.cell("SENIN", 2, "VII B"), Some(&busy));
    }
}

#[test]
fn test_off_day_is_never_used() {
    let roster = roster();
    let off = OffConstraints::new().with("T3", "BIN", OffDayConstraint::new().with_blocked_day("JUM'AT"));

    for seed in 0..SEEDS {
        let mut rng = SmallRng::seed_from_u64(seed);
        let out = filler().fill_with_rng(
            &filler().empty_schedule(),
            &roster[2],
            "BIN",
            &off,
            &SplitConstraints::new(),
            &mut rng,
        );

        assert_eq!(out.count_matching("T3", "BIN", "VII B"), 6);
        assert!(!days_with(&out, "T3", "BIN", "VII B").contains("JUM'AT"), "seed {seed}");
    }
}

#[test]
fn test_single_block_pattern() {
    let roster = roster();
    let grid = TimeGrid::standard();
    let split = SplitConstraints::new().with_parsed("IPA", "4").unwrap();

    for seed in 0..SEEDS {
        let mut rng = SmallRng::seed_from_u64(seed);
        let out = filler().fill_with_report_rng(
            &filler().empty_schedule(),
            &roster[2],
            "IPA",
            &OffConstraints::new(),
            &split,
            &mut rng,
        );
        assert_eq!(out.placed.len(), 2);

        for class in ["VII A", "IX A"] {
            let days = days_with(&out.schedule, "T3", "IPA", class);
            assert_eq!(days.len(), 1, "seed {seed}");
            let day = days.iter().next().unwrap();
            let periods = periods_on(&out.schedule, "T3", "IPA", class, day);
            assert_eq!(periods.len(), 4);
            assert!(is_contiguous_run(&grid, day, &periods), "seed {seed}: {periods:?}");
        }
    }
}

#[test]
fn test_refill_is_noop() {
    let roster = roster();
    let mut rng = SmallRng::seed_from_u64(7);
    let once = filler().fill_with_rng(
        &filler().empty_schedule(),
        &roster[0],
        "MAT",
        &OffConstraints::new(),
        &SplitConstraints::new(),
        &mut rng,
    );
    let twice = filler().fill_with_report_rng(
        &once,
        &roster[0],
        "MAT",
        &OffConstraints::new(),
        &SplitConstraints::new(),
        &mut rng,
    );
    assert_eq!(twice.schedule, once);
    assert!(twice.placed.is_empty());
}

#[test]
fn test_partial_fill_tops_up() {
    let roster = roster();
    let mut rng = SmallRng::seed_from_u64(11);
    let mut start = filler().empty_schedule();
    let cell = ScheduleCell::Class(ClassSession::new(&roster[0], roster[0].subject("MAT").unwrap()));
    start.set_cell("RABU", 1, "VII A", cell.clone()).unwrap();
    start.set_cell("RABU", 2, "VII A", cell).unwrap();

    let out = filler().fill_with_rng(
        &start,
        &roster[0],
        "MAT",
        &OffConstraints::new(),
        &SplitConstraints::new(),
        &mut rng,
    );
    assert_eq!(out.count_matching("T1", "MAT", "VII A"), 5);
    assert_eq!(out.cell("RABU", 1, "VII A"), start.cell("RABU", 1, "VII A"));
}

#[test]
fn test_whole_roster_invariants() {
    init_tracing();
    let roster = roster();
    let split = SplitConstraints::new().with_parsed("IPA", "2+2").unwrap();
    let rules = FillRules::default();

    for seed in 0..SEEDS {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut schedule = filler().empty_schedule();

        for teacher in &roster {
            for load in &teacher.subjects {
                let next = filler().fill_with_rng(
                    &schedule,
                    teacher,
                    &load.code,
                    &OffConstraints::new(),
                    &split,
                    &mut rng,
                );

                // Occupied and blocked cells survive untouched
                for (day, period, class, cell) in schedule.iter() {
                    if !cell.is_empty() {
                        assert_eq!(next.cell(day, period, class), Some(cell), "seed {seed}");
                    }
                }
                schedule = next;
            }
        }

        let violations = audit_schedule(&schedule, &roster, &split, &rules);
        assert!(violations.is_empty(), "seed {seed}: {violations:?}");

        for (_, period, _, cell) in schedule.iter() {
            if cell.session().is_some_and(|s| s.subject_code == "PJOK") {
                assert!(period < 7, "seed {seed}: PJOK at period {period}");
            }
        }

        for teacher in &roster {
            for load in &teacher.subjects {
                let summary = FillSummary::calculate(&schedule, teacher, &load.code, filler().classes());
                assert!(summary.total_placed() <= summary.total_required());
            }
        }
    }
}

#[test]
fn test_input_schedule_untouched() {
    let roster = roster();
    let start = filler().empty_schedule();
    let snapshot = start.clone();
    let mut rng = SmallRng::seed_from_u64(3);

    let out = filler().fill_with_rng(
        &start,
        &roster[1],
        "PJOK",
        &OffConstraints::new(),
        &SplitConstraints::new(),
        &mut rng,
    );
    assert_eq!(start, snapshot);
    assert!(out.occupied_count() > 0);
}
