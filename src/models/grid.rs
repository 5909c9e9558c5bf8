//! Weekly time grid models.
//!
//! Defines the static structure of a school week: ordered days, each
//! with an ordered list of slots (lesson periods, breaks, ceremonies).
//!
//! # Period Model
//! Every slot carries a period index. Non-negative indices are positions
//! that get a cell in the schedule; negative indices are breaks that never
//! receive a cell. A non-negative slot that is not [`SlotCategory::Learning`]
//! (e.g. the Monday ceremony) gets a cell, but that cell starts blocked.
//!
//! # Contiguity
//! Two learning periods are contiguous only if no other slot sits between
//! them in the day's slot list. A block of lessons never spans a break.

use serde::{Deserialize, Serialize};

/// What a slot is used for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotCategory {
    /// Regular lesson period; the only category the engine assigns into.
    Learning,
    /// Recess between lessons.
    Break,
    /// Flag ceremony or assembly.
    Ceremony,
    /// School-specific activity (habituation, prayer, gymnastics).
    Custom(String),
}

/// A fixed position in a school day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Period index. Negative = break, never assignable.
    pub period: i32,
    /// Start time, `"HH:MM"`.
    pub start: String,
    /// End time, `"HH:MM"`.
    pub end: String,
    /// Display label (also used as the reason of blocked cells).
    pub label: String,
    /// Slot category.
    pub category: SlotCategory,
}

impl Slot {
    /// Creates a learning period.
    pub fn lesson(period: i32, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            period,
            start: start.into(),
            end: end.into(),
            label: format!("Jam ke-{period}"),
            category: SlotCategory::Learning,
        }
    }

    /// Creates a non-learning slot.
    pub fn activity(
        period: i32,
        start: impl Into<String>,
        end: impl Into<String>,
        label: impl Into<String>,
        category: SlotCategory,
    ) -> Self {
        Self {
            period,
            start: start.into(),
            end: end.into(),
            label: label.into(),
            category,
        }
    }

    /// Whether this slot gets a cell in the schedule.
    #[inline]
    pub fn has_cell(&self) -> bool {
        self.period >= 0
    }

    /// Whether lessons may be placed here.
    #[inline]
    pub fn is_teachable(&self) -> bool {
        self.has_cell() && self.category == SlotCategory::Learning
    }

    /// Slot length in minutes, or `None` if a time is malformed.
    pub fn duration_minutes(&self) -> Option<u32> {
        let start = parse_clock(&self.start)?;
        let end = parse_clock(&self.end)?;
        end.checked_sub(start)
    }
}

fn parse_clock(s: &str) -> Option<u32> {
    let (h, m) = s.split_once(':')?;
    let h: u32 = h.trim().parse().ok()?;
    let m: u32 = m.trim().parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// One school day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    /// Day name (e.g. `"SENIN"`).
    pub name: String,
    /// Slots in chronological order.
    pub slots: Vec<Slot>,
}

impl Day {
    /// Creates an empty day.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
        }
    }

    /// Appends a slot.
    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Finds the slot with the given period index.
    pub fn slot(&self, period: i32) -> Option<&Slot> {
        self.slots.iter().find(|s| s.period == period)
    }

    /// Periods that get a schedule cell, in order.
    pub fn cell_periods(&self) -> Vec<i32> {
        self.slots
            .iter()
            .filter(|s| s.has_cell())
            .map(|s| s.period)
            .collect()
    }

    /// Learning periods, in order.
    pub fn teachable_periods(&self) -> Vec<i32> {
        self.slots
            .iter()
            .filter(|s| s.is_teachable())
            .map(|s| s.period)
            .collect()
    }

    /// Maximal runs of back-to-back learning periods.
    ///
    /// Any non-learning slot (break, ceremony, habituation) ends a run.
    pub fn teachable_runs(&self) -> Vec<Vec<i32>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for slot in &self.slots {
            if slot.is_teachable() {
                current.push(slot.period);
            } else if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}

/// The weekly grid: ordered days of ordered slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    /// Days in week order.
    pub days: Vec<Day>,
}

impl TimeGrid {
    /// Creates a grid from days.
    pub fn new(days: Vec<Day>) -> Self {
        Self { days }
    }

    /// Finds a day by name.
    pub fn day(&self, name: &str) -> Option<&Day> {
        self.days.iter().find(|d| d.name == name)
    }

    /// Day names in week order.
    pub fn day_names(&self) -> Vec<&str> {
        self.days.iter().map(|d| d.name.as_str()).collect()
    }

    /// Total learning periods across the week.
    pub fn teachable_count(&self) -> usize {
        self.days.iter().map(|d| d.teachable_periods().len()).sum()
    }

    /// Standard five-day junior high week.
    ///
    /// Monday to Thursday run nine 40-minute periods split by two breaks,
    /// opening with the flag ceremony (Monday) or habituation (other days).
    /// Friday is cut after period 6.
    pub fn standard() -> Self {
        let opening = |day: &str| -> Slot {
            if day == "SENIN" {
                Slot::activity(0, "07:00", "07:40", "Upacara", SlotCategory::Ceremony)
            } else {
                Slot::activity(
                    0,
                    "07:00",
                    "07:40",
                    "Pembiasaan",
                    SlotCategory::Custom("PEMBIASAAN".into()),
                )
            }
        };

        let mut days = Vec::new();
        for name in ["SENIN", "SELASA", "RABU", "KAMIS"] {
            days.push(
                Day::new(name)
                    .with_slot(opening(name))
                    .with_slot(Slot::lesson(1, "07:40", "08:20"))
                    .with_slot(Slot::lesson(2, "08:20", "09:00"))
                    .with_slot(Slot::lesson(3, "09:00", "09:40"))
                    .with_slot(Slot::lesson(4, "09:40", "10:20"))
                    .with_slot(Slot::activity(-1, "10:20", "10:35", "Istirahat", SlotCategory::Break))
                    .with_slot(Slot::lesson(5, "10:35", "11:15"))
                    .with_slot(Slot::lesson(6, "11:15", "11:55"))
                    .with_slot(Slot::activity(-2, "11:55", "12:30", "Ishoma", SlotCategory::Break))
                    .with_slot(Slot::lesson(7, "12:30", "13:10"))
                    .with_slot(Slot::lesson(8, "13:10", "13:50"))
                    .with_slot(Slot::lesson(9, "13:50", "14:30")),
            );
        }

        days.push(
            Day::new("JUM'AT")
                .with_slot(opening("JUM'AT"))
                .with_slot(Slot::lesson(1, "07:40", "08:20"))
                .with_slot(Slot::lesson(2, "08:20", "09:00"))
                .with_slot(Slot::lesson(3, "09:00", "09:40"))
                .with_slot(Slot::lesson(4, "09:40", "10:20"))
                .with_slot(Slot::activity(-1, "10:20", "10:35", "Istirahat", SlotCategory::Break))
                .with_slot(Slot::lesson(5, "10:35", "11:15"))
                .with_slot(Slot::lesson(6, "11:15", "11:55")),
        );

        Self::new(days)
    }
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_kinds() {
        let lesson = Slot::lesson(3, "09:00", "09:40");
        assert!(lesson.has_cell());
        assert!(lesson.is_teachable());
        assert_eq!(lesson.label, "Jam ke-3");

        let ceremony = Slot::activity(0, "07:00", "07:40", "Upacara", SlotCategory::Ceremony);
        assert!(ceremony.has_cell());
        assert!(!ceremony.is_teachable());

        let recess = Slot::activity(-1, "10:20", "10:35", "Istirahat", SlotCategory::Break);
        assert!(!recess.has_cell());
        assert!(!recess.is_teachable());
    }

    #[test]
    fn test_slot_duration() {
        assert_eq!(Slot::lesson(1, "07:40", "08:20").duration_minutes(), Some(40));
        assert_eq!(Slot::lesson(1, "08:20", "07:40").duration_minutes(), None);
        assert_eq!(Slot::lesson(1, "7.40", "08:20").duration_minutes(), None);
        assert_eq!(Slot::lesson(1, "25:00", "26:00").duration_minutes(), None);
    }

    #[test]
    fn test_teachable_runs_split_at_breaks() {
        let grid = TimeGrid::standard();
        let senin = grid.day("SENIN").unwrap();
        assert_eq!(
            senin.teachable_runs(),
            vec![vec![1, 2, 3, 4], vec![5, 6], vec![7, 8, 9]]
        );
        assert_eq!(senin.teachable_periods(), (1..=9).collect::<Vec<_>>());
        assert_eq!(senin.cell_periods(), (0..=9).collect::<Vec<_>>());
    }

    #[test]
    fn test_standard_grid_shape() {
        let grid = TimeGrid::standard();
        assert_eq!(
            grid.day_names(),
            vec!["SENIN", "SELASA", "RABU", "KAMIS", "JUM'AT"]
        );
        assert_eq!(grid.teachable_count(), 4 * 9 + 6);

        let jumat = grid.day("JUM'AT").unwrap();
        assert_eq!(jumat.teachable_runs(), vec![vec![1, 2, 3, 4], vec![5, 6]]);
        assert_eq!(
            grid.day("SELASA").unwrap().slot(0).unwrap().category,
            SlotCategory::Custom("PEMBIASAAN".into())
        );
        assert!(grid.day("MINGGU").is_none());
    }

    #[test]
    fn test_custom_day_run_ends_at_trailing_slot() {
        let day = Day::new("X")
            .with_slot(Slot::lesson(0, "07:00", "07:40"))
            .with_slot(Slot::lesson(1, "07:40", "08:20"))
            .with_slot(Slot::activity(2, "08:20", "09:00", "Sholat", SlotCategory::Custom("DHUHA".into())))
            .with_slot(Slot::lesson(3, "09:00", "09:40"));
        assert_eq!(day.teachable_runs(), vec![vec![0, 1], vec![3]]);
        assert_eq!(day.cell_periods(), vec![0, 1, 2, 3]);
    }
}
