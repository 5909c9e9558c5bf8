//! User-entered placement constraints.
//!
//! Two kinds of constraints steer the engine:
//!
//! - [`OffDayConstraint`]: days and periods a teacher must not teach a
//!   given subject, keyed by teacher id + subject code.
//! - [`SplitPattern`]: approved ways to chunk a subject's weekly hours
//!   into blocks, keyed by subject code. Patterns also bound how many
//!   hours of the subject may land on one day.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::TimetableError;

/// Days and periods forbidden for one teacher + subject pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OffDayConstraint {
    /// Days blocked entirely.
    pub blocked_days: BTreeSet<String>,
    /// Per-day blocked period indices.
    pub blocked_periods: BTreeMap<String, BTreeSet<i32>>,
}

impl OffDayConstraint {
    /// Creates an empty constraint (nothing blocked).
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks a whole day.
    pub fn with_blocked_day(mut self, day: impl Into<String>) -> Self {
        self.blocked_days.insert(day.into());
        self
    }

    /// Blocks one period on a day.
    pub fn with_blocked_period(mut self, day: impl Into<String>, period: i32) -> Self {
        self.blocked_periods.entry(day.into()).or_default().insert(period);
        self
    }

    /// Whether the whole day is blocked.
    pub fn is_day_blocked(&self, day: &str) -> bool {
        self.blocked_days.contains(day)
    }

    /// Whether a period is blocked (explicitly or via its day).
    pub fn is_period_blocked(&self, day: &str, period: i32) -> bool {
        self.is_day_blocked(day)
            || self
                .blocked_periods
                .get(day)
                .is_some_and(|p| p.contains(&period))
    }

    /// Blocked periods on a day (empty set if none).
    pub fn periods_on(&self, day: &str) -> BTreeSet<i32> {
        self.blocked_periods.get(day).cloned().unwrap_or_default()
    }
}

/// Off-day constraints indexed by teacher id, then subject code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OffConstraints {
    entries: HashMap<String, HashMap<String, OffDayConstraint>>,
}

impl OffConstraints {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the constraint for a teacher + subject pair.
    pub fn insert(
        &mut self,
        teacher_id: impl Into<String>,
        subject_code: impl Into<String>,
        constraint: OffDayConstraint,
    ) {
        self.entries
            .entry(teacher_id.into())
            .or_default()
            .insert(subject_code.into(), constraint);
    }

    /// Builder: sets a constraint and returns self.
    pub fn with(
        mut self,
        teacher_id: impl Into<String>,
        subject_code: impl Into<String>,
        constraint: OffDayConstraint,
    ) -> Self {
        self.insert(teacher_id, subject_code, constraint);
        self
    }

    /// Looks up the constraint for a teacher + subject pair.
    pub fn get(&self, teacher_id: &str, subject_code: &str) -> Option<&OffDayConstraint> {
        self.entries.get(teacher_id)?.get(subject_code)
    }

    /// Number of teacher + subject pairs with a constraint.
    pub fn len(&self) -> usize {
        self.entries.values().map(|m| m.len()).sum()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A decomposition of weekly hours into contiguous blocks, e.g. `3+2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPattern {
    /// Block sizes in hours.
    pub blocks: Vec<u32>,
}

impl SplitPattern {
    /// Creates a pattern from block sizes.
    pub fn new(blocks: Vec<u32>) -> Self {
        Self { blocks }
    }

    /// Sum of all blocks.
    pub fn total(&self) -> u32 {
        self.blocks.iter().sum()
    }

    /// Largest block (0 for an empty pattern).
    pub fn largest_block(&self) -> u32 {
        self.blocks.iter().copied().max().unwrap_or(0)
    }
}

impl fmt::Display for SplitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.blocks.iter().map(|b| b.to_string()).collect();
        write!(f, "{}", parts.join("+"))
    }
}

impl FromStr for SplitPattern {
    type Err = TimetableError;

    /// Parses `"3+2"`, `"2 + 2 + 2"` or a single `"4"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut blocks = Vec::new();
        for part in s.split('+') {
            let n: u32 = part
                .trim()
                .parse()
                .map_err(|_| TimetableError::InvalidSplitPattern(s.to_string()))?;
            if n == 0 {
                return Err(TimetableError::InvalidSplitPattern(s.to_string()));
            }
            blocks.push(n);
        }
        Ok(Self { blocks })
    }
}

/// Split patterns indexed by subject code, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitConstraints {
    patterns: HashMap<String, Vec<SplitPattern>>,
}

impl SplitConstraints {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pattern for a subject. Duplicates are ignored.
    pub fn add(&mut self, subject_code: impl Into<String>, pattern: SplitPattern) {
        let list = self.patterns.entry(subject_code.into()).or_default();
        if !list.contains(&pattern) {
            list.push(pattern);
        }
    }

    /// Builder: registers a pattern and returns self.
    pub fn with_pattern(mut self, subject_code: impl Into<String>, pattern: SplitPattern) -> Self {
        self.add(subject_code, pattern);
        self
    }

    /// Builder: parses and registers a pattern in `"3+2"` notation.
    pub fn with_parsed(
        mut self,
        subject_code: impl Into<String>,
        pattern: &str,
    ) -> crate::error::Result<Self> {
        let pattern: SplitPattern = pattern.parse()?;
        self.add(subject_code, pattern);
        Ok(self)
    }

    /// All patterns for a subject (empty slice if none).
    pub fn patterns_for(&self, subject_code: &str) -> &[SplitPattern] {
        self.patterns
            .get(subject_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Patterns for a subject whose blocks sum to `total`.
    pub fn matching(&self, subject_code: &str, total: u32) -> Vec<&SplitPattern> {
        self.patterns_for(subject_code)
            .iter()
            .filter(|p| p.total() == total)
            .collect()
    }

    /// Whether any pattern is registered for the subject.
    pub fn has_patterns(&self, subject_code: &str) -> bool {
        !self.patterns_for(subject_code).is_empty()
    }

    /// Iterates `(subject_code, patterns)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SplitPattern])> {
        self.patterns
            .iter()
            .map(|(code, list)| (code.as_str(), list.as_slice()))
    }

    /// Number of subjects with patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
