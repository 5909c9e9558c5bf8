//! School configuration and engine rules.
//!
//! [`TimetableConfig`] bundles the static data a school sets up once: the
//! bell grid, the class list and the fill rules. Every field has a
//! default, so a partial JSON document is enough.
//!
//! ```
//! use u_timetable::config::TimetableConfig;
//!
//! let cfg = TimetableConfig::from_json(r#"{ "classes": ["VII A", "VII B"] }"#).unwrap();
//! assert_eq!(cfg.classes.len(), 2);
//! assert_eq!(cfg.grid.days.len(), 5);
//! assert!(cfg.rules.forbids("PJOK", 7));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{TimeGrid, WeeklySchedule};
use crate::scheduler::PlacementPass;

/// A hard rule: a subject may not be taught from `from_period` onwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatePeriodRule {
    /// Subject code the rule applies to.
    pub subject_code: String,
    /// First forbidden period index.
    pub from_period: i32,
}

impl LatePeriodRule {
    /// Creates a rule.
    pub fn new(subject_code: impl Into<String>, from_period: i32) -> Self {
        Self {
            subject_code: subject_code.into(),
            from_period,
        }
    }

    /// Whether the rule forbids the subject at a period.
    #[inline]
    pub fn forbids(&self, subject_code: &str, period: i32) -> bool {
        self.subject_code == subject_code && period >= self.from_period
    }
}

/// Rules applied by the slot-filling engine.
///
/// The default keeps `PJOK` out of periods 7 and later, a hard rule for
/// the standard school week. The engine enforces only the rules listed
/// here: an empty `late_period_rules` (in code or JSON) or
/// [`FillRules::unrestricted`] lifts that ban, and placements may then
/// land `PJOK` in late periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillRules {
    /// Subject-specific late-period bans.
    pub late_period_rules: Vec<LatePeriodRule>,
    /// Placement passes, tried in order for each task.
    pub passes: Vec<PlacementPass>,
}

impl Default for FillRules {
    /// Physical education (`PJOK`) is kept out of periods 7 and later;
    /// tasks try a strict pass and then a relaxed one.
    fn default() -> Self {
        Self {
            late_period_rules: vec![LatePeriodRule::new("PJOK", 7)],
            passes: vec![PlacementPass::Strict, PlacementPass::Relaxed],
        }
    }
}

impl FillRules {
    /// Rules with no late-period bans and the default passes.
    ///
    /// Drops the default `PJOK` ban; use only for schools without it.
    pub fn unrestricted() -> Self {
        Self {
            late_period_rules: Vec::new(),
            ..Self::default()
        }
    }

    /// Adds a late-period rule.
    pub fn with_late_period_rule(mut self, rule: LatePeriodRule) -> Self {
        self.late_period_rules.push(rule);
        self
    }

    /// Replaces the pass list.
    pub fn with_passes(mut self, passes: Vec<PlacementPass>) -> Self {
        self.passes = passes;
        self
    }

    /// Whether any rule forbids the subject at a period.
    pub fn forbids(&self, subject_code: &str, period: i32) -> bool {
        self.late_period_rules
            .iter()
            .any(|r| r.forbids(subject_code, period))
    }
}

/// Static school setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    /// Weekly bell grid.
    pub grid: TimeGrid,
    /// Class names in display order.
    pub classes: Vec<String>,
    /// Engine rules.
    pub rules: FillRules,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        let classes = ["VII", "VIII", "IX"]
            .iter()
            .flat_map(|grade| ["A", "B", "C"].iter().map(move |p| format!("{grade} {p}")))
            .collect();
        Self {
            grid: TimeGrid::standard(),
            classes,
            rules: FillRules::default(),
        }
    }
}

impl TimetableConfig {
    /// Parses a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Baseline schedule for this grid and class list.
    pub fn empty_schedule(&self) -> WeeklySchedule {
        WeeklySchedule::empty(&self.grid, &self.classes)
    }
}
