//! Teacher roster model.
//!
//! A teacher owns a list of subject loads; each load maps classes to the
//! weekly hours that teacher must deliver there. The engine reads the
//! roster but never modifies it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A subject taught by one teacher, with its weekly hours per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectLoad {
    /// Subject name (e.g. "Matematika").
    pub subject: String,
    /// Subject code (e.g. "MAT").
    pub code: String,
    /// Display color for the grid.
    pub color: String,
    /// Weekly hours per class. Missing or zero = not taught there.
    pub class_hours: BTreeMap<String, u32>,
}

impl SubjectLoad {
    /// Creates a load with no classes.
    pub fn new(subject: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            code: code.into(),
            color: String::new(),
            class_hours: BTreeMap::new(),
        }
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the weekly hours for a class.
    pub fn with_class(mut self, class: impl Into<String>, hours: u32) -> Self {
        self.class_hours.insert(class.into(), hours);
        self
    }

    /// Weekly hours required in a class (0 if not taught).
    pub fn hours_for(&self, class: &str) -> u32 {
        self.class_hours.get(class).copied().unwrap_or(0)
    }

    /// Sum of weekly hours across all classes.
    pub fn total_hours(&self) -> u32 {
        self.class_hours.values().sum()
    }

    /// Classes with a positive load.
    pub fn taught_classes(&self) -> impl Iterator<Item = &str> {
        self.class_hours
            .iter()
            .filter(|(_, &h)| h > 0)
            .map(|(c, _)| c.as_str())
    }
}

/// A teacher and the subjects they carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Short code printed in grid cells.
    pub code: String,
    /// Subject loads.
    pub subjects: Vec<SubjectLoad>,
}

impl Teacher {
    /// Creates a teacher with no subjects.
    pub fn new(id: impl Into<String>, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            subjects: Vec::new(),
        }
    }

    /// Adds a subject load.
    pub fn with_subject(mut self, load: SubjectLoad) -> Self {
        self.subjects.push(load);
        self
    }

    /// Finds the load for a subject code.
    pub fn subject(&self, code: &str) -> Option<&SubjectLoad> {
        self.subjects.iter().find(|s| s.code == code)
    }

    /// Whether this teacher carries the subject code.
    pub fn teaches(&self, code: &str) -> bool {
        self.subject(code).is_some()
    }

    /// Total weekly hours across all subjects and classes.
    pub fn total_hours(&self) -> u32 {
        self.subjects.iter().map(|s| s.total_hours()).sum()
    }
}

/// Finds a teacher by id in a roster.
pub fn find_teacher<'a>(roster: &'a [Teacher], id: &str) -> Option<&'a Teacher> {
    roster.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Teacher {
        Teacher::new("T1", "Budi Santoso", "BS")
            .with_subject(
                SubjectLoad::new("Matematika", "MAT")
                    .with_color("#4f46e5")
                    .with_class("VII A", 5)
                    .with_class("VII B", 5)
                    .with_class("VII C", 0),
            )
            .with_subject(SubjectLoad::new("Informatika", "INF").with_class("VIII A", 2))
    }

    #[test]
    fn test_teacher_builder() {
        let t = sample();
        assert_eq!(t.id, "T1");
        assert_eq!(t.code, "BS");
        assert!(t.teaches("MAT"));
        assert!(!t.teaches("BIN"));
        assert_eq!(t.subject("MAT").unwrap().color, "#4f46e5");
        assert_eq!(t.total_hours(), 12);
    }

    #[test]
    fn test_subject_hours() {
        let t = sample();
        let mat = t.subject("MAT").unwrap();
        assert_eq!(mat.hours_for("VII A"), 5);
        assert_eq!(mat.hours_for("VII C"), 0);
        assert_eq!(mat.hours_for("IX A"), 0);
        assert_eq!(mat.taught_classes().collect::<Vec<_>>(), vec!["VII A", "VII B"]);
    }

    #[test]
    fn test_find_teacher() {
        let roster = vec![sample(), Teacher::new("T2", "Siti", "ST")];
        assert_eq!(find_teacher(&roster, "T2").unwrap().name, "Siti");
        assert!(find_teacher(&roster, "T9").is_none());
    }
}
