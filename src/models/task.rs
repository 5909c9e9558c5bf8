//! Placement task model.
//!
//! A fill task asks the engine to place one contiguous block of lessons
//! for a teacher + subject in one class. Tasks are built fresh for each
//! fill call and dropped afterwards.

use serde::{Deserialize, Serialize};

/// Lifecycle of a fill task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    /// Not yet attempted.
    #[default]
    Pending,
    /// Block committed to the schedule.
    Placed,
    /// No valid window existed; the hours stay open.
    Abandoned,
}

/// One block of lessons to place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillTask {
    /// Teacher identifier.
    pub teacher_id: String,
    /// Subject code.
    pub subject_code: String,
    /// Target class.
    pub class: String,
    /// Block length in periods.
    pub duration: u32,
    /// Placement priority (higher = placed first).
    pub priority: i32,
    /// Current state.
    pub state: TaskState,
}

impl FillTask {
    /// Creates a pending task. Priority follows block length.
    pub fn new(
        teacher_id: impl Into<String>,
        subject_code: impl Into<String>,
        class: impl Into<String>,
        duration: u32,
    ) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            subject_code: subject_code.into(),
            class: class.into(),
            duration,
            priority: i32::try_from(duration).unwrap_or(i32::MAX),
            state: TaskState::Pending,
        }
    }

    /// Overrides the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Marks the task placed.
    pub fn mark_placed(&mut self) {
        self.state = TaskState::Placed;
    }

    /// Marks the task abandoned.
    pub fn mark_abandoned(&mut self) {
        self.state = TaskState::Abandoned;
    }

    /// Whether the task reached a terminal state.
    pub fn is_finished(&self) -> bool {
        self.state != TaskState::Pending
    }
}
