use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Checkbox state of a task.
///
/// Stored on disk as an integer: `0` unchecked, `1` checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum TaskStatus {
    #[default]
    Unchecked,
    Checked,
}

impl TaskStatus {
    /// The opposite state
    pub fn toggled(self) -> TaskStatus {
        match self {
            TaskStatus::Unchecked => TaskStatus::Checked,
            TaskStatus::Checked => TaskStatus::Unchecked,
        }
    }

    pub fn is_checked(self) -> bool {
        self == TaskStatus::Checked
    }

    /// The character used inside the checkbox `[ ]`
    pub fn checkbox_char(self) -> char {
        match self {
            TaskStatus::Unchecked => ' ',
            TaskStatus::Checked => 'x',
        }
    }
}

impl From<u8> for TaskStatus {
    fn from(value: u8) -> Self {
        if value == 0 {
            TaskStatus::Unchecked
        } else {
            TaskStatus::Checked
        }
    }
}

impl From<TaskStatus> for u8 {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Unchecked => 0,
            TaskStatus::Checked => 1,
        }
    }
}

/// A single todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// One-line title shown in the task list
    pub title: String,
    /// Rich-text body as an HTML fragment
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub status: TaskStatus,
    /// Creation time, milliseconds since the epoch on disk
    #[serde(with = "chrono::serde::ts_milliseconds", default = "now_millis")]
    pub timestamp: DateTime<Utc>,
}

impl Task {
    /// Create an unchecked task with empty content, stamped with the current time
    pub fn new(title: impl Into<String>) -> Self {
        Task {
            title: title.into(),
            content: String::new(),
            status: TaskStatus::Unchecked,
            timestamp: now_millis(),
        }
    }

    pub fn is_checked(&self) -> bool {
        self.status.is_checked()
    }
}

/// Current time at the precision the file format keeps
fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
