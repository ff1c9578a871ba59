use serde::{Deserialize, Serialize};

use super::task::Task;

/// Name given to freshly created lists
pub const UNTITLED_LIST: &str = "Untitled list";

/// A named group of tasks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub name: String,
    #[serde(rename = "taskList", default)]
    pub tasks: Vec<Task>,
}

impl TodoList {
    pub fn new(name: impl Into<String>) -> Self {
        TodoList {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    pub fn untitled() -> Self {
        TodoList::new(UNTITLED_LIST)
    }

    /// Number of checked tasks
    pub fn checked_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_checked()).count()
    }
}

/// The whole persisted document: an ordered sequence of lists.
///
/// Lists and tasks are identified only by position. Older files also carry
/// `listIndex`/`taskIndex`; those keys are ignored on read and never written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "list", default)]
    pub lists: Vec<TodoList>,
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn list(&self, index: usize) -> Option<&TodoList> {
        self.lists.get(index)
    }

    /// Total number of tasks across all lists
    pub fn task_count(&self) -> usize {
        self.lists.iter().map(|l| l.tasks.len()).sum()
    }
}
