pub mod list_ops;
pub mod search;
pub mod store;
pub mod task_ops;

/// Error type for list and task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("list index {0} out of range")]
    ListOutOfRange(usize),
    #[error("task index {task} out of range in list {list}")]
    TaskOutOfRange { list: usize, task: usize },
    #[error("no list selected")]
    NoListSelected,
    #[error("no task selected")]
    NoTaskSelected,
    #[error("task title is empty")]
    EmptyTitle,
}
