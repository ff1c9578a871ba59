use crate::model::{Document, Task, TaskStatus};

use super::StoreError;
use super::list_ops::list_mut;

/// Append `task` to the list at `list`. Returns the task's index.
pub fn add_task(doc: &mut Document, list: usize, task: Task) -> Result<usize, StoreError> {
    let tasks = &mut list_mut(doc, list)?.tasks;
    tasks.push(task);
    Ok(tasks.len() - 1)
}

/// Remove a task, returning it.
pub fn remove_task(doc: &mut Document, list: usize, task: usize) -> Result<Task, StoreError> {
    let tasks = &mut list_mut(doc, list)?.tasks;
    if task >= tasks.len() {
        return Err(StoreError::TaskOutOfRange { list, task });
    }
    Ok(tasks.remove(task))
}

pub fn set_title(
    doc: &mut Document,
    list: usize,
    task: usize,
    title: String,
) -> Result<(), StoreError> {
    task_mut(doc, list, task)?.title = title;
    Ok(())
}

pub fn set_content(
    doc: &mut Document,
    list: usize,
    task: usize,
    content: String,
) -> Result<(), StoreError> {
    task_mut(doc, list, task)?.content = content;
    Ok(())
}

pub fn set_status(
    doc: &mut Document,
    list: usize,
    task: usize,
    status: TaskStatus,
) -> Result<(), StoreError> {
    task_mut(doc, list, task)?.status = status;
    Ok(())
}

pub(crate) fn task_mut(
    doc: &mut Document,
    list: usize,
    task: usize,
) -> Result<&mut Task, StoreError> {
    list_mut(doc, list)?
        .tasks
        .get_mut(task)
        .ok_or(StoreError::TaskOutOfRange { list, task })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TodoList;

    fn sample_doc() -> Document {
        let mut home = TodoList::new("Home");
        home.tasks.push(Task::new("Dishes"));
        home.tasks.push(Task::new("Laundry"));
        Document {
            lists: vec![home, TodoList::new("Work")],
        }
    }

    #[test]
    fn add_task_appends() {
        let mut doc = sample_doc();
        let idx = add_task(&mut doc, 1, Task::new("Email")).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(doc.lists[1].tasks[0].title, "Email");
    }

    #[test]
    fn add_task_to_missing_list() {
        let mut doc = sample_doc();
        assert_eq!(
            add_task(&mut doc, 5, Task::new("x")),
            Err(StoreError::ListOutOfRange(5))
        );
    }

    #[test]
    fn remove_task_returns_removed() {
        let mut doc = sample_doc();
        let removed = remove_task(&mut doc, 0, 0).unwrap();
        assert_eq!(removed.title, "Dishes");
        assert_eq!(doc.lists[0].tasks.len(), 1);
        assert_eq!(
            remove_task(&mut doc, 0, 3),
            Err(StoreError::TaskOutOfRange { list: 0, task: 3 })
        );
    }

    #[test]
    fn setters_edit_fields() {
        let mut doc = sample_doc();
        set_title(&mut doc, 0, 1, "Fold laundry".into()).unwrap();
        set_content(&mut doc, 0, 1, "<b>today</b>".into()).unwrap();
        set_status(&mut doc, 0, 1, TaskStatus::Checked).unwrap();
        let task = &doc.lists[0].tasks[1];
        assert_eq!(task.title, "Fold laundry");
        assert_eq!(task.content, "<b>today</b>");
        assert_eq!(task.status, TaskStatus::Checked);
    }

    #[test]
    fn setters_reject_bad_index() {
        let mut doc = sample_doc();
        assert!(set_title(&mut doc, 1, 0, "x".into()).is_err());
        assert!(set_status(&mut doc, 9, 0, TaskStatus::Checked).is_err());
    }
}
