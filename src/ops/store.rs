use crate::model::{Document, Selection, Task, TaskStatus, TodoList, selection_after_removal};

use super::{StoreError, list_ops, task_ops};

/// The single in-memory document plus the user's current selection.
///
/// Every edit goes through an action method here, which applies the matching
/// mutation from [`list_ops`] / [`task_ops`] and then re-derives the
/// selection so both indices stay in bounds.
#[derive(Debug, Clone, Default)]
pub struct Store {
    document: Document,
    selection: Selection,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    /// A store holding `document`, with its first list selected.
    pub fn from_document(document: Document) -> Self {
        let mut store = Store::new();
        store.replace(document);
        store
    }

    // -----------------------------------------------------------------------
    // Getters
    // -----------------------------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn list_count(&self) -> usize {
        self.document.lists.len()
    }

    pub fn list_index(&self) -> Option<usize> {
        self.selection.list
    }

    pub fn task_index(&self) -> Option<usize> {
        self.selection.task
    }

    pub fn current_list(&self) -> Option<&TodoList> {
        self.document.lists.get(self.selection.list?)
    }

    /// Name of the selected list
    pub fn current_name(&self) -> Option<&str> {
        self.current_list().map(|l| l.name.as_str())
    }

    /// Tasks of the selected list (empty when nothing is selected)
    pub fn task_list(&self) -> &[Task] {
        self.current_list()
            .map(|l| l.tasks.as_slice())
            .unwrap_or(&[])
    }

    pub fn task_count(&self) -> usize {
        self.task_list().len()
    }

    pub fn current_task(&self) -> Option<&Task> {
        self.task_list().get(self.selection.task?)
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Replace the whole document. Selects the first list, if any.
    pub fn replace(&mut self, document: Document) {
        self.document = document;
        self.selection = Selection {
            list: if self.document.is_empty() { None } else { Some(0) },
            task: None,
        };
    }

    /// Take the document out, leaving an empty store behind.
    pub fn take_document(&mut self) -> Document {
        self.selection = Selection::none();
        std::mem::take(&mut self.document)
    }

    /// Select a list (or none). Always clears the task selection.
    pub fn select_list(&mut self, index: Option<usize>) -> Result<(), StoreError> {
        if let Some(i) = index
            && i >= self.list_count()
        {
            return Err(StoreError::ListOutOfRange(i));
        }
        self.selection.list = index;
        self.selection.task = None;
        Ok(())
    }

    /// Select a task of the selected list (or none).
    pub fn select_task(&mut self, index: Option<usize>) -> Result<(), StoreError> {
        if let Some(task) = index {
            let list = self.selection.list.ok_or(StoreError::NoListSelected)?;
            if task >= self.task_count() {
                return Err(StoreError::TaskOutOfRange { list, task });
            }
        }
        self.selection.task = index;
        Ok(())
    }

    /// Append an untitled list and select it. Returns its index.
    pub fn add_list(&mut self) -> usize {
        let index = list_ops::add_list(&mut self.document);
        self.selection = Selection {
            list: Some(index),
            task: None,
        };
        index
    }

    /// Remove a list and move the selection to the nearest remaining one.
    pub fn remove_list(&mut self, index: usize) -> Result<TodoList, StoreError> {
        let len_before = self.list_count();
        let removed = list_ops::remove_list(&mut self.document, index)?;
        self.selection.list = selection_after_removal(self.selection.list, index, len_before);
        self.selection.task = None;
        Ok(removed)
    }

    pub fn rename_current_list(&mut self, name: impl Into<String>) -> Result<(), StoreError> {
        let list = self.selection.list.ok_or(StoreError::NoListSelected)?;
        list_ops::rename_list(&mut self.document, list, name.into())
    }

    /// Add a task with `title` (trimmed) to the selected list.
    ///
    /// Creates a list first when the document has none, and targets the first
    /// list when lists exist but none is selected. Clears the task selection.
    /// Returns the new task's index.
    pub fn add_task(&mut self, title: &str) -> Result<usize, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        if self.list_count() == 0 {
            self.add_list();
        }
        let list = match self.selection.list {
            Some(list) => list,
            None => {
                self.select_list(Some(0))?;
                0
            }
        };
        let index = task_ops::add_task(&mut self.document, list, Task::new(title))?;
        self.selection.task = None;
        Ok(index)
    }

    /// Remove a task from any list.
    ///
    /// When it belongs to the selected list, the task selection moves to the
    /// nearest remaining task; other lists leave the selection untouched.
    pub fn remove_task(&mut self, list: usize, task: usize) -> Result<Task, StoreError> {
        let len_before = self
            .document
            .list(list)
            .map_or(0, |l| l.tasks.len());
        let removed = task_ops::remove_task(&mut self.document, list, task)?;
        if self.selection.list == Some(list) {
            self.selection.task = selection_after_removal(self.selection.task, task, len_before);
        }
        Ok(removed)
    }

    pub fn set_current_task_title(&mut self, title: impl Into<String>) -> Result<(), StoreError> {
        let (list, task) = self.current_task_position()?;
        task_ops::set_title(&mut self.document, list, task, title.into())
    }

    pub fn set_current_task_content(
        &mut self,
        content: impl Into<String>,
    ) -> Result<(), StoreError> {
        let (list, task) = self.current_task_position()?;
        task_ops::set_content(&mut self.document, list, task, content.into())
    }

    /// Set the status of task `index` in the selected list.
    pub fn set_task_status(&mut self, index: usize, status: TaskStatus) -> Result<(), StoreError> {
        let list = self.selection.list.ok_or(StoreError::NoListSelected)?;
        task_ops::set_status(&mut self.document, list, index, status)
    }

    /// Flip the status of task `index` in the selected list. Returns the new status.
    pub fn toggle_task_status(&mut self, index: usize) -> Result<TaskStatus, StoreError> {
        let list = self.selection.list.ok_or(StoreError::NoListSelected)?;
        let current = self
            .task_list()
            .get(index)
            .map(|t| t.status)
            .ok_or(StoreError::TaskOutOfRange { list, task: index })?;
        let next = current.toggled();
        task_ops::set_status(&mut self.document, list, index, next)?;
        Ok(next)
    }

    fn current_task_position(&self) -> Result<(usize, usize), StoreError> {
        let list = self.selection.list.ok_or(StoreError::NoListSelected)?;
        let task = self.selection.task.ok_or(StoreError::NoTaskSelected)?;
        Ok((list, task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(lists: &[(&str, &[&str])]) -> Store {
        let document = Document {
            lists: lists
                .iter()
                .map(|(name, titles)| TodoList {
                    name: name.to_string(),
                    tasks: titles.iter().map(|t| Task::new(*t)).collect(),
                })
                .collect(),
        };
        Store::from_document(document)
    }

    fn assert_in_bounds(store: &Store) {
        match store.list_index() {
            Some(i) => assert!(i < store.list_count()),
            None => assert!(store.task_index().is_none()),
        }
        if let Some(t) = store.task_index() {
            assert!(t < store.task_count());
        }
    }

    // --- Selection ---

    #[test]
    fn from_document_selects_first_list() {
        let store = store_with(&[("Home", &["a"]), ("Work", &[])]);
        assert_eq!(store.list_index(), Some(0));
        assert_eq!(store.task_index(), None);
        assert_eq!(store.current_name(), Some("Home"));
    }

    #[test]
    fn empty_store_has_no_selection() {
        let store = Store::new();
        assert_eq!(store.list_index(), None);
        assert!(store.task_list().is_empty());
        assert!(store.current_task().is_none());
    }

    #[test]
    fn select_list_resets_task() {
        let mut store = store_with(&[("Home", &["a", "b"]), ("Work", &[])]);
        store.select_task(Some(1)).unwrap();
        store.select_list(Some(1)).unwrap();
        assert_eq!(store.list_index(), Some(1));
        assert_eq!(store.task_index(), None);
    }

    #[test]
    fn select_out_of_range_is_rejected() {
        let mut store = store_with(&[("Home", &["a"])]);
        assert_eq!(store.select_list(Some(3)), Err(StoreError::ListOutOfRange(3)));
        assert!(store.select_task(Some(2)).is_err());
        assert_eq!(store.list_index(), Some(0));
    }

    // --- Lists ---

    #[test]
    fn add_list_selects_it() {
        let mut store = store_with(&[("Home", &["a"])]);
        store.select_task(Some(0)).unwrap();
        let idx = store.add_list();
        assert_eq!(idx, 1);
        assert_eq!(store.list_index(), Some(1));
        assert_eq!(store.task_index(), None);
        assert_eq!(store.current_name(), Some("Untitled list"));
    }

    #[test]
    fn remove_selected_list_moves_to_previous() {
        let mut store = store_with(&[("A", &[]), ("B", &[]), ("C", &[])]);
        store.select_list(Some(2)).unwrap();
        store.remove_list(2).unwrap();
        assert_eq!(store.list_index(), Some(1));
        assert_in_bounds(&store);
    }

    #[test]
    fn remove_first_selected_list_clamps_to_zero() {
        let mut store = store_with(&[("A", &[]), ("B", &[])]);
        store.remove_list(0).unwrap();
        assert_eq!(store.list_index(), Some(0));
        assert_eq!(store.current_name(), Some("B"));
    }

    #[test]
    fn remove_list_before_selection_shifts() {
        let mut store = store_with(&[("A", &[]), ("B", &[]), ("C", &[])]);
        store.select_list(Some(2)).unwrap();
        store.remove_list(0).unwrap();
        assert_eq!(store.list_index(), Some(1));
        assert_eq!(store.current_name(), Some("C"));
    }

    #[test]
    fn remove_only_list_clears_selection() {
        let mut store = store_with(&[("A", &["x"])]);
        store.select_task(Some(0)).unwrap();
        store.remove_list(0).unwrap();
        assert_eq!(store.selection(), Selection::none());
    }

    #[test]
    fn rename_current_list() {
        let mut store = store_with(&[("A", &[])]);
        store.rename_current_list("Errands").unwrap();
        assert_eq!(store.current_name(), Some("Errands"));

        let mut empty = Store::new();
        assert_eq!(
            empty.rename_current_list("x"),
            Err(StoreError::NoListSelected)
        );
    }

    // --- Tasks ---

    #[test]
    fn add_task_creates_list_when_empty() {
        let mut store = Store::new();
        let idx = store.add_task("  Buy milk  ").unwrap();
        assert_eq!(idx, 0);
        assert_eq!(store.list_count(), 1);
        assert_eq!(store.list_index(), Some(0));
        assert_eq!(store.task_list()[0].title, "Buy milk");
    }

    #[test]
    fn add_task_rejects_blank_title() {
        let mut store = Store::new();
        assert_eq!(store.add_task("   "), Err(StoreError::EmptyTitle));
        assert_eq!(store.list_count(), 0);
    }

    #[test]
    fn add_task_without_selection_targets_first_list() {
        let mut store = store_with(&[("A", &[]), ("B", &[])]);
        store.select_list(None).unwrap();
        store.add_task("x").unwrap();
        assert_eq!(store.list_index(), Some(0));
        assert_eq!(store.document().lists[0].tasks.len(), 1);
    }

    #[test]
    fn add_task_resets_task_selection() {
        let mut store = store_with(&[("A", &["a"])]);
        store.select_task(Some(0)).unwrap();
        store.add_task("b").unwrap();
        assert_eq!(store.task_index(), None);
        assert_eq!(store.task_count(), 2);
    }

    #[test]
    fn remove_selected_task_moves_to_previous() {
        let mut store = store_with(&[("A", &["a", "b", "c"])]);
        store.select_task(Some(1)).unwrap();
        store.remove_task(0, 1).unwrap();
        assert_eq!(store.task_index(), Some(0));
        assert_in_bounds(&store);
    }

    #[test]
    fn remove_last_task_clears_task_selection() {
        let mut store = store_with(&[("A", &["a"])]);
        store.select_task(Some(0)).unwrap();
        store.remove_task(0, 0).unwrap();
        assert_eq!(store.task_index(), None);
        assert_eq!(store.list_index(), Some(0));
    }

    #[test]
    fn remove_task_in_other_list_keeps_selection() {
        let mut store = store_with(&[("A", &["a", "b"]), ("B", &["c"])]);
        store.select_task(Some(1)).unwrap();
        store.remove_task(1, 0).unwrap();
        assert_eq!(store.selection().task, Some(1));
        assert!(store.document().lists[1].tasks.is_empty());
    }

    #[test]
    fn remove_task_out_of_range() {
        let mut store = store_with(&[("A", &["a"])]);
        assert!(store.remove_task(0, 4).is_err());
        assert!(store.remove_task(3, 0).is_err());
        assert_eq!(store.task_count(), 1);
    }

    #[test]
    fn edit_current_task() {
        let mut store = store_with(&[("A", &["a"])]);
        assert_eq!(
            store.set_current_task_title("x"),
            Err(StoreError::NoTaskSelected)
        );
        store.select_task(Some(0)).unwrap();
        store.set_current_task_title("Renamed").unwrap();
        store.set_current_task_content("<i>note</i>").unwrap();
        let task = store.current_task().unwrap();
        assert_eq!(task.title, "Renamed");
        assert_eq!(task.content, "<i>note</i>");
    }

    #[test]
    fn status_by_index_in_selected_list() {
        let mut store = store_with(&[("A", &["a", "b"])]);
        store.set_task_status(1, TaskStatus::Checked).unwrap();
        assert!(store.task_list()[1].is_checked());
        assert_eq!(store.toggle_task_status(1).unwrap(), TaskStatus::Unchecked);
        assert_eq!(store.toggle_task_status(0).unwrap(), TaskStatus::Checked);
        assert!(store.toggle_task_status(7).is_err());
    }

    #[test]
    fn random_removals_keep_selection_in_bounds() {
        let mut store = store_with(&[
            ("A", &["1", "2", "3"]),
            ("B", &["4"]),
            ("C", &[]),
            ("D", &["5", "6"]),
        ]);
        let picks = [3usize, 0, 1, 0];
        for (step, pick) in picks.iter().enumerate() {
            let idx = pick % store.list_count();
            store.select_list(Some(store.list_count() - 1)).unwrap();
            if store.task_count() > 0 {
                store.select_task(Some(0)).unwrap();
                let list = store.list_index().unwrap();
                store.remove_task(list, 0).unwrap();
                assert_in_bounds(&store);
            }
            store.remove_list(idx).unwrap();
            assert_in_bounds(&store);
            assert_eq!(store.list_count(), 3 - step);
        }
        assert_eq!(store.selection(), Selection::none());
    }

    #[test]
    fn replace_resets_selection() {
        let mut store = store_with(&[("A", &["a"]), ("B", &[])]);
        store.select_list(Some(1)).unwrap();
        store.replace(Document::new());
        assert_eq!(store.selection(), Selection::none());
        let doc = store_with(&[("Z", &[])]).take_document();
        store.replace(doc);
        assert_eq!(store.list_index(), Some(0));
    }
}
