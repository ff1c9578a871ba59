use crate::model::{Document, TodoList};

use super::StoreError;

/// Append an untitled list. Returns its index.
pub fn add_list(doc: &mut Document) -> usize {
    doc.lists.push(TodoList::untitled());
    doc.lists.len() - 1
}

/// Remove the list at `index`, returning it.
pub fn remove_list(doc: &mut Document, index: usize) -> Result<TodoList, StoreError> {
    if index >= doc.lists.len() {
        return Err(StoreError::ListOutOfRange(index));
    }
    Ok(doc.lists.remove(index))
}

pub fn rename_list(doc: &mut Document, index: usize, name: String) -> Result<(), StoreError> {
    list_mut(doc, index)?.name = name;
    Ok(())
}

pub(crate) fn list_mut(doc: &mut Document, index: usize) -> Result<&mut TodoList, StoreError> {
    doc.lists
        .get_mut(index)
        .ok_or(StoreError::ListOutOfRange(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UNTITLED_LIST;

    fn doc_with(names: &[&str]) -> Document {
        Document {
            lists: names.iter().map(|n| TodoList::new(*n)).collect(),
        }
    }

    #[test]
    fn add_list_appends_untitled() {
        let mut doc = doc_with(&["Home"]);
        let idx = add_list(&mut doc);
        assert_eq!(idx, 1);
        assert_eq!(doc.lists[1].name, UNTITLED_LIST);
        assert!(doc.lists[1].tasks.is_empty());
    }

    #[test]
    fn remove_list_returns_removed() {
        let mut doc = doc_with(&["Home", "Work", "Trip"]);
        let removed = remove_list(&mut doc, 1).unwrap();
        assert_eq!(removed.name, "Work");
        assert_eq!(doc.lists.len(), 2);
        assert_eq!(doc.lists[1].name, "Trip");
    }

    #[test]
    fn remove_list_out_of_range() {
        let mut doc = doc_with(&["Home"]);
        assert_eq!(remove_list(&mut doc, 1), Err(StoreError::ListOutOfRange(1)));
        assert_eq!(doc.lists.len(), 1);
    }

    #[test]
    fn rename_list_sets_name() {
        let mut doc = doc_with(&["Home"]);
        rename_list(&mut doc, 0, "Groceries".into()).unwrap();
        assert_eq!(doc.lists[0].name, "Groceries");
        assert!(rename_list(&mut doc, 4, "x".into()).is_err());
    }
}
