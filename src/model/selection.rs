/// Which list and task the user is looking at. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub list: Option<usize>,
    pub task: Option<usize>,
}

impl Selection {
    pub fn none() -> Self {
        Selection::default()
    }
}

/// Re-derive a selected index after the item at `removed` is taken out of a
/// sequence that held `len_before` items.
///
/// A selection after the removed item shifts down by one. Removing the
/// selected item moves the selection to the preceding item, or to the new
/// first item when it was at the head and anything remains.
pub fn selection_after_removal(
    current: Option<usize>,
    removed: usize,
    len_before: usize,
) -> Option<usize> {
    let current = current?;
    if current > removed {
        Some(current - 1)
    } else if current == removed {
        if current > 0 {
            Some(current - 1)
        } else if len_before > 1 {
            Some(0)
        } else {
            None
        }
    } else {
        Some(current)
    }
}
