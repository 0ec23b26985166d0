//! Detail-overlay navigation over a fetched list.
//!
//! The overlay tracks the selected row by id; previous/next wrap around at
//! both ends of the list.

use crate::model::Identified;

/// Direction of a step through the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
}

/// What a key press does while the overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKey {
    Close,
    Move(Step),
}

impl OverlayKey {
    /// Map a `KeyboardEvent.key` value. Other keys are ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(OverlayKey::Close),
            "ArrowLeft" => Some(OverlayKey::Move(Step::Previous)),
            "ArrowRight" => Some(OverlayKey::Move(Step::Next)),
            _ => None,
        }
    }
}

/// Index reached from `current` by one `step` in a list of `len` items.
///
/// Returns `None` for an empty list.
pub fn step_index(len: usize, current: usize, step: Step) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.min(len - 1);
    Some(match step {
        Step::Previous if current == 0 => len - 1,
        Step::Previous => current - 1,
        Step::Next if current == len - 1 => 0,
        Step::Next => current + 1,
    })
}

/// Id of the item one `step` away from the item with `selected_id`.
///
/// An id that is no longer in the list behaves like the first item, so a
/// stale selection still moves somewhere sensible after a re-fetch.
pub fn step_from<'a, T: Identified>(items: &'a [T], selected_id: &str, step: Step) -> Option<&'a T> {
    let current = items.iter().position(|i| i.id() == selected_id).unwrap_or(0);
    step_index(items.len(), current, step).map(|i| &items[i])
}

/// Look up the selected item.
pub fn selected<'a, T: Identified>(items: &'a [T], selected_id: &str) -> Option<&'a T> {
    items.iter().find(|i| i.id() == selected_id)
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str);

    impl Identified for Row {
        fn id(&self) -> &str {
            self.0
        }
    }

    fn rows() -> Vec<Row> {
        vec![Row("a"), Row("b"), Row("c")]
    }

    #[test]
    fn test_next_wraps_to_first() {
        let items = rows();
        assert_eq!(step_from(&items, "c", Step::Next).map(|r| r.0), Some("a"));
        assert_eq!(step_from(&items, "a", Step::Next).map(|r| r.0), Some("b"));
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let items = rows();
        assert_eq!(step_from(&items, "a", Step::Previous).map(|r| r.0), Some("c"));
        assert_eq!(step_from(&items, "b", Step::Previous).map(|r| r.0), Some("a"));
    }

    #[test]
    fn test_single_item_stays_put() {
        let items = vec![Row("only")];
        assert_eq!(step_from(&items, "only", Step::Next).map(|r| r.0), Some("only"));
        assert_eq!(step_from(&items, "only", Step::Previous).map(|r| r.0), Some("only"));
    }

    #[test]
    fn test_empty_list() {
        let items: Vec<Row> = vec![];
        assert!(step_from(&items, "a", Step::Next).is_none());
        assert_eq!(step_index(0, 0, Step::Previous), None);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let len = 7;
        let mut i = 3;
        for _ in 0..len {
            i = step_index(len, i, Step::Next).unwrap();
        }
        assert_eq!(i, 3);
        for _ in 0..len {
            i = step_index(len, i, Step::Previous).unwrap();
        }
        assert_eq!(i, 3);
    }

    #[test]
    fn test_overlay_keys() {
        assert_eq!(OverlayKey::from_key("Escape"), Some(OverlayKey::Close));
        assert_eq!(
            OverlayKey::from_key("ArrowRight"),
            Some(OverlayKey::Move(Step::Next))
        );
        assert_eq!(
            OverlayKey::from_key("ArrowLeft"),
            Some(OverlayKey::Move(Step::Previous))
        );
        assert_eq!(OverlayKey::from_key("Enter"), None);
    }

    #[test]
    fn test_selected_lookup() {
        let items = rows();
        assert_eq!(selected(&items, "b").map(|r| r.0), Some("b"));
        assert!(selected(&items, "z").is_none());
    }
}
