//! Forward-only cursor over the items of an extracted list.
//!
//! Album track lists and artist album lists are exposed through the same
//! "current item" interface. The cursor starts on the first item; advancing
//! past the last one exhausts it for good.
//!
//! `seek` does not clear the exhausted flag. An exhausted cursor keeps
//! answering `None`/defaults from every accessor even after a successful
//! seek, so "exhausted" stays a one-way state for both `advance` and
//! `seek`.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cursor<T> {
    items: Vec<T>,
    position: usize,
    exhausted: bool,
}

impl<T> Default for Cursor<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> Cursor<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            position: 0,
            exhausted: false,
        }
    }

    /// True when there is at least one item, wherever the cursor stands.
    pub fn has_item(&self) -> bool {
        !self.items.is_empty()
    }

    /// Move to the next item.
    ///
    /// Returns false, and exhausts the cursor, when there is no next item.
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }

        if !self.is_valid_position(self.position + 1) {
            self.exhausted = true;
            return false;
        }

        self.position += 1;
        true
    }

    /// Jump to `position` if it is in range. Never clears exhaustion.
    pub fn seek(&mut self, position: usize) -> bool {
        if !self.is_valid_position(position) {
            return false;
        }

        self.position = position;
        true
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The current item, `None` when exhausted or empty.
    pub fn current(&self) -> Option<&T> {
        if self.exhausted {
            return None;
        }
        self.items.get(self.position)
    }

    /// Read a field of the current item, or its neutral value.
    pub fn get<R: Default>(&self, field: impl FnOnce(&T) -> R) -> R {
        self.current().map(field).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items, independent of the cursor position.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    fn is_valid_position(&self, position: usize) -> bool {
        position < self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_through_three_items() {
        let mut cursor = Cursor::new(vec!["a", "b", "c"]);
        assert_eq!(cursor.current(), Some(&"a"));
        assert!(cursor.advance());
        assert!(cursor.advance());
        assert_eq!(cursor.current(), Some(&"c"));
        assert!(!cursor.advance());
        assert!(cursor.is_exhausted());
        assert!(!cursor.advance());
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_empty_cursor() {
        let mut cursor: Cursor<u32> = Cursor::new(vec![]);
        assert!(!cursor.has_item());
        assert!(!cursor.advance());
        assert!(!cursor.seek(0));
        assert!(!cursor.has_item());
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.get(|n| *n), 0);
    }

    #[test]
    fn test_has_item_ignores_position() {
        let mut cursor = Cursor::new(vec![1]);
        assert!(!cursor.advance());
        assert!(cursor.is_exhausted());
        assert!(cursor.has_item());
    }

    #[test]
    fn test_accessors_return_neutral_values_when_exhausted() {
        let mut cursor = Cursor::new(vec![String::from("Song")]);
        assert_eq!(cursor.get(|s| s.clone()), "Song");
        cursor.advance();
        assert_eq!(cursor.get(|s| s.clone()), "");
        assert_eq!(cursor.get(|s| s.len()), 0);
    }

    #[test]
    fn test_seek_in_range() {
        let mut cursor = Cursor::new(vec![10, 20, 30]);
        assert!(cursor.seek(2));
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.current(), Some(&30));
        assert!(cursor.seek(0));
        assert_eq!(cursor.current(), Some(&10));
    }

    #[test]
    fn test_seek_out_of_range_leaves_state() {
        let mut cursor = Cursor::new(vec![10, 20]);
        cursor.advance();
        assert!(!cursor.seek(5));
        assert_eq!(cursor.position(), 1);
        assert!(!cursor.is_exhausted());
    }

    #[test]
    fn test_seek_does_not_clear_exhaustion() {
        let mut cursor = Cursor::new(vec![10, 20]);
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_exhausted());

        assert!(cursor.seek(0));
        assert_eq!(cursor.position(), 0);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.current(), None);
        assert!(!cursor.advance());
    }
}

/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Advance,
        Seek(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Advance), (0usize..12).prop_map(Op::Seek)]
    }

    proptest! {
        /// Position stays in range while active, and exhaustion never resets
        #[test]
        fn cursor_invariants_hold(len in 0usize..8, ops in prop::collection::vec(op(), 0..30)) {
            let mut cursor = Cursor::new((0..len).collect::<Vec<_>>());
            let mut was_exhausted = false;

            for op in ops {
                match op {
                    Op::Advance => { cursor.advance(); }
                    Op::Seek(p) => { cursor.seek(p); }
                }
                if was_exhausted {
                    prop_assert!(cursor.is_exhausted());
                }
                if !cursor.is_exhausted() && len > 0 {
                    prop_assert!(cursor.position() < len);
                }
                was_exhausted = cursor.is_exhausted();
            }
        }
    }
}
