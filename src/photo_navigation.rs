// SPDX-License-Identifier: MPL-2.0
//! Selection state for the photo preview session.
//!
//! The page owning a photo collection holds one `PhotoNavigator` as the
//! single source of truth for "which photo is focused". The preview
//! component itself is fully controlled: it only reads the selection and
//! requests changes, which land here.
//!
//! A session is either closed (`selected() == None`) or open on a valid
//! index; navigation wraps around both ends of the collection.

/// Tracks the focused photo within a collection of known size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoNavigator {
    count: usize,
    selected: Option<usize>,
}

impl PhotoNavigator {
    /// Creates a navigator over an empty collection, with no session open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the collection size after a listing refresh.
    ///
    /// An open session keeps its position when still valid; it closes when
    /// the collection shrank past it or emptied.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        if let Some(index) = self.selected {
            if index >= count {
                self.selected = None;
            }
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// The focused index, when a session is open.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    /// Opens a session on `index`. Refused (returns `false`) for an empty
    /// collection or an out-of-range index.
    pub fn open(&mut self, index: usize) -> bool {
        if index < self.count {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Closes the session. No selection state survives a close.
    pub fn close(&mut self) {
        self.selected = None;
    }

    /// Moves to the next photo, wrapping from the last back to the first.
    pub fn next(&mut self) -> Option<usize> {
        let index = self.selected?;
        let next = if index + 1 >= self.count { 0 } else { index + 1 };
        self.selected = Some(next);
        Some(next)
    }

    /// Moves to the previous photo, wrapping from the first to the last.
    pub fn previous(&mut self) -> Option<usize> {
        let index = self.selected?;
        let previous = if index == 0 { self.count - 1 } else { index - 1 };
        self.selected = Some(previous);
        Some(previous)
    }
}
