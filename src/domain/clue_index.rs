//! Ordered set of discovered clues, backed by an unbalanced binary search tree.
//!
//! Entries live in a generational arena and link to each other by index.
//! Every traversal is a loop over an explicit stack, so a chain-shaped tree
//! (clues discovered in sorted order) costs no call depth.

use std::cmp::Ordering;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::domain::entities::Direction;

#[derive(Debug)]
struct ClueEntry {
    text: String,
    left: Option<Index>,
    right: Option<Index>,
}

impl ClueEntry {
    fn new(text: String) -> Self {
        Self {
            text,
            left: None,
            right: None,
        }
    }
}

/// Deduplicated clue texts, enumerable in ascending byte-wise order.
#[derive(Debug, Default)]
pub struct ClueIndex {
    arena: Arena<ClueEntry>,
    root: Option<Index>,
}

impl ClueIndex {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Insert a clue.
    ///
    /// Descends from the root, going left on smaller and right on greater
    /// keys, and hangs a new leaf in the first empty slot. An exact match
    /// anywhere on the way leaves the index untouched.
    ///
    /// Returns `true` if the clue was not present before.
    #[instrument(level = "trace", skip(self, text))]
    pub fn insert(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        let Some(mut current) = self.root else {
            self.root = Some(self.arena.insert(ClueEntry::new(text)));
            return true;
        };

        loop {
            let Some(entry) = self.arena.get(current) else {
                return false;
            };
            let (next, side) = match text.as_str().cmp(entry.text.as_str()) {
                Ordering::Equal => {
                    trace!("duplicate clue ignored");
                    return false;
                }
                Ordering::Less => (entry.left, Direction::Left),
                Ordering::Greater => (entry.right, Direction::Right),
            };
            match next {
                Some(child) => current = child,
                None => {
                    let leaf = self.arena.insert(ClueEntry::new(text));
                    if let Some(parent) = self.arena.get_mut(current) {
                        match side {
                            Direction::Left => parent.left = Some(leaf),
                            Direction::Right => parent.right = Some(leaf),
                        }
                    }
                    return true;
                }
            }
        }
    }

    pub fn contains(&self, text: &str) -> bool {
        let mut current = self.root;
        while let Some(entry) = current.and_then(|idx| self.arena.get(idx)) {
            current = match text.cmp(entry.text.as_str()) {
                Ordering::Equal => return true,
                Ordering::Less => entry.left,
                Ordering::Greater => entry.right,
            };
        }
        false
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Clues in ascending order. Each call starts a fresh walk.
    pub fn iter(&self) -> InOrder<'_> {
        InOrder {
            arena: &self.arena,
            stack: Vec::new(),
            next: self.root,
        }
    }

    /// Number of entries on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(Index, usize)> = self.root.into_iter().map(|r| (r, 1)).collect();
        while let Some((idx, level)) = stack.pop() {
            if let Some(entry) = self.arena.get(idx) {
                deepest = deepest.max(level);
                stack.extend(
                    [entry.left, entry.right]
                        .into_iter()
                        .flatten()
                        .map(|child| (child, level + 1)),
                );
            }
        }
        deepest
    }

    /// Free every entry in post order. Returns the number released.
    #[instrument(level = "debug", skip(self))]
    pub fn release(&mut self) -> usize {
        let mut released = 0;
        let mut stack: Vec<(Index, bool)> = self.root.into_iter().map(|r| (r, false)).collect();
        while let Some((idx, visited)) = stack.pop() {
            if visited {
                if self.arena.remove(idx).is_some() {
                    released += 1;
                }
                continue;
            }
            if let Some(entry) = self.arena.get(idx) {
                stack.push((idx, true));
                stack.extend(entry.right.map(|r| (r, false)));
                stack.extend(entry.left.map(|l| (l, false)));
            }
        }
        self.root = None;
        released
    }
}

impl Extend<String> for ClueIndex {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for text in iter {
            self.insert(text);
        }
    }
}

impl<'s> Extend<&'s str> for ClueIndex {
    fn extend<I: IntoIterator<Item = &'s str>>(&mut self, iter: I) {
        for text in iter {
            self.insert(text);
        }
    }
}

impl FromIterator<String> for ClueIndex {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl<'s> FromIterator<&'s str> for ClueIndex {
    fn from_iter<I: IntoIterator<Item = &'s str>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl<'a> IntoIterator for &'a ClueIndex {
    type Item = &'a str;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy in-order walk over a [`ClueIndex`].
pub struct InOrder<'a> {
    arena: &'a Arena<ClueEntry>,
    stack: Vec<Index>,
    next: Option<Index>,
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.next {
            self.stack.push(idx);
            self.next = self.arena.get(idx).and_then(|entry| entry.left);
        }
        let idx = self.stack.pop()?;
        let entry = self.arena.get(idx)?;
        self.next = entry.right;
        Some(entry.text.as_str())
    }
}
