use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::entities::{bounded, Direction, Moves, MAX_CLUE_LEN, MAX_NAME_LEN};
use crate::domain::error::{DomainError, DomainResult};

/// Handle to a room inside a [`RoomTree`].
///
/// Handles are only minted by [`RoomTree::insert_room`], so a room can never
/// be wired under a second parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId(Index);

/// A node of the mansion map.
#[derive(Debug)]
pub struct Room {
    name: String,
    clue: Option<String>,
    parent: Option<RoomId>,
    left: Option<RoomId>,
    right: Option<RoomId>,
}

impl Room {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clue(&self) -> Option<&str> {
        self.clue.as_deref()
    }

    pub fn has_clue(&self) -> bool {
        self.clue.is_some()
    }

    pub fn parent(&self) -> Option<RoomId> {
        self.parent
    }

    pub fn child(&self, direction: Direction) -> Option<RoomId> {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Arena-backed binary tree of rooms.
///
/// The shape is fixed once built: the only mutation after construction is
/// [`RoomTree::take_clue`], which clears a room's clue.
#[derive(Debug, Default)]
pub struct RoomTree {
    arena: Arena<Room>,
    root: Option<RoomId>,
}

impl RoomTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Allocate a new room, either as the root (`parent = None`) or in the
    /// given empty slot of an existing room.
    ///
    /// Names and clues are cut to their size limits; an empty clue means
    /// "no clue".
    #[instrument(level = "trace", skip(self))]
    pub fn insert_room(
        &mut self,
        name: &str,
        clue: Option<&str>,
        parent: Option<(RoomId, Direction)>,
    ) -> DomainResult<RoomId> {
        match parent {
            None => {
                if let Some(root) = self.root.and_then(|r| self.room(r)) {
                    return Err(DomainError::RootExists(root.name.clone()));
                }
            }
            Some((parent_id, side)) => {
                let parent = self.room(parent_id).ok_or(DomainError::UnknownRoom)?;
                if parent.child(side).is_some() {
                    return Err(DomainError::SlotOccupied {
                        parent: parent.name.clone(),
                        side,
                    });
                }
            }
        }

        let room = Room {
            name: bounded(name, MAX_NAME_LEN),
            clue: clue
                .filter(|c| !c.is_empty())
                .map(|c| bounded(c, MAX_CLUE_LEN)),
            parent: parent.map(|(p, _)| p),
            left: None,
            right: None,
        };
        let id = RoomId(self.arena.insert(room));

        match parent {
            None => self.root = Some(id),
            Some((parent_id, side)) => {
                if let Some(parent) = self.arena.get_mut(parent_id.0) {
                    match side {
                        Direction::Left => parent.left = Some(id),
                        Direction::Right => parent.right = Some(id),
                    }
                }
            }
        }

        Ok(id)
    }

    pub fn root(&self) -> Option<RoomId> {
        self.root
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.arena.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// True iff the room currently holds a clue. Unknown handles hold nothing.
    pub fn has_clue(&self, id: RoomId) -> bool {
        self.room(id).is_some_and(Room::has_clue)
    }

    /// Remove and return the room's clue. A second call yields `None`.
    #[instrument(level = "trace", skip(self))]
    pub fn take_clue(&mut self, id: RoomId) -> Option<String> {
        self.arena.get_mut(id.0).and_then(|room| room.clue.take())
    }

    /// Left and right child of a room, in that order.
    pub fn children(&self, id: RoomId) -> [Option<RoomId>; 2] {
        self.room(id)
            .map(|room| [room.left, room.right])
            .unwrap_or_default()
    }

    /// Passages out of a room, labelled with the names of the rooms they lead to.
    pub fn moves(&self, id: RoomId) -> Moves {
        let name_of = |child: Option<RoomId>| {
            child
                .and_then(|c| self.room(c))
                .map(|room| room.name.clone())
        };
        match self.room(id) {
            Some(room) => Moves {
                left: name_of(room.left),
                right: name_of(room.right),
            },
            None => Moves::default(),
        }
    }

    /// Number of rooms still holding a clue.
    pub fn remaining_clues(&self) -> usize {
        self.arena.iter().filter(|(_, room)| room.has_clue()).count()
    }

    pub fn iter(&self) -> RoomIterator<'_> {
        RoomIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Number of rooms on the longest root-to-leaf path.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(RoomId, usize)> = self.root.into_iter().map(|r| (r, 1)).collect();
        while let Some((id, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(
                self.children(id)
                    .into_iter()
                    .flatten()
                    .map(|child| (child, level + 1)),
            );
        }
        deepest
    }

    /// Names of all rooms without passages, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_rooms(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, room)| room.is_leaf())
            .map(|(_, room)| room.name.clone())
            .collect()
    }

    /// Free every room, children before parents. Safe on an empty tree.
    ///
    /// Returns the number of rooms released.
    #[instrument(level = "debug", skip(self))]
    pub fn release(&mut self) -> usize {
        let order: Vec<RoomId> = self.iter_postorder().map(|(id, _)| id).collect();
        let released = order
            .into_iter()
            .filter(|id| self.arena.remove(id.0).is_some())
            .count();
        self.root = None;
        released
    }
}

/// Pre-order walk: a room, then its left subtree, then its right subtree.
pub struct RoomIterator<'a> {
    tree: &'a RoomTree,
    stack: Vec<RoomId>,
}

impl<'a> RoomIterator<'a> {
    fn new(tree: &'a RoomTree) -> Self {
        Self {
            tree,
            stack: tree.root.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for RoomIterator<'a> {
    type Item = (RoomId, &'a Room);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(room) = self.tree.room(current) {
                // Right first so that left is visited first
                self.stack.extend(room.right);
                self.stack.extend(room.left);
                return Some((current, room));
            }
        }
        None
    }
}

/// Post-order walk: both subtrees before the room itself.
pub struct PostOrderIterator<'a> {
    tree: &'a RoomTree,
    stack: Vec<(RoomId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a RoomTree) -> Self {
        Self {
            tree,
            stack: tree.root.into_iter().map(|r| (r, false)).collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (RoomId, &'a Room);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(room) = self.tree.room(current) {
                if visited {
                    return Some((current, room));
                }
                self.stack.push((current, true));
                self.stack.extend(room.right.map(|r| (r, false)));
                self.stack.extend(room.left.map(|l| (l, false)));
            }
        }
        None
    }
}
