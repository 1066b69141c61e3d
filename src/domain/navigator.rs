//! Navigation state machine over a [`RoomTree`].
//!
//! The navigator owns no input or output. A driver asks it for the legal
//! [`Moves`], feeds it one [`Choice`] at a time and reports what comes back.

use tracing::{debug, instrument};

use crate::domain::arena::{RoomId, RoomTree};
use crate::domain::clue_index::ClueIndex;
use crate::domain::entities::{Choice, Direction, Mode, Moves};
use crate::domain::error::{DomainError, DomainResult};

/// Where the actor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    InRoom(RoomId),
    /// The actor chose to stop.
    Exited,
    /// Explore mode reached a room without passages.
    DeadEnd,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Exited,
    DeadEnd,
}

/// Why a choice did not move the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Invalid,
    NoPath(Direction),
}

/// What happened on entering a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    pub room: RoomId,
    pub name: String,
    /// Clue picked up here, if any.
    pub clue: Option<String>,
    /// The session ended here because no passage leads on.
    pub dead_end: bool,
}

/// Result of applying one choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Moved(Arrival),
    Rejected(Rejection),
    Exited,
    /// The session was already over; nothing changed.
    Finished(Terminal),
}

pub struct Navigator<'a> {
    tree: &'a mut RoomTree,
    clues: &'a mut ClueIndex,
    mode: Mode,
    state: NavState,
    current: RoomId,
    started: bool,
}

impl<'a> Navigator<'a> {
    /// Place the actor at the root of `tree`.
    ///
    /// Nothing is discovered until [`Navigator::start`] or the first
    /// [`Navigator::apply`].
    pub fn new(tree: &'a mut RoomTree, clues: &'a mut ClueIndex, mode: Mode) -> DomainResult<Self> {
        let root = tree.root().ok_or(DomainError::EmptyMap)?;
        Ok(Self {
            tree,
            clues,
            mode,
            state: NavState::InRoom(root),
            current: root,
            started: false,
        })
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The room the actor is in, or was in when the session ended.
    pub fn current_room(&self) -> RoomId {
        self.current
    }

    pub fn terminal(&self) -> Option<Terminal> {
        match self.state {
            NavState::InRoom(_) => None,
            NavState::Exited => Some(Terminal::Exited),
            NavState::DeadEnd => Some(Terminal::DeadEnd),
        }
    }

    /// Enter the root room. Later calls return the arrival again without
    /// discovering anything.
    pub fn start(&mut self) -> Arrival {
        if self.started {
            return Arrival {
                room: self.current,
                name: self.room_name(self.current),
                clue: None,
                dead_end: matches!(self.state, NavState::DeadEnd),
            };
        }
        self.started = true;
        self.arrive(self.current)
    }

    /// Legal directional moves from the current room. Empty once terminal.
    pub fn moves(&self) -> Moves {
        match self.state {
            NavState::InRoom(room) => self.tree.moves(room),
            NavState::Exited | NavState::DeadEnd => Moves::default(),
        }
    }

    /// Apply one choice.
    ///
    /// `Stop` ends the session. A direction with a passage moves the actor
    /// and runs discovery in the new room. `Invalid` and a direction without
    /// a passage change nothing.
    #[instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, choice: Choice) -> StepOutcome {
        if !self.started {
            self.start();
        }
        let room = match self.state {
            NavState::InRoom(room) => room,
            NavState::Exited => return StepOutcome::Finished(Terminal::Exited),
            NavState::DeadEnd => return StepOutcome::Finished(Terminal::DeadEnd),
        };

        let direction = match choice {
            Choice::Stop => {
                self.state = NavState::Exited;
                return StepOutcome::Exited;
            }
            Choice::Invalid => return StepOutcome::Rejected(Rejection::Invalid),
            Choice::Left => Direction::Left,
            Choice::Right => Direction::Right,
        };

        match self.tree.room(room).and_then(|r| r.child(direction)) {
            Some(child) => StepOutcome::Moved(self.arrive(child)),
            None => StepOutcome::Rejected(Rejection::NoPath(direction)),
        }
    }

    fn arrive(&mut self, room: RoomId) -> Arrival {
        self.current = room;
        self.state = NavState::InRoom(room);

        let clue = if self.mode.collects_clues() {
            self.discover(room)
        } else {
            None
        };

        let dead_end = matches!(self.mode, Mode::Explore) && self.tree.moves(room).is_dead_end();
        if dead_end {
            self.state = NavState::DeadEnd;
        }

        let name = self.room_name(room);
        debug!(room = %name, clue = ?clue, dead_end, "arrived");
        Arrival {
            room,
            name,
            clue,
            dead_end,
        }
    }

    fn discover(&mut self, room: RoomId) -> Option<String> {
        if !self.tree.has_clue(room) {
            return None;
        }
        let clue = self.tree.take_clue(room)?;
        self.clues.insert(clue.clone());
        Some(clue)
    }

    fn room_name(&self, room: RoomId) -> String {
        self.tree
            .room(room)
            .map(|r| r.name().to_string())
            .unwrap_or_default()
    }
}
