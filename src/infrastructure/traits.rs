//! I/O boundary traits for testability
//!
//! These traits abstract the console and the filesystem, allowing the
//! exploration loop and the map loader to be tested without a terminal.

use std::io;
use std::path::Path;

use crate::domain::{Choice, Moves, Rejection};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Source of the actor's decisions.
///
/// Must be total: anything unreadable or unrecognized comes back as
/// [`Choice::Invalid`], and each call consumes exactly one answer.
pub trait ChoiceSource {
    fn next_choice(&mut self, moves: &Moves) -> Choice;
}

/// Receives everything the actor should see.
pub trait Presenter {
    /// The actor entered a room.
    fn room(&mut self, name: &str);

    /// A clue was picked up in the current room.
    fn clue_found(&mut self, clue: &str);

    /// The current room holds nothing (new).
    fn no_clue(&mut self);

    /// Legal moves for the next choice; stop is implied.
    fn options(&mut self, moves: &Moves);

    /// The last choice did not move the actor.
    fn rejected(&mut self, rejection: Rejection);

    /// No passage leads on from here; the session is over.
    fn dead_end(&mut self);

    /// The actor stopped.
    fn exited(&mut self);

    /// All distinct clues collected, ascending. Never called with an empty list.
    fn summary(&mut self, clues: &[&str]);

    /// The session ended without a single clue.
    fn none_collected(&mut self);
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
