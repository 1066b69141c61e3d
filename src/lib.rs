//! Detective mansion explorer.
//!
//! A mansion is a binary tree of rooms. A detective walks it from the
//! entrance one passage at a time, picking up the clue kept in each room. The
//! clues land in a binary search tree so they can be listed alphabetically
//! without duplicates when the walk ends.
//!
//! Layers, innermost first:
//! - [`domain`]: room tree, clue index, navigator state machine
//! - [`application`]: session and map services
//! - [`infrastructure`]: console I/O, scripted I/O, service wiring
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
