//! Domain entities: core value types shared by the map, the clue index and the navigator

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Longest room name kept, in bytes.
pub const MAX_NAME_LEN: usize = 49;

/// Longest clue text kept, in bytes.
pub const MAX_CLUE_LEN: usize = 99;

/// Truncate `text` to at most `max` bytes without splitting a character.
pub fn bounded(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

/// One of the two passages leaving a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// A single move request from the choice source.
///
/// Anything the source cannot classify arrives as `Invalid`; the navigator
/// never sees raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Left,
    Right,
    Stop,
    Invalid,
}

impl Choice {
    /// Classify one line of user input.
    ///
    /// Only the first non-whitespace character counts, case-insensitively:
    /// `l`/`e` left, `r`/`d` right, `s`/`q` stop. The rest of the line is ignored.
    pub fn from_input(line: &str) -> Self {
        match line.trim_start().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('l') | Some('e') => Choice::Left,
            Some('r') | Some('d') => Choice::Right,
            Some('s') | Some('q') => Choice::Stop,
            _ => Choice::Invalid,
        }
    }
}

/// Session flavour.
///
/// `Investigate` collects clues and only ends on an explicit stop.
/// `Explore` ignores clues and ends on its own in a room without passages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Investigate,
    Explore,
}

impl Mode {
    pub fn collects_clues(self) -> bool {
        matches!(self, Mode::Investigate)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Investigate => write!(f, "investigate"),
            Mode::Explore => write!(f, "explore"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "investigate" => Ok(Mode::Investigate),
            "explore" => Ok(Mode::Explore),
            other => Err(format!(
                "unknown mode '{other}' (expected 'investigate' or 'explore')"
            )),
        }
    }
}

/// Legal moves out of the current room. Stop is always legal.
///
/// Each present passage carries the name of the room it leads to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Moves {
    pub left: Option<String>,
    pub right: Option<String>,
}

impl Moves {
    /// Name of the room behind `direction`, if the passage exists.
    pub fn towards(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Left => self.left.as_deref(),
            Direction::Right => self.right.as_deref(),
        }
    }

    /// No directional move is possible; only stop remains.
    pub fn is_dead_end(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Declarative description of a mansion, as authored in a map file.
///
/// ```toml
/// [room]
/// name = "Hall"
/// clue = "Muddy boots"
///
/// [room.left]
/// name = "Parlor"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapSpec {
    pub room: RoomSpec,
}

/// One room of a [`MapSpec`] with its optional sub-rooms.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomSpec {
    pub name: String,
    #[serde(default)]
    pub clue: Option<String>,
    #[serde(default)]
    pub left: Option<Box<RoomSpec>>,
    #[serde(default)]
    pub right: Option<Box<RoomSpec>>,
}

impl RoomSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clue: None,
            left: None,
            right: None,
        }
    }

    pub fn with_clue(mut self, clue: impl Into<String>) -> Self {
        self.clue = Some(clue.into());
        self
    }

    pub fn with_left(mut self, room: RoomSpec) -> Self {
        self.left = Some(Box::new(room));
        self
    }

    pub fn with_right(mut self, room: RoomSpec) -> Self {
        self.right = Some(Box::new(room));
        self
    }

    pub fn child(&self, direction: Direction) -> Option<&RoomSpec> {
        match direction {
            Direction::Left => self.left.as_deref(),
            Direction::Right => self.right.as_deref(),
        }
    }
}

// Unlink sub-rooms onto a heap stack so deep maps drop without deep recursion.
impl Drop for RoomSpec {
    fn drop(&mut self) {
        let mut stack: Vec<Box<RoomSpec>> = self
            .left
            .take()
            .into_iter()
            .chain(self.right.take())
            .collect();
        while let Some(mut room) = stack.pop() {
            stack.extend(room.left.take());
            stack.extend(room.right.take());
        }
    }
}
