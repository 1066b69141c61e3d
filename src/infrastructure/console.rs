//! Console implementations of the choice source and the presenter
//!
//! Colors respect NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use colored::Colorize;
use itertools::Itertools;
use tracing::{debug, warn};

use crate::domain::{Choice, Direction, Moves, Rejection};
use crate::infrastructure::traits::{ChoiceSource, Presenter};

/// Bytes of an answer kept for classification. The rest of the line is skipped.
pub const MAX_ANSWER_LEN: usize = 64;

/// Reads one answer per line.
///
/// The whole line is consumed on every call, so leftovers never leak into
/// the next answer. At most [`MAX_ANSWER_LEN`] bytes of it are buffered.
/// End of input counts as stop.
pub struct ConsoleChoices<R> {
    reader: R,
}

impl<R: BufRead> ConsoleChoices<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Next line without its newline, cut to `MAX_ANSWER_LEN` bytes.
    /// `None` at end of input.
    fn read_answer(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut kept = Vec::new();
        let mut seen = false;
        loop {
            let (used, complete) = {
                let available = self.reader.fill_buf()?;
                if available.is_empty() {
                    return Ok(seen.then_some(kept));
                }
                seen = true;
                let newline = available.iter().position(|&b| b == b'\n');
                let (chunk, used, complete) = match newline {
                    Some(end) => (&available[..end], end + 1, true),
                    None => (available, available.len(), false),
                };
                let room = MAX_ANSWER_LEN.saturating_sub(kept.len());
                kept.extend_from_slice(&chunk[..chunk.len().min(room)]);
                (used, complete)
            };
            self.reader.consume(used);
            if complete {
                return Ok(Some(kept));
            }
        }
    }
}

impl ConsoleChoices<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> ChoiceSource for ConsoleChoices<R> {
    fn next_choice(&mut self, _moves: &Moves) -> Choice {
        match self.read_answer() {
            Ok(None) => {
                debug!("end of input, stopping");
                Choice::Stop
            }
            Ok(Some(answer)) => Choice::from_input(&String::from_utf8_lossy(&answer)),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Choice::Invalid,
            Err(e) => {
                warn!("cannot read choice, stopping: {e}");
                Choice::Stop
            }
        }
    }
}

/// Writes the session as colored text.
pub struct ConsolePresenter<W> {
    out: W,
    show_neighbors: bool,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W, show_neighbors: bool) -> Self {
        Self {
            out,
            show_neighbors,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.out, "{text}") {
            warn!("cannot write to console: {e}");
        }
    }

    fn prompt(&mut self, text: impl Display) {
        let written = write!(self.out, "{} ", text.to_string().cyan()).and_then(|_| self.out.flush());
        if let Err(e) = written {
            warn!("cannot write to console: {e}");
        }
    }

    fn passage(&mut self, key: char, direction: Direction, target: &str) {
        let label = format!("  [{key}] Go {direction}");
        if self.show_neighbors {
            self.line(format!("{label} ({target})"));
        } else {
            self.line(label);
        }
    }
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout(show_neighbors: bool) -> Self {
        Self::new(io::stdout(), show_neighbors)
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn room(&mut self, name: &str) {
        self.line(format!("\nYou are in: {}", name.bold()));
    }

    fn clue_found(&mut self, clue: &str) {
        self.line(format!("{} \"{}\"", "Clue found!".yellow().bold(), clue));
    }

    fn no_clue(&mut self) {
        self.line("  (No new clue in this room.)".dimmed());
    }

    fn options(&mut self, moves: &Moves) {
        self.line("Choose your path:");
        let mut keys = Vec::with_capacity(3);
        for (key, direction) in [('l', Direction::Left), ('r', Direction::Right)] {
            if let Some(target) = moves.towards(direction) {
                self.passage(key, direction, target);
                keys.push(key);
            }
        }
        self.line("  [s] Stop exploring");
        keys.push('s');
        self.prompt(format!("Your choice ({}):", keys.iter().join("/")));
    }

    fn rejected(&mut self, rejection: Rejection) {
        let message = match rejection {
            Rejection::Invalid => "Invalid option. Type 'l', 'r' or 's'.".to_string(),
            Rejection::NoPath(direction) => {
                format!("There is no passage to the {direction}. Try another option.")
            }
        };
        self.line(message.red());
    }

    fn dead_end(&mut self) {
        self.line("This room has no more exits. Your exploration ends here.".yellow());
    }

    fn exited(&mut self) {
        self.line("\nYou chose to stop exploring.");
    }

    fn summary(&mut self, clues: &[&str]) {
        let rule = "=".repeat(44);
        self.line(format!("\n{rule}"));
        self.line("Collected clues (alphabetical):".cyan().bold());
        self.line(&rule);
        for clue in clues {
            self.line(format!("- {clue}"));
        }
        self.line(&rule);
    }

    fn none_collected(&mut self) {
        self.line("\nNo clues were collected during the exploration.".dimmed());
    }
}
