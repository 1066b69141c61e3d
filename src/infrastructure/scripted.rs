//! Scripted choice source and recording presenter for driving sessions
//! without a terminal.

use std::collections::VecDeque;

use crate::domain::{Choice, Moves, Rejection};
use crate::infrastructure::traits::{ChoiceSource, Presenter};

/// Replays a fixed list of choices, then answers `Stop` forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChoices {
    script: VecDeque<Choice>,
}

impl ScriptedChoices {
    pub fn new(script: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Choices not yet handed out.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl ChoiceSource for ScriptedChoices {
    fn next_choice(&mut self, _moves: &Moves) -> Choice {
        self.script.pop_front().unwrap_or(Choice::Stop)
    }
}

/// One presenter call, as recorded by [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Room(String),
    ClueFound(String),
    NoClue,
    Options(Moves),
    Rejected(Rejection),
    DeadEnd,
    Exited,
    Summary(Vec<String>),
    NoneCollected,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the rooms entered, in order.
    pub fn rooms(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::Room(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn room(&mut self, name: &str) {
        self.events.push(PresenterEvent::Room(name.to_string()));
    }

    fn clue_found(&mut self, clue: &str) {
        self.events.push(PresenterEvent::ClueFound(clue.to_string()));
    }

    fn no_clue(&mut self) {
        self.events.push(PresenterEvent::NoClue);
    }

    fn options(&mut self, moves: &Moves) {
        self.events.push(PresenterEvent::Options(moves.clone()));
    }

    fn rejected(&mut self, rejection: Rejection) {
        self.events.push(PresenterEvent::Rejected(rejection));
    }

    fn dead_end(&mut self) {
        self.events.push(PresenterEvent::DeadEnd);
    }

    fn exited(&mut self) {
        self.events.push(PresenterEvent::Exited);
    }

    fn summary(&mut self, clues: &[&str]) {
        self.events.push(PresenterEvent::Summary(
            clues.iter().map(|c| c.to_string()).collect(),
        ));
    }

    fn none_collected(&mut self) {
        self.events.push(PresenterEvent::NoneCollected);
    }
}
