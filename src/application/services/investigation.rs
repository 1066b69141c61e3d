//! Investigation service
//!
//! Owns one session: builds the mansion, walks it with the navigator until a
//! terminal state, presents the collected clues in order and releases both
//! trees.

use tracing::{debug, info, instrument};

use crate::application::ApplicationResult;
use crate::domain::{
    Arrival, ClueIndex, DomainResult, MansionBuilder, MapSpec, Mode, Navigator, RoomTree,
    StepOutcome, Terminal,
};
use crate::infrastructure::traits::{ChoiceSource, Presenter};

/// Outcome of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub terminal: Terminal,
    /// Distinct clues collected, ascending.
    pub clues: Vec<String>,
    /// Rooms entered, in order, including re-entries.
    pub path: Vec<String>,
}

/// Runs exploration sessions in a fixed mode.
pub struct InvestigationService {
    mode: Mode,
}

impl InvestigationService {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Play a full session on the mansion described by `spec`.
    #[instrument(level = "debug", skip_all, fields(mode = %self.mode))]
    pub fn run(
        &self,
        spec: &MapSpec,
        choices: &mut dyn ChoiceSource,
        presenter: &mut dyn Presenter,
    ) -> ApplicationResult<Report> {
        let mut tree = MansionBuilder::build(spec)?;
        let mut clues = ClueIndex::new();

        let (terminal, path) = self.explore(&mut tree, &mut clues, choices, presenter)?;
        let collected = self.present_clues(&clues, presenter);
        info!(
            ?terminal,
            clues = collected.len(),
            rooms = path.len(),
            "session finished"
        );

        let rooms = tree.release();
        let entries = clues.release();
        debug!(rooms, entries, "released map and clue index");

        Ok(Report {
            terminal,
            clues: collected,
            path,
        })
    }

    /// Drive the navigator over a pre-built tree until it terminates.
    ///
    /// Returns how the session ended and the names of the rooms entered.
    pub fn explore(
        &self,
        tree: &mut RoomTree,
        clues: &mut ClueIndex,
        choices: &mut dyn ChoiceSource,
        presenter: &mut dyn Presenter,
    ) -> DomainResult<(Terminal, Vec<String>)> {
        let mut navigator = Navigator::new(tree, clues, self.mode)?;
        let mut path = Vec::new();

        let arrival = navigator.start();
        self.present_arrival(&arrival, presenter);
        path.push(arrival.name);

        loop {
            if let Some(terminal) = navigator.terminal() {
                return Ok((terminal, path));
            }
            let moves = navigator.moves();
            presenter.options(&moves);
            let choice = choices.next_choice(&moves);
            debug!(?choice, "choice received");

            match navigator.apply(choice) {
                StepOutcome::Moved(arrival) => {
                    self.present_arrival(&arrival, presenter);
                    path.push(arrival.name);
                }
                StepOutcome::Rejected(rejection) => presenter.rejected(rejection),
                StepOutcome::Exited => presenter.exited(),
                StepOutcome::Finished(terminal) => return Ok((terminal, path)),
            }
        }
    }

    /// Hand the in-order clue listing to the presenter and return it.
    pub fn present_clues(&self, clues: &ClueIndex, presenter: &mut dyn Presenter) -> Vec<String> {
        if !self.mode.collects_clues() {
            return Vec::new();
        }
        let listed: Vec<&str> = clues.iter().collect();
        if listed.is_empty() {
            presenter.none_collected();
        } else {
            presenter.summary(&listed);
        }
        listed.into_iter().map(str::to_string).collect()
    }

    fn present_arrival(&self, arrival: &Arrival, presenter: &mut dyn Presenter) {
        presenter.room(&arrival.name);
        if self.mode.collects_clues() {
            match &arrival.clue {
                Some(clue) => presenter.clue_found(clue),
                None => presenter.no_clue(),
            }
        }
        if arrival.dead_end {
            presenter.dead_end();
        }
    }
}
