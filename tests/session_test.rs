//! End-to-end sessions driven through the investigation service.

use std::io::Cursor;

use rstest::rstest;

use mansion::application::services::InvestigationService;
use mansion::domain::{Choice, MapSpec, Mode, Rejection, RoomSpec, Terminal};
use mansion::infrastructure::console::{ConsoleChoices, ConsolePresenter};
use mansion::infrastructure::scripted::{PresenterEvent, RecordingPresenter, ScriptedChoices};
use mansion::util::testing;

fn four_rooms() -> MapSpec {
    MapSpec {
        room: RoomSpec::new("Hall")
            .with_clue("A")
            .with_left(
                RoomSpec::new("Parlor")
                    .with_clue("B")
                    .with_left(RoomSpec::new("Library")),
            )
            .with_right(RoomSpec::new("Kitchen")),
    }
}

#[test]
fn given_walk_to_leaf_when_stopping_then_clues_listed_in_order() {
    testing::init_test_setup();
    let service = InvestigationService::new(Mode::Investigate);
    let mut choices = ScriptedChoices::new([Choice::Left, Choice::Left, Choice::Stop]);
    let mut presenter = RecordingPresenter::new();

    let report = service
        .run(&four_rooms(), &mut choices, &mut presenter)
        .unwrap();

    assert_eq!(report.terminal, Terminal::Exited);
    assert_eq!(report.clues, vec!["A", "B"]);
    assert_eq!(report.path, vec!["Hall", "Parlor", "Library"]);
    assert_eq!(presenter.rooms(), vec!["Hall", "Parlor", "Library"]);
    assert_eq!(
        presenter.events.last(),
        Some(&PresenterEvent::Summary(vec!["A".into(), "B".into()]))
    );
}

#[test]
fn given_clueless_path_when_stopping_then_none_collected_reported() {
    let spec = MapSpec {
        room: RoomSpec::new("Hall").with_right(RoomSpec::new("Kitchen")),
    };
    let service = InvestigationService::new(Mode::Investigate);
    let mut choices = ScriptedChoices::new([Choice::Right, Choice::Stop]);
    let mut presenter = RecordingPresenter::new();

    let report = service.run(&spec, &mut choices, &mut presenter).unwrap();

    assert!(report.clues.is_empty());
    assert_eq!(presenter.events.last(), Some(&PresenterEvent::NoneCollected));
    assert!(presenter.events.contains(&PresenterEvent::NoClue));
}

#[test]
fn given_script_runs_out_when_playing_then_session_stops() {
    let service = InvestigationService::new(Mode::Investigate);
    let mut choices = ScriptedChoices::new([Choice::Left]);
    let mut presenter = RecordingPresenter::new();

    let report = service
        .run(&four_rooms(), &mut choices, &mut presenter)
        .unwrap();

    assert_eq!(report.terminal, Terminal::Exited);
    assert_eq!(choices.remaining(), 0);
    assert!(presenter.events.contains(&PresenterEvent::Exited));
}

#[test]
fn given_wrong_directions_when_playing_then_rejections_presented() {
    let service = InvestigationService::new(Mode::Investigate);
    let mut choices = ScriptedChoices::new([
        Choice::Right,
        Choice::Right,
        Choice::Invalid,
        Choice::Stop,
    ]);
    let mut presenter = RecordingPresenter::new();

    service
        .run(&four_rooms(), &mut choices, &mut presenter)
        .unwrap();

    let rejections: Vec<&PresenterEvent> = presenter
        .events
        .iter()
        .filter(|e| matches!(e, PresenterEvent::Rejected(_)))
        .collect();
    assert_eq!(
        rejections,
        vec![
            &PresenterEvent::Rejected(Rejection::NoPath(mansion::domain::Direction::Right)),
            &PresenterEvent::Rejected(Rejection::Invalid),
        ]
    );
}

#[rstest]
#[case::investigate(Mode::Investigate, Terminal::Exited)]
#[case::explore(Mode::Explore, Terminal::DeadEnd)]
fn given_builtin_mansion_when_walking_to_bathroom_then_terminal_depends_on_mode(
    #[case] mode: Mode,
    #[case] terminal: Terminal,
) {
    let service = InvestigationService::new(mode);
    // Entrance Hall -> Living Room -> Study -> Master Bedroom -> Bathroom
    let mut choices = ScriptedChoices::new([
        Choice::Left,
        Choice::Right,
        Choice::Left,
        Choice::Left,
        Choice::Stop,
    ]);
    let mut presenter = RecordingPresenter::new();

    let report = service
        .run(&MapSpec::builtin(), &mut choices, &mut presenter)
        .unwrap();

    assert_eq!(report.terminal, terminal);
    assert_eq!(report.path.last().map(String::as_str), Some("Bathroom"));
    match mode {
        Mode::Investigate => assert_eq!(
            report.clues,
            vec![
                "The burnt candle hides a number.",
                "The clock stopped at 04:15.",
                "The key is under the first heavy object.",
            ]
        ),
        Mode::Explore => {
            assert!(report.clues.is_empty());
            assert_eq!(choices.remaining(), 1, "stop is never asked for");
        }
    }
}

#[test]
fn given_console_input_when_playing_then_transcript_shows_rooms_and_sorted_clues() {
    colored::control::set_override(false);
    let service = InvestigationService::new(Mode::Investigate);
    let mut choices = ConsoleChoices::new(Cursor::new("x\nl\nL\ns\n"));
    let mut presenter = ConsolePresenter::new(Vec::new(), true);

    let report = service
        .run(&four_rooms(), &mut choices, &mut presenter)
        .unwrap();
    let transcript = String::from_utf8(presenter.into_inner()).unwrap();

    assert_eq!(report.clues, vec!["A", "B"]);
    assert!(transcript.contains("You are in: Hall"));
    assert!(transcript.contains("You are in: Library"));
    assert!(transcript.contains("Invalid option"));
    assert!(transcript.contains("[l] Go left (Parlor)"));
    let a = transcript.rfind("- A").unwrap();
    let b = transcript.rfind("- B").unwrap();
    assert!(a < b);
}

#[test]
fn given_console_input_ends_early_when_playing_then_session_closes_cleanly() {
    let service = InvestigationService::new(Mode::Investigate);
    let mut choices = ConsoleChoices::new(Cursor::new("l\n"));
    let mut presenter = ConsolePresenter::new(Vec::new(), false);

    let report = service
        .run(&four_rooms(), &mut choices, &mut presenter)
        .unwrap();

    assert_eq!(report.terminal, Terminal::Exited);
    assert_eq!(report.path, vec!["Hall", "Parlor"]);
}
