//! Integration tests for room tree construction and traversal.

use rstest::rstest;

use mansion::domain::{
    Direction, DomainError, MansionBuilder, MapSpec, RoomSpec, RoomTree, MAX_CLUE_LEN,
    MAX_NAME_LEN,
};

#[test]
fn given_builtin_map_when_building_then_every_room_is_reachable_once() {
    let tree = MansionBuilder::builtin().expect("builtin map builds");

    let names: Vec<&str> = tree.iter().map(|(_, room)| room.name()).collect();

    assert_eq!(names.len(), tree.len());
    let mut unique = names.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), names.len(), "no room appears twice");
}

#[test]
fn given_second_root_when_inserting_then_root_exists_error() {
    let mut tree = RoomTree::new();
    tree.insert_room("Hall", None, None).unwrap();

    let err = tree.insert_room("Annex", None, None).unwrap_err();

    assert_eq!(err, DomainError::RootExists("Hall".to_string()));
    assert_eq!(tree.len(), 1);
}

#[rstest]
#[case(Direction::Left)]
#[case(Direction::Right)]
fn given_occupied_slot_when_inserting_then_rejected(#[case] side: Direction) {
    let mut tree = RoomTree::new();
    let hall = tree.insert_room("Hall", None, None).unwrap();
    tree.insert_room("First", None, Some((hall, side))).unwrap();

    let err = tree.insert_room("Second", None, Some((hall, side))).unwrap_err();

    assert_eq!(
        err,
        DomainError::SlotOccupied {
            parent: "Hall".to_string(),
            side
        }
    );
}

#[test]
fn given_released_parent_when_inserting_child_then_unknown_room() {
    let mut tree = RoomTree::new();
    let hall = tree.insert_room("Hall", None, None).unwrap();
    tree.release();

    let err = tree
        .insert_room("Orphan", None, Some((hall, Direction::Left)))
        .unwrap_err();

    assert_eq!(err, DomainError::UnknownRoom);
}

#[test]
fn given_oversized_texts_when_inserting_then_truncated_to_limits() {
    let mut tree = RoomTree::new();
    let long_name = "n".repeat(MAX_NAME_LEN + 20);
    let long_clue = "c".repeat(MAX_CLUE_LEN + 20);

    let id = tree
        .insert_room(&long_name, Some(&long_clue), None)
        .unwrap();
    let room = tree.room(id).unwrap();

    assert_eq!(room.name().len(), MAX_NAME_LEN);
    assert_eq!(room.clue().map(str::len), Some(MAX_CLUE_LEN));
}

#[test]
fn given_multibyte_name_at_limit_when_inserting_then_cut_at_char_boundary() {
    let mut tree = RoomTree::new();
    // 'é' is two bytes; 25 of them overrun the limit mid-character
    let name = "é".repeat(25);

    let id = tree.insert_room(&name, None, None).unwrap();
    let stored = tree.room(id).unwrap().name();

    assert!(stored.len() <= MAX_NAME_LEN);
    assert!(stored.chars().all(|c| c == 'é'));
}

#[test]
fn given_empty_clue_when_inserting_then_room_has_no_clue() {
    let mut tree = RoomTree::new();
    let id = tree.insert_room("Hall", Some(""), None).unwrap();

    assert!(!tree.has_clue(id));
    assert_eq!(tree.remaining_clues(), 0);
}

#[test]
fn given_clue_when_taken_twice_then_second_take_is_empty() {
    let mut tree = RoomTree::new();
    let id = tree.insert_room("Hall", Some("Muddy boots"), None).unwrap();

    assert_eq!(tree.take_clue(id), Some("Muddy boots".to_string()));
    assert_eq!(tree.take_clue(id), None);
    assert!(!tree.has_clue(id));
}

#[test]
fn given_left_chain_when_releasing_then_every_room_freed_without_recursion() {
    let mut tree = RoomTree::new();
    let mut current = tree.insert_room("Room 0", None, None).unwrap();
    for i in 1..10_000 {
        current = tree
            .insert_room(&format!("Room {i}"), None, Some((current, Direction::Left)))
            .unwrap();
    }

    assert_eq!(tree.depth(), 10_000);
    assert_eq!(tree.leaf_rooms(), vec!["Room 9999".to_string()]);
    assert_eq!(tree.release(), 10_000);
    assert!(tree.is_empty());
    assert_eq!(tree.release(), 0);
}

#[test]
fn given_deep_map_description_when_building_and_dropping_then_no_recursion() {
    let mut room = RoomSpec::new("Room 0").with_clue("bottom");
    for i in 1..20_000 {
        room = RoomSpec::new(format!("Room {i}")).with_left(room);
    }
    let spec = MapSpec { room };

    let mut tree = MansionBuilder::build(&spec).unwrap();
    drop(spec);

    assert_eq!(tree.depth(), 20_000);
    assert_eq!(tree.remaining_clues(), 1);
    assert_eq!(tree.release(), 20_000);
}

#[test]
fn given_tree_when_walking_post_order_then_children_before_parents() {
    let tree = MansionBuilder::builtin().unwrap();

    let order: Vec<&str> = tree.iter_postorder().map(|(_, r)| r.name()).collect();
    let pos = |name: &str| order.iter().position(|n| *n == name).unwrap();

    assert!(pos("Bathroom") < pos("Master Bedroom"));
    assert!(pos("Master Bedroom") < pos("Study"));
    assert!(pos("Library") < pos("Study"));
    assert!(pos("Study") < pos("Living Room"));
    assert_eq!(order.last(), Some(&"Entrance Hall"));
}

#[test]
fn given_spec_with_blank_room_name_when_building_then_invalid_map() {
    let spec = MapSpec {
        room: RoomSpec::new("Hall").with_right(RoomSpec::new("   ")),
    };

    let err = MansionBuilder::build(&spec).unwrap_err();

    assert!(matches!(err, DomainError::InvalidMap(_)), "got {err:?}");
}
