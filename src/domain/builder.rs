//! Map builder: wires a [`RoomTree`] from a declarative [`MapSpec`].

use tracing::debug;

use crate::domain::arena::{RoomId, RoomTree};
use crate::domain::entities::{Direction, MapSpec, RoomSpec};
use crate::domain::error::{DomainError, DomainResult};

/// Constructs room trees from map descriptions.
pub struct MansionBuilder;

impl MansionBuilder {
    /// Build the tree described by `spec`.
    ///
    /// Walks the description with an explicit stack, so map depth is not limited by
    /// the call stack.
    pub fn build(spec: &MapSpec) -> DomainResult<RoomTree> {
        let mut tree = RoomTree::new();
        let mut stack: Vec<(&RoomSpec, Option<(RoomId, Direction)>)> = vec![(&spec.room, None)];

        while let Some((room, slot)) = stack.pop() {
            if room.name.trim().is_empty() {
                return Err(DomainError::InvalidMap("room without a name".to_string()));
            }
            let id = tree.insert_room(&room.name, room.clue.as_deref(), slot)?;
            for side in [Direction::Right, Direction::Left] {
                if let Some(child) = room.child(side) {
                    stack.push((child, Some((id, side))));
                }
            }
        }

        debug!(rooms = tree.len(), clues = tree.remaining_clues(), "map built");
        Ok(tree)
    }

    pub fn builtin() -> DomainResult<RoomTree> {
        Self::build(&MapSpec::builtin())
    }
}

impl MapSpec {
    /// The eleven-room mansion shipped with the game.
    pub fn builtin() -> Self {
        let bedroom = RoomSpec::new("Master Bedroom")
            .with_clue("The clock stopped at 04:15.")
            .with_left(RoomSpec::new("Bathroom"));
        let study = RoomSpec::new("Study")
            .with_left(bedroom)
            .with_right(RoomSpec::new("Library"));
        let living_room = RoomSpec::new("Living Room")
            .with_clue("The burnt candle hides a number.")
            .with_left(
                RoomSpec::new("Winter Garden").with_clue("The answer is the capital of Chile."),
            )
            .with_right(study);
        let dining_room = RoomSpec::new("Dining Room")
            .with_clue("The culprit wears a red hat.")
            .with_left(RoomSpec::new("Pantry").with_clue("The favourite book is 'Crimes of the Nile'."))
            .with_right(RoomSpec::new("Basement").with_clue("There is a second secret door."));
        let kitchen = RoomSpec::new("Kitchen").with_left(dining_room);

        MapSpec {
            room: RoomSpec::new("Entrance Hall")
                .with_clue("The key is under the first heavy object.")
                .with_left(living_room)
                .with_right(kitchen),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_builtin_spec_when_building_then_has_eleven_rooms_and_seven_clues() {
        let tree = MansionBuilder::builtin().unwrap();
        assert_eq!(tree.len(), 11);
        assert_eq!(tree.remaining_clues(), 7);
        assert_eq!(tree.depth(), 5);
    }

    #[test]
    fn given_builtin_spec_when_building_then_wires_rooms_like_the_map() {
        let tree = MansionBuilder::builtin().unwrap();
        let pre: Vec<&str> = tree.iter().map(|(_, r)| r.name()).collect();
        assert_eq!(
            pre,
            vec![
                "Entrance Hall",
                "Living Room",
                "Winter Garden",
                "Study",
                "Master Bedroom",
                "Bathroom",
                "Library",
                "Kitchen",
                "Dining Room",
                "Pantry",
                "Basement",
            ]
        );
        assert_eq!(
            tree.leaf_rooms(),
            vec!["Winter Garden", "Bathroom", "Library", "Pantry", "Basement"]
        );
    }

    #[test]
    fn given_unnamed_room_when_building_then_invalid_map() {
        let spec = MapSpec {
            room: RoomSpec::new("Hall").with_left(RoomSpec::new("  ")),
        };
        assert!(matches!(
            MansionBuilder::build(&spec),
            Err(DomainError::InvalidMap(_))
        ));
    }
}
