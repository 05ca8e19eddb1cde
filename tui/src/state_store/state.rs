use std::iter;

use comms::room::Room;
use tracing::debug;

use crate::room_service::RoomSnapshot;

/// Id of the local "no specific room" entry, never sent to the room service
pub const DEFAULT_ROOM_ID: &str = "default";
const DEFAULT_ROOM_TOPIC: &str = "Default Room";

pub fn default_room() -> Room {
    Room::new(DEFAULT_ROOM_ID, DEFAULT_ROOM_TOPIC)
}

/// State holds the state of the application
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// Room the user is in. Only changed through [State::change_room]
    pub current_room_id: String,
    /// The default room followed by the latest live snapshot, never empty
    pub rooms: Vec<Room>,
}

impl Default for State {
    fn default() -> Self {
        State {
            current_room_id: String::from(DEFAULT_ROOM_ID),
            rooms: vec![default_room()],
        }
    }
}

impl State {
    /// Replaces the room list with the default room followed by the snapshot items
    pub fn apply_room_snapshot(&mut self, snapshot: RoomSnapshot) {
        debug!(rooms = snapshot.items.len(), "applying room snapshot");

        self.rooms = iter::once(default_room()).chain(snapshot.items).collect();
    }

    pub fn change_room(&mut self, room_id: String) {
        debug!(%room_id, "room changed");

        self.current_room_id = room_id;
    }

    /// The room matching the current room id, if it is in the list
    pub fn current_room(&self) -> Option<&Room> {
        self.rooms
            .iter()
            .find(|room| room.id == self.current_room_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_only_the_default_room() {
        let state = State::default();

        assert_eq!(state.rooms, vec![default_room()]);
        assert_eq!(state.current_room_id, DEFAULT_ROOM_ID);
        assert_eq!(state.current_room(), Some(&default_room()));
    }

    #[test]
    fn snapshot_is_prefixed_with_the_default_room() {
        let mut state = State::default();

        state.apply_room_snapshot(RoomSnapshot {
            items: vec![Room::new("room-2", "Garage"), Room::new("room-1", "Kitchen")],
        });

        assert_eq!(
            state.rooms,
            vec![
                default_room(),
                Room::new("room-2", "Garage"),
                Room::new("room-1", "Kitchen"),
            ]
        );
    }

    #[test]
    fn snapshot_replaces_the_previous_list() {
        let mut state = State::default();

        state.apply_room_snapshot(RoomSnapshot {
            items: vec![Room::new("room-1", "Kitchen"), Room::new("room-2", "Garage")],
        });
        state.apply_room_snapshot(RoomSnapshot {
            items: vec![Room::new("room-3", "Attic")],
        });

        assert_eq!(state.rooms, vec![default_room(), Room::new("room-3", "Attic")]);

        state.apply_room_snapshot(RoomSnapshot::default());

        assert_eq!(state.rooms, vec![default_room()]);
    }

    #[test]
    fn snapshot_keeps_the_current_room_id() {
        let mut state = State::default();
        state.change_room("room-1".into());

        state.apply_room_snapshot(RoomSnapshot {
            items: vec![Room::new("room-2", "Garage")],
        });

        assert_eq!(state.current_room_id, "room-1");
        assert_eq!(state.current_room(), None);
    }
}
