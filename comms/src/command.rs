use serde::{Deserialize, Serialize};

/// Command for opening a live query over the room collection.
/// The service answers with a [crate::event::RoomSnapshotEvent] right away and after every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserveRoomsCommand {
    // Client chosen id, echoed back on every snapshot of this live query.
    #[serde(rename = "s")]
    pub subscription_id: u64,
}

/// Command for releasing a live query opened with [ObserveRoomsCommand].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnobserveRoomsCommand {
    #[serde(rename = "s")]
    pub subscription_id: u64,
}

/// Command for creating a new room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoomCommand {
    // Client chosen id, echoed back on the matching reply.
    #[serde(rename = "q")]
    pub request_id: u64,
    // The topic of the room to create.
    #[serde(rename = "tp")]
    pub topic: String,
}

/// Command for closing the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuitCommand;

/// A command which can be sent to the room service by a single client session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_ct", rename_all = "snake_case")]
pub enum UserCommand {
    ObserveRooms(ObserveRoomsCommand),
    UnobserveRooms(UnobserveRoomsCommand),
    CreateRoom(CreateRoomCommand),
    Quit(QuitCommand),
}
