use serde::{Deserialize, Serialize};

use crate::room::Room;

/// Full current content of the room collection for one live query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshotEvent {
    /// The live query this snapshot belongs to
    #[serde(rename = "s")]
    pub subscription_id: u64,
    /// Every room in the collection, in the order the service keeps them
    #[serde(rename = "i")]
    pub items: Vec<Room>,
}

/// Reply to a [crate::command::CreateRoomCommand]
///
/// Both fields are optional: a reply without an `id` is how the service reports
/// that nothing was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomCreatedReplyEvent {
    /// The request this reply answers
    #[serde(rename = "q")]
    pub request_id: u64,
    /// Id of the created room
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Topic of the created room
    #[serde(rename = "tp", default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl RoomCreatedReplyEvent {
    /// The created room, if the reply carries an id
    pub fn into_room(self) -> Option<Room> {
        let id = self.id?;

        Some(Room {
            id,
            topic: self.topic.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
/// Events that can be sent to the client
/// Snapshots are pushed for every open live query, replies answer a single command
pub enum Event {
    RoomSnapshot(RoomSnapshotEvent),
    RoomCreated(RoomCreatedReplyEvent),
}
