#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The user picked another room
    ChangeRoom { room_id: String },
    /// The user named a room to create
    CreateRoom { topic: String },
    Exit,
}
