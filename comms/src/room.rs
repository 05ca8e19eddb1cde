use serde::{Deserialize, Serialize};

/// A room record as stored by the room service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Identifier assigned by the room service
    pub id: String,
    /// Human readable name of the room
    #[serde(rename = "tp")]
    pub topic: String,
}

impl Room {
    pub fn new(id: &str, topic: &str) -> Self {
        Room {
            id: String::from(id),
            topic: String::from(topic),
        }
    }
}
