use tracing::{debug, info, warn};

use crate::room_service::RoomService;

/// Asks the room service for a new room and returns the id to switch to.
///
/// An empty topic never reaches the service. Failures and replies without a room
/// are logged and end the flow without a result.
pub(super) async fn create_room<S>(service: &S, topic: &str) -> Option<String>
where
    S: RoomService + ?Sized,
{
    if topic.is_empty() {
        return None;
    }

    match service.create(topic).await {
        Ok(Some(room)) => {
            info!(room_id = %room.id, topic, "room created");

            Some(room.id)
        }
        Ok(None) => {
            debug!(topic, "room service created nothing");

            None
        }
        Err(err) => {
            warn!(topic, "could not create room: {:#}", err);

            None
        }
    }
}
