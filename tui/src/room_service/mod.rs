use async_trait::async_trait;
use comms::room::Room;
use tokio::sync::mpsc::UnboundedReceiver;

pub use self::remote::RemoteRoomService;

mod remote;
#[cfg(test)]
pub(crate) mod testing;

/// Full current content of the room collection, as delivered by one live query notification
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomSnapshot {
    pub items: Vec<Room>,
}

/// The remote collaborator owning the room collection
#[async_trait]
pub trait RoomService: Send + Sync {
    /// Opens a live query over the room collection.
    ///
    /// The returned [RoomSubscription] yields the full collection every time it changes.
    async fn observe_query(&self) -> anyhow::Result<RoomSubscription>;

    /// Asks the service to create a room with the given topic.
    ///
    /// Resolves to `None` when the service answers without a room.
    async fn create(&self, topic: &str) -> anyhow::Result<Option<Room>>;
}

type Release = Box<dyn FnOnce() + Send>;

/// Handle on an open live query.
///
/// The query is released exactly once, either through [RoomSubscription::unsubscribe]
/// or when the handle is dropped. No snapshot is delivered after that.
pub struct RoomSubscription {
    snapshots: UnboundedReceiver<RoomSnapshot>,
    release: Option<Release>,
}

impl RoomSubscription {
    pub fn new(
        snapshots: UnboundedReceiver<RoomSnapshot>,
        release: impl FnOnce() + Send + 'static,
    ) -> Self {
        RoomSubscription {
            snapshots,
            release: Some(Box::new(release)),
        }
    }

    /// Waits for the next snapshot. Returns `None` once the service stopped delivering.
    ///
    /// # Cancel Safety
    ///
    /// This method is cancel-safe, it can be used in [tokio::select!] without losing snapshots.
    pub async fn next(&mut self) -> Option<RoomSnapshot> {
        self.snapshots.recv().await
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(release) = self.release.take() {
            self.snapshots.close();
            release();
        }
    }
}

impl Drop for RoomSubscription {
    fn drop(&mut self) {
        self.release();
    }
}
