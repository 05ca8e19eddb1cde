use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use comms::room::Room;
use tokio::sync::mpsc::{self, UnboundedSender};

use super::{RoomService, RoomSnapshot, RoomSubscription};

/// What a [FakeRoomService] answers to `create`
#[derive(Debug, Clone)]
pub enum CreateReply {
    Room(Room),
    Nothing,
    Failure,
}

/// In-memory [RoomService] recording what it was asked to do
pub struct FakeRoomService {
    create_reply: CreateReply,
    observe_fails: bool,
    control: FakeControl,
}

/// Shared view into a [FakeRoomService], used by tests to push snapshots and inspect calls
#[derive(Clone, Default)]
pub struct FakeControl {
    snapshot_tx: Arc<Mutex<Option<UnboundedSender<RoomSnapshot>>>>,
    observe_calls: Arc<AtomicUsize>,
    created_topics: Arc<Mutex<Vec<String>>>,
    released: Arc<AtomicBool>,
}

impl FakeRoomService {
    pub fn new(create_reply: CreateReply) -> (Self, FakeControl) {
        let control = FakeControl::default();

        (
            FakeRoomService {
                create_reply,
                observe_fails: false,
                control: control.clone(),
            },
            control,
        )
    }

    /// Makes every `observe_query` fail, as if the backend refused the live query
    pub fn failing_observe(self) -> Self {
        FakeRoomService {
            observe_fails: true,
            ..self
        }
    }
}

impl FakeControl {
    /// Pushes a snapshot to the open live query. Returns false if there is none.
    pub fn push(&self, items: Vec<Room>) -> bool {
        self.snapshot_tx
            .lock()
            .unwrap()
            .as_ref()
            .map(|snapshot_tx| snapshot_tx.send(RoomSnapshot { items }).is_ok())
            .unwrap_or(false)
    }

    pub fn observe_calls(&self) -> usize {
        self.observe_calls.load(Ordering::SeqCst)
    }

    pub fn created_topics(&self) -> Vec<String> {
        self.created_topics.lock().unwrap().clone()
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoomService for FakeRoomService {
    async fn observe_query(&self) -> anyhow::Result<RoomSubscription> {
        self.control.observe_calls.fetch_add(1, Ordering::SeqCst);

        if self.observe_fails {
            return Err(anyhow::anyhow!("room service unavailable"));
        }

        let (snapshot_tx, snapshot_rx) = mpsc::unbounded_channel();
        *self.control.snapshot_tx.lock().unwrap() = Some(snapshot_tx);

        let control = self.control.clone();

        Ok(RoomSubscription::new(snapshot_rx, move || {
            control.snapshot_tx.lock().unwrap().take();
            control.released.store(true, Ordering::SeqCst);
        }))
    }

    async fn create(&self, topic: &str) -> anyhow::Result<Option<Room>> {
        self.control
            .created_topics
            .lock()
            .unwrap()
            .push(String::from(topic));

        match &self.create_reply {
            CreateReply::Room(room) => Ok(Some(room.clone())),
            CreateReply::Nothing => Ok(None),
            CreateReply::Failure => Err(anyhow::anyhow!("room service unavailable")),
        }
    }
}
