use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};

use anyhow::Context;
use async_trait::async_trait;
use comms::{
    command::{self, UserCommand},
    event::Event,
    room::Room,
    transport::{
        self,
        client::{CommandWriter, EventStream},
    },
};
use tokio::{
    net::{TcpStream, ToSocketAddrs},
    sync::{
        mpsc::{self, UnboundedReceiver, UnboundedSender},
        oneshot,
    },
};
use tokio_stream::StreamExt;
use tracing::{debug, error, info, warn};

use super::{RoomService, RoomSnapshot, RoomSubscription};

/// Requests handed from [RemoteRoomService] handles to the connection task
enum Request {
    Observe {
        subscription_id: u64,
        snapshot_tx: UnboundedSender<RoomSnapshot>,
    },
    Unobserve {
        subscription_id: u64,
    },
    Create {
        request_id: u64,
        topic: String,
        reply_tx: oneshot::Sender<Option<Room>>,
    },
}

/// [RoomService] talking to a room service backend over TCP
///
/// A single connection task owns the socket. Snapshots are routed to live queries by
/// subscription id, create replies to their callers by request id.
pub struct RemoteRoomService {
    request_tx: UnboundedSender<Request>,
    next_id: AtomicU64,
}

impl RemoteRoomService {
    pub async fn connect(addr: impl ToSocketAddrs) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .context("could not connect to the room service")?;

        Ok(Self::from_stream(stream))
    }

    pub fn from_stream(stream: TcpStream) -> Self {
        let (event_stream, command_writer) = transport::client::split_tcp_stream(stream);
        let (request_tx, request_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            if let Err(err) = run_connection(event_stream, command_writer, request_rx).await {
                error!("room service connection failed: {:#}", err);
            }
        });

        RemoteRoomService {
            request_tx,
            next_id: AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn send(&self, request: Request) -> anyhow::Result<()> {
        self.request_tx
            .send(request)
            .map_err(|_| anyhow::anyhow!("room service connection is closed"))
    }
}

#[async_trait]
impl RoomService for RemoteRoomService {
    async fn observe_query(&self) -> anyhow::Result<RoomSubscription> {
        let subscription_id = self.next_id();
        let (snapshot_tx, snapshot_rx) = mpsc::unbounded_channel();

        self.send(Request::Observe {
            subscription_id,
            snapshot_tx,
        })?;

        let request_tx = self.request_tx.clone();

        Ok(RoomSubscription::new(snapshot_rx, move || {
            // the connection may already be gone, nothing is left to release then
            let _ = request_tx.send(Request::Unobserve { subscription_id });
        }))
    }

    async fn create(&self, topic: &str) -> anyhow::Result<Option<Room>> {
        let request_id = self.next_id();
        let (reply_tx, reply_rx) = oneshot::channel();

        self.send(Request::Create {
            request_id,
            topic: String::from(topic),
            reply_tx,
        })?;

        reply_rx
            .await
            .context("room service connection closed before replying")
    }
}

#[derive(Default)]
struct Routes {
    live_queries: HashMap<u64, UnboundedSender<RoomSnapshot>>,
    pending_creates: HashMap<u64, oneshot::Sender<Option<Room>>>,
}

impl Routes {
    fn route_event(&mut self, event: Event) {
        match event {
            Event::RoomSnapshot(event) => {
                if let Some(snapshot_tx) = self.live_queries.get(&event.subscription_id) {
                    debug!(
                        subscription_id = event.subscription_id,
                        rooms = event.items.len(),
                        "room snapshot received"
                    );

                    if snapshot_tx.send(RoomSnapshot { items: event.items }).is_err() {
                        self.live_queries.remove(&event.subscription_id);
                    }
                }
            }
            Event::RoomCreated(event) => match self.pending_creates.remove(&event.request_id) {
                Some(reply_tx) => {
                    let _ = reply_tx.send(event.into_room());
                }
                None => warn!(request_id = event.request_id, "reply for an unknown create request"),
            },
        }
    }
}

async fn run_connection(
    mut event_stream: EventStream,
    mut command_writer: CommandWriter,
    mut request_rx: UnboundedReceiver<Request>,
) -> anyhow::Result<()> {
    let mut routes = Routes::default();

    loop {
        tokio::select! {
            maybe_event = event_stream.next() => match maybe_event {
                Some(Ok(event)) => routes.route_event(event),
                // one bad line says nothing about the lines after it
                Some(Err(err)) if transport::is_malformed_message(&err) => {
                    warn!("skipping an undecodable event: {:#}", err);
                },
                Some(Err(err)) => {
                    // dropping the routes ends every live query and fails pending creates
                    return Err(err);
                },
                None => {
                    info!("room service closed the connection");
                    return Ok(());
                },
            },
            maybe_request = request_rx.recv() => match maybe_request {
                Some(Request::Observe { subscription_id, snapshot_tx }) => {
                    routes.live_queries.insert(subscription_id, snapshot_tx);
                    command_writer
                        .write(&UserCommand::ObserveRooms(command::ObserveRoomsCommand { subscription_id }))
                        .await
                        .context("could not observe rooms")?;
                },
                Some(Request::Unobserve { subscription_id }) => {
                    routes.live_queries.remove(&subscription_id);
                    command_writer
                        .write(&UserCommand::UnobserveRooms(command::UnobserveRoomsCommand { subscription_id }))
                        .await
                        .context("could not release the room live query")?;
                },
                Some(Request::Create { request_id, topic, reply_tx }) => {
                    routes.pending_creates.insert(request_id, reply_tx);
                    command_writer
                        .write(&UserCommand::CreateRoom(command::CreateRoomCommand { request_id, topic }))
                        .await
                        .context("could not request room creation")?;
                },
                // every handle is gone, say goodbye to the service
                None => {
                    let _ = command_writer.write(&UserCommand::Quit(command::QuitCommand)).await;
                    return Ok(());
                },
            },
        }
    }
}
