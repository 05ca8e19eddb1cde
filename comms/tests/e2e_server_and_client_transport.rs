use std::net::SocketAddr;

use comms::{
    command::{self, UserCommand},
    event::{self, Event},
    room::Room,
    transport,
};
use tokio::net::{TcpListener, TcpStream};
use tokio_stream::StreamExt;

#[tokio::test]
async fn assert_server_client_transport() {
    // bind to an ephemeral port to wait for the client connection
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("could not bind to a port");
    let addr = listener.local_addr().expect("listener has no local address");

    let (server_collected_commands, client_collected_events) =
        tokio::join!(execute_server(listener), execute_client(addr));

    assert!(server_collected_commands.is_ok());
    assert!(client_collected_events.is_ok());

    assert_eq!(
        server_collected_commands.unwrap(),
        vec![
            UserCommand::ObserveRooms(command::ObserveRoomsCommand { subscription_id: 1 }),
            UserCommand::CreateRoom(command::CreateRoomCommand {
                request_id: 2,
                topic: "Kitchen".into(),
            }),
            UserCommand::UnobserveRooms(command::UnobserveRoomsCommand { subscription_id: 1 }),
        ]
    );

    assert_eq!(
        client_collected_events.unwrap(),
        vec![Event::RoomSnapshot(event::RoomSnapshotEvent {
            subscription_id: 1,
            items: vec![Room::new("room-1", "Lobby")],
        })]
    );
}

async fn execute_server(listener: TcpListener) -> anyhow::Result<Vec<command::UserCommand>> {
    // accept the only client connection we will have
    let tcp_stream = match listener.accept().await {
        Ok((tcp_stream, _addr)) => tcp_stream,
        Err(e) => return Err(anyhow::anyhow!("failed to accept client: {}", e)),
    };

    // break the client connection into higher level API for ease of use
    let (mut command_stream, mut event_writer) = transport::server::split_tcp_stream(tcp_stream);
    // store commands received from the client
    let mut collected_commands = Vec::new();

    // push the current collection as soon as the client connects
    event_writer
        .write(&Event::RoomSnapshot(event::RoomSnapshotEvent {
            subscription_id: 1,
            items: vec![Room::new("room-1", "Lobby")],
        }))
        .await?;

    // listen for commands from the client until the connection is closed
    while let Some(result) = command_stream.next().await {
        match result {
            // client has sent a valid command which we could read and parse
            Ok(command) => collected_commands.push(command),
            // client has sent a command which we could not read or parse
            Err(e) => return Err(anyhow::anyhow!("failed to read command: {}", e)),
        }
    }

    Ok(collected_commands)
}

async fn execute_client(addr: SocketAddr) -> anyhow::Result<Vec<event::Event>> {
    // create a client connection to the room service
    let tcp_stream = match TcpStream::connect(addr).await {
        Ok(tcp_stream) => tcp_stream,
        Err(e) => return Err(anyhow::anyhow!("failed to connect to server: {}", e)),
    };

    let (mut event_stream, mut command_writer) = transport::client::split_tcp_stream(tcp_stream);
    let mut collected_events = Vec::new();

    match event_stream.next().await {
        // server has sent a valid event which we could read and parse
        Some(Ok(event)) => collected_events.push(event),
        // server has sent an event which we could not read or parse
        Some(Err(e)) => return Err(anyhow::anyhow!("could not parse event: {}", e)),
        // server has closed the connection, return an error
        None => return Err(anyhow::anyhow!("server closed the connection")),
    }

    command_writer
        .write(&UserCommand::ObserveRooms(command::ObserveRoomsCommand {
            subscription_id: 1,
        }))
        .await?;

    command_writer
        .write(&UserCommand::CreateRoom(command::CreateRoomCommand {
            request_id: 2,
            topic: "Kitchen".into(),
        }))
        .await?;

    command_writer
        .write(&UserCommand::UnobserveRooms(command::UnobserveRoomsCommand {
            subscription_id: 1,
        }))
        .await?;

    Ok(collected_events)
}
