use tokio::net::TcpStream;

use crate::{command, event};

use super::common::{json_line_stream, BoxedStream, JsonLineWriter};

/// [EventStream] is a stream of [crate::event::Event]s pushed by the room service
///
/// # Cancel Safety
///
/// This stream is cancel-safe, meaning that it can be used in [tokio::select]
/// without the risk of missing events.
pub type EventStream = BoxedStream<anyhow::Result<event::Event>>;

/// [CommandWriter] writes [crate::command::UserCommand]s to the room service
pub type CommandWriter = JsonLineWriter<command::UserCommand>;

/// Splits a TCP stream connected to the room service into a stream of events and a command writer.
///
/// # Arguments
///
/// - `stream` - A [TcpStream] to split
pub fn split_tcp_stream(stream: TcpStream) -> (EventStream, CommandWriter) {
    let (reader, writer) = stream.into_split();

    (
        json_line_stream(reader, "room service"),
        CommandWriter::new(writer),
    )
}
