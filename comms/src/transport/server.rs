use tokio::net::TcpStream;

use crate::{command, event};

use super::common::{json_line_stream, BoxedStream, JsonLineWriter};

/// [CommandStream] is a stream of [crate::command::UserCommand]s sent by a client
///
/// # Cancel Safety
///
/// This stream is cancel-safe, meaning that it can be used in [tokio::select!]
/// without the risk of missing commands.
pub type CommandStream = BoxedStream<anyhow::Result<command::UserCommand>>;

/// [EventWriter] writes [crate::event::Event]s to a client
pub type EventWriter = JsonLineWriter<event::Event>;

/// Splits a TCP stream accepted from a client into a stream of commands and an event writer.
///
/// # Arguments
///
/// - `stream` - A [TcpStream] to split
pub fn split_tcp_stream(stream: TcpStream) -> (CommandStream, EventWriter) {
    let (reader, writer) = stream.into_split();

    (json_line_stream(reader, "client"), EventWriter::new(writer))
}
