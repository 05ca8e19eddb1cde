use std::{marker::PhantomData, pin::Pin};

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::tcp::{OwnedReadHalf, OwnedWriteHalf},
};
use tokio_stream::{wrappers::LinesStream, Stream, StreamExt};

pub const NEW_LINE: &[u8; 2] = b"\r\n";

pub type BoxedStream<Item> = Pin<Box<dyn Stream<Item = Item> + Send>>;

/// Writes values as newline delimited json to the write half of a [tokio::net::TcpStream]
pub struct JsonLineWriter<T> {
    writer: OwnedWriteHalf,
    _message: PhantomData<fn(&T)>,
}

impl<T: Serialize> JsonLineWriter<T> {
    pub fn new(writer: OwnedWriteHalf) -> Self {
        Self {
            writer,
            _message: PhantomData,
        }
    }

    /// Serialize a single message and write it out, terminated by [NEW_LINE]
    ///
    /// # Cancel Safety
    ///
    /// This method is not cancellation safe. If it is used as the event
    /// in a [tokio::select!] statement and some other
    /// branch completes first, then the message may have been
    /// partially written, but future calls to `write` will start over
    /// from the beginning of the buffer. Causing undefined behaviour.
    pub async fn write(&mut self, message: &T) -> anyhow::Result<()> {
        let mut serialized_bytes = serde_json::to_vec(message)?;
        serialized_bytes.extend_from_slice(NEW_LINE);

        self.writer.write_all(serialized_bytes.as_slice()).await?;

        Ok(())
    }
}

/// Whether an error from a [json_line_stream] is a single line that could not be decoded,
/// as opposed to a failure of the connection itself
pub fn is_malformed_message(err: &anyhow::Error) -> bool {
    err.downcast_ref::<serde_json::Error>().is_some()
}

/// Reads newline delimited json from the read half of a [tokio::net::TcpStream]
///
/// `peer` names the other side of the connection in error contexts.
pub fn json_line_stream<T>(reader: OwnedReadHalf, peer: &'static str) -> BoxedStream<anyhow::Result<T>>
where
    T: DeserializeOwned + 'static,
{
    Box::pin(
        LinesStream::new(BufReader::new(reader).lines()).map(move |line| {
            line.with_context(|| format!("could not read line from the {}", peer))
                .and_then(|line| {
                    serde_json::from_str::<T>(&line)
                        .with_context(|| format!("failed to deserialize message from the {}", peer))
                })
        }),
    )
}
