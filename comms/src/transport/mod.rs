/// Transport over TCP implementation for a client to be able to interact with the room service
#[cfg(feature = "client")]
pub mod client;
#[cfg(any(feature = "client", feature = "server"))]
mod common;
/// Transport over TCP implementation for a room service backend to interact with a single client TCP Stream
#[cfg(feature = "server")]
pub mod server;

#[cfg(any(feature = "client", feature = "server"))]
pub use common::is_malformed_message;
