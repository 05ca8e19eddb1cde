/// Set of commands which the room service can receive and process
pub mod command;
/// Set of events pushed by the room service, either live query snapshots or replies to commands
pub mod event;
/// Records owned by the room service
pub mod room;
/// Implementation of event and command transportation over TCP Streams.
/// Requires 'server' or 'client' features to be enabled and will bring in tokio dependency alongside with other dependencies
pub mod transport;
