pub use self::state::State;
#[cfg(test)]
pub use self::state::{default_room, DEFAULT_ROOM_ID};
pub use self::state_store::StateStore;

pub mod action;
mod room_creation;
mod state;
#[allow(clippy::module_inception)]
mod state_store;
