use anyhow::Context;
use tokio::sync::{
    broadcast,
    mpsc::{self, UnboundedReceiver, UnboundedSender},
};
use tracing::{debug, info};

use crate::{room_service::RoomService, Interrupted, Terminator};

use super::{action::Action, room_creation::create_room, State};

pub struct StateStore {
    state_tx: UnboundedSender<State>,
}

impl StateStore {
    pub fn new() -> (Self, UnboundedReceiver<State>) {
        let (state_tx, state_rx) = mpsc::unbounded_channel::<State>();

        (StateStore { state_tx }, state_rx)
    }
}

impl StateStore {
    /// Owns the room list and the current room for as long as the picker is mounted.
    ///
    /// The live query is opened once when the loop starts and released when it ends,
    /// whichever way it ends.
    pub async fn main_loop<S>(
        self,
        mut terminator: Terminator,
        service: S,
        mut action_rx: UnboundedReceiver<Action>,
        mut interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted>
    where
        S: RoomService,
    {
        let mut state = State::default();

        // the initial state once
        self.state_tx.send(state.clone())?;

        let mut subscription = service
            .observe_query()
            .await
            .context("could not observe the room list")?;
        info!("room live query opened");

        let result = loop {
            tokio::select! {
                // Replace the room list with every snapshot, in delivery order
                Some(snapshot) = subscription.next() => {
                    state.apply_room_snapshot(snapshot);
                },
                // Handle the actions coming from the UI
                // and process them to do async operations
                maybe_action = action_rx.recv() => match maybe_action {
                    Some(Action::ChangeRoom { room_id }) => {
                        state.change_room(room_id);
                    },
                    Some(Action::CreateRoom { topic }) => {
                        debug!(%topic, "creating room");

                        if let Some(room_id) = create_room(&service, &topic).await {
                            state.change_room(room_id);
                        }
                    },
                    Some(Action::Exit) => {
                        let _ = terminator.terminate(Interrupted::UserInt);

                        break Interrupted::UserInt;
                    },
                    // the ui is gone, nothing can change the state anymore
                    None => break Interrupted::UserInt,
                },
                // Catch and handle interrupt signal to gracefully shutdown
                Ok(interrupted) = interrupt_rx.recv() => {
                    break interrupted;
                },
            }

            self.state_tx.send(state.clone())?;
        };

        subscription.unsubscribe();
        info!("room live query released");

        Ok(result)
    }
}
