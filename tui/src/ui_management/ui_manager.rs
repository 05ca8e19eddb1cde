use std::{
    io::{self, Stdout},
    ops::{Deref, DerefMut},
    time::Duration,
};

use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::{
    broadcast,
    mpsc::{self, UnboundedReceiver},
};
use tokio_stream::StreamExt;
use tracing::debug;

use crate::{
    state_store::{action::Action, State},
    ui_management::components::{Component, ComponentRender},
    Interrupted,
};

use super::pages::RoomPickerPage;

const RENDERING_TICK_RATE: Duration = Duration::from_millis(250);

pub struct UiManager {
    action_tx: mpsc::UnboundedSender<Action>,
}

impl UiManager {
    pub fn new() -> (Self, UnboundedReceiver<Action>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        (Self { action_tx }, action_rx)
    }

    pub async fn main_loop(
        self,
        mut state_rx: UnboundedReceiver<State>,
        mut interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted> {
        // consume the first state to mount the page
        let mut room_picker_page = {
            let state = state_rx
                .recv()
                .await
                .context("state store closed before sending the initial state")?;

            RoomPickerPage::new(&state, self.action_tx.clone())
        };

        let mut terminal = TerminalGuard::new()?;
        let mut ticker = tokio::time::interval(RENDERING_TICK_RATE);
        let mut crossterm_events = EventStream::new();

        let result: anyhow::Result<Interrupted> = loop {
            tokio::select! {
                // Tick to terminate the select every N milliseconds
                _ = ticker.tick() => (),
                // Catch and handle crossterm events
                maybe_event = crossterm_events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        room_picker_page.handle_key_event(key);
                    },
                    None => break Ok(Interrupted::UserInt),
                    _ => (),
                },
                // Handle state updates
                Some(state) = state_rx.recv() => {
                    room_picker_page = room_picker_page.move_with_state(&state);
                },
                // Catch and handle interrupt signal to gracefully shutdown
                Ok(interrupted) = interrupt_rx.recv() => {
                    break Ok(interrupted);
                }
            }

            if let Err(err) = terminal
                .draw(|frame| room_picker_page.render(frame, ()))
                .context("could not render to the terminal")
            {
                break Err(err);
            }
        };

        drop(terminal);

        result
    }
}

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Owns the terminal while the UI runs and hands it back to the shell when dropped,
/// including when the loop bails out early
struct TerminalGuard {
    terminal: CrosstermTerminal,
}

impl TerminalGuard {
    fn new() -> anyhow::Result<Self> {
        let mut stdout = io::stdout();

        enable_raw_mode().context("could not enable raw mode")?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        Ok(TerminalGuard {
            terminal: Terminal::new(CrosstermBackend::new(stdout))?,
        })
    }
}

impl Deref for TerminalGuard {
    type Target = CrosstermTerminal;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();

        debug!("terminal restored");
    }
}
