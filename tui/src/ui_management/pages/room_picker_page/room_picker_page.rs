use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use super::{
    components::room_selector::{self, RoomSelector},
    section::usage::{usage_to_text, HasUsageInfo},
};
use crate::{
    state_store::{action::Action, State},
    ui_management::components::{Component, ComponentRender},
};

struct Props {
    current_room_id: String,
    /// Topic of the current room, if the room is in the list
    current_room_topic: Option<String>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            current_room_id: state.current_room_id.clone(),
            current_room_topic: state.current_room().map(|room| room.topic.clone()),
        }
    }
}

/// RoomPickerPage shows the current room next to the room selector
pub struct RoomPickerPage {
    /// Action sender
    action_tx: UnboundedSender<Action>,
    /// State Mapped RoomPickerPage Props
    props: Props,
    // Child Components
    room_selector: RoomSelector,
}

impl Component for RoomPickerPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        RoomPickerPage {
            action_tx: action_tx.clone(),
            props: Props::from(state),
            room_selector: RoomSelector::new(state, action_tx),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        RoomPickerPage {
            props: Props::from(state),
            // propogate the update to the child components
            room_selector: self.room_selector.move_with_state(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Room Picker"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // the prompt owns every key while it is open
        if !self.room_selector.is_prompting() {
            match key.code {
                KeyCode::Char('q') => {
                    let _ = self.action_tx.send(Action::Exit);
                    return;
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    let _ = self.action_tx.send(Action::Exit);
                    return;
                }
                _ => (),
            }
        }

        self.room_selector.handle_key_event(key);
    }
}

impl ComponentRender<()> for RoomPickerPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let [container_current_room, container_selector, container_usage] = *Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(3),
                    Constraint::Min(6),
                    Constraint::Length(9),
                ]
                .as_ref(),
            )
            .split(frame.size())
        else {
            panic!("The main layout should have 3 chunks")
        };

        let current_room = match self.props.current_room_topic.as_ref() {
            Some(topic) => Line::from(vec![
                "in ".into(),
                Span::from(topic.clone()).bold(),
                Span::from(format!(" ({})", self.props.current_room_id)).italic(),
            ]),
            None => Line::from(vec![
                "in ".into(),
                Span::from(self.props.current_room_id.clone()).italic(),
            ]),
        };
        let current_room = Paragraph::new(current_room)
            .block(Block::default().borders(Borders::ALL).title("Current Room"));
        frame.render_widget(current_room, container_current_room);

        self.room_selector.render(
            frame,
            room_selector::RenderProps {
                area: container_selector,
            },
        );

        let usage = Paragraph::new(usage_to_text(&self.room_selector.usage_info()))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Usage: {}", self.room_selector.name())),
            );
        frame.render_widget(usage, container_usage);
    }
}

#[cfg(test)]
mod tests {
    use comms::room::Room;
    use ratatui::backend::TestBackend;
    use tokio::sync::mpsc::{self, error::TryRecvError};

    use super::*;
    use crate::room_service::RoomSnapshot;

    fn rendered_text(page: &RoomPickerPage) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|frame| page.render(frame, ())).unwrap();

        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol.as_str())
            .collect()
    }

    #[test]
    fn renders_label_options_and_add_button() {
        let mut state = State::default();
        state.apply_room_snapshot(RoomSnapshot {
            items: vec![Room::new("room-1", "Kitchen"), Room::new("room-2", "Garage")],
        });
        state.change_room("room-1".into());
        let (action_tx, _action_rx) = mpsc::unbounded_channel();

        let text = rendered_text(&RoomPickerPage::new(&state, action_tx));

        assert!(text.contains("Select a room"));
        assert!(text.contains("Default Room"));
        assert!(text.contains("(•) Kitchen"));
        assert!(text.contains("( ) Garage"));
        assert!(text.contains("[+ add]"));
        assert!(text.contains("in Kitchen (room-1)"));
    }

    #[test]
    fn unknown_current_room_marks_no_option() {
        let mut state = State::default();
        state.change_room("room-9".into());
        let (action_tx, _action_rx) = mpsc::unbounded_channel();

        let text = rendered_text(&RoomPickerPage::new(&state, action_tx));

        assert!(text.contains("( ) Default Room"));
        assert!(!text.contains("(•)"));
        assert!(text.contains("in room-9"));
    }

    #[test]
    fn q_exits_outside_the_prompt_only() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let mut page = RoomPickerPage::new(&State::default(), action_tx);

        page.handle_key_event(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        page.handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(action_rx.try_recv(), Err(TryRecvError::Empty));

        page.handle_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        page.handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(action_rx.try_recv(), Ok(Action::Exit));
    }
}
