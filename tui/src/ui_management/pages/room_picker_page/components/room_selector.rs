use comms::room::Room;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use super::room_name_prompt::{self, PromptOutcome, RoomNamePrompt};
use crate::{
    state_store::{action::Action, State},
    ui_management::{
        components::{Component, ComponentRender},
        pages::room_picker_page::section::usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
    },
};

struct Props {
    /// Default room followed by the rooms of the live query
    rooms: Vec<Room>,
    /// The room the parent considers current
    current_room_id: String,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Self {
            rooms: state.rooms.clone(),
            current_room_id: state.current_room_id.clone(),
        }
    }
}

impl Props {
    fn current_room_idx(&self) -> Option<usize> {
        self.rooms
            .iter()
            .position(|room| room.id == self.current_room_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Focus {
    Options,
    AddButton,
}

/// Choice control over the room list with an `[+ add]` action.
///
/// Never changes the current room itself: picks and creations are sent as [Action]s
/// and come back through the state.
pub struct RoomSelector {
    /// Sending actions to the state store
    action_tx: UnboundedSender<Action>,
    /// State Mapped RoomSelector Props
    props: Props,
    // Internal Component State
    /// Highlighted option, always within the room list
    list_state: ListState,
    focus: Focus,
    /// Open while the user is naming a new room
    prompt: Option<RoomNamePrompt>,
}

impl RoomSelector {
    pub fn is_prompting(&self) -> bool {
        self.prompt.is_some()
    }

    fn highlighted(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    fn next(&mut self) {
        let i = (self.highlighted() + 1) % self.props.rooms.len();

        self.list_state.select(Some(i));
    }

    fn previous(&mut self) {
        let i = match self.highlighted() {
            0 => self.props.rooms.len() - 1,
            i => i - 1,
        };

        self.list_state.select(Some(i));
    }

    fn pick_highlighted(&mut self) {
        let Some(room) = self.props.rooms.get(self.highlighted()) else {
            return;
        };

        // like a native select, picking the current value is not a change
        if room.id == self.props.current_room_id {
            return;
        }

        let _ = self.action_tx.send(Action::ChangeRoom {
            room_id: room.id.clone(),
        });
    }

    fn open_prompt(&mut self) {
        self.prompt = Some(RoomNamePrompt::default());
    }

    fn submit_room_name(&mut self, name: String) {
        if name.is_empty() {
            return;
        }

        let _ = self.action_tx.send(Action::CreateRoom { topic: name });
    }
}

impl Component for RoomSelector {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self {
        let mut room_selector = Self {
            action_tx,
            props: Props::from(state),
            //
            list_state: ListState::default(),
            focus: Focus::Options,
            prompt: None,
        };

        let idx = room_selector.props.current_room_idx().unwrap_or(0);
        room_selector.list_state.select(Some(idx));

        room_selector
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        let props = Props::from(state);
        let mut list_state = self.list_state;

        // a new current room takes the highlight with it
        let moved_to = (props.current_room_id != self.props.current_room_id)
            .then(|| props.current_room_idx())
            .flatten();

        // otherwise keep it, the list may have shrunk but is never empty
        let last_idx = props.rooms.len().saturating_sub(1);
        let idx = moved_to.unwrap_or_else(|| list_state.selected().unwrap_or(0).min(last_idx));
        list_state.select(Some(idx));

        Self {
            props,
            list_state,
            ..self
        }
    }

    fn name(&self) -> &str {
        "Room Selector"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if let Some(prompt) = self.prompt.as_mut() {
            match prompt.handle_key_event(key) {
                PromptOutcome::Pending => (),
                PromptOutcome::Cancelled => self.prompt = None,
                PromptOutcome::Submitted(name) => {
                    self.prompt = None;
                    self.submit_room_name(name);
                }
            }

            return;
        }

        match key.code {
            KeyCode::Up => {
                self.focus = Focus::Options;
                self.previous();
            }
            KeyCode::Down => {
                self.focus = Focus::Options;
                self.next();
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Options => Focus::AddButton,
                    Focus::AddButton => Focus::Options,
                };
            }
            KeyCode::Char('a') => self.open_prompt(),
            KeyCode::Enter => match self.focus {
                Focus::Options => self.pick_highlighted(),
                Focus::AddButton => self.open_prompt(),
            },
            _ => (),
        }
    }
}

pub struct RenderProps {
    pub area: Rect,
}

const FOCUSED_COLOR: Color = Color::Yellow;

impl ComponentRender<RenderProps> for RoomSelector {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps) {
        let [container_options, container_add_button] = *Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
            .split(props.area)
        else {
            panic!("The room selector layout should have 2 chunks")
        };

        let options: Vec<ListItem> = self
            .props
            .rooms
            .iter()
            .map(|room| {
                let is_current = room.id == self.props.current_room_id;
                let marker = if is_current { "(•) " } else { "( ) " };
                let style = if is_current {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                ListItem::new(Line::from(vec![
                    Span::raw(marker),
                    Span::raw(room.topic.clone()),
                ]))
                .style(style)
            })
            .collect();

        let options_focused = self.prompt.is_none() && self.focus == Focus::Options;
        let options = List::new(options)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::new().fg(if options_focused {
                        FOCUSED_COLOR
                    } else {
                        Color::Reset
                    }))
                    .title("Select a room"),
            )
            .highlight_style(if options_focused {
                Style::default()
                    // yellow that would work for both dark / light modes
                    .bg(Color::Rgb(255, 223, 102))
                    .fg(Color::Black)
            } else {
                Style::default()
            })
            .highlight_symbol(">");

        let mut list_state = self.list_state.clone();
        frame.render_stateful_widget(options, container_options, &mut list_state);

        let add_button_focused = self.prompt.is_none() && self.focus == Focus::AddButton;
        let add_button = Paragraph::new(Line::from("[+ add]"))
            .alignment(Alignment::Center)
            .style(if add_button_focused {
                Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else {
                Style::default()
            })
            .block(Block::default().borders(Borders::ALL).border_style(
                Style::new().fg(if add_button_focused {
                    FOCUSED_COLOR
                } else {
                    Color::Reset
                }),
            ));
        frame.render_widget(add_button, container_add_button);

        if let Some(prompt) = self.prompt.as_ref() {
            prompt.render(frame, room_name_prompt::RenderProps { area: props.area });
        }
    }
}

impl HasUsageInfo for RoomSelector {
    fn usage_info(&self) -> UsageInfo {
        if let Some(prompt) = self.prompt.as_ref() {
            return prompt.usage_info();
        }

        UsageInfo {
            description: Some("Pick the room to be in"),
            lines: vec![
                UsageInfoLine::new(&["↑", "↓"], "to navigate"),
                UsageInfoLine::new(
                    &["Enter"],
                    match self.focus {
                        Focus::Options => "to pick the room",
                        Focus::AddButton => "to add a room",
                    },
                ),
                UsageInfoLine::new(&["Tab"], "to switch between rooms and [+ add]"),
                UsageInfoLine::new(&["a"], "to add a room"),
                UsageInfoLine::new(&["q"], "to exit"),
            ],
        }
    }
}
