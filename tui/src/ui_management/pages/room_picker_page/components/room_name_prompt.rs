use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, widgets::Clear, Frame};

use crate::ui_management::{
    components::{
        input_box::{self, InputBox},
        ComponentRender,
    },
    pages::room_picker_page::section::usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
};

/// How a key press left the prompt
#[derive(Debug, Clone, PartialEq)]
pub enum PromptOutcome {
    /// Still waiting for the user
    Pending,
    Cancelled,
    /// Enter was pressed, the name may be empty
    Submitted(String),
}

/// Modal prompt asking for the name of a new room
#[derive(Debug, Default)]
pub struct RoomNamePrompt {
    input_box: InputBox,
}

impl RoomNamePrompt {
    pub fn handle_key_event(&mut self, key: KeyEvent) -> PromptOutcome {
        if key.kind != KeyEventKind::Press {
            return PromptOutcome::Pending;
        }

        match key.code {
            KeyCode::Esc => PromptOutcome::Cancelled,
            KeyCode::Enter => PromptOutcome::Submitted(self.input_box.take_text()),
            _ => {
                self.input_box.handle_key_event(key);

                PromptOutcome::Pending
            }
        }
    }
}

const PROMPT_WIDTH: u16 = 40;
const PROMPT_HEIGHT: u16 = 3;

/// A rect of at most `width` x `height` centered in `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub struct RenderProps {
    /// Area the prompt is centered over
    pub area: Rect,
}

impl ComponentRender<RenderProps> for RoomNamePrompt {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps) {
        let popup = centered_rect(PROMPT_WIDTH, PROMPT_HEIGHT, props.area);

        frame.render_widget(Clear, popup);
        self.input_box.render(
            frame,
            input_box::RenderProps {
                title: "Room name",
                area: popup,
                border_color: Color::Yellow,
                show_cursor: true,
            },
        );
    }
}

impl HasUsageInfo for RoomNamePrompt {
    fn usage_info(&self) -> UsageInfo {
        UsageInfo {
            description: Some("Name the new room"),
            lines: vec![
                UsageInfoLine::new(&["Esc"], "to cancel"),
                UsageInfoLine::new(&["Enter"], "to create the room"),
            ],
        }
    }
}
