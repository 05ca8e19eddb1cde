use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, widgets::*, Frame};

use super::ComponentRender;

/// Single line text editor, the cursor is counted in chars
#[derive(Debug, Default)]
pub struct InputBox {
    text: String,
    cursor: usize,
}

impl InputBox {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Hands the current text out and leaves the box empty
    pub fn take_text(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char(to_insert) => self.insert(to_insert),
            KeyCode::Backspace => self.delete_before_cursor(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_count(),
            _ => {}
        }
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    /// Display width of the text left of the cursor, capped at `max` cells
    fn cursor_offset(&self, max: u16) -> u16 {
        let width = Span::raw(&self.text[..self.byte_index(self.cursor)]).width();

        width.min(usize::from(max)) as u16
    }

    fn insert(&mut self, to_insert: char) {
        let idx = self.byte_index(self.cursor);
        self.text.insert(idx, to_insert);
        self.cursor += 1;
    }

    fn delete_before_cursor(&mut self) {
        if self.cursor == 0 {
            return;
        }

        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.text.remove(idx);
    }
}

pub struct RenderProps<'a> {
    pub title: &'a str,
    pub area: Rect,
    pub border_color: Color,
    pub show_cursor: bool,
}

impl<'a> ComponentRender<RenderProps<'a>> for InputBox {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps<'a>) {
        let input = Paragraph::new(self.text())
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::new().fg(props.border_color))
                    .title(props.title),
            );
        frame.render_widget(input, props.area);

        if props.show_cursor {
            // one cell right of the left border, one line below the top border,
            // and never on the right border
            let offset = self.cursor_offset(props.area.width.saturating_sub(3));
            frame.set_cursor(props.area.x + offset + 1, props.area.y + 1)
        }
    }
}
