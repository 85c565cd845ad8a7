use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use crate::ui::constants::DEFAULT_STYLE;

#[derive(Default)]
pub struct CursorState {
    pub position: Position,
}

/// Single-line search input rendered at the bottom of a panel
#[derive(Default)]
pub struct Filter {
    pub enabled: bool,
    pub prefix: Option<String>,
    pub cursor: CursorState,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Close the input and drop the search text
    pub fn reset(&mut self) {
        self.enabled = false;
        self.prefix = None;
    }

    pub fn text(&self) -> &str {
        self.prefix.as_deref().unwrap_or_default()
    }

    /// Apply a key to the input. Returns true when the search text changed.
    /// Control chords are not text and leave the input untouched.
    pub fn update(&mut self, key_event: &KeyEvent) -> bool {
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match key_event.code {
            KeyCode::Enter => {
                self.enabled = false;
                false
            }
            KeyCode::Char(c) => {
                self.prefix.get_or_insert_with(String::new).push(c);
                true
            }
            KeyCode::Backspace => {
                let Some(prefix) = &mut self.prefix else {
                    return false;
                };
                prefix.pop();
                if prefix.is_empty() {
                    self.prefix = None;
                }
                true
            }
            _ => false,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let text = self.text().to_string();
        let block = Block::default()
            .border_type(BorderType::Rounded)
            .borders(Borders::ALL)
            .title("Search")
            .title_bottom(Line::from(Span::styled(
                "Enter to keep, Esc to clear",
                Style::default().fg(Color::DarkGray),
            )))
            .style(DEFAULT_STYLE);

        #[allow(clippy::cast_possible_truncation)]
        let offset = text.chars().count() as u16;
        self.cursor.position = Position::new(
            area.x.saturating_add(1).saturating_add(offset),
            area.y.saturating_add(1),
        );

        Paragraph::new(text).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_builds_prefix() {
        let mut filter = Filter::new();
        filter.toggle();
        assert!(filter.update(&key(KeyCode::Char('k'))));
        assert!(filter.update(&key(KeyCode::Char('a'))));
        assert_eq!(filter.text(), "ka");
        assert!(filter.update(&key(KeyCode::Backspace)));
        assert!(filter.update(&key(KeyCode::Backspace)));
        assert_eq!(filter.prefix, None);
        assert!(!filter.update(&key(KeyCode::Backspace)));
    }

    #[test]
    fn test_enter_closes_but_keeps_text() {
        let mut filter = Filter::new();
        filter.toggle();
        filter.update(&key(KeyCode::Char('x')));
        assert!(!filter.update(&key(KeyCode::Enter)));
        assert!(!filter.is_enabled());
        assert_eq!(filter.text(), "x");
        filter.reset();
        assert_eq!(filter.text(), "");
    }

    #[test]
    fn test_control_chords_are_not_typed() {
        let mut filter = Filter::new();
        filter.toggle();
        filter.update(&key(KeyCode::Char('k')));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!filter.update(&ctrl_c));
        assert_eq!(filter.text(), "k");
    }
}
