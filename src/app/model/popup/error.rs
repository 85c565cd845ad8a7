use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::popup_area;

/// Floating list of errors, dismissed with Esc or q
#[derive(Debug, Clone, Default)]
pub struct ErrorPopup {
    pub errors: Vec<String>,
}

impl ErrorPopup {
    pub fn from_strings(errors: Vec<String>) -> Self {
        Self { errors }
    }

    /// Add an error to an existing popup, or open a new one
    pub fn push(popup: &mut Option<ErrorPopup>, error: String) {
        popup.get_or_insert_with(ErrorPopup::default).errors.push(error);
    }
}

impl Widget for &ErrorPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.errors.is_empty() {
            return;
        }

        let popup_area = popup_area(area, 80, 50);
        let popup = Block::default()
            .border_type(BorderType::Rounded)
            .title("Errors - Press <Esc> or <q> to close")
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));

        Clear.render(popup_area, buf);

        let mut text = Text::default();
        for (idx, error) in self.errors.iter().enumerate() {
            text.push_line(Line::from(vec![Span::styled(
                format!("Error {}: ", idx + 1),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]));

            for line in error.lines() {
                text.push_line(Line::from(Span::styled(
                    line,
                    Style::default().fg(Color::White),
                )));
            }

            if idx < self.errors.len() - 1 {
                text.push_line(Line::from(""));
            }
        }

        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(popup)
            .render(popup_area, buf);
    }
}
