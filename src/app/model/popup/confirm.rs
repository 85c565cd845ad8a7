use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::integrations::model::common::{Connection, ConnectionId};
use crate::ui::constants::{DEFAULT_STYLE, RED, YELLOW};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Edit,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Confirm,
    Cancel,
}

/// Yes/no prompt about one connection. Open while the page holds `Some(dialog)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmDialog {
    pub kind: DialogKind,
    pub connection_id: ConnectionId,
    pub connection_name: String,
    pub integration_name: String,
}

impl ConfirmDialog {
    pub fn new(kind: DialogKind, connection: &Connection) -> Self {
        Self {
            kind,
            connection_id: connection.id.clone(),
            connection_name: connection.name.clone(),
            integration_name: connection.integration.clone(),
        }
    }

    pub fn title(&self) -> String {
        match self.kind {
            DialogKind::Edit => "Change to Existing Connection".to_string(),
            DialogKind::Delete => format!("Remove \"{}\" Connection?", self.connection_name),
        }
    }

    pub fn question(&self) -> String {
        let verb = match self.kind {
            DialogKind::Edit => "make changes to",
            DialogKind::Delete => "remove",
        };
        format!(
            "Are you sure you want to {verb} {} \"{}\" connection?",
            self.integration_name, self.connection_name
        )
    }

    pub fn warning(&self) -> Option<&'static str> {
        match self.kind {
            DialogKind::Edit => Some("Changes may disrupt functionality and impact data flow."),
            DialogKind::Delete => None,
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self.kind {
            DialogKind::Edit => "Save Changes",
            DialogKind::Delete => "Remove",
        }
    }

    pub fn handle_key(key_event: &KeyEvent) -> Option<DialogAction> {
        match key_event.code {
            KeyCode::Char('y') | KeyCode::Enter => Some(DialogAction::Confirm),
            KeyCode::Char('n' | 'u') | KeyCode::Esc => Some(DialogAction::Cancel),
            _ => None,
        }
    }

    fn accent(&self) -> Color {
        match self.kind {
            DialogKind::Edit => YELLOW,
            DialogKind::Delete => RED,
        }
    }
}

impl Widget for &ConfirmDialog {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let vertical = Layout::vertical([Constraint::Length(11)]).flex(Flex::Center);
        let horizontal = Layout::horizontal([Constraint::Max(64)]).flex(Flex::Center);
        let [popup_area] = vertical.areas(area);
        let [popup_area] = horizontal.areas(popup_area);

        let accent = self.accent();
        let icon = match self.kind {
            DialogKind::Edit => "!",
            DialogKind::Delete => "✕",
        };

        let block = Block::default()
            .border_type(BorderType::Rounded)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(Line::from(vec![
                Span::styled(format!(" {icon} "), Style::default().fg(accent).add_modifier(Modifier::BOLD)),
                Span::styled(self.title(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" "),
            ]))
            .style(DEFAULT_STYLE);

        let mut text = Text::default();
        text.push_line(Line::from(""));
        if let Some(warning) = self.warning() {
            text.push_line(Line::from(Span::styled(
                warning,
                Style::default().add_modifier(Modifier::BOLD),
            )));
            text.push_line(Line::from(""));
        }
        text.push_line(Line::from(Span::styled(
            self.question(),
            Style::default().fg(Color::Gray),
        )));
        text.push_line(Line::from(""));
        text.push_line(Line::from(vec![
            Span::styled("<n> Undo", Style::default().fg(Color::DarkGray)),
            Span::raw("    "),
            Span::styled(
                format!("<y> {}", self.confirm_label()),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
        ]));

        Clear.render(popup_area, buf);
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(popup_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn connection() -> Connection {
        Connection {
            id: ConnectionId::Number(42),
            integration: "Kafka".to_string(),
            name: "Orders stream".to_string(),
            source: "Carbon".to_string(),
            entity: "ABC Group Ltd".to_string(),
            interval: "Hourly".to_string(),
            icon: String::new(),
        }
    }

    #[test]
    fn test_delete_dialog_texts() {
        let dialog = ConfirmDialog::new(DialogKind::Delete, &connection());
        assert_eq!(dialog.title(), "Remove \"Orders stream\" Connection?");
        assert_eq!(
            dialog.question(),
            "Are you sure you want to remove Kafka \"Orders stream\" connection?"
        );
        assert_eq!(dialog.warning(), None);
        assert_eq!(dialog.confirm_label(), "Remove");
    }

    #[test]
    fn test_edit_dialog_texts() {
        let dialog = ConfirmDialog::new(DialogKind::Edit, &connection());
        assert_eq!(dialog.title(), "Change to Existing Connection");
        assert_eq!(
            dialog.question(),
            "Are you sure you want to make changes to Kafka \"Orders stream\" connection?"
        );
        assert!(dialog.warning().is_some());
        assert_eq!(dialog.confirm_label(), "Save Changes");
    }

    #[test]
    fn test_dialog_keys() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(
            ConfirmDialog::handle_key(&key(KeyCode::Char('y'))),
            Some(DialogAction::Confirm)
        );
        assert_eq!(
            ConfirmDialog::handle_key(&key(KeyCode::Enter)),
            Some(DialogAction::Confirm)
        );
        assert_eq!(
            ConfirmDialog::handle_key(&key(KeyCode::Esc)),
            Some(DialogAction::Cancel)
        );
        assert_eq!(
            ConfirmDialog::handle_key(&key(KeyCode::Char('u'))),
            Some(DialogAction::Cancel)
        );
        assert_eq!(ConfirmDialog::handle_key(&key(KeyCode::Char('j'))), None);
    }
}
