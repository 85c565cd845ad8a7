use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::popup_area;

#[derive(Debug, Clone)]
pub struct Command<'a> {
    pub name: &'a str,
    pub key_binding: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Clone)]
pub struct CommandPopUp<'a> {
    pub title: String,
    pub commands: Vec<Command<'a>>,
}

impl<'a> CommandPopUp<'a> {
    pub fn new(title: String, commands: Vec<Command<'a>>) -> Self {
        Self { title, commands }
    }
}

impl Widget for &CommandPopUp<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = popup_area(area, 80, 80);
        let popup = Block::default()
            .border_type(BorderType::Rounded)
            .title(self.title.as_str())
            .title_bottom("Press <Esc> or <q> to close")
            .borders(Borders::ALL);

        Clear.render(popup_area, buf);

        let text = self
            .commands
            .iter()
            .map(|c| {
                Line::from(vec![
                    Span::styled(
                        format!("<{}>: ", c.key_binding),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{} - {}", c.name, c.description),
                        Style::default().dark_gray(),
                    ),
                ])
            })
            .collect::<Text>();

        let command_paragraph = Paragraph::new(text).wrap(Wrap { trim: true }).block(popup);
        command_paragraph.render(popup_area, buf);
    }
}

/// Commands available on every panel
pub struct DefaultCommands(pub Vec<Command<'static>>);

impl DefaultCommands {
    pub fn new() -> Self {
        Self(vec![
            Command {
                name: "Previous",
                key_binding: "k / Up",
                description: "Move to the previous item",
            },
            Command {
                name: "Next",
                key_binding: "j / Down",
                description: "Move to the next item",
            },
            Command {
                name: "Help",
                key_binding: "?",
                description: "Show help",
            },
            Command {
                name: "Quit",
                key_binding: "q / Ctrl-c",
                description: "Quit",
            },
        ])
    }
}
