use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use crate::app::events::custom::LinkrsEvent;
use crate::app::worker::WorkerMessage;
use crate::ui::constants::DEFAULT_STYLE;

use super::Model;

pub const MAINTENANCE_TITLE: &str = "Under Maintenance";
pub const MAINTENANCE_MESSAGE: &str = "This page is currently being updated.";

/// Placeholder for settings pages that are not available yet
#[derive(Default)]
pub struct MaintenanceModel {
    pub page_title: String,
}

impl MaintenanceModel {
    pub fn open(&mut self, page_title: String) {
        self.page_title = page_title;
    }
}

impl Model for MaintenanceModel {
    fn update(&mut self, event: &LinkrsEvent) -> (Option<LinkrsEvent>, Vec<WorkerMessage>) {
        (Some(event.clone()), vec![])
    }
}

impl Widget for &mut MaintenanceModel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .border_type(BorderType::Rounded)
            .borders(Borders::ALL)
            .title(format!(" {} ", self.page_title))
            .title_bottom(Line::from(Span::styled(
                "Press <Esc> to go back",
                Style::default().fg(Color::DarkGray),
            )))
            .style(DEFAULT_STYLE);
        let inner = block.inner(area);
        block.render(area, buf);

        let [center] = Layout::vertical([Constraint::Length(5)])
            .flex(Flex::Center)
            .areas(inner);
        let text = Text::from(vec![
            Line::from(Span::styled("⚒", Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(Span::styled(
                MAINTENANCE_TITLE,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                MAINTENANCE_MESSAGE,
                Style::default().fg(Color::Gray),
            )),
        ]);
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .render(center, buf);
    }
}
