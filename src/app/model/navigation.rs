use crossterm::event::KeyCode;
use log::debug;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Row, StatefulWidget, Table, Widget};

use crate::app::events::custom::LinkrsEvent;
use crate::app::worker::WorkerMessage;
use crate::ui::constants::{DEFAULT_STYLE, PRIMARY, SELECTED_STYLE};

use super::popup::commands_help::CommandPopUp;
use super::popup::navigation::commands::create_navigation_command_popup;
use super::{handle_command_popup_events, handle_table_scroll_keys, Model, StatefulTable};

/// Organisation shown in the panel title
const ORGANISATION: &str = "ABC Group Ltd";

const SETTINGS_MENU: &[(&str, &[&str])] = &[
    ("Organisation", &["Manage", "Users", "Tags", "Integrations"]),
    ("Utilities", &["Configuration", "Hierarchy", "Assets"]),
    (
        "Carbon",
        &[
            "Configuration",
            "Hierarchy",
            "Inventory Items",
            "Emission Factors",
            "Snapshots",
        ],
    ),
    ("Displays", &["Manage"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Integrations,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub section: &'static str,
    pub label: &'static str,
    pub page: Page,
}

impl MenuEntry {
    pub fn title(&self) -> String {
        format!("{} / {}", self.section, self.label)
    }
}

fn settings_menu() -> Vec<MenuEntry> {
    SETTINGS_MENU
        .iter()
        .flat_map(|&(section, labels)| {
            labels.iter().map(move |&label| MenuEntry {
                section,
                label,
                page: if label == "Integrations" {
                    Page::Integrations
                } else {
                    Page::Maintenance
                },
            })
        })
        .collect()
}

pub struct NavigationModel {
    pub menu: StatefulTable<MenuEntry>,
    /// Index of the page currently open
    pub open: usize,
    pub commands: Option<CommandPopUp<'static>>,
}

impl NavigationModel {
    pub fn new() -> Self {
        let mut menu = StatefulTable::new(settings_menu());
        let open = menu
            .items
            .iter()
            .position(|entry| entry.page == Page::Integrations)
            .unwrap_or_default();
        menu.state.select(Some(open));
        NavigationModel {
            menu,
            open,
            commands: None,
        }
    }

    pub fn selected(&self) -> Option<&MenuEntry> {
        self.menu.state.selected().and_then(|idx| self.menu.items.get(idx))
    }

    /// Page behind the entry that is currently open
    pub fn open_page(&self) -> Page {
        self.menu
            .items
            .get(self.open)
            .map_or(Page::Integrations, |entry| entry.page)
    }

    /// Mark the selected entry as the open page and return it
    pub fn open_selected(&mut self) -> Option<MenuEntry> {
        let idx = self.menu.state.selected()?;
        let entry = self.menu.items.get(idx)?.clone();
        debug!("Opening settings page {}", entry.title());
        self.open = idx;
        Some(entry)
    }
}

impl Default for NavigationModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for NavigationModel {
    fn update(&mut self, event: &LinkrsEvent) -> (Option<LinkrsEvent>, Vec<WorkerMessage>) {
        match event {
            LinkrsEvent::Tick => (Some(LinkrsEvent::Tick), vec![]),
            LinkrsEvent::Key(key_event) => {
                if self.commands.is_some() {
                    return handle_command_popup_events(&mut self.commands, key_event);
                }
                if handle_table_scroll_keys(&mut self.menu, key_event) {
                    return (None, vec![]);
                }
                if key_event.code == KeyCode::Char('?') {
                    self.commands = Some(create_navigation_command_popup());
                    return (None, vec![]);
                }
                (Some(event.clone()), vec![])
            }
            LinkrsEvent::Mouse => (Some(event.clone()), vec![]),
        }
    }
}

impl Widget for &mut NavigationModel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let section_style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD);

        let rows = self.menu.items.iter().enumerate().map(|(idx, entry)| {
            let first_in_section =
                idx == 0 || self.menu.items[idx - 1].section != entry.section;
            let section = if first_in_section {
                Span::styled(entry.section.to_uppercase(), section_style)
            } else {
                Span::raw("")
            };
            let label = if idx == self.open {
                Span::styled(
                    format!("● {}", entry.label),
                    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(format!("  {}", entry.label))
            };
            Row::new(vec![Line::from(section), Line::from(label)]).style(DEFAULT_STYLE)
        });

        let t = Table::new(rows, &[Constraint::Length(14), Constraint::Fill(1)])
            .block(
                Block::default()
                    .border_type(BorderType::Rounded)
                    .borders(Borders::ALL)
                    .title(format!(" Settings - {ORGANISATION} "))
                    .title_bottom(Line::from(Span::styled(
                        "Press <Enter> to open, <?> for commands",
                        Style::default().fg(Color::DarkGray),
                    ))),
            )
            .style(DEFAULT_STYLE)
            .row_highlight_style(SELECTED_STYLE);
        StatefulWidget::render(t, area, buf, &mut self.menu.state);

        if let Some(commands) = &self.commands {
            commands.render(area, buf);
        }
    }
}
