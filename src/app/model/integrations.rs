use std::collections::HashSet;
use std::num::NonZeroUsize;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use log::{debug, error, info};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, BorderType, Borders, Paragraph, Row, StatefulWidget, Table, TableState, Widget, Wrap,
};

use crate::app::events::custom::LinkrsEvent;
use crate::app::worker::WorkerMessage;
use crate::integrations::model::common::{Connection, ConnectionId, IntegrationService};
use crate::ui::common::{hash_to_color, highlight_search_text, icon_badge};
use crate::ui::constants::{
    ALTERNATING_ROW_COLOR, DEFAULT_STYLE, HEADER_STYLE, PENDING_COLOR, PRIMARY, RED,
    SELECTED_STYLE,
};

use super::popup::commands_help::CommandPopUp;
use super::popup::confirm::{ConfirmDialog, DialogAction, DialogKind};
use super::popup::error::ErrorPopup;
use super::popup::integrations::commands::create_integrations_command_popup;
use super::query::{render_headers, run_query, QueryPage, QueryState, SortKey};
use super::{filter::Filter, handle_command_popup_events, scroll_table_state, Model, HALF_PAGE_SIZE};

const SERVICE_COLUMNS: usize = 3;
const SERVICE_CARD_HEIGHT: u16 = 6;

/// Result slot of one independent fetch
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Pending,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(e) => LoadState::Failed(format!("{e:#}")),
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }
}

/// The Integrations settings page: service cards on top, the connections table below.
pub struct IntegrationsModel {
    pub services: LoadState<Vec<IntegrationService>>,
    pub connections: LoadState<Vec<Connection>>,
    pub query: QueryState,
    pub filter: Filter,
    pub table: TableState,
    pub dialog: Option<ConfirmDialog>,
    /// Connections with a delete request in flight
    pub pending_deletes: HashSet<ConnectionId>,
    pub commands: Option<CommandPopUp<'static>>,
    pub error_popup: Option<ErrorPopup>,
}

impl IntegrationsModel {
    pub fn new(page_size: NonZeroUsize) -> Self {
        IntegrationsModel {
            services: LoadState::Pending,
            connections: LoadState::Pending,
            query: QueryState::new(page_size),
            filter: Filter::new(),
            table: TableState::default(),
            dialog: None,
            pending_deletes: HashSet::new(),
            commands: None,
            error_popup: None,
        }
    }

    /// Fresh mount of the page: interactive state is dropped and both lists are refetched.
    pub fn activate(&mut self) -> Vec<WorkerMessage> {
        info!("Activating integrations page");
        self.query = QueryState::new(self.query.page_size());
        self.filter.reset();
        self.dialog = None;
        self.commands = None;
        self.table.select(None);
        self.refresh()
    }

    /// Reissue both fetches, keeping search, sort and page
    pub fn refresh(&mut self) -> Vec<WorkerMessage> {
        self.services = LoadState::Pending;
        self.connections = LoadState::Pending;
        vec![WorkerMessage::LoadPage]
    }

    /// First failed slot; any failure takes over the whole page
    pub fn page_error(&self) -> Option<&str> {
        self.services.error().or_else(|| self.connections.error())
    }

    pub fn query_page(&self) -> Option<QueryPage<'_>> {
        self.connections
            .loaded()
            .map(|list| run_query(list, &self.query))
    }

    fn total_pages(&self) -> usize {
        self.query_page().map_or(1, |page| page.total_pages)
    }

    fn visible_len(&self) -> usize {
        self.query_page().map_or(0, |page| page.items.len())
    }

    pub fn selected_connection(&self) -> Option<Connection> {
        let page = self.query_page()?;
        let idx = self.table.selected()?;
        page.items.get(idx).map(|conn| (*conn).clone())
    }

    fn reset_selection(&mut self) {
        let selection = (self.visible_len() > 0).then_some(0);
        self.table.select(selection);
    }

    pub fn services_loaded(&mut self, result: Result<Vec<IntegrationService>>) {
        if let Err(e) = &result {
            error!("Failed to fetch integration services: {e:#}");
        }
        self.services = LoadState::from_result(result);
    }

    pub fn connections_loaded(&mut self, result: Result<Vec<Connection>>) {
        if let Err(e) = &result {
            error!("Failed to fetch connections: {e:#}");
        }
        self.connections = LoadState::from_result(result);
        self.query.clamp_page(self.total_pages());
        self.reset_selection();
    }

    pub fn on_search_change(&mut self, text: &str) {
        self.query.set_search_term(text);
        self.reset_selection();
    }

    pub fn on_sort_click(&mut self, key: SortKey) {
        self.query.toggle_sort(key);
        debug!("Sorting connections by {:?}", self.query.sort);
    }

    pub fn on_page_click(&mut self, page: usize) {
        self.query.set_page(page, self.total_pages());
        self.reset_selection();
    }

    pub fn on_edit_click(&mut self, connection: &Connection) {
        self.dialog = Some(ConfirmDialog::new(DialogKind::Edit, connection));
    }

    pub fn on_delete_click(&mut self, connection: &Connection) {
        if self.pending_deletes.contains(&connection.id) {
            debug!("Delete already in flight for connection {}", connection.id);
            return;
        }
        self.dialog = Some(ConfirmDialog::new(DialogKind::Delete, connection));
    }

    /// Close the delete dialog and request the delete, unless one is already in flight.
    pub fn on_confirm_delete(&mut self) -> Vec<WorkerMessage> {
        let Some(dialog) = self.dialog.take() else {
            return vec![];
        };
        if dialog.kind != DialogKind::Delete {
            return vec![];
        }
        if !self.pending_deletes.insert(dialog.connection_id.clone()) {
            debug!(
                "Ignoring duplicate delete for connection {}",
                dialog.connection_id
            );
            return vec![];
        }
        info!(
            "Removing {} connection \"{}\" ({})",
            dialog.integration_name, dialog.connection_name, dialog.connection_id
        );
        vec![WorkerMessage::DeleteConnection {
            id: dialog.connection_id,
        }]
    }

    /// Editing has no backend yet: confirming only closes the dialog.
    pub fn on_confirm_edit(&mut self) {
        if let Some(dialog) = self.dialog.take() {
            debug!("Edit confirmed for connection {}", dialog.connection_id);
        }
    }

    pub fn on_cancel_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn delete_succeeded(&mut self, id: &ConnectionId) {
        self.pending_deletes.remove(id);
        if let LoadState::Loaded(list) = &mut self.connections {
            list.retain(|conn| &conn.id != id);
        }
        self.query.clamp_page(self.total_pages());
        let len = self.visible_len();
        match self.table.selected() {
            Some(_) if len == 0 => self.table.select(None),
            Some(idx) if idx >= len => self.table.select(Some(len - 1)),
            _ => {}
        }
    }

    pub fn delete_failed(&mut self, id: &ConnectionId, message: String) {
        self.pending_deletes.remove(id);
        ErrorPopup::push(
            &mut self.error_popup,
            format!("Failed to remove connection {id}: {message}"),
        );
    }

    fn handle_dialog_key(&mut self, dialog_kind: DialogKind, action: DialogAction) -> Vec<WorkerMessage> {
        match (action, dialog_kind) {
            (DialogAction::Confirm, DialogKind::Delete) => self.on_confirm_delete(),
            (DialogAction::Confirm, DialogKind::Edit) => {
                self.on_confirm_edit();
                vec![]
            }
            (DialogAction::Cancel, _) => {
                self.on_cancel_dialog();
                vec![]
            }
        }
    }
}

impl Model for IntegrationsModel {
    fn update(&mut self, event: &LinkrsEvent) -> (Option<LinkrsEvent>, Vec<WorkerMessage>) {
        match event {
            LinkrsEvent::Tick => (Some(LinkrsEvent::Tick), vec![]),
            LinkrsEvent::Key(key_event) => {
                if let Some(dialog) = &self.dialog {
                    let kind = dialog.kind;
                    let messages = ConfirmDialog::handle_key(key_event)
                        .map(|action| self.handle_dialog_key(kind, action))
                        .unwrap_or_default();
                    return (None, messages);
                }

                if self.filter.is_enabled() {
                    // Ctrl-c still quits while typing
                    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
                        return (Some(event.clone()), vec![]);
                    }
                    if key_event.code == KeyCode::Esc {
                        self.filter.reset();
                        self.on_search_change("");
                    } else if self.filter.update(key_event) {
                        let text = self.filter.text().to_string();
                        self.on_search_change(&text);
                    }
                    return (None, vec![]);
                }

                if self.error_popup.is_some() {
                    if let KeyCode::Char('q') | KeyCode::Esc = key_event.code {
                        self.error_popup = None;
                    }
                    return (None, vec![]);
                }

                if self.commands.is_some() {
                    return handle_command_popup_events(&mut self.commands, key_event);
                }

                if self.page_error().is_some() {
                    return match key_event.code {
                        KeyCode::Char('r') => (None, self.refresh()),
                        KeyCode::Char('?') => {
                            self.commands = Some(create_integrations_command_popup());
                            (None, vec![])
                        }
                        _ => (Some(event.clone()), vec![]),
                    };
                }

                // Esc first drops an applied search, then leaves the page
                if key_event.code == KeyCode::Esc && self.filter.prefix.is_some() {
                    self.filter.reset();
                    self.on_search_change("");
                    return (None, vec![]);
                }

                let len = self.visible_len();
                if key_event.modifiers == KeyModifiers::CONTROL {
                    match key_event.code {
                        #[allow(clippy::cast_possible_wrap)]
                        KeyCode::Char('d') => {
                            scroll_table_state(&mut self.table, len, HALF_PAGE_SIZE as isize);
                            return (None, vec![]);
                        }
                        #[allow(clippy::cast_possible_wrap)]
                        KeyCode::Char('u') => {
                            scroll_table_state(&mut self.table, len, -(HALF_PAGE_SIZE as isize));
                            return (None, vec![]);
                        }
                        _ => return (Some(event.clone()), vec![]),
                    }
                }

                match key_event.code {
                    KeyCode::Down | KeyCode::Char('j') => {
                        scroll_table_state(&mut self.table, len, 1);
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        scroll_table_state(&mut self.table, len, -1);
                    }
                    KeyCode::Char(']') | KeyCode::PageDown => {
                        self.on_page_click(self.query.current_page() + 1);
                    }
                    KeyCode::Char('[') | KeyCode::PageUp => {
                        self.on_page_click(self.query.current_page().saturating_sub(1));
                    }
                    KeyCode::Char(c @ '1'..='9') => {
                        let page = c.to_digit(10).unwrap_or(1) as usize;
                        self.on_page_click(page);
                    }
                    KeyCode::Char('/') => {
                        self.filter.toggle();
                    }
                    KeyCode::Char('c') => {
                        if let Some(connection) = self.selected_connection() {
                            self.on_edit_click(&connection);
                        }
                    }
                    KeyCode::Char('x') | KeyCode::Delete => {
                        if let Some(connection) = self.selected_connection() {
                            self.on_delete_click(&connection);
                        }
                    }
                    KeyCode::Char('r') => {
                        return (None, self.refresh());
                    }
                    KeyCode::Char('?') => {
                        self.commands = Some(create_integrations_command_popup());
                    }
                    KeyCode::Char(c) if SortKey::from_hotkey(c).is_some() => {
                        if let Some(key) = SortKey::from_hotkey(c) {
                            self.on_sort_click(key);
                        }
                    }
                    _ => return (Some(event.clone()), vec![]),
                }
                (None, vec![])
            }
            LinkrsEvent::Mouse => (Some(event.clone()), vec![]),
        }
    }
}

impl IntegrationsModel {
    fn services_height(&self, available: u16) -> u16 {
        let wanted = match &self.services {
            LoadState::Loaded(services) if !services.is_empty() => {
                let rows = services.len().div_ceil(SERVICE_COLUMNS);
                let rows = u16::try_from(rows).unwrap_or(u16::MAX);
                rows.saturating_mul(SERVICE_CARD_HEIGHT).saturating_add(3)
            }
            _ => 4,
        };
        wanted.min(available / 2)
    }

    fn render_services(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .border_type(BorderType::Rounded)
            .borders(Borders::ALL)
            .title(Line::from(Span::styled(
                " Choose a Service to Connect ",
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .style(DEFAULT_STYLE);
        let inner = block.inner(area);
        block.render(area, buf);

        let [subtitle_area, grid_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
        Paragraph::new(Span::styled(
            "Connect linkrs to other tools you use.",
            Style::default().fg(Color::DarkGray),
        ))
        .render(subtitle_area, buf);

        let services = match &self.services {
            LoadState::Pending => {
                Paragraph::new("Loading services...").render(grid_area, buf);
                return;
            }
            LoadState::Failed(_) => return,
            LoadState::Loaded(services) if services.is_empty() => {
                Paragraph::new("No integration services available.").render(grid_area, buf);
                return;
            }
            LoadState::Loaded(services) => services,
        };

        let row_count = services.len().div_ceil(SERVICE_COLUMNS);
        let rows = Layout::vertical(vec![Constraint::Length(SERVICE_CARD_HEIGHT); row_count])
            .split(grid_area);
        #[allow(clippy::cast_possible_truncation)]
        let columns = vec![Constraint::Ratio(1, SERVICE_COLUMNS as u32); SERVICE_COLUMNS];
        for (chunk, row_area) in services.chunks(SERVICE_COLUMNS).zip(rows.iter()) {
            let cards = Layout::horizontal(columns.clone()).split(*row_area);
            for (service, card_area) in chunk.iter().zip(cards.iter()) {
                render_service_card(service, *card_area, buf);
            }
        }
    }

    fn render_connections(&mut self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .border_type(BorderType::Rounded)
            .borders(Borders::ALL)
            .style(DEFAULT_STYLE);

        let Some(list) = self.connections.loaded() else {
            Paragraph::new("Loading connections...")
                .block(block.title(" Connections "))
                .render(area, buf);
            return;
        };

        let page = run_query(list, &self.query);
        let search_term = (!self.query.search_term.trim().is_empty())
            .then_some(self.query.search_term.as_str());

        let mut footer = vec![Span::styled(
            format!("showing {} of {}", page.items.len(), page.total_matches),
            Style::default(),
        )];
        if page.total_pages > 1 {
            footer.push(Span::raw(" | "));
            footer.push(Span::styled(
                format!("Page {} of {}", page.page, page.total_pages),
                Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
            ));
        }
        footer.push(Span::raw(" "));
        footer.push(Span::styled(
            "Press <?> for commands",
            Style::default().fg(Color::DarkGray),
        ));

        let block = block
            .title(format!(" Connections ({}) ", list.len()))
            .title_bottom(Line::from(footer));

        if page.total_matches == 0 {
            let message = match search_term {
                Some(term) => format!("No connections match \"{}\".", term.trim()),
                None => "No connections yet.".to_string(),
            };
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(block)
                .render(area, buf);
            return;
        }

        let header = Row::new(render_headers(self.query.sort, HEADER_STYLE, RED)).style(HEADER_STYLE);

        let rows = page.items.iter().enumerate().map(|(idx, item)| {
            let pending = self.pending_deletes.contains(&item.id);

            let mut integration = vec![icon_badge(&item.integration), Span::raw(" ")];
            integration.extend(highlight_search_text(
                &item.integration,
                search_term,
                hash_to_color(&item.integration),
            ));

            let mut name = highlight_search_text(&item.name, search_term, Color::Reset);
            if pending {
                name.push(Span::styled(
                    " (removing...)",
                    Style::default()
                        .fg(PENDING_COLOR)
                        .add_modifier(Modifier::ITALIC),
                ));
            }

            let source = if item.is_carbon() {
                Span::styled(
                    format!("● {}", item.source),
                    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(item.source.clone())
            };

            let style = if (idx % 2) == 0 {
                DEFAULT_STYLE
            } else {
                DEFAULT_STYLE.bg(ALTERNATING_ROW_COLOR)
            };
            Row::new(vec![
                Line::from(integration),
                Line::from(name),
                Line::from(source),
                Line::from(item.entity.clone()),
                Line::from(item.interval.clone()),
            ])
            .style(if pending {
                style.add_modifier(Modifier::DIM)
            } else {
                style
            })
        });

        let t = Table::new(
            rows,
            &[
                Constraint::Fill(2),
                Constraint::Fill(3),
                Constraint::Fill(1),
                Constraint::Fill(2),
                Constraint::Fill(1),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(SELECTED_STYLE);

        StatefulWidget::render(t, area, buf, &mut self.table);
    }
}

fn render_service_card(service: &IntegrationService, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .border_type(BorderType::Rounded)
        .borders(Borders::ALL)
        .title(Line::from(vec![
            Span::raw(" "),
            icon_badge(&service.name),
            Span::raw(" "),
            Span::styled(
                service.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ]))
        .style(DEFAULT_STYLE);

    let text = Text::from(vec![
        Line::from(Span::styled(
            service.description.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "+ Add Connection",
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        )),
    ]);

    Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(block)
        .render(area, buf);
}

fn render_page_error(message: &str, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .border_type(BorderType::Rounded)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(RED))
        .title(Line::from(Span::styled(
            " Something went wrong ",
            Style::default().fg(RED).add_modifier(Modifier::BOLD),
        )))
        .style(DEFAULT_STYLE);

    let text = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            "The integrations page could not be loaded.",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(RED))),
        Line::from(""),
        Line::from(Span::styled(
            "Press <r> to retry or <Esc> to go back",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block)
        .render(area, buf);
}

impl Widget for &mut IntegrationsModel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let main_area = if self.filter.is_enabled() {
            let rects = Layout::default()
                .constraints([Constraint::Fill(90), Constraint::Max(3)].as_ref())
                .margin(0)
                .split(area);

            self.filter.render(rects[1], buf);
            rects[0]
        } else {
            area
        };

        if let Some(message) = self.page_error().map(str::to_string) {
            render_page_error(&message, main_area, buf);
        } else {
            let services_height = self.services_height(main_area.height);
            let [services_area, connections_area] = Layout::vertical([
                Constraint::Length(services_height),
                Constraint::Fill(1),
            ])
            .areas(main_area);
            self.render_services(services_area, buf);
            self.render_connections(connections_area, buf);
        }

        if let Some(dialog) = &self.dialog {
            dialog.render(area, buf);
        }

        if let Some(commands) = &self.commands {
            commands.render(area, buf);
        }

        if let Some(error_popup) = &self.error_popup {
            error_popup.render(area, buf);
        }
    }
}
