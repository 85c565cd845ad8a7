use std::sync::{Arc, Mutex};

use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

use crate::app::model::navigation::Page;
use crate::app::state::{App, Panel};
use crate::ui::constants::{DEFAULT_STYLE, PRIMARY};

pub mod common;
pub mod constants;

/// Width of the settings menu when shown beside a page
const NAVIGATION_WIDTH: u16 = 36;

pub fn draw_ui(f: &mut Frame, app: &Arc<Mutex<App>>) {
    let mut app = app.lock().unwrap();

    // Always split area vertically to reserve top line for throbber
    let [top_line, panel_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(f.area());

    let [app_info, throbber_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(20)]).areas(top_line);

    let version = env!("CARGO_PKG_VERSION");
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Linkrs", DEFAULT_STYLE.fg(PRIMARY)),
            Span::raw(format!(" v{version}")),
        ]))
        .style(DEFAULT_STYLE),
        app_info,
    );

    if app.loading {
        let throbber = Throbber::default()
            .label("Fetching data...")
            .style(DEFAULT_STYLE)
            .throbber_set(throbber_widgets_tui::OGHAM_C);
        f.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    } else {
        let empty_block = Block::default().style(DEFAULT_STYLE);
        f.render_widget(empty_block, throbber_area);
    }

    // The settings menu stays visible next to the open page
    let [navigation_area, page_area] = Layout::horizontal([
        Constraint::Length(NAVIGATION_WIDTH),
        Constraint::Fill(1),
    ])
    .areas(panel_area);

    app.navigation.render(navigation_area, f.buffer_mut());

    let page = match app.active_panel {
        Panel::Integrations => Page::Integrations,
        Panel::Maintenance => Page::Maintenance,
        Panel::Navigation => app.navigation.open_page(),
    };

    // Only frame has the ability to set the cursor position, so the search cursor is placed here
    match page {
        Page::Integrations => {
            app.integrations.render(page_area, f.buffer_mut());
            if app.integrations.filter.is_enabled() {
                f.set_cursor_position(app.integrations.filter.cursor.position);
            }
        }
        Page::Maintenance => app.maintenance.render(page_area, f.buffer_mut()),
    }
}
