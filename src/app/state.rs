use log::debug;
use throbber_widgets_tui::ThrobberState;

use crate::integrations::config::LinkrsConfig;

use super::model::integrations::IntegrationsModel;
use super::model::maintenance::MaintenanceModel;
use super::model::navigation::{NavigationModel, Page};
use super::model::popup::error::ErrorPopup;
use super::worker::WorkerMessage;

pub struct App {
    pub config: LinkrsConfig,
    pub navigation: NavigationModel,
    pub integrations: IntegrationsModel,
    pub maintenance: MaintenanceModel,
    pub ticks: u32,
    pub active_panel: Panel,
    pub loading: bool,
    pub throbber_state: ThrobberState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Navigation,
    Integrations,
    Maintenance,
}

impl App {
    #[cfg(test)]
    pub fn new(config: LinkrsConfig) -> Self {
        Self::new_with_errors(config, vec![])
    }

    pub fn new_with_errors(config: LinkrsConfig, errors: Vec<String>) -> Self {
        let mut integrations = IntegrationsModel::new(config.page_size());
        if !errors.is_empty() {
            integrations.error_popup = Some(ErrorPopup::from_strings(errors));
        }
        App {
            config,
            navigation: NavigationModel::new(),
            integrations,
            maintenance: MaintenanceModel::default(),
            ticks: 0,
            active_panel: Panel::Integrations,
            loading: true,
            throbber_state: ThrobberState::default(),
        }
    }

    /// Open the page selected in the navigation panel
    pub fn open_selected_page(&mut self) -> Vec<WorkerMessage> {
        let Some(entry) = self.navigation.open_selected() else {
            return vec![];
        };
        match entry.page {
            Page::Integrations => {
                self.active_panel = Panel::Integrations;
                self.integrations.activate()
            }
            Page::Maintenance => {
                self.maintenance.open(entry.title());
                self.active_panel = Panel::Maintenance;
                vec![]
            }
        }
    }

    pub fn previous_panel(&mut self) {
        debug!("Leaving {:?}", self.active_panel);
        self.active_panel = Panel::Navigation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_integrations_fetches() {
        let mut app = App::new(LinkrsConfig::default());
        app.previous_panel();
        assert_eq!(app.active_panel, Panel::Navigation);

        let messages = app.open_selected_page();
        assert_eq!(app.active_panel, Panel::Integrations);
        assert_eq!(messages, vec![WorkerMessage::LoadPage]);
    }

    #[test]
    fn test_open_other_page_shows_maintenance() {
        let mut app = App::new(LinkrsConfig::default());
        app.navigation.menu.state.select(Some(0));
        let messages = app.open_selected_page();
        assert!(messages.is_empty());
        assert_eq!(app.active_panel, Panel::Maintenance);
        assert_eq!(app.maintenance.page_title, "Organisation / Manage");
    }

    #[test]
    fn test_startup_errors_open_popup() {
        let app = App::new_with_errors(LinkrsConfig::default(), vec!["bad config".into()]);
        assert_eq!(app.integrations.error_popup.unwrap().errors, vec!["bad config"]);
    }
}
