use std::sync::{Arc, Mutex};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use events::{custom::LinkrsEvent, generator::EventGenerator};
use log::{debug, info};
use model::Model;
use ratatui::{prelude::Backend, Terminal};
use state::{App, Panel};
use worker::{Worker, WorkerMessage};

use crate::integrations::traits::IntegrationClient;
use crate::ui::draw_ui;

pub mod events;
pub mod model;
pub mod state;
pub mod worker;

pub async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
    client: Arc<dyn IntegrationClient>,
) -> Result<()> {
    let mut events = EventGenerator::new(200);
    let ui_app = app.clone();
    let worker_app = app.clone();

    let (tx_worker, rx_worker) = tokio::sync::mpsc::channel::<WorkerMessage>(100);

    info!("Spawning worker for {}", client.base_url());
    tokio::spawn(async move { Worker::new(worker_app, rx_worker, client).run().await });

    // The program opens on the Integrations page
    let startup_messages = app.lock().unwrap().integrations.activate();
    for message in startup_messages {
        tx_worker.send(message).await?;
    }

    loop {
        terminal.draw(|f| {
            debug!("Drawing UI");
            draw_ui(f, &ui_app);
        })?;

        let Some(event) = events.next().await else {
            info!("Event stream closed");
            return Ok(());
        };

        // First handle panel specific events, and send messages to the worker
        let (fall_through_event, messages) = {
            let mut app = app.lock().unwrap();
            match app.active_panel {
                Panel::Navigation => app.navigation.update(&event),
                Panel::Integrations => app.integrations.update(&event),
                Panel::Maintenance => app.maintenance.update(&event),
            }
        };

        for message in messages {
            if let Err(e) = tx_worker.send(message).await {
                log::error!("Failed to send message to worker: {e}");
            }
        }

        let Some(fall_through_event) = fall_through_event else {
            continue;
        };

        // then handle generic events
        let mut messages = vec![];
        {
            let mut app = app.lock().unwrap();
            match fall_through_event {
                LinkrsEvent::Tick => {
                    app.ticks += 1;
                    app.throbber_state.calc_next();
                }
                LinkrsEvent::Key(key) => {
                    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
                        return Ok(());
                    }
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Enter if app.active_panel == Panel::Navigation => {
                            messages = app.open_selected_page();
                        }
                        KeyCode::Esc | KeyCode::Left => app.previous_panel(),
                        _ => {}
                    }
                }
                LinkrsEvent::Mouse => {}
            }
        }

        for message in messages {
            if let Err(e) = tx_worker.send(message).await {
                log::error!("Failed to send message to worker: {e}");
            }
        }
    }
}
