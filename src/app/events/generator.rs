use std::time::{Duration, Instant};

use crossterm::event;
use tokio::sync::mpsc::{channel, Receiver};

use super::custom::LinkrsEvent;

/// Turns terminal input into [`LinkrsEvent`]s and interleaves a `Tick` every `tick_rate`.
pub struct EventGenerator {
    rx_event: Receiver<LinkrsEvent>,
}

impl EventGenerator {
    pub fn new(tick_rate: u16) -> Self {
        let (tx_event, rx_event) = channel::<LinkrsEvent>(500);
        let tick_rate = Duration::from_millis(u64::from(tick_rate));

        tokio::spawn(async move {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or_else(|| Duration::from_secs(0));
                if let Ok(true) = event::poll(timeout) {
                    if let Ok(ev) = event::read() {
                        if tx_event.send(LinkrsEvent::from(ev)).await.is_err() {
                            break;
                        }
                    }
                }
                if last_tick.elapsed() > tick_rate {
                    if tx_event.send(LinkrsEvent::Tick).await.is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
            log::debug!("Event receiver dropped, stopping event generator");
        });

        Self { rx_event }
    }

    pub async fn next(&mut self) -> Option<LinkrsEvent> {
        self.rx_event.recv().await
    }
}
