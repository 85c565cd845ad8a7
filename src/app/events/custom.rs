use crossterm::event::{Event, KeyEvent, KeyEventKind};

#[derive(Debug, Clone)]
pub enum LinkrsEvent {
    Tick,
    Key(KeyEvent),
    Mouse,
}

impl From<Event> for LinkrsEvent {
    fn from(ev: Event) -> Self {
        match ev {
            // Windows reports both press and release; only presses drive the UI
            Event::Key(key) if key.kind != KeyEventKind::Release => LinkrsEvent::Key(key),
            _ => LinkrsEvent::Mouse,
        }
    }
}
