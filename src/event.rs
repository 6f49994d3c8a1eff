use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use std::time::Duration;

/// Application events
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// A mouse button was pressed
    Mouse(MouseEvent),
    /// Nothing happened within the tick rate
    Tick,
}

/// Poll for events with a timeout.
///
/// Returns `Some(AppEvent)` if an event occurred, or `None` if no relevant event.
pub fn poll_event(tick_rate: Duration) -> color_eyre::Result<Option<AppEvent>> {
    if event::poll(tick_rate)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(AppEvent::Key(key))),
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                Ok(Some(AppEvent::Mouse(mouse)))
            }
            _ => Ok(None),
        }
    } else {
        Ok(Some(AppEvent::Tick))
    }
}
