use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};

use crate::error::AppError;

/// How often the input thread checks for keys.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

pub enum Event {
    Key(KeyEvent),
    /// No key arrived before the wait ran out; time to pump ticks.
    Tick,
}

pub struct EventHandler {
    rx: mpsc::Receiver<KeyEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => {
                    if let Ok(crossterm::event::Event::Key(key)) = event::read() {
                        if key.kind == KeyEventKind::Press && tx.send(key).is_err() {
                            return;
                        }
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    log::error!("keyboard polling failed: {e}");
                    return;
                }
            }
        });

        Self { rx }
    }

    /// Wait up to `timeout` for a key.
    pub fn next(&self, timeout: Duration) -> Result<Event, AppError> {
        match self.rx.recv_timeout(timeout) {
            Ok(key) => Ok(Event::Key(key)),
            Err(RecvTimeoutError::Timeout) => Ok(Event::Tick),
            Err(RecvTimeoutError::Disconnected) => Err(AppError::EventChannelClosed),
        }
    }
}
