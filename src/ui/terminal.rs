//! Terminal session lifetime and blocking key reader.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use tokio::sync::mpsc;

use crate::input::KeyInput;
use crate::ui::settings::{FALLBACK_COLUMNS, FALLBACK_ROWS, KEY_POLL_MS};

/// Raw mode plus alternate screen; restores the terminal on drop so every
/// return path, including errors, leaves the shell usable.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, Show, LeaveAlternateScreen);
        let _ = stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}

/// Current terminal size, with a fixed fallback when it cannot be queried.
pub fn terminal_size() -> (u16, u16) {
    terminal::size().unwrap_or((FALLBACK_COLUMNS, FALLBACK_ROWS))
}

/// Terminal input forwarded to the presenter loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyInput),
    Resize(u16, u16),
}

/// Stop flag for [`read_terminal_events`].
#[derive(Debug, Clone, Default)]
pub struct ReaderStop(Arc<AtomicBool>);

impl ReaderStop {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Blocking loop: poll crossterm and forward events until stopped or the
/// receiver is gone. Meant for `tokio::task::spawn_blocking`.
pub fn read_terminal_events(
    tx: mpsc::Sender<TerminalEvent>,
    stop: ReaderStop,
) -> io::Result<()> {
    while !stop.is_stopped() {
        if !event::poll(Duration::from_millis(KEY_POLL_MS))? {
            continue;
        }
        let forwarded = match event::read()? {
            Event::Key(key) => KeyInput::from_key_event(&key).map(TerminalEvent::Key),
            Event::Resize(cols, rows) => Some(TerminalEvent::Resize(cols, rows)),
            _ => None,
        };
        if let Some(evt) = forwarded {
            if tx.blocking_send(evt).is_err() {
                break;
            }
        }
    }
    tracing::debug!("key reader stopped");
    Ok(())
}
