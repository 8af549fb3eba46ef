use std::io;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::components::Dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Move(Dir),
    Cancel,
}

/// Blocking source of player input, one event at a time.
pub trait KeySource: Send + 'static {
    /// Waits for the next key. `Ok(None)` means a key with no meaning.
    fn next_event(&mut self) -> io::Result<Option<InputEvent>>;
}

/// Reads keys from the terminal through crossterm. Expects raw mode.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(InputEvent::Move(Dir::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(InputEvent::Move(Dir::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(InputEvent::Move(Dir::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(InputEvent::Move(Dir::Right)),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Cancel)
        }
        KeyCode::Esc | KeyCode::Char('q') => Some(InputEvent::Cancel),
        _ => None,
    }
}

/// Starts a reader thread feeding `source` into an unbounded channel.
///
/// A read error is reported as a single `Cancel`, after which the thread
/// stops. The thread also stops once the receiver is dropped and the next
/// key arrives.
pub fn spawn_reader(source: impl KeySource) -> UnboundedReceiver<InputEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || pump(source, tx));
    rx
}

fn pump(mut source: impl KeySource, tx: UnboundedSender<InputEvent>) {
    loop {
        match source.next_event() {
            Ok(Some(event)) => {
                if tx.send(event).is_err() {
                    return;
                }
            }
            Ok(None) => {}
            Err(err) => {
                log::warn!("input read failed: {err}");
                let _ = tx.send(InputEvent::Cancel);
                return;
            }
        }
    }
}
