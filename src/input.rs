//! Input - Keyboard event conversion and polling.
//!
//! Bridges crossterm's event system to the small set of keys the demo cares
//! about. Only key *presses* are surfaced; repeats, releases, mouse and
//! resize events are dropped.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use lifecycle_tui::input::poll_event;
//!
//! if let Some(event) = poll_event(Duration::from_millis(50))? {
//!     app.handle_key(&event);
//! }
//! ```

use std::io;
use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
    poll, read,
};

// =============================================================================
// TYPES
// =============================================================================

bitflags::bitflags! {
    /// Keyboard modifier state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const CTRL  = 1;
        const ALT   = 1 << 1;
        const SHIFT = 1 << 2;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    pub fn new(key: Key) -> Self {
        Self { key, modifiers: Modifiers::empty() }
    }

    /// Plain character press.
    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c))
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

// =============================================================================
// CONVERSION
// =============================================================================

/// Convert a crossterm key event. Returns `None` for non-press events and
/// keys the demo has no use for.
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<KeyboardEvent> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Escape,
        _ => return None,
    };
    Some(KeyboardEvent { key, modifiers: convert_modifiers(event.modifiers) })
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::CTRL, mods.contains(KeyModifiers::CONTROL));
    out.set(Modifiers::ALT, mods.contains(KeyModifiers::ALT));
    out.set(Modifiers::SHIFT, mods.contains(KeyModifiers::SHIFT));
    out
}

// =============================================================================
// POLLING
// =============================================================================

/// Poll for a keyboard event with timeout. Returns `None` if nothing relevant
/// arrived within the timeout.
pub fn poll_event(timeout: Duration) -> io::Result<Option<KeyboardEvent>> {
    if poll(timeout)? {
        if let CrosstermEvent::Key(key) = read()? {
            return Ok(convert_key_event(key));
        }
    }
    Ok(None)
}

// =============================================================================
// TESTS
// =============================================================================
