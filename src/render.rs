//! Render - Terminal screen and panel framing.
//!
//! The demo draws full frames: every event redraws the whole tree from the
//! applied values. `Screen` owns the terminal (raw mode + alternate screen,
//! restored best-effort on drop); `frame` wraps a unit's content lines in a
//! titled border, padded by display width so wide characters line up.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use unicode_width::UnicodeWidthStr;

// =============================================================================
// PANEL FRAMING
// =============================================================================

/// Wrap content lines in a titled box:
///
/// ```text
/// ┌─ title ────────┐
/// │ content        │
/// └────────────────┘
/// ```
pub fn frame(title: &str, lines: &[String]) -> Vec<String> {
    let inner = lines
        .iter()
        .map(|l| l.width())
        .max()
        .unwrap_or(0)
        .max(title.width() + 1);

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!(
        "┌─ {title} {}┐",
        "─".repeat(inner - title.width() - 1)
    ));
    for line in lines {
        out.push(format!("│ {line}{} │", " ".repeat(inner - line.width())));
    }
    out.push(format!("└{}┘", "─".repeat(inner + 2)));
    out
}

// =============================================================================
// SCREEN
// =============================================================================

/// The display surface. Creating it takes over the terminal; dropping it
/// gives the terminal back (best effort).
pub struct Screen {
    out: Stdout,
}

impl Screen {
    pub fn new() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(Self { out })
    }

    /// Clear and draw a full frame.
    pub fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        for (row, line) in lines.iter().enumerate() {
            queue!(self.out, MoveTo(0, row as u16), Print(line))?;
        }
        self.out.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// =============================================================================
// TESTS
// =============================================================================
