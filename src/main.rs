//! Binary entry point: mount once, run the event loop, dump the journal.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use lifecycle_tui::app::App;
use lifecycle_tui::input::poll_event;
use lifecycle_tui::render::Screen;

/// One logical scheduler tick per second of wall time.
const TICK: Duration = Duration::from_secs(1);

fn main() -> io::Result<()> {
    let mut app = App::new();
    let mut screen = Screen::new()?;
    let mut last_tick = Instant::now();

    screen.draw(&app.lines())?;
    while !app.should_quit() {
        if let Some(event) = poll_event(Duration::from_millis(50))? {
            app.handle_key(&event);
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= TICK {
            let ticks = elapsed.as_secs();
            app.advance(ticks);
            last_tick += TICK * ticks as u32;
        }

        screen.draw(&app.lines())?;
    }

    // Give the terminal back before printing the stream.
    drop(screen);

    let journal = app.teardown();
    print!("{}", journal.dump());
    io::stdout().flush()
}
