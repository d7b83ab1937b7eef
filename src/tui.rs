//! Raw-mode terminal loop shared by the interactive screens.

use anyhow::Result;
use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    style::Print,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::{Stdout, Write, stdout};
use std::panic;
use std::time::{Duration, Instant};

/// Key handling result that controls the event loop
pub enum KeyAction {
    /// Keep running and redraw
    Continue,
    /// Leave the screen
    Exit,
}

/// An interactive full-terminal view.
pub trait Screen {
    /// Lines to show, top to bottom.
    fn lines(&self) -> Vec<String>;

    fn on_key(&mut self, key: &KeyEvent) -> Result<KeyAction>;

    /// Called on every loop turn with the time since the previous call.
    /// Returns whether the screen needs a redraw.
    fn on_tick(&mut self, _elapsed: Duration) -> bool {
        false
    }
}

/// Runs `screen` until it asks to exit.
///
/// Takes care of raw mode, the alternate screen, and restoring the terminal
/// on exit or panic.
pub fn run<S: Screen>(screen: &mut S) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(cursor::Hide)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));

    let result = event_loop(screen);
    cleanup_terminal();
    let _ = panic::take_hook();
    result
}

fn event_loop<S: Screen>(screen: &mut S) -> Result<()> {
    let mut out = stdout();
    draw(&mut out, &screen.lines())?;

    let mut last = Instant::now();
    loop {
        let mut dirty = false;

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key_event) = event::read()?
            && key_event.kind == KeyEventKind::Press
        {
            match screen.on_key(&key_event)? {
                KeyAction::Continue => dirty = true,
                KeyAction::Exit => break,
            }
        }

        let now = Instant::now();
        dirty |= screen.on_tick(now - last);
        last = now;

        if dirty {
            draw(&mut out, &screen.lines())?;
        }
    }

    Ok(())
}

fn draw(out: &mut Stdout, lines: &[String]) -> Result<()> {
    out.queue(Clear(ClearType::All))?;
    for (row, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(2, row as u16 + 1))?;
        out.queue(Print(line))?;
    }
    out.flush()?;
    Ok(())
}

/// Restores cursor, main screen and cooked mode.
fn cleanup_terminal() {
    let _ = stdout().execute(cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Helper to check if a key code is a quit key (Q, ESC).
pub fn is_quit_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}
