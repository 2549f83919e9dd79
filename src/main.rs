//! Gridfall terminal runner (default binary).
//!
//! Frame-stepped loop: render, poll input until the next tick, run the
//! held-key repeat poll, then advance gravity. The engine never blocks;
//! all waiting happens in the event poll timeout here.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use gridfall::engine::{GameEngine, NullAudio};
use gridfall::input::{key_name, should_quit, InputDispatcher};
use gridfall::term::TerminalRenderer;
use gridfall::types::{InputEvent, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn seed_from_clock() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut engine = GameEngine::new(seed_from_clock(), Box::new(NullAudio::new()));
    engine.start();

    let mut dispatcher = InputDispatcher::new();

    let tick_duration = Duration::from_millis(TICK_MS);
    let mut last_frame = Instant::now();

    loop {
        term.draw(&engine)?;

        // Input with timeout until the next frame boundary.
        let timeout = tick_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(name) = key_name(key.code) {
                            dispatcher.dispatch(name, InputEvent::Press, &mut engine, Instant::now());
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(name) = key_name(key.code) {
                            dispatcher.dispatch(
                                name,
                                InputEvent::Release,
                                &mut engine,
                                Instant::now(),
                            );
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat refreshes the hold so it
                        // does not expire; the dispatcher's own timer
                        // drives the actual repeats.
                        if let Some(name) = key_name(key.code) {
                            dispatcher.dispatch(name, InputEvent::Held, &mut engine, Instant::now());
                        }
                    }
                }
            }
        }

        if last_frame.elapsed() >= tick_duration {
            last_frame = Instant::now();
            let now = Instant::now();
            dispatcher.poll_held(&mut engine, now);
            engine.tick(now);
        }
    }
}
