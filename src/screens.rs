//! Interactive screens: noise player, breathing guide, sheep counter.

use crate::tui::{KeyAction, Screen, is_quit_key};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use drift::breath::{BreathClock, BreathController};
use drift::counter::TapCounter;
use drift::engine::{AudioHost, NoiseEngine, PlaybackState};
use std::time::{Duration, Instant};

fn noise_line<H: AudioHost>(engine: &NoiseEngine<H>) -> String {
    match engine.state() {
        PlaybackState::Unavailable => "Noise: no audio output".to_string(),
        state => format!("Noise: {} (gain {:.2})", state, engine.gain_target().value()),
    }
}

pub struct NoiseScreen<H: AudioHost> {
    engine: NoiseEngine<H>,
}

impl<H: AudioHost> NoiseScreen<H> {
    pub fn new(engine: NoiseEngine<H>) -> Self {
        Self { engine }
    }
}

impl<H: AudioHost> Screen for NoiseScreen<H> {
    fn lines(&self) -> Vec<String> {
        vec![
            "Pink Noise".to_string(),
            String::new(),
            noise_line(&self.engine),
            String::new(),
            "SPACE toggle noise   Q quit".to_string(),
        ]
    }

    fn on_key(&mut self, key: &KeyEvent) -> Result<KeyAction> {
        if is_quit_key(key.code) {
            return Ok(KeyAction::Exit);
        }
        if key.code == KeyCode::Char(' ') {
            self.engine.toggle();
        }
        Ok(KeyAction::Continue)
    }
}

pub struct BreatheScreen<H: AudioHost> {
    engine: NoiseEngine<H>,
    breath: BreathController,
    clock: BreathClock,
}

impl<H: AudioHost> BreatheScreen<H> {
    pub fn new(engine: NoiseEngine<H>) -> Self {
        Self {
            engine,
            breath: BreathController::new(),
            clock: BreathClock::new(),
        }
    }
}

impl<H: AudioHost> Screen for BreatheScreen<H> {
    fn lines(&self) -> Vec<String> {
        let counter = if self.breath.is_active() {
            format!("{}  {}", self.breath.phase(), self.breath.time_left())
        } else {
            "Start".to_string()
        };

        vec![
            self.breath.subtitle().to_string(),
            String::new(),
            counter,
            self.breath.instruction().to_string(),
            String::new(),
            noise_line(&self.engine),
            String::new(),
            "SPACE start/stop   N toggle noise   Q quit".to_string(),
        ]
    }

    fn on_key(&mut self, key: &KeyEvent) -> Result<KeyAction> {
        match key.code {
            code if is_quit_key(code) => return Ok(KeyAction::Exit),
            KeyCode::Char(' ') => {
                self.breath.toggle();
                self.clock.reset();
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.engine.toggle();
            }
            _ => {}
        }
        Ok(KeyAction::Continue)
    }

    fn on_tick(&mut self, elapsed: Duration) -> bool {
        if !self.breath.is_active() {
            return false;
        }
        let ticks = self.clock.advance(elapsed);
        for _ in 0..ticks {
            self.breath.tick();
        }
        ticks > 0
    }
}

pub struct SheepScreen<H: AudioHost> {
    engine: NoiseEngine<H>,
    counter: TapCounter,
    was_animating: bool,
}

impl<H: AudioHost> SheepScreen<H> {
    pub fn new(engine: NoiseEngine<H>) -> Self {
        Self {
            engine,
            counter: TapCounter::new(),
            was_animating: false,
        }
    }
}

impl<H: AudioHost> Screen for SheepScreen<H> {
    fn lines(&self) -> Vec<String> {
        let sheep = if self.counter.is_animating(Instant::now()) {
            "  \\o/ hop!"
        } else {
            "  (o)"
        };

        vec![
            sheep.to_string(),
            String::new(),
            format!("{}", self.counter.count()),
            "Sheep Counted".to_string(),
            String::new(),
            noise_line(&self.engine),
            String::new(),
            "SPACE count   N toggle noise   Q quit".to_string(),
        ]
    }

    fn on_key(&mut self, key: &KeyEvent) -> Result<KeyAction> {
        match key.code {
            code if is_quit_key(code) => return Ok(KeyAction::Exit),
            KeyCode::Char(' ') => {
                self.counter.tap(Instant::now());
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.engine.toggle();
            }
            _ => {}
        }
        Ok(KeyAction::Continue)
    }

    fn on_tick(&mut self, _elapsed: Duration) -> bool {
        let animating = self.counter.is_animating(Instant::now());
        let changed = animating != self.was_animating;
        self.was_animating = animating;
        changed
    }
}
