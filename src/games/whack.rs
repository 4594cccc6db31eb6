use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Color;

use crate::games::Game;
use crate::ui::surface::{Align, Surface};

const BAR_MAX: i32 = 150;
const DISC_TOP: i32 = 120;
const DISC_BOTTOM: i32 = 280;
const DISC_CENTRE: i32 = 200;
const DISC_MAX_POINTS: i32 = 80;
const TARGET_MAX: i32 = 70;
pub const MAX_SCORE: i32 = BAR_MAX + DISC_MAX_POINTS + TARGET_MAX;

const FILL: Color = Color::Rgb(140, 60, 200);
const BORDER: Color = Color::Rgb(200, 200, 210);
const LABEL: Color = Color::Rgb(230, 230, 240);

/// A value sweeping between two bounds, turning around at each one.
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator {
    value: i32,
    min: i32,
    max: i32,
    step: i32,
    rising: bool,
    stopped: bool,
}

impl Oscillator {
    fn new(start: i32, min: i32, max: i32, step: i32) -> Self {
        Self { value: start, min, max, step, rising: start <= min, stopped: false }
    }

    fn advance(&mut self) {
        if self.stopped {
            return;
        }
        if self.value <= self.min {
            self.value = self.min + self.step;
            self.rising = true;
        } else if self.value >= self.max {
            self.value = self.max - self.step;
            self.rising = false;
        } else if self.rising {
            self.value += self.step;
        } else {
            self.value -= self.step;
        }
    }

    /// Flip the stopped flag, returning the new state.
    fn toggle(&mut self) -> bool {
        self.stopped = !self.stopped;
        self.stopped
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_rising(&self) -> bool {
        self.rising
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhackCommand {
    ToggleBar,
    ToggleDisc,
    ToggleTarget,
}

impl WhackCommand {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') => Some(Self::ToggleBar),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Self::ToggleDisc),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(Self::ToggleTarget),
            _ => None,
        }
    }
}

/// Three reflex challenges: stop the bar tall, the disc centred and the
/// target wide. Points are banked only while a challenge is stopped.
pub struct Whack {
    bar: Oscillator,
    disc: Oscillator,
    target: Oscillator,
    bar_points: i32,
    disc_points: i32,
    target_points: i32,
}

impl Whack {
    pub fn new() -> Self {
        Self {
            bar: Oscillator::new(0, 0, BAR_MAX, 2),
            disc: Oscillator::new(DISC_BOTTOM, DISC_TOP, DISC_BOTTOM, 2),
            target: Oscillator::new(0, 0, TARGET_MAX, 1),
            bar_points: 0,
            disc_points: 0,
            target_points: 0,
        }
    }

    pub fn apply(&mut self, command: WhackCommand) {
        match command {
            WhackCommand::ToggleBar => {
                let stopped = self.bar.toggle();
                self.bar_points = if stopped { self.bar.value() } else { 0 };
            }
            WhackCommand::ToggleDisc => {
                let stopped = self.disc.toggle();
                self.disc_points = if stopped { disc_points(self.disc.value()) } else { 0 };
            }
            WhackCommand::ToggleTarget => {
                let stopped = self.target.toggle();
                self.target_points = if stopped { self.target.value() } else { 0 };
            }
        }
    }

    pub fn bar(&self) -> &Oscillator {
        &self.bar
    }

    pub fn disc(&self) -> &Oscillator {
        &self.disc
    }

    pub fn target(&self) -> &Oscillator {
        &self.target
    }

    /// Banked points per challenge: bar, disc, target.
    pub fn points(&self) -> (i32, i32, i32) {
        (self.bar_points, self.disc_points, self.target_points)
    }

    pub fn total(&self) -> i32 {
        self.bar_points + self.disc_points + self.target_points
    }
}

/// The disc scores best when stopped dead centre.
fn disc_points(y: i32) -> i32 {
    DISC_MAX_POINTS - (y - DISC_CENTRE).abs()
}

impl Game for Whack {
    fn name(&self) -> &'static str {
        "Whack"
    }

    fn update(&mut self) {
        self.bar.advance();
        self.disc.advance();
        self.target.advance();
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if let Some(command) = WhackCommand::from_key(key.code) {
            self.apply(command);
        }
    }

    fn draw(&self, surface: &mut Surface) {
        // Bar grows up from the bottom of its container
        surface.fill_rect(50.0, 300.0, 50.0, -(self.bar.value() as f32), FILL);
        surface.stroke_rect(50.0, 150.0, 50.0, 150.0, BORDER);

        surface.stroke_circle(255.0, DISC_CENTRE as f32, 25.0, BORDER);
        surface.fill_circle(255.0, self.disc.value() as f32, 25.0, FILL);

        surface.fill_rect(380.0, 150.0, self.target.value() as f32, 150.0, FILL);
        surface.stroke_rect(380.0, 150.0, 70.0, 150.0, BORDER);

        surface.text(75.0, 350.0, "A", LABEL, Align::Center);
        surface.text(255.0, 350.0, "S", LABEL, Align::Center);
        surface.text(415.0, 350.0, "D", LABEL, Align::Center);

        surface.text(75.0, 430.0, &format!("{:03}/{}", self.bar_points, BAR_MAX), LABEL, Align::Center);
        surface.text(
            255.0,
            430.0,
            &format!("{:02}/{}", self.disc_points, DISC_MAX_POINTS),
            LABEL,
            Align::Center,
        );
        surface.text(
            415.0,
            430.0,
            &format!("{:02}/{}", self.target_points, TARGET_MAX),
            LABEL,
            Align::Center,
        );
    }

    fn reset(&mut self) {
        *self = Whack::new();
    }

    fn is_game_over(&self) -> bool {
        false
    }

    fn status(&self) -> String {
        format!("{:03} / {}", self.total(), MAX_SCORE)
    }

    fn controls(&self) -> &'static [(&'static str, &'static str)] {
        &[("A", "Stop bar"), ("S", "Stop disc"), ("D", "Stop target")]
    }
}
