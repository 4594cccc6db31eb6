pub mod pong;
pub mod snake;
pub mod whack;

use crossterm::event::KeyEvent;

use crate::ui::surface::Surface;

/// Logical board size, in the pixel units the games are tuned for.
pub const BOARD_WIDTH: f32 = 500.0;
pub const BOARD_HEIGHT: f32 = 500.0;

pub trait Game {
    fn name(&self) -> &'static str;
    /// One simulation step. A no-op once the game is over.
    fn update(&mut self);
    fn handle_input(&mut self, key: KeyEvent);
    /// Redraw every entity from current state. Must not mutate anything.
    fn draw(&self, surface: &mut Surface);
    fn reset(&mut self);
    fn is_game_over(&self) -> bool;
    /// Score/status line, e.g. `"000 / 300"`.
    fn status(&self) -> String;
    /// Key legend for the help bar as `(keys, action)` pairs.
    fn controls(&self) -> &'static [(&'static str, &'static str)];
}
