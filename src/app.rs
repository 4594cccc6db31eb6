use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::games::pong::Pong;
use crate::games::snake::Snake;
use crate::games::whack::Whack;
use crate::settings::Settings;
use crate::tick::{Scheduler, TickDriver};

pub const GAME_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Home,
    Whack,
    Pong,
    Snake,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Whack, Tab::Pong, Tab::Snake]
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Home => " Home ",
            Tab::Whack => " Whack ",
            Tab::Pong => " Pong ",
            Tab::Snake => " Snake ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Whack => 1,
            Tab::Pong => 2,
            Tab::Snake => 3,
        }
    }

    /// Tab for the n-th game tile on the home screen.
    fn game(idx: usize) -> Tab {
        match idx {
            0 => Tab::Whack,
            1 => Tab::Pong,
            2 => Tab::Snake,
            _ => Tab::Home,
        }
    }
}

pub struct App<S> {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub selected_game: usize, // 0-2 for home screen game selection
    pub whack: TickDriver<Whack, S>,
    pub pong: TickDriver<Pong, S>,
    pub snake: TickDriver<Snake, S>,
}

impl<S: Scheduler> App<S> {
    /// Build every game and start its tick loop. Each driver gets its own
    /// scheduler from `scheduler`.
    pub fn new(settings: &Settings, mut scheduler: impl FnMut() -> S) -> Self {
        let (pong, snake) = match settings.seed {
            Some(seed) => (Pong::with_seed(seed), Snake::with_seed(seed.wrapping_add(1))),
            None => (Pong::new(), Snake::new()),
        };
        let mut app = Self {
            should_quit: false,
            current_tab: Tab::Home,
            selected_game: 0,
            whack: TickDriver::new(Whack::new(), scheduler(), settings.whack_delay()),
            pong: TickDriver::new(pong, scheduler(), settings.pong_delay()),
            snake: TickDriver::new(snake, scheduler(), settings.snake_delay()),
        };
        app.whack.start();
        app.pong.start();
        app.snake.start();
        app
    }

    /// Fire due ticks for the visible game only. Returns true if it advanced.
    pub fn on_tick(&mut self) -> bool {
        match self.current_tab {
            Tab::Home => false,
            Tab::Whack => self.whack.pump(),
            Tab::Pong => self.pong.pump(),
            Tab::Snake => self.snake.pump(),
        }
    }

    /// How long the event loop may sleep before the visible game needs a tick.
    pub fn until_next_tick(&self) -> Option<Duration> {
        match self.current_tab {
            Tab::Home => None,
            Tab::Whack => self.whack.until_next(),
            Tab::Pong => self.pong.until_next(),
            Tab::Snake => self.snake.until_next(),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                if matches!(self.current_tab, Tab::Home) {
                    self.should_quit = true;
                    return;
                }
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Esc => {
                if !matches!(self.current_tab, Tab::Home) {
                    self.current_tab = Tab::Home;
                    return;
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.reset_current() {
                    return;
                }
            }
            _ => {}
        }

        // Home screen shortcuts and navigation
        if matches!(self.current_tab, Tab::Home) && key.modifiers.is_empty() {
            match key.code {
                KeyCode::Char('1') => self.current_tab = Tab::Whack,
                KeyCode::Char('2') => self.current_tab = Tab::Pong,
                KeyCode::Char('3') => self.current_tab = Tab::Snake,
                KeyCode::Right | KeyCode::Down => {
                    self.selected_game = (self.selected_game + 1) % GAME_COUNT;
                }
                KeyCode::Left | KeyCode::Up => {
                    self.selected_game = (self.selected_game + GAME_COUNT - 1) % GAME_COUNT;
                }
                KeyCode::Enter => self.current_tab = Tab::game(self.selected_game),
                _ => {}
            }
            return;
        }

        // Forward to active game
        match self.current_tab {
            Tab::Home => {}
            Tab::Whack => self.whack.handle_input(key),
            Tab::Pong => self.pong.handle_input(key),
            Tab::Snake => self.snake.handle_input(key),
        }
    }

    /// Reset the visible game. False on the home screen.
    fn reset_current(&mut self) -> bool {
        match self.current_tab {
            Tab::Home => return false,
            Tab::Whack => self.whack.reset(),
            Tab::Pong => self.pong.reset(),
            Tab::Snake => self.snake.reset(),
        }
        true
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.current_tab = tabs[(idx + 1) % tabs.len()];
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.current_tab = tabs[(idx + tabs.len() - 1) % tabs.len()];
    }
}
