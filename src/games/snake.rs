use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use ratatui::style::Color;

use crate::games::{Game, BOARD_HEIGHT, BOARD_WIDTH};
use crate::ui::surface::{Align, Surface};

pub const UNIT: i32 = 25;
const COLS: i32 = BOARD_WIDTH as i32 / UNIT;
const ROWS: i32 = BOARD_HEIGHT as i32 / UNIT;
const START_LEN: i32 = 5;
const START_ROW: i32 = 10;

const SNAKE_COLOR: Color = Color::Rgb(230, 230, 240);
const FOOD_COLOR: Color = Color::Rgb(140, 60, 200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// One grid step, in board units.
    pub fn velocity(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -UNIT),
            Direction::Down => (0, UNIT),
            Direction::Left => (-UNIT, 0),
            Direction::Right => (UNIT, 0),
        }
    }

    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < BOARD_WIDTH as i32 && self.y >= 0 && self.y < BOARD_HEIGHT as i32
    }
}

pub struct Snake {
    /// Head at the front, tail at the back
    body: VecDeque<Point>,
    heading: Direction,
    /// Direction of the last completed move
    moved: Direction,
    food: Point,
    score: u32,
    running: bool,
    rng: Pcg32,
}

impl Snake {
    pub fn new() -> Self {
        Self::from_rng(Pcg32::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(Pcg32::seed_from_u64(seed))
    }

    fn from_rng(rng: Pcg32) -> Self {
        let mut snake = Self {
            body: starting_body(),
            heading: Direction::Right,
            moved: Direction::Right,
            food: Point::new(0, 0),
            score: 0,
            running: true,
            rng,
        };
        snake.place_food();
        snake
    }

    /// Request a turn. Reversing onto the neck is refused.
    pub fn turn(&mut self, direction: Direction) {
        if direction == self.heading.opposite() || direction == self.moved.opposite() {
            return;
        }
        self.heading = direction;
    }

    fn place_food(&mut self) {
        self.food = Point::new(
            self.rng.gen_range(0..COLS) * UNIT,
            self.rng.gen_range(0..ROWS) * UNIT,
        );
    }

    fn head(&self) -> Point {
        self.body[0]
    }

    fn step(&mut self) {
        let (dx, dy) = self.heading.velocity();
        let head = self.head();
        self.body.push_front(Point::new(head.x + dx, head.y + dy));
        self.moved = self.heading;

        if self.head() == self.food {
            self.score += 1;
            log::debug!("snake: ate food at {:?}, length {}", self.food, self.body.len());
            self.place_food();
        } else {
            self.body.pop_back();
        }
    }

    fn check_game_over(&mut self) {
        let head = self.head();
        if !head.in_bounds() || self.body.iter().skip(1).any(|p| *p == head) {
            self.running = false;
            log::info!("snake: game over with score {}", self.score);
        }
    }

    pub fn body(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn set_food(&mut self, food: Point) {
        self.food = food;
    }
}

fn starting_body() -> VecDeque<Point> {
    (0..START_LEN)
        .rev()
        .map(|i| Point::new(i * UNIT, START_ROW * UNIT))
        .collect()
}

impl Game for Snake {
    fn name(&self) -> &'static str {
        "Snake"
    }

    fn update(&mut self) {
        if !self.running {
            return;
        }
        self.step();
        self.check_game_over();
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if let Some(direction) = Direction::from_key(key.code) {
            self.turn(direction);
        }
    }

    fn draw(&self, surface: &mut Surface) {
        let unit = UNIT as f32;
        surface.fill_rect(self.food.x as f32, self.food.y as f32, unit, unit, FOOD_COLOR);
        for part in &self.body {
            surface.fill_rect(part.x as f32, part.y as f32, unit, unit, SNAKE_COLOR);
        }
        if !self.running {
            surface.text(
                BOARD_WIDTH / 2.0,
                BOARD_HEIGHT / 2.0,
                "G A M E    O V E R",
                FOOD_COLOR,
                Align::Center,
            );
        }
    }

    fn reset(&mut self) {
        self.body = starting_body();
        self.heading = Direction::Right;
        self.moved = Direction::Right;
        self.score = 0;
        self.running = true;
        self.place_food();
    }

    fn is_game_over(&self) -> bool {
        !self.running
    }

    fn status(&self) -> String {
        self.score.to_string()
    }

    fn controls(&self) -> &'static [(&'static str, &'static str)] {
        &[("↑↓←→", "Steer"), ("WASD", "Steer")]
    }
}
