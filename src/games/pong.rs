use crossterm::event::{KeyCode, KeyEvent};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use ratatui::style::Color;

use crate::games::{Game, BOARD_HEIGHT, BOARD_WIDTH};
use crate::ui::surface::Surface;

const PADDLE_WIDTH: f32 = 25.0;
const PADDLE_HEIGHT: f32 = 100.0;
const PADDLE_START_Y: f32 = 200.0;
const PADDLE_STEP: f32 = 50.0;
const BALL_RADIUS: f32 = 12.5;
const BALL_START_SPEED: f32 = 1.0;
const BALL_SPEED_BUMP: f32 = 0.3;

const PADDLE_COLOR: Color = Color::Rgb(230, 230, 240);
const BALL_COLOR: Color = Color::Rgb(140, 60, 200);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
}

impl Paddle {
    fn one() -> Self {
        Self { x: 0.0, y: PADDLE_START_Y }
    }

    fn two() -> Self {
        Self { x: BOARD_WIDTH - PADDLE_WIDTH, y: PADDLE_START_Y }
    }

    /// Move by `dy` unless that would push the paddle off the board.
    fn shift(&mut self, dy: f32) {
        let next = self.y + dy;
        if next >= 0.0 && next + PADDLE_HEIGHT <= BOARD_HEIGHT {
            self.y = next;
        }
    }

    fn spans(&self, y: f32) -> bool {
        y > self.y && y < self.y + PADDLE_HEIGHT
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    /// -1.0 or 1.0 per axis
    pub dir_x: f32,
    pub dir_y: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PongCommand {
    OneUp,
    OneDown,
    TwoUp,
    TwoDown,
}

impl PongCommand {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') => Some(Self::OneUp),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Self::OneDown),
            KeyCode::Up => Some(Self::TwoUp),
            KeyCode::Down => Some(Self::TwoDown),
            _ => None,
        }
    }
}

pub struct Pong {
    one: Paddle,
    two: Paddle,
    ball: Ball,
    score_one: u32,
    score_two: u32,
    rng: Pcg32,
}

impl Pong {
    pub fn new() -> Self {
        Self::from_rng(Pcg32::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(Pcg32::seed_from_u64(seed))
    }

    fn from_rng(mut rng: Pcg32) -> Self {
        let ball = serve(&mut rng);
        Self {
            one: Paddle::one(),
            two: Paddle::two(),
            ball,
            score_one: 0,
            score_two: 0,
            rng,
        }
    }

    pub fn apply(&mut self, command: PongCommand) {
        match command {
            PongCommand::OneUp => self.one.shift(-PADDLE_STEP),
            PongCommand::OneDown => self.one.shift(PADDLE_STEP),
            PongCommand::TwoUp => self.two.shift(-PADDLE_STEP),
            PongCommand::TwoDown => self.two.shift(PADDLE_STEP),
        }
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn paddles(&self) -> (&Paddle, &Paddle) {
        (&self.one, &self.two)
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.score_one, self.score_two)
    }

    #[cfg(test)]
    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    fn new_ball(&mut self) {
        self.ball = serve(&mut self.rng);
    }

    fn check_collisions(&mut self) {
        let ball = &mut self.ball;

        if ball.y <= BALL_RADIUS && ball.dir_y < 0.0 {
            ball.dir_y = 1.0;
        }
        if ball.y >= BOARD_HEIGHT - BALL_RADIUS && ball.dir_y > 0.0 {
            ball.dir_y = -1.0;
        }

        if ball.x <= 0.0 {
            self.score_two += 1;
            log::debug!("pong: point to two ({} : {})", self.score_one, self.score_two);
            self.new_ball();
            return;
        }
        if ball.x >= BOARD_WIDTH {
            self.score_one += 1;
            log::debug!("pong: point to one ({} : {})", self.score_one, self.score_two);
            self.new_ball();
            return;
        }

        // A paddle only returns a ball that is heading toward it
        let face_one = self.one.x + PADDLE_WIDTH + BALL_RADIUS;
        if ball.dir_x < 0.0 && ball.x <= face_one && self.one.spans(ball.y) {
            ball.x = face_one;
            ball.dir_x = 1.0;
            ball.speed += BALL_SPEED_BUMP;
        }
        let face_two = self.two.x - BALL_RADIUS;
        if ball.dir_x > 0.0 && ball.x >= face_two && self.two.spans(ball.y) {
            ball.x = face_two;
            ball.dir_x = -1.0;
            ball.speed += BALL_SPEED_BUMP;
        }
    }
}

/// Centre ball with an independent coin flip per axis.
fn serve(rng: &mut impl Rng) -> Ball {
    Ball {
        x: BOARD_WIDTH / 2.0,
        y: BOARD_HEIGHT / 2.0,
        dir_x: coin(rng),
        dir_y: coin(rng),
        speed: BALL_START_SPEED,
    }
}

fn coin(rng: &mut impl Rng) -> f32 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

impl Game for Pong {
    fn name(&self) -> &'static str {
        "Pong"
    }

    fn update(&mut self) {
        self.ball.x += self.ball.speed * self.ball.dir_x;
        self.ball.y += self.ball.speed * self.ball.dir_y;
        self.check_collisions();
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if let Some(command) = PongCommand::from_key(key.code) {
            self.apply(command);
        }
    }

    fn draw(&self, surface: &mut Surface) {
        for paddle in [&self.one, &self.two] {
            surface.fill_rect(paddle.x, paddle.y, PADDLE_WIDTH, PADDLE_HEIGHT, PADDLE_COLOR);
        }
        surface.fill_circle(self.ball.x, self.ball.y, BALL_RADIUS, BALL_COLOR);
    }

    fn reset(&mut self) {
        self.one = Paddle::one();
        self.two = Paddle::two();
        self.score_one = 0;
        self.score_two = 0;
        self.new_ball();
    }

    fn is_game_over(&self) -> bool {
        false
    }

    fn status(&self) -> String {
        format!("{} : {}", self.score_one, self.score_two)
    }

    fn controls(&self) -> &'static [(&'static str, &'static str)] {
        &[("W/S", "Left paddle"), ("↑↓", "Right paddle")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn place(game: &mut Pong, x: f32, y: f32, dir_x: f32, dir_y: f32) {
        *game.ball_mut() = Ball { x, y, dir_x, dir_y, speed: BALL_START_SPEED };
    }

    #[test]
    fn test_serve_from_centre() {
        let game = Pong::with_seed(1);
        let ball = game.ball();
        assert_eq!((ball.x, ball.y), (250.0, 250.0));
        assert_eq!(ball.speed, 1.0);
        assert_eq!(ball.dir_x.abs(), 1.0);
        assert_eq!(ball.dir_y.abs(), 1.0);
        assert_eq!(game.status(), "0 : 0");
    }

    #[test]
    fn test_serves_cover_all_directions() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            let ball = serve(&mut rng);
            seen.insert((ball.dir_x as i32, ball.dir_y as i32));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_ball_moves_by_speed_per_axis() {
        let mut game = Pong::with_seed(2);
        place(&mut game, 250.0, 250.0, 1.0, -1.0);
        game.update();
        assert_eq!((game.ball().x, game.ball().y), (251.0, 249.0));
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut game = Pong::with_seed(3);
        place(&mut game, 250.0, 13.0, 1.0, -1.0);
        game.update();
        assert_eq!(game.ball().dir_y, 1.0);
        game.update();
        assert_eq!(game.ball().dir_y, 1.0);
    }

    #[test]
    fn test_bottom_wall_bounce() {
        let mut game = Pong::with_seed(3);
        place(&mut game, 250.0, 487.0, 1.0, 1.0);
        game.update();
        assert_eq!(game.ball().dir_y, -1.0);
    }

    #[test]
    fn test_left_wall_scores_for_two_and_reserves() {
        let mut game = Pong::with_seed(4);
        // Below paddle one so nothing returns it
        place(&mut game, 0.5, 450.0, -1.0, 1.0);
        game.update();
        assert_eq!(game.scores(), (0, 1));
        assert_eq!(game.status(), "0 : 1");
        let ball = game.ball();
        assert_eq!((ball.x, ball.y, ball.speed), (250.0, 250.0, 1.0));
    }

    #[test]
    fn test_right_wall_scores_for_one() {
        let mut game = Pong::with_seed(5);
        place(&mut game, 499.5, 50.0, 1.0, 1.0);
        game.update();
        assert_eq!(game.scores(), (1, 0));
    }

    #[test]
    fn test_paddle_one_returns_ball() {
        let mut game = Pong::with_seed(6);
        place(&mut game, 38.0, 250.0, -1.0, 1.0);
        game.update();
        let ball = game.ball();
        assert_eq!(ball.x, 37.5);
        assert_eq!(ball.dir_x, 1.0);
        assert!((ball.speed - 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_paddle_two_returns_ball() {
        let mut game = Pong::with_seed(6);
        place(&mut game, 462.0, 250.0, 1.0, 1.0);
        game.update();
        let ball = game.ball();
        assert_eq!(ball.x, 462.5);
        assert_eq!(ball.dir_x, -1.0);
        assert!((ball.speed - 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_one_bounce_per_approach() {
        let mut game = Pong::with_seed(7);
        place(&mut game, 38.0, 250.0, -1.0, 1.0);
        game.update();
        // Ball is leaving; grazing the face again must not bump speed
        game.ball_mut().x = 30.0;
        game.update();
        assert!((game.ball().speed - 1.3).abs() < 1e-6);
        assert_eq!(game.ball().dir_x, 1.0);
    }

    #[test]
    fn test_ball_outside_paddle_span_passes() {
        let mut game = Pong::with_seed(8);
        place(&mut game, 38.0, 150.0, -1.0, 1.0);
        game.update();
        assert_eq!(game.ball().dir_x, -1.0);
        assert_eq!(game.ball().speed, 1.0);
    }

    #[test]
    fn test_speed_resets_after_point() {
        let mut game = Pong::with_seed(9);
        place(&mut game, 38.0, 250.0, -1.0, 1.0);
        game.update();
        assert!(game.ball().speed > 1.0);
        game.ball_mut().x = 0.2;
        game.ball_mut().dir_x = -1.0;
        game.ball_mut().y = 450.0;
        game.update();
        assert_eq!(game.ball().speed, 1.0);
    }

    #[test]
    fn test_paddle_moves_are_rejected_at_edges() {
        let mut game = Pong::with_seed(10);
        for _ in 0..4 {
            game.apply(PongCommand::OneUp);
        }
        assert_eq!(game.paddles().0.y, 0.0);
        game.apply(PongCommand::OneUp);
        assert_eq!(game.paddles().0.y, 0.0);
        for _ in 0..10 {
            game.apply(PongCommand::TwoDown);
        }
        assert_eq!(game.paddles().1.y, 400.0);
    }

    #[test]
    fn test_keys_map_to_paddles() {
        let mut game = Pong::with_seed(11);
        game.handle_input(KeyEvent::from(KeyCode::Char('w')));
        game.handle_input(KeyEvent::from(KeyCode::Down));
        game.handle_input(KeyEvent::from(KeyCode::Char('q')));
        assert_eq!(game.paddles().0.y, 150.0);
        assert_eq!(game.paddles().1.y, 250.0);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut game = Pong::with_seed(12);
        game.apply(PongCommand::OneDown);
        place(&mut game, 0.5, 450.0, -1.0, 1.0);
        game.update();
        game.reset();
        assert_eq!(game.scores(), (0, 0));
        assert_eq!(game.status(), "0 : 0");
        assert_eq!(*game.paddles().0, Paddle::one());
        assert_eq!(*game.paddles().1, Paddle::two());
        assert_eq!((game.ball().x, game.ball().y, game.ball().speed), (250.0, 250.0, 1.0));
    }

    fn command() -> impl Strategy<Value = Option<PongCommand>> {
        prop_oneof![
            4 => Just(None),
            1 => Just(Some(PongCommand::OneUp)),
            1 => Just(Some(PongCommand::OneDown)),
            1 => Just(Some(PongCommand::TwoUp)),
            1 => Just(Some(PongCommand::TwoDown)),
        ]
    }

    proptest! {
        #[test]
        fn prop_rally_invariants(seed in any::<u64>(), script in proptest::collection::vec(command(), 0..3000)) {
            let mut game = Pong::with_seed(seed);
            for step in script {
                let before = *game.ball();
                let scores = game.scores();
                match step {
                    Some(cmd) => game.apply(cmd),
                    None => game.update(),
                }
                let (one, two) = game.paddles();
                prop_assert!(one.y >= 0.0 && one.y + PADDLE_HEIGHT <= BOARD_HEIGHT);
                prop_assert!(two.y >= 0.0 && two.y + PADDLE_HEIGHT <= BOARD_HEIGHT);
                if game.scores() == scores {
                    prop_assert!(game.ball().speed >= before.speed);
                } else {
                    prop_assert_eq!(game.ball().speed, BALL_START_SPEED);
                    let (a, b) = game.scores();
                    prop_assert_eq!(a + b, scores.0 + scores.1 + 1);
                }
            }
        }
    }
}
