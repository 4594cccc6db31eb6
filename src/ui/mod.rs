pub mod home;
pub mod surface;
pub mod tabs;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};
use crate::games::{Game, BOARD_HEIGHT, BOARD_WIDTH};
use crate::tick::Scheduler;
use surface::Surface;

const BOARD_BG: Color = Color::Rgb(10, 10, 20);

pub fn render<S: Scheduler>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),   // Content
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app.current_tab, chunks[0]);

    match app.current_tab {
        Tab::Home => home::render_home(frame, chunks[1], app),
        Tab::Whack => render_game(frame, chunks[1], app.whack.game(), game_color(Tab::Whack)),
        Tab::Pong => render_game(frame, chunks[1], app.pong.game(), game_color(Tab::Pong)),
        Tab::Snake => render_game(frame, chunks[1], app.snake.game(), game_color(Tab::Snake)),
    }
}

pub fn game_color(tab: Tab) -> Color {
    match tab {
        Tab::Home => Color::Rgb(60, 150, 200),
        Tab::Whack => Color::Rgb(200, 120, 255),
        Tab::Pong => Color::Rgb(80, 200, 255),
        Tab::Snake => Color::Rgb(80, 220, 80),
    }
}

/// Status bar, board and help bar for one game.
fn render_game(frame: &mut Frame, area: Rect, game: &dyn Game, accent: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .title(format!(" {} ", game.name()))
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(inner);

    let status = Line::from(vec![
        Span::styled(" Score: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            game.status(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), chunks[0]);

    let board = board_area(chunks[1]);
    let mut surface = Surface::new(
        board.width as usize,
        board.height as usize,
        BOARD_WIDTH,
        BOARD_HEIGHT,
        BOARD_BG,
    );
    game.draw(&mut surface);
    frame.render_widget(Paragraph::new(surface.into_lines()), board);

    frame.render_widget(Paragraph::new(help_line(game)), chunks[2]);
}

/// Largest centred area that keeps the board square on screen, assuming
/// terminal cells about twice as tall as they are wide.
fn board_area(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

fn help_line(game: &dyn Game) -> Line<'static> {
    let sep = || Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60)));
    let mut spans = vec![Span::raw(" ")];
    for (keys, action) in game.controls() {
        spans.push(Span::styled(
            format!("{keys} "),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!("{action} "), Style::default().fg(Color::DarkGray)));
        spans.push(sep());
    }
    spans.push(Span::styled("R ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    spans.push(Span::styled("Reset ", Style::default().fg(Color::DarkGray)));
    spans.push(sep());
    spans.push(Span::styled("Esc Menu", Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::pong::Pong;
    use crate::games::snake::Snake;
    use crate::games::whack::Whack;
    use crate::settings::Settings;
    use crate::tick::ManualScheduler;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text<S: Scheduler>(app: &App<S>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_board_area_is_square_on_screen() {
        let area = board_area(Rect::new(0, 0, 100, 30));
        assert_eq!((area.width, area.height), (60, 30));
        assert_eq!(area.x, 20);
        let narrow = board_area(Rect::new(0, 0, 20, 30));
        assert_eq!((narrow.width, narrow.height), (20, 10));
    }

    #[test]
    fn test_game_screens_show_status() {
        let settings = Settings { seed: Some(1), ..Settings::default() };
        let mut app = App::new(&settings, ManualScheduler::new);
        assert!(screen_text(&app).contains("Whack"));

        app.current_tab = Tab::Whack;
        assert!(screen_text(&app).contains("000 / 300"));
        app.current_tab = Tab::Pong;
        assert!(screen_text(&app).contains("0 : 0"));
        app.current_tab = Tab::Snake;
        assert!(screen_text(&app).contains("Reset"));
    }

    #[test]
    fn test_snake_game_over_banner() {
        let mut game = Snake::with_seed(4);
        game.turn(crate::games::snake::Direction::Up);
        for _ in 0..12 {
            game.update();
        }
        assert!(game.is_game_over());
        let mut surface = Surface::new(60, 30, BOARD_WIDTH, BOARD_HEIGHT, BOARD_BG);
        game.draw(&mut surface);
        let text: String = surface
            .into_lines()
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect();
        assert!(text.contains("G A M E    O V E R"));
    }

    #[test]
    fn test_drawing_does_not_change_state() {
        let mut whack = Whack::new();
        let mut pong = Pong::with_seed(3);
        for _ in 0..20 {
            whack.update();
            pong.update();
        }
        let mut surface = Surface::new(40, 20, BOARD_WIDTH, BOARD_HEIGHT, BOARD_BG);
        let before = (whack.status(), *pong.ball());
        whack.draw(&mut surface);
        pong.draw(&mut surface);
        assert_eq!(before, (whack.status(), *pong.ball()));
    }
}
