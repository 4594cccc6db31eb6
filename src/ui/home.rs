use std::time::Duration;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab, GAME_COUNT};
use crate::tick::Scheduler;
use crate::ui::game_color;

const BANNER: &str = r#"
 ╔══════════════════════════════════════════════╗
 ║   W H A C K    ·    P O N G    ·    S N A K E ║
 ╚══════════════════════════════════════════════╝"#;

struct GameTile {
    key: &'static str,
    tab: Tab,
    name: &'static str,
    desc: &'static str,
    controls: &'static [(&'static str, &'static str)],
}

const GAME_TILES: [GameTile; GAME_COUNT] = [
    GameTile {
        key: "1",
        tab: Tab::Whack,
        name: "Whack",
        desc: "Stop the bar tall,\nthe disc centred\nand the target wide!",
        controls: &[("A / S / D", "Stop or release a challenge")],
    },
    GameTile {
        key: "2",
        tab: Tab::Pong,
        name: "Pong",
        desc: "Two players,\none ball that keeps\ngetting faster!",
        controls: &[("W / S", "Left paddle"), ("↑ / ↓", "Right paddle")],
    },
    GameTile {
        key: "3",
        tab: Tab::Snake,
        name: "Snake",
        desc: "Eat, grow, and\nstay off the walls\nand your own tail!",
        controls: &[("↑↓←→ / WASD", "Steer")],
    },
];

fn render_game_tile(frame: &mut Frame, area: Rect, tile: &GameTile, delay: Duration, selected: bool) {
    let color = game_color(tile.tab);
    let border_color = if selected { Color::Rgb(255, 220, 80) } else { color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 { return; }

    let mut lines: Vec<Line> = Vec::new();

    let name_color = if selected { Color::Rgb(255, 255, 255) } else { color };
    lines.push(Line::from(vec![
        Span::styled(format!("[{}] ", tile.key), Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(tile.name, Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ]));

    for desc_line in tile.desc.split('\n') {
        lines.push(Line::from(vec![
            Span::styled(desc_line, Style::default().fg(if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) })),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled(format!("{} ms / tick", delay.as_millis()), Style::default().fg(Color::Rgb(90, 90, 110))),
    ]));

    if selected {
        lines.push(Line::from(vec![
            Span::styled("▶ Enter to play", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        ]));
    }

    let p = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(p, inner);
}

fn game_controls(tile: &GameTile) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {}", tile.name), Style::default().fg(game_color(tile.tab)).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];
    let rows = tile.controls.iter().copied().chain([("R", "Reset"), ("Esc", "Back to menu")]);
    for (keys, action) in rows {
        lines.push(Line::from(vec![
            Span::styled(format!("    {keys:<17}"), Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled(action, Style::default().fg(Color::Rgb(140, 140, 140))),
        ]));
    }
    lines
}

pub fn render_home<S: Scheduler>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Banner
            Constraint::Length(2), // Subtitle
            Constraint::Length(9), // Game tiles
            Constraint::Min(6),    // Controls area
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::from(vec![
        Span::styled(
            "  Three tiny games, one tick at a time  ",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let games_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" Games — ←→ Select, Enter to Play ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let games_inner = games_block.inner(chunks[2]);
    frame.render_widget(games_block, chunks[2]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(games_inner);

    let delays = [app.whack.delay(), app.pong.delay(), app.snake.delay()];
    for (i, tile) in GAME_TILES.iter().enumerate() {
        render_game_tile(frame, cols[i], tile, delays[i], app.selected_game == i);
    }

    let controls_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 60, 80)))
        .title(" Controls ");
    let selected = &GAME_TILES[app.selected_game.min(GAME_COUNT - 1)];
    let controls = Paragraph::new(game_controls(selected)).block(controls_block);
    frame.render_widget(controls, chunks[3]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" 1-3 ", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled("Jump to game ", Style::default().fg(Color::DarkGray)),
        Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Tab ", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled("Next tab ", Style::default().fg(Color::DarkGray)),
        Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Q ", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(footer, chunks[4]);
}
