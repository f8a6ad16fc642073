//! Stateless UI rendering for the memory board.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use strictly_memory::{RoundSummary, TileFace};

use super::app::{App, Screen};
use super::board::TerminalBoard;
use super::grid::{BoardGeometry, screen_chunks};

/// Renders the current screen.
pub fn draw(frame: &mut Frame, app: &App, board: &TerminalBoard) {
    let chunks = screen_chunks(frame.area());

    let title = Paragraph::new("Strictly Memory")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    match app.screen() {
        Screen::Start => draw_start(frame, chunks[1], app),
        Screen::Playing => {
            draw_board(frame, chunks[1], app, board);
            if let Some(summary) = board.summary() {
                draw_summary(frame, chunks[1], summary);
            }
        }
    }

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);
}

fn draw_start(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from("How many tiles?"),
        Line::from(""),
        Line::from(Span::styled(
            format!("[ {:>3} ]", app.tiles_input()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to play, q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let prompt = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("New game"));
    frame.render_widget(prompt, center_rect(area, 40, 9));
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, board: &TerminalBoard) {
    let mut header = match app.best_score() {
        Some(best) => format!("Score: {}   Best: {}", board.score(), best),
        None => format!("Score: {}   Best: -", board.score()),
    };

    let frame_block = Block::default().borders(Borders::ALL);
    let inner = frame_block.inner(area);
    let tiles = board.tiles().len();
    let geometry = BoardGeometry::new(inner, *board.columns(), tiles, app.cursor());

    if let Some(geometry) = geometry.filter(BoardGeometry::is_scrolled) {
        let rows = geometry.visible_rows();
        header.push_str(&format!("   Rows {}-{} of {}", rows.start + 1, rows.end, geometry.rows()));
    }
    frame.render_widget(frame_block.title(header), area);

    let Some(geometry) = geometry else {
        if tiles > 0 {
            let message = Paragraph::new(format!(
                "Terminal too small for {} tiles. Enlarge it or press n.",
                tiles
            ))
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
            frame.render_widget(message, inner);
        }
        return;
    };

    for index in geometry.visible_tiles() {
        if let (Some(cell), Some(face)) = (geometry.cell(index), board.face(index)) {
            draw_tile(frame, cell, face, index == app.cursor(), geometry.bordered());
        }
    }
}

fn draw_tile(frame: &mut Frame, area: Rect, face: TileFace, selected: bool, bordered: bool) {
    let (symbol, style) = match face {
        TileFace::Hidden => ("?", Style::default().fg(Color::Gray).bg(Color::DarkGray)),
        TileFace::Revealed(color) => ("", Style::default().bg(Color::Rgb(color.r, color.g, color.b))),
        TileFace::Matched(color) => (
            "=",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(color.r, color.g, color.b)),
        ),
    };

    if bordered {
        let border = if selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Black)
        };
        let tile = Paragraph::new(symbol)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border));
        frame.render_widget(tile, area);
        return;
    }

    // Borderless cells keep a one-column gap so neighbours stay apart.
    let cell = Rect {
        width: area.width.saturating_sub(1).max(1),
        ..area
    };
    let (text, style) = if selected {
        (
            format!("[{}]", symbol),
            style.fg(Color::White).add_modifier(Modifier::BOLD),
        )
    } else {
        (symbol.to_string(), style)
    };
    let tile = Paragraph::new(text).style(style).alignment(Alignment::Center);
    frame.render_widget(tile, cell);
}

fn draw_summary(frame: &mut Frame, area: Rect, summary: &RoundSummary) {
    let mut lines = Vec::new();
    if *summary.new_best() {
        lines.push(Line::from(Span::styled(
            summary.message(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(format!("Your score: {}", summary.score())));
    lines.push(Line::from(format!("Best score: {}", summary.best())));
    lines.push(Line::from(""));
    lines.push(Line::from("Play again? (r)"));

    let popup = center_rect(area, 32, 8);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Round complete")),
        popup,
    );
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
