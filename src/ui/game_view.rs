use crate::game::{BoardState, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget::{board_lines, BoardView};

pub fn render(
    frame: &mut Frame,
    state: &BoardState,
    view: &BoardView,
    status: &str,
    message: Option<&str>,
    depth: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(13),    // Board
            Constraint::Length(3),  // Message
            Constraint::Length(4),  // Controls
        ])
        .split(frame.area());

    render_header(frame, state, status, depth, chunks[0]);
    render_board(frame, state, view, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Black => Color::Red,
        Player::White => Color::White,
    }
}

fn render_header(frame: &mut Frame, state: &BoardState, status: &str, depth: usize, area: Rect) {
    let mut spans = vec![Span::styled(
        status.to_string(),
        Style::default()
            .fg(player_color(state.turn()))
            .add_modifier(Modifier::BOLD),
    )];
    for player in Player::ALL {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!(
                "{}: {} ({} kings)",
                player,
                state.piece_count(player),
                state.king_count(player)
            ),
            Style::default().fg(player_color(player)),
        ));
    }
    spans.push(Span::raw(format!("  |  depth {depth}")));

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Checkers"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, state: &BoardState, view: &BoardView, area: Rect) {
    let board_widget = Paragraph::new(board_lines(state.board(), view)).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("Arrows: Move cursor  |  Enter/Space: Select or move");
    let line2 = Line::from("U: Undo  |  H: Hints  |  R: Restart  |  Q: Quit");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
