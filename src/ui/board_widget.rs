use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::game::{Board, Piece, Player, Position, COLS, ROWS};

/// Everything drawn on top of the pieces.
#[derive(Debug, Clone, Default)]
pub struct BoardView {
    pub cursor: Option<Position>,
    pub selected: Option<Position>,
    pub destinations: Vec<Position>,
    /// Pieces that must capture, shown after a forced-jump refusal.
    pub movable: Vec<Position>,
    pub last_move: Option<(Position, Position)>,
    /// Draw row 7 at the top and column 7 on the left.
    pub flipped: bool,
}

impl BoardView {
    fn rows(&self) -> Vec<usize> {
        if self.flipped {
            (0..ROWS).rev().collect()
        } else {
            (0..ROWS).collect()
        }
    }

    fn cols(&self) -> Vec<usize> {
        if self.flipped {
            (0..COLS).rev().collect()
        } else {
            (0..COLS).collect()
        }
    }
}

fn piece_span(piece: Option<Piece>) -> (&'static str, Style) {
    match piece {
        None => ("   ", Style::default()),
        Some(p) => {
            let symbol = if p.is_king() { " ♛ " } else { " ● " };
            let color = match p.owner() {
                Player::Black => Color::Red,
                Player::White => Color::White,
            };
            (symbol, Style::default().fg(color).add_modifier(Modifier::BOLD))
        }
    }
}

/// Lines of the bordered board with coordinates along the edges.
pub fn board_lines(board: &Board, view: &BoardView) -> Vec<Line<'static>> {
    let cols = view.cols();
    let mut lines = Vec::with_capacity(ROWS + 4);

    let mut header = vec![Span::raw("    ")];
    header.extend(cols.iter().map(|c| Span::raw(format!(" {c} "))));
    lines.push(Line::from(header.clone()));
    lines.push(Line::from(format!("   ╔{}╗", "═".repeat(COLS * 3))));

    for row in view.rows() {
        let mut spans = vec![Span::raw(format!(" {row} ║"))];
        for &col in &cols {
            let pos = Position::new(row, col);
            let (mut symbol, mut style) = piece_span(board.get(pos));

            let background = if !pos.is_dark() {
                Color::Gray
            } else if view.cursor == Some(pos) {
                Color::Cyan
            } else if view.selected == Some(pos) {
                Color::Yellow
            } else if view.movable.contains(&pos) {
                Color::Magenta
            } else if view
                .last_move
                .is_some_and(|(from, to)| from == pos || to == pos)
            {
                Color::Blue
            } else {
                Color::DarkGray
            };
            style = style.bg(background);

            if symbol.trim().is_empty() && view.destinations.contains(&pos) {
                symbol = " ◦ ";
                style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(symbol, style));
        }
        spans.push(Span::raw(format!("║ {row}")));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(format!("   ╚{}╝", "═".repeat(COLS * 3))));
    lines.push(Line::from(header));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BoardState;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_board_lines_layout() {
        let state = BoardState::initial();
        let lines = board_lines(state.board(), &BoardView::default());
        assert_eq!(lines.len(), ROWS + 4);
        assert!(line_text(&lines[2]).starts_with(" 0 ║"));
        assert!(line_text(&lines[ROWS + 1]).starts_with(" 7 ║"));
    }

    #[test]
    fn test_flipped_board_puts_row_seven_on_top() {
        let state = BoardState::initial();
        let view = BoardView {
            flipped: true,
            ..Default::default()
        };
        let lines = board_lines(state.board(), &view);
        assert!(line_text(&lines[2]).starts_with(" 7 ║"));
        assert!(line_text(&lines[0]).trim_start().starts_with("7"));
    }

    #[test]
    fn test_destinations_are_marked() {
        let state = BoardState::initial();
        let view = BoardView {
            destinations: vec![Position::new(3, 0)],
            ..Default::default()
        };
        let lines = board_lines(state.board(), &view);
        assert!(line_text(&lines[2 + 3]).contains('◦'));
        assert!(!line_text(&lines[2 + 4]).contains('◦'));
    }
}
