use super::player::Player;

pub const ROWS: usize = 8;
pub const COLS: usize = 8;

/// Rows each side fills in the starting layout.
const STARTING_ROWS: usize = 3;

/// The four diagonal directions as (row, col) deltas.
pub(crate) const DIAGONALS: [(isize, isize); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

const BLACK_FORWARD: [(isize, isize); 2] = [(1, -1), (1, 1)];
const WHITE_FORWARD: [(isize, isize); 2] = [(-1, -1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// True if both coordinates are on the board
    pub fn is_valid(self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// Playable squares are the ones where row + col is odd
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Square reached by moving `dr` rows and `dc` columns, if still on the board
    pub fn offset(self, dr: isize, dc: isize) -> Option<Position> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let pos = Position { row, col };
        pos.is_valid().then_some(pos)
    }

    /// Square halfway between two squares two diagonals apart
    pub(crate) fn midpoint(self, other: Position) -> Position {
        Position {
            row: (self.row + other.row) / 2,
            col: (self.col + other.col) / 2,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    owner: Player,
    king: bool,
}

impl Piece {
    pub const fn man(owner: Player) -> Self {
        Piece { owner, king: false }
    }

    pub const fn king(owner: Player) -> Self {
        Piece { owner, king: true }
    }

    pub fn owner(self) -> Player {
        self.owner
    }

    pub fn is_king(self) -> bool {
        self.king
    }

    /// A king copy of this piece
    pub fn crowned(self) -> Piece {
        Piece::king(self.owner)
    }

    /// Directions for a non-capturing step: men only go forward.
    pub(crate) fn step_directions(self) -> &'static [(isize, isize)] {
        if self.king {
            &DIAGONALS
        } else {
            match self.owner {
                Player::Black => &BLACK_FORWARD,
                Player::White => &WHITE_FORWARD,
            }
        }
    }

    /// Directions for a capture: every piece may jump along all four diagonals.
    pub(crate) fn jump_directions(self) -> &'static [(isize, isize)] {
        &DIAGONALS
    }

    /// Diagram symbol: `b`/`B` for Black man/king, `w`/`W` for White.
    pub fn symbol(self) -> char {
        match (self.owner, self.king) {
            (Player::Black, false) => 'b',
            (Player::Black, true) => 'B',
            (Player::White, false) => 'w',
            (Player::White, true) => 'W',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Piece> {
        match symbol {
            'b' => Some(Piece::man(Player::Black)),
            'B' => Some(Piece::king(Player::Black)),
            'w' => Some(Piece::man(Player::White)),
            'W' => Some(Piece::king(Player::White)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[None; COLS]; ROWS],
        }
    }

    /// Standard starting layout: Black on the first three rows, White on the
    /// last three, dark squares only.
    pub fn standard() -> Self {
        let mut board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                let pos = Position::new(row, col);
                if !pos.is_dark() {
                    continue;
                }
                if row < STARTING_ROWS {
                    board.set(pos, Some(Piece::man(Player::Black)));
                } else if row >= ROWS - STARTING_ROWS {
                    board.set(pos, Some(Piece::man(Player::White)));
                }
            }
        }
        board
    }

    /// Get the piece at a position, `None` for empty or off-board squares
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        self.cells[pos.row][pos.col]
    }

    pub(crate) fn set(&mut self, pos: Position, piece: Option<Piece>) {
        self.cells[pos.row][pos.col] = piece;
    }

    /// Occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|piece| (Position::new(row, col), piece)))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.pieces().count(), 0);
    }

    #[test]
    fn test_standard_layout() {
        let board = Board::standard();
        for player in Player::ALL {
            let count = board.pieces().filter(|(_, p)| p.owner() == player).count();
            assert_eq!(count, 12, "{player} should start with 12 pieces");
        }
        assert!(board.pieces().all(|(pos, piece)| pos.is_dark() && !piece.is_king()));
        assert_eq!(board.get(Position::new(0, 1)), Some(Piece::man(Player::Black)));
        assert_eq!(board.get(Position::new(7, 0)), Some(Piece::man(Player::White)));
        assert_eq!(board.get(Position::new(3, 2)), None);
        assert_eq!(board.get(Position::new(4, 1)), None);
    }

    #[test]
    fn test_offset_stays_on_board() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.offset(-1, 1), None);
        assert_eq!(corner.offset(1, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Position::new(1, 1)));
        assert_eq!(Position::new(7, 6).offset(1, 1), None);
        assert_eq!(Position::new(6, 7).offset(-2, -2), Some(Position::new(4, 5)));
    }

    #[test]
    fn test_midpoint() {
        let from = Position::new(2, 3);
        assert_eq!(from.midpoint(Position::new(4, 5)), Position::new(3, 4));
        assert_eq!(from.midpoint(Position::new(0, 1)), Position::new(1, 2));
    }

    #[test]
    fn test_man_steps_forward_only() {
        let black = Piece::man(Player::Black);
        assert!(black.step_directions().iter().all(|&(dr, _)| dr == 1));
        let white = Piece::man(Player::White);
        assert!(white.step_directions().iter().all(|&(dr, _)| dr == -1));
        assert_eq!(black.crowned().step_directions().len(), 4);
        assert_eq!(white.jump_directions().len(), 4);
    }

    #[test]
    fn test_symbols() {
        for symbol in ['b', 'B', 'w', 'W'] {
            let piece = Piece::from_symbol(symbol).unwrap();
            assert_eq!(piece.symbol(), symbol);
        }
        assert_eq!(Piece::from_symbol('x'), None);
        assert!(Piece::from_symbol('W').unwrap().is_king());
    }
}
