use std::fmt;

use crate::error::{DiagramError, MoveError};

use super::board::{Board, Piece, Position, COLS, ROWS};
use super::player::Player;

/// Whether a move is a single diagonal step or a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Step,
    Jump,
}

/// One position of a game. States are never mutated once built: every move
/// produces a new value, so a game history is just a sequence of states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    board: Board,
    turn: Player,
    last_move: Option<(Position, Position)>,
    /// Square of the piece that must keep jumping, set only mid multi-jump.
    multi_jump_origin: Option<Position>,
    piece_count: [u8; 2],
    king_count: [u8; 2],
}

impl BoardState {
    pub const DEFAULT_FIRST_PLAYER: Player = Player::Black;

    /// Create initial game state
    pub fn initial() -> Self {
        Self::with_first_player(Self::DEFAULT_FIRST_PLAYER)
    }

    /// Standard starting layout with the given side to move
    pub fn with_first_player(first: Player) -> Self {
        Self::from_board(Board::standard(), first)
    }

    /// Build an arbitrary position. Counts are derived once here and kept
    /// incrementally afterwards. Pieces must stand on dark squares, as in
    /// [`BoardState::parse`].
    pub fn from_pieces<I>(turn: Player, pieces: I) -> Result<Self, MoveError>
    where
        I: IntoIterator<Item = (Position, Piece)>,
    {
        let mut board = Board::new();
        for (pos, piece) in pieces {
            if !pos.is_valid() {
                return Err(MoveError::OffBoard(pos));
            }
            if !pos.is_dark() {
                return Err(MoveError::LightSquare(pos));
            }
            board.set(pos, Some(piece));
        }
        Ok(Self::from_board(board, turn))
    }

    /// Read a position from an 8-line diagram: `b`/`B` Black man/king,
    /// `w`/`W` White man/king, `.` empty. Whitespace inside a row is ignored.
    pub fn parse(turn: Player, diagram: &str) -> Result<Self, DiagramError> {
        let rows: Vec<&str> = diagram
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != ROWS {
            return Err(DiagramError::RowCount(rows.len()));
        }

        let mut board = Board::new();
        for (row, line) in rows.iter().enumerate() {
            let squares: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if squares.len() != COLS {
                return Err(DiagramError::RowLength {
                    row,
                    len: squares.len(),
                });
            }
            for (col, &symbol) in squares.iter().enumerate() {
                if symbol == '.' {
                    continue;
                }
                let piece = Piece::from_symbol(symbol)
                    .ok_or(DiagramError::UnknownSymbol { row, col, symbol })?;
                let pos = Position::new(row, col);
                if !pos.is_dark() {
                    return Err(DiagramError::LightSquare { row, col });
                }
                board.set(pos, Some(piece));
            }
        }
        Ok(Self::from_board(board, turn))
    }

    fn from_board(board: Board, turn: Player) -> Self {
        let mut piece_count = [0u8; 2];
        let mut king_count = [0u8; 2];
        for (_, piece) in board.pieces() {
            let idx = piece.owner().index();
            piece_count[idx] += 1;
            if piece.is_king() {
                king_count[idx] += 1;
            }
        }
        BoardState {
            board,
            turn,
            last_move: None,
            multi_jump_origin: None,
            piece_count,
            king_count,
        }
    }

    /// Player to move
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.board.get(pos)
    }

    /// `(from, to)` of the move that produced this state
    pub fn last_move(&self) -> Option<(Position, Position)> {
        self.last_move
    }

    /// Square jumped over by the move that produced this state, if it was a capture
    pub fn last_capture(&self) -> Option<Position> {
        self.last_move
            .filter(|(from, to)| from.row.abs_diff(to.row) == 2)
            .map(|(from, to)| from.midpoint(to))
    }

    pub fn multi_jump_origin(&self) -> Option<Position> {
        self.multi_jump_origin
    }

    pub fn piece_count(&self, player: Player) -> usize {
        usize::from(self.piece_count[player.index()])
    }

    pub fn king_count(&self, player: Player) -> usize {
        usize::from(self.king_count[player.index()])
    }

    /// Check if either side has run out of pieces
    pub fn is_game_over(&self) -> bool {
        Player::ALL.iter().any(|&p| self.piece_count(p) == 0)
    }

    /// The side still holding pieces once the other has none
    pub fn winner(&self) -> Option<Player> {
        Player::ALL
            .into_iter()
            .find(|&p| self.piece_count(p) > 0 && self.piece_count(p.other()) == 0)
    }

    /// Material balance from `perspective`'s point of view, kings counting
    /// double. A decided game scores `i32::MAX` or `i32::MIN`.
    pub fn evaluate_heuristic(&self, perspective: Player) -> i32 {
        let opponent = perspective.other();
        if self.piece_count(opponent) == 0 {
            return i32::MAX;
        }
        if self.piece_count(perspective) == 0 {
            return i32::MIN;
        }
        self.material(perspective) - self.material(opponent)
    }

    fn material(&self, player: Player) -> i32 {
        i32::from(self.piece_count[player.index()]) + i32::from(self.king_count[player.index()])
    }

    /// All legal successor states. Captures are mandatory: if the side to
    /// move has any jump, only jumps are returned. Empty iff the side to move
    /// is blocked or has no pieces.
    pub fn successors(&self) -> Vec<BoardState> {
        let jumps = self.successors_of(MoveKind::Jump);
        if !jumps.is_empty() {
            return jumps;
        }
        self.successors_of(MoveKind::Step)
    }

    /// Successors of one kind over every piece of the side to move, in
    /// row-major piece order.
    pub fn successors_of(&self, kind: MoveKind) -> Vec<BoardState> {
        self.board
            .pieces()
            .filter(|(_, piece)| piece.owner() == self.turn)
            .flat_map(|(pos, piece)| self.moves_for(pos, piece, kind))
            .collect()
    }

    /// Successors of the piece at `pos`, still forced to jumps when a jump
    /// exists anywhere on the board.
    pub fn successors_from(&self, pos: Position) -> Result<Vec<BoardState>, MoveError> {
        let kind = if self.has_jump() {
            MoveKind::Jump
        } else {
            MoveKind::Step
        };
        self.piece_successors(pos, kind)
    }

    /// Successors of one kind for the piece at `pos`, ignoring the
    /// mandatory-capture rule.
    pub fn piece_successors(
        &self,
        pos: Position,
        kind: MoveKind,
    ) -> Result<Vec<BoardState>, MoveError> {
        let piece = self.owned_piece(pos)?;
        Ok(self.moves_for(pos, piece, kind))
    }

    fn owned_piece(&self, pos: Position) -> Result<Piece, MoveError> {
        if !pos.is_valid() {
            return Err(MoveError::OffBoard(pos));
        }
        match self.board.get(pos) {
            Some(piece) if piece.owner() == self.turn => Ok(piece),
            _ => Err(MoveError::NotOwnedByMover {
                position: pos,
                turn: self.turn,
            }),
        }
    }

    fn has_jump(&self) -> bool {
        self.board
            .pieces()
            .filter(|(pos, piece)| piece.owner() == self.turn && self.may_move(*pos))
            .any(|(pos, piece)| self.jump_targets(pos, piece).next().is_some())
    }

    /// Mid multi-jump only the jumping piece may move.
    fn may_move(&self, pos: Position) -> bool {
        self.multi_jump_origin.map_or(true, |origin| origin == pos)
    }

    fn moves_for(&self, from: Position, piece: Piece, kind: MoveKind) -> Vec<BoardState> {
        if !self.may_move(from) {
            return Vec::new();
        }
        match kind {
            MoveKind::Jump => self
                .jump_targets(from, piece)
                .map(|to| self.apply_move(from, to, piece, kind))
                .collect(),
            MoveKind::Step if self.multi_jump_origin.is_some() => Vec::new(),
            MoveKind::Step => self
                .step_targets(from, piece)
                .map(|to| self.apply_move(from, to, piece, kind))
                .collect(),
        }
    }

    fn step_targets(&self, from: Position, piece: Piece) -> impl Iterator<Item = Position> + '_ {
        piece
            .step_directions()
            .iter()
            .filter_map(move |&(dr, dc)| from.offset(dr, dc))
            .filter(move |&to| self.board.get(to).is_none())
    }

    /// Landing squares of every capture available to `piece` standing on `from`.
    fn jump_targets(&self, from: Position, piece: Piece) -> impl Iterator<Item = Position> + '_ {
        piece.jump_directions().iter().filter_map(move |&(dr, dc)| {
            let over = from.offset(dr, dc)?;
            let landing = over.offset(dr, dc)?;
            let jumped = self.board.get(over)?;
            let legal = jumped.owner() != piece.owner() && self.board.get(landing).is_none();
            legal.then_some(landing)
        })
    }

    fn apply_move(&self, from: Position, to: Position, piece: Piece, kind: MoveKind) -> BoardState {
        let mut next = *self;
        let mover = piece.owner();
        let opponent = mover.other();

        let crowned = to.row == mover.crowning_row() && !piece.is_king();
        let piece = if crowned {
            next.king_count[mover.index()] += 1;
            piece.crowned()
        } else {
            piece
        };

        next.board.set(from, None);
        next.board.set(to, Some(piece));
        next.last_move = Some((from, to));
        next.multi_jump_origin = None;
        next.turn = opponent;

        if kind == MoveKind::Jump {
            let over = from.midpoint(to);
            if let Some(jumped) = next.board.get(over) {
                next.board.set(over, None);
                next.piece_count[opponent.index()] -= 1;
                if jumped.is_king() {
                    next.king_count[opponent.index()] -= 1;
                }
            }
            // A piece crowned by this jump ends the turn.
            let continues = !crowned && next.jump_targets(to, piece).next().is_some();
            if continues {
                next.turn = mover;
                next.multi_jump_origin = Some(to);
            }
        }

        next
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            for col in 0..COLS {
                let symbol = self
                    .board
                    .get(Position::new(row, col))
                    .map_or('.', Piece::symbol);
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
