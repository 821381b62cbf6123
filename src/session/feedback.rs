use std::fmt;

/// Why a selected piece offers no moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveFeedback {
    /// Another piece has a capture, which must be taken.
    ForcedJump,
    /// The piece itself has nowhere to go.
    PieceBlocked,
}

impl fmt::Display for MoveFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveFeedback::ForcedJump => f.write_str("You're forced to take."),
            MoveFeedback::PieceBlocked => f.write_str("This piece has no diagonal moves."),
        }
    }
}
