use serde::{Deserialize, Serialize};

/// One of the two sides of a game. White always moves first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Player {
    #[default]
    White,
    Black,
}

impl Player {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Index used for per-player storage (`[T; 2]` arrays).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }
}

/// Result of a game, or `Ongoing` while moves are still accepted.
///
/// `Draw` and `Won` are absorbing: once reached, `perform_move` rejects
/// every move until `undo_move` rewinds past the terminal ply.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant, Deserialize, Serialize,
)]
pub enum GameState {
    #[default]
    Ongoing,
    Draw,
    Won(Player),
}
