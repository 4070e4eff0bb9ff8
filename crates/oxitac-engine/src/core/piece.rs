use serde::{Deserialize, Serialize};

/// The four chess-like piece kinds of the 4×4 game.
///
/// The set is closed and small; per-kind movement rules are dispatched by
/// matching on the tag rather than through trait objects, which keeps every
/// rule an independently testable function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
}

impl PieceKind {
    /// Number of piece kinds (4). Each player owns exactly one of each.
    pub const LEN: usize = 4;

    pub const ALL: [PieceKind; PieceKind::LEN] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
    ];

    /// Index used for per-kind storage (`[T; 4]` arrays) and for the
    /// network's output slot layout.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        PieceKind::ALL.get(index).copied()
    }

    /// Returns the single character representation of this piece kind.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
        }
    }

    /// Parses a piece kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'P' | 'p' => Some(PieceKind::Pawn),
            'N' | 'n' => Some(PieceKind::Knight),
            'B' | 'b' => Some(PieceKind::Bishop),
            'R' | 'r' => Some(PieceKind::Rook),
            _ => None,
        }
    }
}

/// Direction a pawn advances in. Undefined while the pawn is pocketed.
///
/// `Up` means toward row 0. A pawn that reaches the far edge reverses
/// direction instead of promoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum PawnDirection {
    Up,
    Down,
}

impl PawnDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            PawnDirection::Up => PawnDirection::Down,
            PawnDirection::Down => PawnDirection::Up,
        }
    }

    /// Signed row step of one advance: `Up` decreases `y`, `Down` increases it.
    #[must_use]
    pub const fn row_step(self) -> i8 {
        match self {
            PawnDirection::Up => -1,
            PawnDirection::Down => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(PieceKind::from_index(4), None);
    }

    #[test]
    fn test_char_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('Q'), None);
    }

    #[test]
    fn test_pawn_direction() {
        assert_eq!(PawnDirection::Up.reversed(), PawnDirection::Down);
        assert_eq!(PawnDirection::Up.row_step(), -1);
        assert_eq!(PawnDirection::Down.row_step(), 1);
    }
}
