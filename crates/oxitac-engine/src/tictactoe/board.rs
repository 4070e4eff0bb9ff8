use arrayvec::ArrayVec;

use crate::core::{Coordinate, Player, lines};

/// Board size (3×3).
pub const SIZE: u8 = 3;

/// Number of squares.
pub const SQUARES: usize = (SIZE as usize) * (SIZE as usize);

/// Number of fixed geometric lines (3 rows, 3 columns, 2 diagonals).
pub const LINES: usize = 8;

/// The 3×3 placement board. A square is either empty or holds one player's
/// mark; marks never move once placed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Player>; SQUARES],
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State of the square at `coordinate`. Out-of-range coordinates are a
    /// caller contract violation checked by the move legality layer.
    #[must_use]
    pub fn get(&self, coordinate: Coordinate) -> Option<Player> {
        self.cells[coordinate.index(SIZE)]
    }

    pub(crate) fn set(&mut self, coordinate: Coordinate, mark: Option<Player>) {
        self.cells[coordinate.index(SIZE)] = mark;
    }

    /// Whether every square holds a mark.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// How many of `player`'s marks sit on each fixed line.
    #[must_use]
    pub fn line_counts(&self, player: Player) -> ArrayVec<usize, LINES> {
        lines(SIZE)
            .map(|line| {
                line.iter()
                    .filter(|&&c| self.get(c) == Some(player))
                    .count()
            })
            .collect()
    }

    /// The best alignment `player` currently has on any line.
    #[must_use]
    pub fn max_aligned(&self, player: Player) -> usize {
        self.line_counts(player).into_iter().max().unwrap_or(0)
    }

    /// Whether `player` occupies a full line.
    #[must_use]
    pub fn has_winning_line(&self, player: Player) -> bool {
        self.max_aligned(player) >= usize::from(SIZE)
    }
}
