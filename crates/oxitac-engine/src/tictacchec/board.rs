use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::core::{Coordinate, PieceKind, Player, lines};

/// Board size (4×4).
pub const SIZE: u8 = 4;

/// Number of squares.
pub const SQUARES: usize = (SIZE as usize) * (SIZE as usize);

/// Number of fixed geometric lines (4 rows, 4 columns, 2 diagonals).
pub const LINES: usize = 10;

/// State of one square of the 4×4 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SquareState {
    Empty,
    Occupied { player: Player, piece: PieceKind },
}

impl SquareState {
    #[must_use]
    pub fn occupant(self) -> Option<(Player, PieceKind)> {
        match self {
            SquareState::Empty => None,
            SquareState::Occupied { player, piece } => Some((player, piece)),
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, SquareState::Empty)
    }
}

/// Where each of a player's four pieces sits, indexed by piece kind.
/// `None` means the piece is pocketed.
type PieceIndex = [Option<Coordinate>; PieceKind::LEN];

/// The 4×4 board: a square grid plus a per-player index from piece kind to
/// coordinate, kept in sync by the single cell mutator.
///
/// Each player owns exactly one piece of each kind, so the index gives O(1)
/// source lookup for movement rules and undo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [SquareState; SQUARES],
    pieces: [PieceIndex; 2],
}

impl Default for SquareState {
    fn default() -> Self {
        SquareState::Empty
    }
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State of the square at `coordinate`. Out-of-range coordinates are a
    /// caller contract violation checked by the move legality layer.
    #[must_use]
    pub fn get(&self, coordinate: Coordinate) -> SquareState {
        self.cells[coordinate.index(SIZE)]
    }

    /// Writes a square, atomically updating both players' piece indexes:
    /// the previous occupant (if any) becomes pocketed, the new occupant
    /// (if any) is registered at `coordinate`.
    pub(crate) fn set(&mut self, coordinate: Coordinate, state: SquareState) {
        if let Some((player, piece)) = self.cells[coordinate.index(SIZE)].occupant() {
            self.pieces[player.index()][piece.index()] = None;
        }
        if let Some((player, piece)) = state.occupant() {
            self.pieces[player.index()][piece.index()] = Some(coordinate);
        }
        self.cells[coordinate.index(SIZE)] = state;
    }

    /// Where `player`'s `piece` sits, or `None` while it is pocketed.
    #[must_use]
    pub fn coordinate_of(&self, player: Player, piece: PieceKind) -> Option<Coordinate> {
        self.pieces[player.index()][piece.index()]
    }

    /// How many of `player`'s pieces are on the board.
    #[must_use]
    pub fn piece_count(&self, player: Player) -> usize {
        self.pieces[player.index()].iter().flatten().count()
    }

    /// `player`'s piece kinds currently held in the pocket.
    #[must_use]
    pub fn pocketed_pieces(&self, player: Player) -> ArrayVec<PieceKind, { PieceKind::LEN }> {
        PieceKind::ALL
            .into_iter()
            .filter(|&kind| self.coordinate_of(player, kind).is_none())
            .collect()
    }

    /// How many of `player`'s pieces sit on each fixed line.
    #[must_use]
    pub fn line_counts(&self, player: Player) -> ArrayVec<usize, LINES> {
        lines(SIZE)
            .map(|line| {
                line.iter()
                    .filter(|&&c| {
                        self.get(c)
                            .occupant()
                            .is_some_and(|(owner, _)| owner == player)
                    })
                    .count()
            })
            .collect()
    }

    /// The best alignment `player` currently has on any line.
    #[must_use]
    pub fn max_aligned(&self, player: Player) -> usize {
        self.line_counts(player).into_iter().max().unwrap_or(0)
    }

    /// Whether `player`'s full piece set occupies one line. Only possible
    /// with all four pieces on the board.
    #[must_use]
    pub fn has_winning_line(&self, player: Player) -> bool {
        self.piece_count(player) == PieceKind::LEN
            && self.max_aligned(player) >= usize::from(SIZE)
    }
}
