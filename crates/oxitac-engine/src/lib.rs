//! Game engines for two abstract alignment games and their neural-network
//! feature encodings.
//!
//! Two variants share one engine shape:
//!
//! - [`tictactoe`] — a 3×3 placement-only game, win by three in a row.
//! - [`tictacchec`] — a 4×4 hybrid game: pieces are placed, then move and
//!   capture chess-style; captured pieces return to their owner's pocket.
//!
//! Both implement [`GameEngine`], the surface the search and the network
//! player drive: legal-move queries, `perform_move`/`undo_move` with exact
//! state restoration, and terminal-state detection. [`encoding`] maps a
//! position to the fixed numeric vector a network consumes and maps network
//! output slots back to moves.

pub use self::core::*;

pub mod core;
pub mod encoding;
pub mod tictacchec;
pub mod tictactoe;

/// Rejected move: the target violates the placement/movement/capture rules,
/// the game is already over, or the mover has too few pieces on the board to
/// relocate a placed piece.
///
/// This is a recoverable condition; the engine state is untouched and the
/// caller is expected to pick a different move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("illegal move")]
pub struct IllegalMoveError;

/// A two-player, turn-alternating board game driven by the minimax search
/// and the network player.
///
/// Implementations guarantee:
///
/// - `perform_move` either fails without mutating anything or applies the
///   move, recomputes the game state, and toggles the turn exactly once.
/// - `undo_move` exactly reverses the most recent accepted move (board,
///   turn, auxiliary state) and forces the state back to `Ongoing`; on an
///   empty history it is a silent no-op.
/// - `legal_moves`/`is_legal_move` are pure queries.
pub trait GameEngine {
    /// A candidate move. Cheap to copy and usable as a score-map key.
    type Move: Copy + Eq + std::hash::Hash + std::fmt::Debug;

    /// The player whose turn it is.
    fn turn(&self) -> Player;

    /// Current game state. Terminal states are absorbing.
    fn state(&self) -> GameState;

    /// Whether `mv` is legal for the player to move, without mutating.
    fn is_legal_move(&self, mv: Self::Move) -> bool;

    /// Every legal move for the player to move; empty once the game is over.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Applies `mv`, returning the resulting game state.
    fn perform_move(&mut self, mv: Self::Move) -> Result<GameState, IllegalMoveError>;

    /// Reverses the most recent move; no-op when there is nothing to undo.
    fn undo_move(&mut self);

    /// The most recently applied move, for highlighting.
    fn last_move(&self) -> Option<Self::Move>;

    /// Search depth budget when searching this position on behalf of
    /// `player`. Fixed for the shallow 3×3 game; derived from `player`'s
    /// on-board piece count for the 4×4 game so the tree deepens as the
    /// placement phase progresses.
    fn search_depth(&self, player: Player) -> i32;
}
