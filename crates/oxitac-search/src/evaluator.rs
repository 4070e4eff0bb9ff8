//! Static position evaluation.
//!
//! An evaluator scores a position from White's perspective; the search
//! negates the value when it runs for Black. Scores are heuristic except at
//! terminal positions, which collapse to a fixed ±[`TERMINAL_SCORE`] or the
//! draw value.

use oxitac_engine::{
    Coordinate, GameEngine, GameState, PieceKind, Player,
    tictacchec::{self, TicTacChec},
    tictactoe::TicTacToe,
};

/// Score of a decided position (positive when White has won).
pub const TERMINAL_SCORE: i32 = 1000;

/// Scores a position from White's perspective. This is the seam the search
/// is generic over, so tests can swap in fixed-value evaluators.
pub trait PositionEvaluator<G> {
    fn evaluate(&self, game: &G) -> i32;
}

fn terminal_score(state: GameState) -> Option<i32> {
    match state {
        GameState::Ongoing => None,
        GameState::Draw => Some(0),
        GameState::Won(Player::White) => Some(TERMINAL_SCORE),
        GameState::Won(Player::Black) => Some(-TERMINAL_SCORE),
    }
}

/// Heuristic for the 3×3 placement game: partial alignments are worth a
/// capped table value, and holding two open lines of two at once is scored
/// as already winning (the opponent can only block one).
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToeEvaluator;

impl TicTacToeEvaluator {
    fn side_score(game: &TicTacToe, player: Player) -> i32 {
        let counts = game.board().line_counts(player);
        let best = counts.iter().copied().max().unwrap_or(0);
        match best {
            0 => 0,
            1 => 5,
            2 => {
                if counts.iter().filter(|&&n| n == 2).count() == 2 {
                    TERMINAL_SCORE
                } else {
                    25
                }
            }
            _ => TERMINAL_SCORE,
        }
    }
}

impl PositionEvaluator<TicTacToe> for TicTacToeEvaluator {
    fn evaluate(&self, game: &TicTacToe) -> i32 {
        if let Some(score) = terminal_score(game.state()) {
            return score;
        }
        Self::side_score(game, Player::White) - Self::side_score(game, Player::Black)
    }
}

/// Heuristic for the 4×4 game: alignment grows cubically, long-range pieces
/// prefer the four central squares, the knight avoids corners, the pawn is
/// penalized on the rim, and keeping a piece pocketed is worth a little
/// flexibility.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacChecEvaluator;

const SIZE: u8 = tictacchec::SIZE;

fn is_central(c: Coordinate) -> bool {
    (1..SIZE - 1).contains(&c.x()) && (1..SIZE - 1).contains(&c.y())
}

fn is_corner(c: Coordinate) -> bool {
    (c.x() == 0 || c.x() == SIZE - 1) && (c.y() == 0 || c.y() == SIZE - 1)
}

fn is_rim(c: Coordinate) -> bool {
    !is_central(c)
}

impl TicTacChecEvaluator {
    fn side_score(game: &TicTacChec, player: Player) -> i32 {
        let board = game.board();
        let aligned = board.max_aligned(player);
        if aligned >= PieceKind::LEN {
            return TERMINAL_SCORE;
        }
        let aligned = i32::try_from(aligned).unwrap();
        let mut score = aligned.pow(3);
        if board.piece_count(player) == PieceKind::LEN {
            // No piece in reserve.
            score -= 5;
        }
        if let Some(c) = board.coordinate_of(player, PieceKind::Rook) {
            score += if is_central(c) { 6 } else { 4 };
        }
        if let Some(c) = board.coordinate_of(player, PieceKind::Bishop) {
            score += if is_central(c) { 5 } else { 3 };
        }
        if let Some(c) = board.coordinate_of(player, PieceKind::Knight) {
            score += if is_corner(c) { 2 } else { 5 };
        }
        if let Some(c) = board.coordinate_of(player, PieceKind::Pawn) {
            if is_rim(c) {
                score -= 5;
            }
        }
        score
    }
}

impl PositionEvaluator<TicTacChec> for TicTacChecEvaluator {
    fn evaluate(&self, game: &TicTacChec) -> i32 {
        if let Some(score) = terminal_score(game.state()) {
            return score;
        }
        Self::side_score(game, Player::White) - Self::side_score(game, Player::Black)
    }
}
