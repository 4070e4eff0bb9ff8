//! Depth-bounded minimax with alpha-beta pruning.
//!
//! The search drives a [`GameEngine`] through strict `perform_move`/`undo`
//! bracketing: every explored move is wrapped in an [`AppliedMove`] guard
//! that undoes on scope exit, so pruning and early returns can never leave
//! a move applied.

use std::collections::HashMap;

use oxitac_engine::{GameEngine, GameState, IllegalMoveError, Player};
use rand::{Rng, seq::IndexedRandom};

use crate::evaluator::PositionEvaluator;

/// Score of a branch that ends in a win for the searching side.
const WIN_SCORE: i32 = 10_000;

/// Draw scores are deliberately asymmetric: a draw reached on the
/// maximizing side is scored -20 (also used for drawing root moves), while
/// a draw reached on the minimizing side is scored +15. The engine thus
/// avoids steering into draws itself but treats an opponent forced into a
/// draw as mildly favorable.
const MAXIMIZING_DRAW_SCORE: i32 = -20;
const MINIMIZING_DRAW_SCORE: i32 = 15;

/// A move applied to the engine for the lifetime of this guard; dropping it
/// undoes the move. This guarantees the undo runs on every exit path out of
/// a search frame.
pub struct AppliedMove<'a, G: GameEngine> {
    game: &'a mut G,
}

impl<'a, G: GameEngine> AppliedMove<'a, G> {
    /// Applies `mv`, failing without touching the engine if it is illegal.
    pub fn apply(game: &'a mut G, mv: G::Move) -> Result<Self, IllegalMoveError> {
        game.perform_move(mv)?;
        Ok(Self { game })
    }

    /// Game state after the applied move.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.game.state()
    }

    /// The engine with the move applied, for recursion.
    pub fn game_mut(&mut self) -> &mut G {
        self.game
    }
}

impl<G: GameEngine> Drop for AppliedMove<'_, G> {
    fn drop(&mut self) {
        self.game.undo_move();
    }
}

/// The exact-tie best root moves and the full move→score map of one search.
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    /// Root moves tied for the best score, in legal-move order.
    pub best_moves: Vec<M>,
    /// Score of every legal root move.
    pub scores: HashMap<M, i32>,
}

/// Minimax driver parameterized over the static evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxSearch<E> {
    evaluator: E,
}

impl<E> MinimaxSearch<E> {
    #[must_use]
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    /// Picks a move for the player to move: uniformly at random among the
    /// root moves tied for the best score, or `None` when the game is over.
    pub fn find_move<G, R>(&self, game: &mut G, rng: &mut R) -> Option<G::Move>
    where
        G: GameEngine,
        E: PositionEvaluator<G>,
        R: Rng + ?Sized,
    {
        if !game.state().is_ongoing() {
            return None;
        }
        self.find_best_moves(game).best_moves.choose(rng).copied()
    }

    /// Scores every legal root move one ply deep plus a minimax search of
    /// the reply tree, and collects the set tied for the best score.
    ///
    /// The engine is returned to its entry state before this returns.
    ///
    /// # Panics
    ///
    /// Panics if no legal move exists; callers must check the game state
    /// first.
    pub fn find_best_moves<G>(&self, game: &mut G) -> SearchResult<G::Move>
    where
        G: GameEngine,
        E: PositionEvaluator<G>,
    {
        let legal_moves = game.legal_moves();
        assert!(!legal_moves.is_empty(), "no legal moves available");
        let player = game.turn();
        let mut best_score = i32::MIN;
        let mut best_moves: Vec<G::Move> = Vec::new();
        let mut scores = HashMap::new();
        for mv in legal_moves {
            let (value, joins_ties) = {
                let mut applied = AppliedMove::apply(game, mv).expect("legal root move");
                match applied.state() {
                    GameState::Won(_) => (WIN_SCORE, true),
                    // A drawing root move replaces the best only when
                    // strictly better; tied draws stay out of the
                    // tie-break set.
                    GameState::Draw => (MAXIMIZING_DRAW_SCORE, false),
                    GameState::Ongoing => {
                        let game = applied.game_mut();
                        let depth = game.search_depth(player);
                        (
                            self.minimax(game, depth, i32::MIN, i32::MAX, false, player),
                            true,
                        )
                    }
                }
            };
            scores.insert(mv, value);
            if best_score < value {
                best_score = value;
                best_moves = vec![mv];
            } else if joins_ties && best_score == value {
                best_moves.push(mv);
            }
        }
        SearchResult { best_moves, scores }
    }

    fn minimax<G>(
        &self,
        game: &mut G,
        depth: i32,
        mut alpha: i32,
        mut beta: i32,
        maximize: bool,
        player: Player,
    ) -> i32
    where
        G: GameEngine,
        E: PositionEvaluator<G>,
    {
        if depth <= 0 {
            let score = self.evaluator.evaluate(game);
            return if player == Player::White { score } else { -score };
        }
        let legal_moves = game.legal_moves();
        if maximize {
            let mut best = -WIN_SCORE;
            for mv in legal_moves {
                let value = {
                    let mut applied = AppliedMove::apply(game, mv).expect("legal move");
                    match applied.state() {
                        GameState::Won(_) => WIN_SCORE,
                        GameState::Draw => MAXIMIZING_DRAW_SCORE,
                        GameState::Ongoing => self.minimax(
                            applied.game_mut(),
                            depth - 1,
                            alpha,
                            beta,
                            false,
                            player,
                        ),
                    }
                };
                best = best.max(value);
                alpha = alpha.max(best);
                if beta <= alpha {
                    return best;
                }
            }
            best
        } else {
            let mut best = WIN_SCORE;
            for mv in legal_moves {
                let value = {
                    let mut applied = AppliedMove::apply(game, mv).expect("legal move");
                    match applied.state() {
                        GameState::Won(_) => -WIN_SCORE,
                        GameState::Draw => MINIMIZING_DRAW_SCORE,
                        GameState::Ongoing => self.minimax(
                            applied.game_mut(),
                            depth - 1,
                            alpha,
                            beta,
                            true,
                            player,
                        ),
                    }
                };
                best = best.min(value);
                beta = beta.min(best);
                if beta <= alpha {
                    return best;
                }
            }
            best
        }
    }
}
