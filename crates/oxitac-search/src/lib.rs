//! Move search for the alignment games: static evaluation plus
//! depth-bounded minimax with alpha-beta pruning.
//!
//! The search is the rules-perfect opponent the neural network is trained
//! against and graded by. It owns no state; it drives any
//! [`oxitac_engine::GameEngine`] through strict apply/undo bracketing and
//! scores positions with a per-game [`evaluator::PositionEvaluator`].

pub use self::{evaluator::*, minimax::*};

pub mod evaluator;
pub mod minimax;
