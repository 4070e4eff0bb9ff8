//! Numeric feature encodings consumed by a neural network.
//!
//! A position is flattened into a fixed-width input vector relative to the
//! player to move, and the network's output vector is interpreted as one
//! score per candidate move slot. The caller walks the outputs from best to
//! worst and plays the first slot whose move is currently legal, so the
//! network never has to learn the rules exactly.

use crate::GameEngine;

/// A game with a fixed network input/output layout.
pub trait NetworkEncoding: GameEngine {
    /// Width of the input vector produced by [`network_inputs`](Self::network_inputs).
    const INPUT_WIDTH: usize;

    /// Number of output slots, one per candidate move.
    const OUTPUT_WIDTH: usize;

    /// Encodes the current position relative to the player to move.
    fn network_inputs(&self) -> Vec<f64>;

    /// The candidate move denoted by an output slot.
    fn move_for_slot(slot: usize) -> Self::Move;

    /// The output slot denoting a move. Inverse of [`move_for_slot`](Self::move_for_slot).
    fn slot_for_move(mv: Self::Move) -> usize;
}

/// Picks the highest-scoring currently-legal move from a network output
/// vector, or `None` when no legal move exists (terminal position).
///
/// # Panics
///
/// Panics if `outputs` does not have exactly [`NetworkEncoding::OUTPUT_WIDTH`]
/// entries.
pub fn select_move<G>(game: &G, outputs: &[f64]) -> Option<G::Move>
where
    G: NetworkEncoding,
{
    assert_eq!(outputs.len(), G::OUTPUT_WIDTH, "output width mismatch");
    let mut slots: Vec<usize> = (0..outputs.len()).collect();
    // Sigmoid outputs are never NaN, so the total order is safe.
    slots.sort_by(|&a, &b| outputs[b].partial_cmp(&outputs[a]).unwrap());
    slots
        .into_iter()
        .map(G::move_for_slot)
        .find(|&mv| game.is_legal_move(mv))
}
