//! A small feed-forward neural network with online backpropagation.
//!
//! The network is the learned alternative to tree search for move
//! selection: it consumes the feature vector a game engine produces and
//! outputs one score per candidate move slot. It knows nothing about games;
//! the engine crate owns the encoding and the caller intersects the sorted
//! outputs with the legal-move set.
//!
//! Persistence is structural only (layers → neurons → weights + bias);
//! transient activation caches and learning rates are never written.

pub use self::{network::*, trainer::*};

pub mod network;
pub mod trainer;
