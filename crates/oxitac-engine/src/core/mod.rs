pub use self::{coordinate::*, lines::*, piece::*, player::*};

pub mod coordinate;
pub mod lines;
pub mod piece;
pub mod player;
