pub use self::{board::*, game::*};

pub mod board;
pub mod game;
pub mod moves;
