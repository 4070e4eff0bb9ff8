use serde::{Deserialize, Serialize};

/// A square on a row-major game board.
///
/// Coordinates are plain data and carry no board size; conversions to and
/// from flat indexes take the board width explicitly. `(0, 0)` is the
/// top-left square, `x` grows rightward and `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Coordinate {
    x: u8,
    y: u8,
}

impl Coordinate {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Converts a flat row-major index into a coordinate.
    #[must_use]
    pub fn from_index(index: usize, width: u8) -> Self {
        let width = usize::from(width);
        Self::new(
            u8::try_from(index % width).unwrap(),
            u8::try_from(index / width).unwrap(),
        )
    }

    /// Converts this coordinate into a flat row-major index.
    #[must_use]
    pub fn index(self, width: u8) -> usize {
        usize::from(self.y) * usize::from(width) + usize::from(self.x)
    }

    /// Returns whether this coordinate lies on a `size` × `size` board.
    #[must_use]
    pub const fn in_bounds(self, size: u8) -> bool {
        self.x < size && self.y < size
    }

    /// The same square seen from the other side of the board (the board
    /// rotated 180°). Pure; used to render either player's perspective.
    #[must_use]
    pub const fn inverted(self, size: u8) -> Self {
        Self::new(size - 1 - self.x, size - 1 - self.y)
    }
}
