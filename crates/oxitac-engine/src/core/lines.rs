use arrayvec::ArrayVec;

use super::coordinate::Coordinate;

/// Maximum board size supported by the fixed line geometry.
pub const MAX_LINE_LEN: usize = 4;

/// A full row, column, or principal diagonal of a square board.
pub type Line = ArrayVec<Coordinate, MAX_LINE_LEN>;

/// Returns the fixed geometric lines of a `size` × `size` board: every row,
/// every column, and both principal diagonals.
///
/// Win detection and evaluation both count a player's pieces per line, so
/// the geometry lives in one place.
///
/// # Panics
///
/// Panics if `size` exceeds [`MAX_LINE_LEN`].
pub fn lines(size: u8) -> impl Iterator<Item = Line> {
    assert!(usize::from(size) <= MAX_LINE_LEN);
    let rows = (0..size).map(move |y| (0..size).map(|x| Coordinate::new(x, y)).collect::<Line>());
    let columns =
        (0..size).map(move |x| (0..size).map(|y| Coordinate::new(x, y)).collect::<Line>());
    let diagonal: Line = (0..size).map(|i| Coordinate::new(i, i)).collect();
    let anti_diagonal: Line = (0..size).map(|i| Coordinate::new(size - 1 - i, i)).collect();
    rows.chain(columns).chain([diagonal, anti_diagonal])
}
