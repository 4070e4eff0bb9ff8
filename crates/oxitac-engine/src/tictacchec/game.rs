use serde::{Deserialize, Serialize};

use crate::{
    GameEngine, IllegalMoveError,
    core::{Coordinate, GameState, PawnDirection, PieceKind, Player},
    encoding::NetworkEncoding,
};

use super::{
    board::{Board, SIZE, SQUARES, SquareState},
    moves,
};

/// A player must have this many pieces on the board before relocating an
/// already-placed piece; the placement phase finishes first.
pub const MIN_PIECES_FOR_MOVEMENT: usize = 3;

/// Hard ply cap; a game this long is declared drawn.
const DRAW_PLY_CAP: usize = 80;

/// Plies of history required before repetition is checked at all.
const REPETITION_MIN_PLIES: usize = 12;

/// A candidate move: which piece to place or move, and where.
///
/// The source square is implicit; each player owns one piece per kind and
/// the board knows where it is (or that it is pocketed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Move {
    pub piece: PieceKind,
    pub to: Coordinate,
}

impl Move {
    #[must_use]
    pub const fn new(piece: PieceKind, to: Coordinate) -> Self {
        Self { piece, to }
    }
}

/// Snapshot needed to exactly reverse one move: where the piece came from
/// (`None` when placed from the pocket), what the target square held, and
/// both pawn directions before the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UndoRecord {
    mv: Move,
    previous_coordinate: Option<Coordinate>,
    previous_square: SquareState,
    pawn_directions: [Option<PawnDirection>; 2],
}

/// The 4×4 hybrid game: place your four pieces, then move and capture
/// chess-style; align the full set on one line to win.
///
/// Captured pieces return to their owner's pocket and can be re-placed on
/// any empty square. A pawn reverses direction on reaching the far edge
/// instead of promoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacChec {
    board: Board,
    turn: Player,
    state: GameState,
    pawn_directions: [Option<PawnDirection>; 2],
    history: Vec<UndoRecord>,
    depth_offset: i32,
}

impl Default for TicTacChec {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacChec {
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::White,
            state: GameState::Ongoing,
            pawn_directions: [None; 2],
            history: Vec::new(),
            depth_offset: 1,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direction `player`'s pawn advances in; `None` while it is pocketed.
    #[must_use]
    pub fn pawn_direction(&self, player: Player) -> Option<PawnDirection> {
        self.pawn_directions[player.index()]
    }

    /// How many plies deep the search runs relative to the mover's on-board
    /// piece count. Raising this plays faster and weaker.
    #[must_use]
    pub fn depth_offset(&self) -> i32 {
        self.depth_offset
    }

    pub fn set_depth_offset(&mut self, depth_offset: i32) {
        self.depth_offset = depth_offset;
    }

    /// Applied moves, oldest first.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|record| record.mv)
    }

    /// Legal target squares for one piece kind, for move entry and
    /// highlighting.
    #[must_use]
    pub fn legal_moves_for_piece(&self, piece: PieceKind) -> Vec<Move> {
        (0..SQUARES)
            .map(|index| Move::new(piece, Coordinate::from_index(index, SIZE)))
            .filter(|&mv| self.is_legal_move(mv))
            .collect()
    }

    /// Draw by exhaustion or by repetition.
    ///
    /// The repetition rule compares fixed-offset windows over the applied
    /// move log (most recent first): the last two moves per side must have
    /// repeated identically across three consecutive cycles.
    fn is_draw(&self) -> bool {
        if self.history.len() < REPETITION_MIN_PLIES {
            return false;
        }
        if self.history.len() >= DRAW_PLY_CAP {
            return true;
        }
        let mv = |age: usize| self.history[self.history.len() - 1 - age].mv;
        mv(0) == mv(4)
            && mv(1) == mv(5)
            && mv(0) == mv(8)
            && mv(1) == mv(9)
            && mv(2) == mv(6)
            && mv(3) == mv(7)
            && mv(2) == mv(10)
            && mv(3) == mv(11)
    }
}

impl GameEngine for TicTacChec {
    type Move = Move;

    fn turn(&self) -> Player {
        self.turn
    }

    fn state(&self) -> GameState {
        self.state
    }

    fn is_legal_move(&self, mv: Move) -> bool {
        if !self.state.is_ongoing() || !mv.to.in_bounds(SIZE) {
            return false;
        }
        let Some(from) = self.board.coordinate_of(self.turn, mv.piece) else {
            // Pocketed pieces may be placed on any empty square.
            return self.board.get(mv.to).is_empty();
        };
        if self.board.piece_count(self.turn) < MIN_PIECES_FOR_MOVEMENT {
            return false;
        }
        let taking = match self.board.get(mv.to).occupant() {
            // Covers "moving" a piece onto its own square.
            Some((owner, _)) if owner == self.turn => return false,
            Some(_) => true,
            None => false,
        };
        match mv.piece {
            PieceKind::Pawn => {
                let direction = self
                    .pawn_direction(self.turn)
                    .expect("a pawn on the board always has a direction");
                moves::pawn_move_is_legal(from, mv.to, direction, taking)
            }
            PieceKind::Knight => moves::knight_move_is_legal(from, mv.to),
            PieceKind::Bishop => moves::bishop_move_is_legal(&self.board, from, mv.to),
            PieceKind::Rook => moves::rook_move_is_legal(&self.board, from, mv.to),
        }
    }

    fn legal_moves(&self) -> Vec<Move> {
        if !self.state.is_ongoing() {
            return Vec::new();
        }
        (0..SQUARES)
            .flat_map(|index| {
                let to = Coordinate::from_index(index, SIZE);
                PieceKind::ALL.into_iter().map(move |piece| Move::new(piece, to))
            })
            .filter(|&mv| self.is_legal_move(mv))
            .collect()
    }

    fn perform_move(&mut self, mv: Move) -> Result<GameState, IllegalMoveError> {
        if !self.is_legal_move(mv) {
            return Err(IllegalMoveError);
        }
        let previous_coordinate = self.board.coordinate_of(self.turn, mv.piece);
        let record = UndoRecord {
            mv,
            previous_coordinate,
            previous_square: self.board.get(mv.to),
            pawn_directions: self.pawn_directions,
        };
        if let Some(from) = previous_coordinate {
            self.board.set(from, SquareState::Empty);
        }
        if let Some((victim, PieceKind::Pawn)) = self.board.get(mv.to).occupant() {
            // The captured pawn is pocketed; its direction is undefined
            // until it is placed again.
            self.pawn_directions[victim.index()] = None;
        }
        self.board.set(
            mv.to,
            SquareState::Occupied {
                player: self.turn,
                piece: mv.piece,
            },
        );
        if mv.piece == PieceKind::Pawn {
            let direction = &mut self.pawn_directions[self.turn.index()];
            if mv.to.y() == 0 {
                *direction = Some(PawnDirection::Down);
            } else if mv.to.y() == SIZE - 1 {
                *direction = Some(PawnDirection::Up);
            } else if previous_coordinate.is_none() {
                // Fresh placement on an interior row: advance toward the
                // opponent's side.
                *direction = Some(match self.turn {
                    Player::White => PawnDirection::Up,
                    Player::Black => PawnDirection::Down,
                });
            }
        }
        self.history.push(record);
        if self.board.has_winning_line(self.turn) {
            self.state = GameState::Won(self.turn);
        } else if self.is_draw() {
            self.state = GameState::Draw;
        }
        self.turn = self.turn.opponent();
        Ok(self.state)
    }

    fn undo_move(&mut self) {
        let Some(record) = self.history.pop() else {
            return;
        };
        self.turn = self.turn.opponent();
        self.board.set(record.mv.to, record.previous_square);
        if let Some(from) = record.previous_coordinate {
            self.board.set(
                from,
                SquareState::Occupied {
                    player: self.turn,
                    piece: record.mv.piece,
                },
            );
        }
        self.state = GameState::Ongoing;
        self.pawn_directions = record.pawn_directions;
    }

    fn last_move(&self) -> Option<Move> {
        self.history.last().map(|record| record.mv)
    }

    fn search_depth(&self, player: Player) -> i32 {
        i32::try_from(self.board.piece_count(player)).unwrap() - self.depth_offset
    }
}

impl NetworkEncoding for TicTacChec {
    // 16 squares with a 9-valued one-hot block each, then both pawn
    // direction scalars (mover first).
    const INPUT_WIDTH: usize = SQUARES * 9 + 2;
    // One output slot per (piece kind, target square) pair.
    const OUTPUT_WIDTH: usize = PieceKind::LEN * SQUARES;

    fn network_inputs(&self) -> Vec<f64> {
        fn direction_input(direction: Option<PawnDirection>) -> f64 {
            match direction {
                Some(PawnDirection::Up) => 1.0,
                Some(PawnDirection::Down) => -1.0,
                None => 0.0,
            }
        }

        let mut inputs = Vec::with_capacity(Self::INPUT_WIDTH);
        for index in 0..SQUARES {
            let square = self.board.get(Coordinate::from_index(index, SIZE));
            let mut block = [0.0; 9];
            block[match square.occupant() {
                None => 0,
                Some((owner, piece)) => {
                    1 + piece.index() + if owner == self.turn { 0 } else { PieceKind::LEN }
                }
            }] = 1.0;
            inputs.extend_from_slice(&block);
        }
        inputs.push(direction_input(self.pawn_direction(self.turn)));
        inputs.push(direction_input(self.pawn_direction(self.turn.opponent())));
        inputs
    }

    fn move_for_slot(slot: usize) -> Move {
        let piece = PieceKind::from_index(slot / SQUARES).expect("slot within output width");
        let to = Coordinate::from_index(slot % SQUARES, SIZE);
        Move::new(piece, to)
    }

    fn slot_for_move(mv: Move) -> usize {
        mv.piece.index() * SQUARES + mv.to.index(SIZE)
    }
}

#[cfg(test)]
mod tests {
    use crate::encoding;

    use super::*;

    fn mv(piece: PieceKind, x: u8, y: u8) -> Move {
        Move::new(piece, Coordinate::new(x, y))
    }

    fn play(game: &mut TicTacChec, moves: &[Move]) {
        for &m in moves {
            game.perform_move(m).unwrap();
        }
    }

    /// White: pawn a3 (0,1), knight a1 (0,3), bishop b1 (1,3).
    /// Black: pawn d2 (3,2), knight d4 (3,0), bishop c4 (2,0).
    /// Both sides have finished the placement minimum; White to move.
    fn developed_game() -> TicTacChec {
        let mut game = TicTacChec::new();
        play(
            &mut game,
            &[
                mv(PieceKind::Pawn, 0, 1),
                mv(PieceKind::Pawn, 3, 2),
                mv(PieceKind::Knight, 0, 3),
                mv(PieceKind::Knight, 3, 0),
                mv(PieceKind::Bishop, 1, 3),
                mv(PieceKind::Bishop, 2, 0),
            ],
        );
        game
    }

    #[test]
    fn test_placement_requires_empty_square() {
        let mut game = TicTacChec::new();
        play(&mut game, &[mv(PieceKind::Pawn, 1, 1)]);
        // Black may not place onto the occupied square.
        assert!(!game.is_legal_move(mv(PieceKind::Rook, 1, 1)));
        // Any empty square is fine.
        assert!(game.is_legal_move(mv(PieceKind::Rook, 2, 2)));
    }

    #[test]
    fn test_movement_locked_until_three_pieces_placed() {
        let mut game = TicTacChec::new();
        play(
            &mut game,
            &[
                mv(PieceKind::Knight, 0, 3),
                mv(PieceKind::Knight, 3, 0),
                mv(PieceKind::Rook, 0, 0),
                mv(PieceKind::Rook, 3, 3),
            ],
        );
        // White has two pieces on the board; relocating the rook is not yet
        // allowed, placing a third piece is.
        assert!(!game.is_legal_move(mv(PieceKind::Rook, 0, 1)));
        assert!(game.is_legal_move(mv(PieceKind::Bishop, 2, 2)));
        play(&mut game, &[mv(PieceKind::Bishop, 2, 2), mv(PieceKind::Bishop, 1, 1)]);
        assert!(game.is_legal_move(mv(PieceKind::Rook, 0, 1)));
    }

    #[test]
    fn test_capture_pockets_piece_for_replacement() {
        let mut game = developed_game();
        // White knight a1 -> b3.
        play(&mut game, &[mv(PieceKind::Knight, 1, 1)]);
        // Black knight d4 captures the white knight on b3.
        let state = game.perform_move(mv(PieceKind::Knight, 1, 1)).unwrap();
        assert_eq!(state, GameState::Ongoing);
        assert_eq!(game.board().coordinate_of(Player::White, PieceKind::Knight), None);
        assert!(
            game.board()
                .pocketed_pieces(Player::White)
                .contains(&PieceKind::Knight)
        );
        // White can place the recaptured knight on any empty square.
        assert!(game.is_legal_move(mv(PieceKind::Knight, 3, 3)));
    }

    #[test]
    fn test_own_square_is_never_a_target() {
        let game = developed_game();
        assert!(!game.is_legal_move(mv(PieceKind::Knight, 1, 3)));
        // "Moving" in place is also rejected.
        assert!(!game.is_legal_move(mv(PieceKind::Knight, 0, 3)));
    }

    #[test]
    fn test_pawn_direction_lifecycle() {
        let mut game = TicTacChec::new();
        assert_eq!(game.pawn_direction(Player::White), None);
        // Interior placement: White advances up, Black down.
        play(&mut game, &[mv(PieceKind::Pawn, 0, 2), mv(PieceKind::Pawn, 3, 1)]);
        assert_eq!(game.pawn_direction(Player::White), Some(PawnDirection::Up));
        assert_eq!(game.pawn_direction(Player::Black), Some(PawnDirection::Down));
    }

    #[test]
    fn test_pawn_placed_on_boundary_row_points_inward() {
        let mut game = TicTacChec::new();
        play(&mut game, &[mv(PieceKind::Pawn, 0, 0), mv(PieceKind::Pawn, 3, 3)]);
        assert_eq!(game.pawn_direction(Player::White), Some(PawnDirection::Down));
        assert_eq!(game.pawn_direction(Player::Black), Some(PawnDirection::Up));
    }

    #[test]
    fn test_pawn_reverses_on_far_edge() {
        let mut game = developed_game();
        // White pawn a3 -> a4 (0,1)->(0,0): reaching row 0 flips it down.
        play(&mut game, &[mv(PieceKind::Pawn, 0, 0)]);
        assert_eq!(game.pawn_direction(Player::White), Some(PawnDirection::Down));
        // Black pawn d2 -> d1 (3,2)->(3,3): reaching row 3 flips it up.
        play(&mut game, &[mv(PieceKind::Pawn, 3, 3)]);
        assert_eq!(game.pawn_direction(Player::Black), Some(PawnDirection::Up));
    }

    #[test]
    fn test_captured_pawn_loses_direction() {
        let mut game = developed_game();
        // White knight a1 -> b3; Black places its rook; White knight then
        // captures the black pawn on d2.
        play(&mut game, &[mv(PieceKind::Knight, 1, 1), mv(PieceKind::Rook, 3, 3)]);
        play(&mut game, &[mv(PieceKind::Knight, 3, 2)]);
        assert_eq!(game.pawn_direction(Player::Black), None);
        assert_eq!(game.board().coordinate_of(Player::Black, PieceKind::Pawn), None);
    }

    #[test]
    fn test_win_requires_all_four_aligned() {
        let mut game = TicTacChec::new();
        play(
            &mut game,
            &[
                mv(PieceKind::Pawn, 0, 1),
                mv(PieceKind::Pawn, 0, 3),
                mv(PieceKind::Knight, 1, 1),
                mv(PieceKind::Knight, 1, 3),
                mv(PieceKind::Bishop, 2, 1),
                mv(PieceKind::Bishop, 2, 3),
            ],
        );
        assert_eq!(game.state(), GameState::Ongoing);
        // White completes the second rank with the rook.
        let state = game.perform_move(mv(PieceKind::Rook, 3, 1)).unwrap();
        assert_eq!(state, GameState::Won(Player::White));
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.perform_move(mv(PieceKind::Rook, 3, 3)), Err(IllegalMoveError));
    }

    #[test]
    fn test_undo_round_trip_over_every_legal_move() {
        let mut game = developed_game();
        let snapshot = game.clone();
        for m in game.legal_moves() {
            game.perform_move(m).unwrap();
            game.undo_move();
            assert_eq!(game, snapshot);
        }
    }

    #[test]
    fn test_undo_restores_capture_and_pawn_direction() {
        let mut game = developed_game();
        play(&mut game, &[mv(PieceKind::Knight, 1, 1), mv(PieceKind::Rook, 3, 3)]);
        let snapshot = game.clone();
        // White knight captures the black pawn on d2.
        play(&mut game, &[mv(PieceKind::Knight, 3, 2)]);
        assert_eq!(game.pawn_direction(Player::Black), None);
        game.undo_move();
        assert_eq!(game, snapshot);
        assert_eq!(game.pawn_direction(Player::Black), Some(PawnDirection::Down));
    }

    #[test]
    fn test_undo_on_empty_history_is_a_no_op() {
        let mut game = TicTacChec::new();
        let snapshot = game.clone();
        game.undo_move();
        assert_eq!(game, snapshot);
    }

    #[test]
    fn test_draw_by_repetition() {
        let mut game = developed_game();
        // Two knights shuffle between the same squares for three full
        // cycles: a1 knight between b3/a1, d4 knight between c2/d4.
        let white_out = mv(PieceKind::Knight, 1, 1);
        let white_back = mv(PieceKind::Knight, 0, 3);
        let black_out = mv(PieceKind::Knight, 2, 2);
        let black_back = mv(PieceKind::Knight, 3, 0);
        let mut state = GameState::Ongoing;
        for _ in 0..3 {
            for m in [white_out, black_out, white_back, black_back] {
                state = game.perform_move(m).unwrap();
            }
        }
        assert_eq!(state, GameState::Draw);
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_no_repetition_draw_before_three_cycles() {
        let mut game = developed_game();
        let white_out = mv(PieceKind::Knight, 1, 1);
        let white_back = mv(PieceKind::Knight, 0, 3);
        let black_out = mv(PieceKind::Knight, 2, 2);
        let black_back = mv(PieceKind::Knight, 3, 0);
        for _ in 0..2 {
            for m in [white_out, black_out, white_back, black_back] {
                assert_eq!(game.perform_move(m).unwrap(), GameState::Ongoing);
            }
        }
    }

    #[test]
    fn test_search_depth_tracks_piece_count() {
        let mut game = TicTacChec::new();
        assert_eq!(game.search_depth(Player::White), -1);
        play(&mut game, &[mv(PieceKind::Pawn, 0, 1), mv(PieceKind::Pawn, 3, 2)]);
        assert_eq!(game.search_depth(Player::White), 0);
        game.set_depth_offset(0);
        assert_eq!(game.search_depth(Player::White), 1);
        assert_eq!(game.search_depth(Player::Black), 1);
    }

    #[test]
    fn test_network_inputs_layout() {
        let mut game = TicTacChec::new();
        play(&mut game, &[mv(PieceKind::Pawn, 0, 1), mv(PieceKind::Rook, 3, 2)]);
        // White to move again.
        let inputs = game.network_inputs();
        assert_eq!(inputs.len(), TicTacChec::INPUT_WIDTH);

        // Square (0,1) = index 4 holds the mover's pawn: block index 1.
        let pawn_block = &inputs[4 * 9..5 * 9];
        assert_eq!(pawn_block[1], 1.0);
        assert_eq!(pawn_block.iter().sum::<f64>(), 1.0);

        // Square (3,2) = index 11 holds the opponent's rook: block 5..=8,
        // rook is kind 3, so index 8.
        let rook_block = &inputs[11 * 9..12 * 9];
        assert_eq!(rook_block[8], 1.0);

        // Empty square blocks activate index 0.
        assert_eq!(inputs[0], 1.0);

        // Direction scalars: mover's pawn up (+1), opponent pocketed (0).
        assert_eq!(inputs[SQUARES * 9], 1.0);
        assert_eq!(inputs[SQUARES * 9 + 1], 0.0);
    }

    #[test]
    fn test_slot_mapping_round_trip() {
        for slot in 0..TicTacChec::OUTPUT_WIDTH {
            let m = TicTacChec::move_for_slot(slot);
            assert_eq!(TicTacChec::slot_for_move(m), slot);
        }
    }

    #[test]
    fn test_legal_moves_filtered_by_piece() {
        let game = developed_game();
        let knight_moves = game.legal_moves_for_piece(PieceKind::Knight);
        assert!(!knight_moves.is_empty());
        assert!(knight_moves.iter().all(|m| m.piece == PieceKind::Knight));
        let all: Vec<Move> = game
            .legal_moves()
            .into_iter()
            .filter(|m| m.piece == PieceKind::Knight)
            .collect();
        assert_eq!(knight_moves, all);
    }

    #[test]
    fn test_move_log_is_oldest_first() {
        let mut game = TicTacChec::new();
        let first = mv(PieceKind::Pawn, 0, 1);
        let second = mv(PieceKind::Rook, 3, 2);
        play(&mut game, &[first, second]);
        assert_eq!(game.moves().collect::<Vec<_>>(), vec![first, second]);
        assert_eq!(game.last_move(), Some(second));
    }

    #[test]
    fn test_move_serialization_round_trip() {
        let m = mv(PieceKind::Knight, 2, 1);
        let json = serde_json::to_string(&m).unwrap();
        let restored: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, m);
    }

    #[test]
    fn test_select_move_skips_illegal_slots() {
        let game = TicTacChec::new();
        let mut outputs = vec![0.5; TicTacChec::OUTPUT_WIDTH];
        // Every placement is legal on an empty board; boost one slot.
        let best = TicTacChec::slot_for_move(mv(PieceKind::Bishop, 2, 1));
        outputs[best] = 0.9;
        assert_eq!(
            encoding::select_move(&game, &outputs),
            Some(mv(PieceKind::Bishop, 2, 1))
        );
    }
}
