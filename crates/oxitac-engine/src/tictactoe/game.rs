use crate::{
    GameEngine, IllegalMoveError,
    core::{Coordinate, GameState, Player},
    encoding::NetworkEncoding,
};

use super::board::{Board, SIZE, SQUARES};

/// Search depth used for every position; the 3×3 tree is shallow enough for
/// a fixed bound.
const SEARCH_DEPTH: i32 = 5;

/// The 3×3 placement game. Players alternate placing a mark on an empty
/// square; three in a row wins, a full board with no winner draws.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicTacToe {
    board: Board,
    turn: Player,
    state: GameState,
    history: Vec<Coordinate>,
}

impl TicTacToe {
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::White,
            state: GameState::Ongoing,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Applied moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Coordinate] {
        &self.history
    }
}

impl GameEngine for TicTacToe {
    type Move = Coordinate;

    fn turn(&self) -> Player {
        self.turn
    }

    fn state(&self) -> GameState {
        self.state
    }

    fn is_legal_move(&self, mv: Coordinate) -> bool {
        self.state.is_ongoing() && mv.in_bounds(SIZE) && self.board.get(mv).is_none()
    }

    fn legal_moves(&self) -> Vec<Coordinate> {
        if !self.state.is_ongoing() {
            return Vec::new();
        }
        (0..SQUARES)
            .map(|index| Coordinate::from_index(index, SIZE))
            .filter(|&c| self.is_legal_move(c))
            .collect()
    }

    fn perform_move(&mut self, mv: Coordinate) -> Result<GameState, IllegalMoveError> {
        if !self.is_legal_move(mv) {
            return Err(IllegalMoveError);
        }
        self.board.set(mv, Some(self.turn));
        self.history.push(mv);
        if self.board.has_winning_line(self.turn) {
            self.state = GameState::Won(self.turn);
        } else if self.board.is_full() {
            self.state = GameState::Draw;
        }
        self.turn = self.turn.opponent();
        Ok(self.state)
    }

    fn undo_move(&mut self) {
        let Some(mv) = self.history.pop() else {
            return;
        };
        self.turn = self.turn.opponent();
        self.board.set(mv, None);
        self.state = GameState::Ongoing;
    }

    fn last_move(&self) -> Option<Coordinate> {
        self.history.last().copied()
    }

    fn search_depth(&self, _player: Player) -> i32 {
        SEARCH_DEPTH
    }
}

impl NetworkEncoding for TicTacToe {
    // 9 squares, a 3-valued one-hot block per square.
    const INPUT_WIDTH: usize = SQUARES * 3;
    // One output slot per square.
    const OUTPUT_WIDTH: usize = SQUARES;

    fn network_inputs(&self) -> Vec<f64> {
        let mut inputs = Vec::with_capacity(Self::INPUT_WIDTH);
        for index in 0..SQUARES {
            let mark = self.board.get(Coordinate::from_index(index, SIZE));
            let mut block = [0.0; 3];
            block[match mark {
                None => 0,
                Some(player) if player == self.turn => 1,
                Some(_) => 2,
            }] = 1.0;
            inputs.extend_from_slice(&block);
        }
        inputs
    }

    fn move_for_slot(slot: usize) -> Coordinate {
        Coordinate::from_index(slot, SIZE)
    }

    fn slot_for_move(mv: Coordinate) -> usize {
        mv.index(SIZE)
    }
}
