//! CLI-side presentation for the two games: selection, text rendering, and
//! move entry parsing. The engines know nothing about any of this.

use oxitac_engine::{
    Coordinate, PieceKind, Player,
    encoding::NetworkEncoding,
    tictacchec::{self, TicTacChec},
    tictactoe::{self, TicTacToe},
};
use oxitac_search::{PositionEvaluator, TicTacChecEvaluator, TicTacToeEvaluator};

/// Which game a subcommand operates on.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum GameKind {
    #[default]
    TicTacToe,
    TicTacChec,
}

/// Everything a subcommand needs to drive one game generically.
pub trait CliGame: NetworkEncoding + Default {
    const NAME: &'static str;

    /// The static evaluator the search opponent uses for this game.
    type Evaluator: PositionEvaluator<Self> + Default;

    /// Network topology used when training from scratch; the last entry is
    /// the output width.
    fn default_layer_sizes() -> &'static [usize];

    fn render(&self) -> String;

    /// Parses user move entry; `None` for anything unreadable. Legality is
    /// checked separately so the user gets a distinct message.
    fn parse_move(&self, input: &str) -> Option<Self::Move>;

    fn format_move(mv: Self::Move) -> String;

    fn move_entry_help() -> &'static str;
}

impl CliGame for TicTacToe {
    const NAME: &'static str = "tictactoe";

    type Evaluator = TicTacToeEvaluator;

    fn default_layer_sizes() -> &'static [usize] {
        &[18, 9]
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for y in 0..tictactoe::SIZE {
            for x in 0..tictactoe::SIZE {
                let coordinate = Coordinate::new(x, y);
                let cell = match self.board().get(coordinate) {
                    Some(Player::White) => 'X',
                    Some(Player::Black) => 'O',
                    None => char::from_digit(u32::try_from(coordinate.index(tictactoe::SIZE)).unwrap(), 10)
                        .unwrap(),
                };
                out.push(' ');
                out.push(cell);
            }
            out.push('\n');
        }
        out
    }

    fn parse_move(&self, input: &str) -> Option<Coordinate> {
        let index: usize = input.trim().parse().ok()?;
        (index < tictactoe::SQUARES).then(|| Coordinate::from_index(index, tictactoe::SIZE))
    }

    fn format_move(mv: Coordinate) -> String {
        mv.index(tictactoe::SIZE).to_string()
    }

    fn move_entry_help() -> &'static str {
        "Enter the number of an empty square (0-8)."
    }
}

fn file_char(x: u8) -> char {
    char::from(b'a' + x)
}

fn rank_digit(y: u8) -> char {
    char::from(b'0' + (tictacchec::SIZE - y))
}

impl CliGame for TicTacChec {
    const NAME: &'static str = "tictacchec";

    type Evaluator = TicTacChecEvaluator;

    fn default_layer_sizes() -> &'static [usize] {
        // 146 inputs feed hidden layers of 118 and 90 units into the 64
        // output slots.
        &[118, 90, 64]
    }

    fn render(&self) -> String {
        let mut out = String::from("  a b c d\n");
        for y in 0..tictacchec::SIZE {
            out.push(rank_digit(y));
            for x in 0..tictacchec::SIZE {
                let cell = match self.board().get(Coordinate::new(x, y)).occupant() {
                    Some((Player::White, piece)) => piece.as_char(),
                    Some((Player::Black, piece)) => piece.as_char().to_ascii_lowercase(),
                    None => '.',
                };
                out.push(' ');
                out.push(cell);
            }
            out.push('\n');
        }
        for player in [Player::White, Player::Black] {
            let pocket: String = self
                .board()
                .pocketed_pieces(player)
                .iter()
                .map(|piece| piece.as_char())
                .collect();
            let direction = match self.pawn_direction(player) {
                Some(oxitac_engine::PawnDirection::Up) => "up",
                Some(oxitac_engine::PawnDirection::Down) => "down",
                None => "-",
            };
            out.push_str(&format!(
                "{player:?}: pocket [{pocket}] pawn {direction}\n"
            ));
        }
        out
    }

    fn parse_move(&self, input: &str) -> Option<tictacchec::Move> {
        let mut chars = input.chars().filter(|c| !c.is_whitespace());
        let piece = PieceKind::from_char(chars.next()?)?;
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let x = u32::from(file.to_ascii_lowercase()).checked_sub(u32::from(b'a'))?;
        let x = u8::try_from(x).ok()?;
        let rank = rank.to_digit(10)?;
        if x >= tictacchec::SIZE || !(1..=u32::from(tictacchec::SIZE)).contains(&rank) {
            return None;
        }
        let y = tictacchec::SIZE - u8::try_from(rank).unwrap();
        Some(tictacchec::Move::new(piece, Coordinate::new(x, y)))
    }

    fn format_move(mv: tictacchec::Move) -> String {
        format!(
            "{}{}{}",
            mv.piece.as_char(),
            file_char(mv.to.x()),
            rank_digit(mv.to.y())
        )
    }

    fn move_entry_help() -> &'static str {
        "Enter piece and square, e.g. Nb2 (pieces: P N B R, files a-d, ranks 1-4)."
    }
}

#[cfg(test)]
mod tests {
    use oxitac_engine::GameEngine as _;

    use super::*;

    #[test]
    fn test_game_kind_parses_case_insensitively() {
        assert_eq!("tictactoe".parse::<GameKind>().unwrap(), GameKind::TicTacToe);
        assert_eq!("tictacchec".parse::<GameKind>().unwrap(), GameKind::TicTacChec);
        assert!("checkers".parse::<GameKind>().is_err());
    }

    #[test]
    fn test_tictactoe_move_parsing() {
        let game = TicTacToe::default();
        assert_eq!(
            game.parse_move("4"),
            Some(Coordinate::from_index(4, tictactoe::SIZE))
        );
        assert_eq!(game.parse_move(" 8 "), Some(Coordinate::from_index(8, 3)));
        assert_eq!(game.parse_move("9"), None);
        assert_eq!(game.parse_move("x"), None);
    }

    #[test]
    fn test_tictacchec_move_parsing_round_trip() {
        let game = TicTacChec::default();
        let mv = game.parse_move("Nb2").unwrap();
        assert_eq!(mv.piece, PieceKind::Knight);
        assert_eq!(mv.to, Coordinate::new(1, 2));
        assert_eq!(TicTacChec::format_move(mv), "Nb2");

        // Lowercase and spaced entry are accepted.
        assert_eq!(game.parse_move("n b2"), Some(mv));
        assert_eq!(game.parse_move("ra4"), game.parse_move("Ra4"));

        assert_eq!(game.parse_move("Ne2"), None);
        assert_eq!(game.parse_move("Nb5"), None);
        assert_eq!(game.parse_move("Qb2"), None);
        assert_eq!(game.parse_move("Nb22"), None);
    }

    #[test]
    fn test_corner_coordinates() {
        let game = TicTacChec::default();
        // a1 is the bottom-left square, d4 the top-right.
        assert_eq!(game.parse_move("Pa1").unwrap().to, Coordinate::new(0, 3));
        assert_eq!(game.parse_move("Pd4").unwrap().to, Coordinate::new(3, 0));
    }

    #[test]
    fn test_render_shows_pieces_and_pockets() {
        let mut game = TicTacChec::default();
        game.perform_move(tictacchec::Move::new(
            PieceKind::Knight,
            Coordinate::new(1, 2),
        ))
        .unwrap();
        let rendered = game.render();
        assert!(rendered.contains("a b c d"));
        assert!(rendered.contains('N'));
        assert!(rendered.contains("White: pocket [PBR]"));
    }
}
