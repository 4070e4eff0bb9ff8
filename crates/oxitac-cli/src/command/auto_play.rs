use std::path::PathBuf;

use oxitac_engine::{GameState, Player};
use oxitac_search::MinimaxSearch;
use serde::Serialize;

use crate::{
    games::{CliGame, GameKind},
    util::Output,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    #[arg(long, default_value = "tictactoe")]
    game: GameKind,
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Random seed for the search tie-break
    #[arg(long)]
    seed: Option<u64>,
    /// Write the game records as JSON to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

/// One finished search-vs-search game.
#[derive(Debug, Clone, Serialize)]
struct GameRecord {
    game: String,
    result: String,
    moves: Vec<String>,
}

fn result_name(state: GameState) -> String {
    match state {
        GameState::Won(Player::White) => "white".to_owned(),
        GameState::Won(Player::Black) => "black".to_owned(),
        GameState::Draw => "draw".to_owned(),
        GameState::Ongoing => "ongoing".to_owned(),
    }
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    match arg.game {
        GameKind::TicTacToe => run_games::<oxitac_engine::tictactoe::TicTacToe>(arg),
        GameKind::TicTacChec => run_games::<oxitac_engine::tictacchec::TicTacChec>(arg),
    }
}

fn run_games<G: CliGame>(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let search = MinimaxSearch::new(G::Evaluator::default());
    let mut rng = super::seeded_rng(arg.seed);
    let mut records = Vec::with_capacity(arg.games);

    for index in 0..arg.games {
        let mut game = G::default();
        let mut moves = Vec::new();
        while let Some(mv) = search.find_move(&mut game, &mut rng) {
            game.perform_move(mv).expect("search returns legal moves");
            moves.push(G::format_move(mv));
        }
        let result = result_name(game.state());
        eprintln!(
            "Game #{index}: {} plies, result: {result}",
            moves.len()
        );
        eprintln!("{}", game.render());
        records.push(GameRecord {
            game: G::NAME.to_owned(),
            result,
            moves,
        });
    }

    if let Some(path) = &arg.output {
        Output::save_json(&records, Some(path.clone()))?;
        eprintln!("Records saved to {}", path.display());
    }
    Ok(())
}
