use std::{
    io::{self, BufRead as _, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use oxitac_engine::{GameState, Player, encoding};
use oxitac_network::NeuralNetwork;
use oxitac_search::MinimaxSearch;
use rand::Rng;

use crate::{
    games::{CliGame, GameKind},
    model::TrainedModel,
    util,
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum OpponentKind {
    #[default]
    Search,
    Network,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[arg(long, default_value = "tictactoe")]
    game: GameKind,
    /// Play against the minimax search or a trained network
    #[arg(long, default_value = "search")]
    opponent: OpponentKind,
    /// Model file for the network opponent
    #[arg(long)]
    model: Option<PathBuf>,
    /// Random seed for the search tie-break
    #[arg(long)]
    seed: Option<u64>,
}

/// The engine side of an interactive game.
enum Opponent<G: CliGame> {
    Search(MinimaxSearch<G::Evaluator>),
    Network(NeuralNetwork),
}

impl<G: CliGame> Opponent<G> {
    fn from_arg(arg: &PlayArg) -> anyhow::Result<Self> {
        match arg.opponent {
            OpponentKind::Search => Ok(Opponent::Search(MinimaxSearch::new(
                G::Evaluator::default(),
            ))),
            OpponentKind::Network => {
                let path = arg
                    .model
                    .as_ref()
                    .context("--opponent network requires --model")?;
                let model: TrainedModel = util::read_json_file("model", path)?;
                anyhow::ensure!(
                    model.game == G::NAME,
                    "model was trained for {} but the game is {}",
                    model.game,
                    G::NAME,
                );
                Ok(Opponent::Network(model.network_for::<G>()?))
            }
        }
    }

    fn choose<R>(&mut self, game: &mut G, rng: &mut R) -> Option<G::Move>
    where
        R: Rng + ?Sized,
    {
        match self {
            Opponent::Search(search) => search.find_move(game, rng),
            Opponent::Network(network) => {
                let outputs = network.process(&game.network_inputs());
                encoding::select_move(game, &outputs)
            }
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    match arg.game {
        GameKind::TicTacToe => run_game::<oxitac_engine::tictactoe::TicTacToe>(arg),
        GameKind::TicTacChec => run_game::<oxitac_engine::tictacchec::TicTacChec>(arg),
    }
}

fn run_game<G: CliGame>(arg: &PlayArg) -> anyhow::Result<()> {
    let mut game = G::default();
    let mut opponent = Opponent::<G>::from_arg(arg)?;
    let mut rng = super::seeded_rng(arg.seed);
    let stdin = io::stdin();

    println!("You play White (moving first). {}", G::move_entry_help());
    loop {
        println!("{}", game.render());
        match game.state() {
            GameState::Won(Player::White) => {
                println!("You win.");
                return Ok(());
            }
            GameState::Won(Player::Black) => {
                println!("The engine wins.");
                return Ok(());
            }
            GameState::Draw => {
                println!("Draw.");
                return Ok(());
            }
            GameState::Ongoing => {}
        }
        if game.turn() == Player::White {
            print!("your move> ");
            io::stdout().flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF: abandon the game.
                println!();
                return Ok(());
            }
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            let Some(mv) = game.parse_move(input) else {
                println!("Could not read that. {}", G::move_entry_help());
                continue;
            };
            if game.perform_move(mv).is_err() {
                println!("{} is not legal here, try another move.", G::format_move(mv));
                continue;
            }
        } else {
            let mv = opponent
                .choose(&mut game, &mut rng)
                .context("opponent found no move in an ongoing game")?;
            game.perform_move(mv)
                .map_err(|_| anyhow::anyhow!("opponent chose the illegal move {:?}", mv))?;
            println!("Engine plays {}", G::format_move(mv));
        }
    }
}
