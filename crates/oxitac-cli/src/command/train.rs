use std::path::PathBuf;

use chrono::Utc;
use oxitac_network::NeuralNetwork;
use oxitac_search::MinimaxSearch;
use rand::seq::IndexedRandom as _;

use crate::{
    games::{CliGame, GameKind},
    model::TrainedModel,
    util::Output,
};

/// Progress is reported every this many self-play games.
const REPORT_INTERVAL: usize = 10;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    #[arg(long, default_value = "tictactoe")]
    game: GameKind,
    /// Number of self-play games to train on
    #[arg(long, default_value_t = 200)]
    games: usize,
    #[arg(long, default_value_t = 0.2)]
    learning_rate: f64,
    #[arg(long, default_value_t = 0.2)]
    bias_learning_rate: f64,
    /// Random seed for reproducible training
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    match arg.game {
        GameKind::TicTacToe => train_game::<oxitac_engine::tictactoe::TicTacToe>(arg),
        GameKind::TicTacChec => train_game::<oxitac_engine::tictacchec::TicTacChec>(arg),
    }
}

/// Trains a fresh network by shadowing the minimax search through self-play:
/// at every position the search's tie-break best set becomes the goal vector
/// (1 on the best slots, 0 elsewhere), and one online update is applied.
fn train_game<G: CliGame>(arg: &TrainArg) -> anyhow::Result<()> {
    let mut rng = super::seeded_rng(arg.seed);
    let mut network = NeuralNetwork::random(&mut rng, G::INPUT_WIDTH, G::default_layer_sizes());
    network.learning_rate = arg.learning_rate;
    network.bias_learning_rate = arg.bias_learning_rate;
    let search = MinimaxSearch::new(G::Evaluator::default());

    eprintln!(
        "Training {} network ({} inputs, layers {:?}) on {} self-play games",
        G::NAME,
        G::INPUT_WIDTH,
        G::default_layer_sizes(),
        arg.games,
    );

    let mut window_error = 0.0;
    let mut window_outputs = 0usize;
    for index in 0..arg.games {
        let mut game = G::default();
        while game.state().is_ongoing() {
            let result = search.find_best_moves(&mut game);
            let mut goals = vec![0.0; G::OUTPUT_WIDTH];
            for &mv in &result.best_moves {
                goals[G::slot_for_move(mv)] = 1.0;
            }
            let outputs = network.process(&game.network_inputs());
            network.update(&goals);

            for (output, goal) in outputs.iter().zip(&goals) {
                window_error += (output - goal).powi(2);
            }
            window_outputs += outputs.len();

            let mv = *result
                .best_moves
                .choose(&mut rng)
                .expect("best set is never empty");
            game.perform_move(mv).expect("search returns legal moves");
        }

        if (index + 1) % REPORT_INTERVAL == 0 || index + 1 == arg.games {
            #[expect(clippy::cast_precision_loss)]
            let mse = window_error / window_outputs as f64;
            eprintln!("Game #{:4}: window mse {mse:.5}", index + 1);
            window_error = 0.0;
            window_outputs = 0;
        }
    }

    network.clear_cached_activations();
    let model = TrainedModel {
        name: G::NAME.to_owned(),
        game: G::NAME.to_owned(),
        trained_at: Utc::now(),
        network,
    };
    Output::save_json(&model, arg.output.clone())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    Ok(())
}
