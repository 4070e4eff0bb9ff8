use clap::{Parser, Subcommand};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use self::{auto_play::AutoPlayArg, play::PlayArg, train::TrainArg};

mod auto_play;
mod play;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively against the search or a trained network
    Play(#[clap(flatten)] PlayArg),
    /// Let the search play itself and record the games
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Train a network by self-play against the search
    Train(#[clap(flatten)] TrainArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
        Mode::Train(arg) => train::run(&arg)?,
    }
    Ok(())
}

/// One reproducible generator for everything random in a subcommand: the
/// search tie-break, weight initialization, and self-play move choice.
fn seeded_rng(seed: Option<u64>) -> Pcg64Mcg {
    Pcg64Mcg::seed_from_u64(seed.unwrap_or_else(|| rand::rng().random()))
}
