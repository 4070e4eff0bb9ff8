mod command;
mod games;
mod model;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
