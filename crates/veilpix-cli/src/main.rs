use clap::Parser;

mod cli;
mod commands;

use cli::CliArgs;

pub type CliResult<T> = veilpix_core::Result<T>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let config = args.pipeline_config();

    match args.command {
        cli::Commands::Conceal(cmd) => cmd.run(config),
        cli::Commands::Reveal(cmd) => cmd.run(config),
        cli::Commands::Seal(cmd) => cmd.run(config),
        cli::Commands::Unseal(cmd) => cmd.run(config),
        cli::Commands::Analyze(cmd) => cmd.run(),
    }
}
