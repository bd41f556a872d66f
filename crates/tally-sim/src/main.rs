use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::{
    count::{self, CountArgs},
    pyramid::{self, PyramidArgs},
    trees::{self, TreesArgs},
    verify::{self, VerifyArgs},
};
use tally_core::errors::TallyError;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "tally-sim", about = "Brute-force vs closed-form counting checks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a YAML verification plan.
    Verify(VerifyArgs),
    /// Evaluate a registered formula for every case of an input file.
    Count(CountArgs),
    /// Tree and stickman figures for one degree sequence.
    Trees(TreesArgs),
    /// Count pyramids over a top row.
    Pyramid(PyramidArgs),
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Verify(args) => verify::run(&args),
        Command::Count(args) => count::run(&args),
        Command::Trees(args) => trees::run(&args),
        Command::Pyramid(args) => pyramid::run(&args),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let consistency = err
                .downcast_ref::<TallyError>()
                .is_some_and(TallyError::is_consistency);
            if consistency {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
