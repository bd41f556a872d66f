use std::error::Error;

use clap::Args;
use tally_core::errors::TallyError;
use tally_formula::{brute_force_pyramids, count_pyramids};

#[derive(Args, Debug)]
pub struct PyramidArgs {
    /// Top row of the pyramid.
    #[arg(required = true)]
    pub top: Vec<u64>,
    /// Also enumerate every candidate pyramid and compare.
    #[arg(long)]
    pub brute_force: bool,
}

pub fn run(args: &PyramidArgs) -> Result<(), Box<dyn Error>> {
    let count = count_pyramids(&args.top);
    if args.brute_force {
        let brute = brute_force_pyramids(&args.top);
        if brute != count {
            let top = format!("{:?}", args.top);
            return Err(Box::new(TallyError::consistency("pyramid", top, brute, count)));
        }
    }
    println!("{count}");
    Ok(())
}
