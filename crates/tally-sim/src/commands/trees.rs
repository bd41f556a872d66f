use std::error::Error;

use clap::Args;
use log::info;
use tally_arith::mod_inverse;
use tally_check::verify_stickmen;
use tally_core::rng::RngHandle;
use tally_core::MODULUS;
use tally_tree::{
    count_trees, count_trees_mod, expected_stickmen_closed_form, random_degree_sequence,
    DegreeSequence,
};

#[derive(Args, Debug)]
pub struct TreesArgs {
    /// Whitespace separated degrees, e.g. "5 4 3 1 1".
    #[arg(long, conflicts_with = "random", required_unless_present = "random")]
    pub degrees: Option<String>,
    /// Sample the degree sequence of a uniformly random tree on this many nodes.
    #[arg(long)]
    pub random: Option<usize>,
    /// Seed for `--random`.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Largest sequence length checked against Prüfer brute force.
    #[arg(long, default_value_t = 8)]
    pub brute_force_cap: usize,
}

fn sequence(args: &TreesArgs) -> Result<DegreeSequence, Box<dyn Error>> {
    match (&args.degrees, args.random) {
        (Some(text), _) => Ok(DegreeSequence::parse(text)?),
        (None, Some(n)) => {
            let mut rng = RngHandle::from_seed(args.seed);
            Ok(random_degree_sequence(n, &mut rng)?)
        }
        (None, None) => Err("either --degrees or --random is required".into()),
    }
}

pub fn run(args: &TreesArgs) -> Result<(), Box<dyn Error>> {
    let ds = sequence(args)?;
    ds.require_realizable()?;
    info!("degree sequence {ds}");
    let trees = count_trees(&ds);
    let residue = count_trees_mod(&ds)?;
    println!("degrees        {ds}");
    println!("trees          {trees}");
    println!("trees mod p    {residue}");
    println!("inverse mod p  {}", mod_inverse(residue.value(), MODULUS)?);

    let checks = verify_stickmen(std::slice::from_ref(&ds), args.brute_force_cap)?;
    for check in checks {
        println!("stickmen       {} (edge sum)", check.expected);
        println!("stickmen       {} (closed form)", expected_stickmen_closed_form(&ds)?);
        println!("mask predicate {}", check.mask_predicate);
        if check.brute_forced {
            println!("brute force    agrees");
        }
    }
    Ok(())
}
