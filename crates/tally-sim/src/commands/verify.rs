use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use log::info;
use tally_check::{load_plan, run_plan};
use tally_formula::FormulaRegistry;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// YAML plan describing the problem, mode and parameter ranges.
    #[arg(long)]
    pub plan: PathBuf,
    /// Directory receiving `verification_report.json`.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &VerifyArgs) -> Result<(), Box<dyn Error>> {
    let registry = FormulaRegistry::standard();
    let plan = load_plan(&args.plan)?;
    info!("plan {} loaded from {}", plan.plan_hash()?, args.plan.display());
    let report = run_plan(&plan, &registry)?;
    println!(
        "{}: {} tuples agree ({}), {} skipped",
        report.problem, report.checked, report.mode, report.skipped
    );
    println!("report hash {}", report.report_hash);
    if let Some(out) = &args.out {
        let path = report.write_to_dir(out)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}
