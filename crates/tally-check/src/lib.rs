#![deny(missing_docs)]
#![doc = "Cross-validation of brute-force enumeration against closed-form counts."]

/// Range-driven cross-validation.
pub mod crosscheck;
/// YAML verification plans.
pub mod plan;
/// Hashed verification reports.
pub mod report;
/// Stickman method agreement.
pub mod stickmen;

pub use crosscheck::{verify, verify_formulas, verify_parallel, VerifyOutcome};
pub use plan::{load_plan, run_plan, VerificationPlan};
pub use report::{VerificationReport, REPORT_FILE};
pub use stickmen::{verify_stickmen, StickmenCheck};
