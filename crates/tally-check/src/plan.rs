use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tally_core::errors::{ErrorInfo, TallyError};
use tally_core::serde::{from_yaml_slice, stable_hash_string, to_yaml_string};
use tally_core::EvalMode;
use tally_formula::FormulaRegistry;
use tally_mesh::InclusiveRange;

use crate::crosscheck::{verify, verify_parallel};
use crate::report::VerificationReport;

fn io_error(code: &str, err: impl ToString) -> TallyError {
    TallyError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// One cross-validation run as written in a YAML plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerificationPlan {
    /// Registry identifier of the problem under test.
    pub problem: String,
    /// Evaluation mode for both sides of the comparison.
    #[serde(default)]
    pub mode: EvalMode,
    /// Inclusive `[start, end]` bounds, one per parameter.
    pub ranges: Vec<[u64; 2]>,
    /// Evaluate tuples on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

impl VerificationPlan {
    /// Parses a plan from YAML bytes and validates its ranges.
    pub fn from_yaml_slice(bytes: &[u8]) -> Result<Self, TallyError> {
        let plan: Self = from_yaml_slice(bytes)?;
        plan.ranges()?;
        Ok(plan)
    }

    /// Canonical YAML representation.
    pub fn to_yaml_string(&self) -> Result<String, TallyError> {
        to_yaml_string(self)
    }

    /// Content hash of the plan.
    pub fn plan_hash(&self) -> Result<String, TallyError> {
        stable_hash_string(self)
    }

    /// Validated ranges. `start > end` is a domain error.
    pub fn ranges(&self) -> Result<Vec<InclusiveRange>, TallyError> {
        self.ranges
            .iter()
            .map(|[start, end]| InclusiveRange::new(*start, *end))
            .collect()
    }

    /// Checks the plan against `registry`: the problem must exist and the number
    /// of ranges must match its arity.
    pub fn validate(&self, registry: &FormulaRegistry) -> Result<(), TallyError> {
        self.ranges()?;
        let formula = registry.get(&self.problem)?;
        formula
            .arity()
            .check_len(self.ranges.len())
            .map_err(|err| err.with_context("problem", self.problem.clone()))
    }
}

/// Reads and validates a plan file.
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<VerificationPlan, TallyError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| {
        io_error("plan_read", err).with_context("path", path.display().to_string())
    })?;
    VerificationPlan::from_yaml_slice(&bytes)
}

/// Validates and executes `plan`, producing a hashed report.
pub fn run_plan(plan: &VerificationPlan, registry: &FormulaRegistry) -> Result<VerificationReport, TallyError> {
    plan.validate(registry)?;
    let ranges = plan.ranges()?;
    let outcome = if plan.parallel {
        verify_parallel(registry, &plan.problem, &ranges, plan.mode)?
    } else {
        verify(registry, &plan.problem, &ranges, plan.mode)?
    };
    VerificationReport::new(&plan.problem, plan.mode, ranges, outcome)
}
