use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tally_core::errors::{ErrorInfo, TallyError};
use tally_core::serde::{from_json_slice, stable_hash_string, to_canonical_json_bytes};
use tally_core::EvalMode;
use tally_mesh::InclusiveRange;

use crate::crosscheck::VerifyOutcome;

/// File name used by [`VerificationReport::write_to_dir`].
pub const REPORT_FILE: &str = "verification_report.json";

fn io_error(code: &str, err: impl ToString) -> TallyError {
    TallyError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Summary of a successful verification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Problem identifier.
    pub problem: String,
    /// Evaluation mode used on both sides.
    pub mode: EvalMode,
    /// Parameter ranges that were scanned.
    pub ranges: Vec<InclusiveRange>,
    /// Tuples found in agreement.
    pub checked: u64,
    /// Tuples outside the problem's domain.
    pub skipped: u64,
    /// SHA-256 over the canonical JSON of the fields above.
    pub report_hash: String,
}

#[derive(Serialize)]
struct HashedFields<'a> {
    problem: &'a str,
    mode: EvalMode,
    ranges: &'a [InclusiveRange],
    checked: u64,
    skipped: u64,
}

impl VerificationReport {
    /// Builds the report and computes its hash.
    pub fn new(
        problem: &str,
        mode: EvalMode,
        ranges: Vec<InclusiveRange>,
        outcome: VerifyOutcome,
    ) -> Result<Self, TallyError> {
        let report_hash = stable_hash_string(&HashedFields {
            problem,
            mode,
            ranges: &ranges,
            checked: outcome.checked,
            skipped: outcome.skipped,
        })?;
        Ok(Self {
            problem: problem.to_string(),
            mode,
            ranges,
            checked: outcome.checked,
            skipped: outcome.skipped,
            report_hash,
        })
    }

    /// Canonical JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TallyError> {
        to_canonical_json_bytes(self)
    }

    /// Writes the report as `verification_report.json` under `dir`.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, TallyError> {
        fs::create_dir_all(dir).map_err(|err| io_error("report_dir", err))?;
        let path = dir.join(REPORT_FILE);
        fs::write(&path, self.to_bytes()?).map_err(|err| io_error("report_write", err))?;
        Ok(path)
    }

    /// Reads a report written by [`VerificationReport::write_to_dir`].
    pub fn read(path: &Path) -> Result<Self, TallyError> {
        let bytes = fs::read(path).map_err(|err| io_error("report_read", err))?;
        from_json_slice(&bytes)
    }
}
