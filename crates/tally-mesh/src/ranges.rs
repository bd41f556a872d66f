use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use tally_core::errors::{ErrorInfo, TallyError};
use tally_core::ParamTuple;

use crate::grid::mesh;

/// Inclusive integer range `[start, end]`, written as a two-element list in plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u64; 2]", into = "[u64; 2]")]
pub struct InclusiveRange {
    start: u64,
    end: u64,
}

impl InclusiveRange {
    /// Builds the range, rejecting `start > end`.
    pub fn new(start: u64, end: u64) -> Result<Self, TallyError> {
        if start > end {
            return Err(TallyError::Domain(
                ErrorInfo::new("empty-range", "range start exceeds its end")
                    .with_context("start", start.to_string())
                    .with_context("end", end.to_string()),
            ));
        }
        Ok(Self { start, end })
    }

    /// Range `[0, end]`.
    pub fn up_to(end: u64) -> Self {
        Self { start: 0, end }
    }

    /// Lower end.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Upper end.
    pub fn end(&self) -> u64 {
        self.end
    }
}

impl TryFrom<[u64; 2]> for InclusiveRange {
    type Error = TallyError;

    fn try_from(value: [u64; 2]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1])
    }
}

impl From<InclusiveRange> for [u64; 2] {
    fn from(range: InclusiveRange) -> Self {
        [range.start, range.end]
    }
}

impl Display for InclusiveRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Cartesian product of the ranges as parameter tuples, in lexicographic order.
pub fn cartesian(ranges: &[InclusiveRange]) -> impl Iterator<Item = ParamTuple> {
    let starts: Vec<u64> = ranges.iter().map(|range| range.start).collect();
    let spans: Vec<u64> = ranges.iter().map(|range| range.end - range.start).collect();
    mesh(&spans).map(move |offsets| {
        let values: Vec<u64> = offsets
            .iter()
            .zip(&starts)
            .map(|(offset, start)| offset + start)
            .collect();
        ParamTuple::from_unsigned(values)
    })
}
