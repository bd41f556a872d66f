use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use tally_core::errors::{ErrorInfo, TallyError};

/// Multiset of node degrees for a candidate tree, in node order.
///
/// User supplied degrees are positive. The only way to obtain a zero entry is
/// [`DegreeSequence::merge`] of two leaves, which models contracting the single
/// edge of a two-node tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct DegreeSequence(Vec<u64>);

impl DegreeSequence {
    /// Validates that every degree is positive.
    pub fn new(degrees: Vec<u64>) -> Result<Self, TallyError> {
        if let Some(idx) = degrees.iter().position(|d| *d == 0) {
            return Err(TallyError::Domain(
                ErrorInfo::new("non-positive-degree", "node degrees must be positive")
                    .with_context("index", idx.to_string()),
            ));
        }
        Ok(Self(degrees))
    }

    /// Parses whitespace separated degrees.
    pub fn parse(text: &str) -> Result<Self, TallyError> {
        let degrees = text
            .split_whitespace()
            .map(|token| {
                token.parse::<u64>().map_err(|err| {
                    TallyError::Parse(
                        ErrorInfo::new("bad-degree", "degree is not a non-negative integer")
                            .with_context("token", token)
                            .with_hint(err.to_string()),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(degrees)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty sequence.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Degrees in node order.
    pub fn degrees(&self) -> &[u64] {
        &self.0
    }

    /// Sum of all degrees.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// True when the degree sum equals `2n - 2`, the handshake count of a tree.
    pub fn has_tree_sum(&self) -> bool {
        self.total() as i128 == 2 * self.len() as i128 - 2
    }

    /// True when some labeled tree realizes the sequence.
    pub fn is_realizable(&self) -> bool {
        match self.0.as_slice() {
            [] => false,
            [single] => *single == 0,
            degrees => self.has_tree_sum() && degrees.iter().all(|d| *d > 0),
        }
    }

    /// Fails with a domain error unless the sequence is realizable.
    pub fn require_realizable(&self) -> Result<(), TallyError> {
        if self.is_realizable() {
            return Ok(());
        }
        Err(TallyError::Domain(
            ErrorInfo::new("not-a-tree", "degree sequence is not realizable by a tree")
                .with_context("sum", self.total().to_string())
                .with_context("expected_sum", (2 * self.len() as i128 - 2).to_string()),
        ))
    }

    fn check_pair(&self, i: usize, j: usize) -> Result<(), TallyError> {
        if i == j || i >= self.len() || j >= self.len() {
            return Err(TallyError::Domain(
                ErrorInfo::new("bad-node-pair", "nodes must be distinct and in range")
                    .with_context("i", i.to_string())
                    .with_context("j", j.to_string())
                    .with_context("len", self.len().to_string()),
            ));
        }
        Ok(())
    }

    /// Contracts nodes `i` and `j` into one node of degree `d_i + d_j - 2`,
    /// appended after the remaining nodes.
    pub fn merge(&self, i: usize, j: usize) -> Result<Self, TallyError> {
        self.check_pair(i, j)?;
        let merged = (self.0[i] + self.0[j]).saturating_sub(2);
        let mut degrees: Vec<u64> = self
            .0
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != i && *idx != j)
            .map(|(_, d)| *d)
            .collect();
        degrees.push(merged);
        Ok(Self(degrees))
    }

    /// Copy sorted in descending order.
    pub fn sorted_descending(&self) -> Self {
        let mut degrees = self.0.clone();
        degrees.sort_unstable_by(|a, b| b.cmp(a));
        Self(degrees)
    }

    pub(crate) fn pair(&self, i: usize, j: usize) -> Result<(u64, u64), TallyError> {
        self.check_pair(i, j)?;
        Ok((self.0[i], self.0[j]))
    }

    pub(crate) fn from_raw(degrees: Vec<u64>) -> Self {
        Self(degrees)
    }
}

impl TryFrom<Vec<u64>> for DegreeSequence {
    type Error = TallyError;

    fn try_from(value: Vec<u64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DegreeSequence> for Vec<u64> {
    fn from(sequence: DegreeSequence) -> Self {
        sequence.0
    }
}

impl Display for DegreeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, d) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}
