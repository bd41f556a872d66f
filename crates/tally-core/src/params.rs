//! Validated parameter tuples.

use std::fmt::{self, Display};
use std::ops::Index;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{ErrorInfo, TallyError};

/// Ordered, fixed-arity tuple of non-negative integers.
///
/// Entries are validated once on construction and the tuple is immutable
/// afterwards. Problem-specific constraints (such as `m <= n`) belong to the
/// formula evaluating the tuple. Serialized as a plain sequence of unsigned
/// integers; negative entries are rejected when reading.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ParamTuple(Vec<u64>);

impl ParamTuple {
    /// Validates signed input and builds a tuple.
    pub fn new(values: &[i64]) -> Result<Self, TallyError> {
        let mut out = Vec::with_capacity(values.len());
        for (idx, value) in values.iter().enumerate() {
            if *value < 0 {
                return Err(TallyError::Domain(
                    ErrorInfo::new("negative-parameter", "parameters must be non-negative")
                        .with_context("index", idx.to_string())
                        .with_context("value", value.to_string()),
                ));
            }
            out.push(*value as u64);
        }
        Ok(Self(out))
    }

    /// Builds a tuple from values that are non-negative by construction.
    pub fn from_unsigned(values: impl Into<Vec<u64>>) -> Self {
        Self(values.into())
    }

    /// Number of entries.
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    /// Returns the entries as a slice.
    pub fn values(&self) -> &[u64] {
        &self.0
    }

    /// Returns entry `idx`, or a domain error when the tuple is too short.
    pub fn get(&self, idx: usize) -> Result<u64, TallyError> {
        self.0.get(idx).copied().ok_or_else(|| {
            TallyError::Domain(
                ErrorInfo::new("missing-parameter", "parameter tuple is too short")
                    .with_context("index", idx.to_string())
                    .with_context("arity", self.arity().to_string()),
            )
        })
    }
}

impl Index<usize> for ParamTuple {
    type Output = u64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl TryFrom<Vec<i64>> for ParamTuple {
    type Error = TallyError;

    fn try_from(values: Vec<i64>) -> Result<Self, Self::Error> {
        Self::new(&values)
    }
}

impl<'de> Deserialize<'de> for ParamTuple {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Entry {
            Unsigned(u64),
            Signed(i64),
        }

        let entries = Vec::<Entry>::deserialize(deserializer)?;
        let mut values = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.into_iter().enumerate() {
            match entry {
                Entry::Unsigned(value) => values.push(value),
                Entry::Signed(value) => {
                    let err = TallyError::Domain(
                        ErrorInfo::new("negative-parameter", "parameters must be non-negative")
                            .with_context("index", idx.to_string())
                            .with_context("value", value.to_string()),
                    );
                    return Err(D::Error::custom(err));
                }
            }
        }
        Ok(Self(values))
    }
}

impl Display for ParamTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (idx, value) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_entries_rejected() {
        let err = ParamTuple::new(&[3, -1]).unwrap_err();
        match err {
            TallyError::Domain(info) => {
                assert_eq!(info.code, "negative-parameter");
                assert_eq!(info.context.get("index"), Some(&"1".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn entries_above_signed_range_survive_json() {
        let tuple = ParamTuple::from_unsigned(vec![u64::MAX, 1 << 63, 7]);
        let json = serde_json::to_string(&tuple).unwrap();
        assert_eq!(json, format!("[{},{},7]", u64::MAX, 1u64 << 63));
        let decoded: ParamTuple = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, tuple);
        assert!(serde_json::from_str::<ParamTuple>("[4,-1]").is_err());
    }

    #[test]
    fn display_is_tuple_like() {
        let tuple = ParamTuple::from_unsigned(vec![5, 3]);
        assert_eq!(tuple.to_string(), "(5, 3)");
    }
}
