//! Structured error types shared across tally crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`TallyError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (parameters, computed values, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the tally engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum TallyError {
    /// Malformed parameters: negative entries, `m > n`, unrealizable sequences.
    #[error("domain error: {0}")]
    Domain(ErrorInfo),
    /// Parameters outside a specific formula's declared validity range.
    #[error("parameter domain error: {0}")]
    ParameterDomain(ErrorInfo),
    /// Modular inverse requested for a value sharing a factor with the modulus.
    #[error("not invertible: {0}")]
    NotInvertible(ErrorInfo),
    /// Brute force and analytical counts disagree.
    #[error("consistency error: {0}")]
    Consistency(ErrorInfo),
    /// Malformed textual input.
    #[error("parse error: {0}")]
    Parse(ErrorInfo),
    /// Serialization, schema and report I/O errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl TallyError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            TallyError::Domain(info)
            | TallyError::ParameterDomain(info)
            | TallyError::NotInvertible(info)
            | TallyError::Consistency(info)
            | TallyError::Parse(info)
            | TallyError::Serde(info) => info,
        }
    }

    /// Shorthand for a [`TallyError::Domain`] with the given code and message.
    pub fn domain(code: &str, message: impl Into<String>) -> Self {
        TallyError::Domain(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`TallyError::ParameterDomain`] with the given code and message.
    pub fn parameter_domain(code: &str, message: impl Into<String>) -> Self {
        TallyError::ParameterDomain(ErrorInfo::new(code, message))
    }

    /// Builds a [`TallyError::Consistency`] carrying everything needed to reproduce
    /// the disagreement.
    pub fn consistency(
        problem: &str,
        params: impl Display,
        brute_force: impl Display,
        analytical: impl Display,
    ) -> Self {
        TallyError::Consistency(
            ErrorInfo::new(
                "count-mismatch",
                format!("brute force and analytical counts disagree for `{problem}`"),
            )
            .with_context("problem", problem)
            .with_context("params", params.to_string())
            .with_context("brute_force", brute_force.to_string())
            .with_context("analytical", analytical.to_string()),
        )
    }

    /// Adds a context entry to the payload, keeping the variant.
    pub fn with_context(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            TallyError::Domain(info) => TallyError::Domain(info.with_context(key, value)),
            TallyError::ParameterDomain(info) => {
                TallyError::ParameterDomain(info.with_context(key, value))
            }
            TallyError::NotInvertible(info) => {
                TallyError::NotInvertible(info.with_context(key, value))
            }
            TallyError::Consistency(info) => TallyError::Consistency(info.with_context(key, value)),
            TallyError::Parse(info) => TallyError::Parse(info.with_context(key, value)),
            TallyError::Serde(info) => TallyError::Serde(info.with_context(key, value)),
        }
    }

    /// Returns true when the error signals a correctness bug rather than bad input.
    pub fn is_consistency(&self) -> bool {
        matches!(self, TallyError::Consistency(_))
    }
}
