use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use tally_core::errors::{ErrorInfo, TallyError};
use tally_core::params::ParamTuple;
use tally_core::{Count, EvalMode};

use crate::components::ConnectedComponents;
use crate::formula::Formula;
use crate::lattice::{BoundedTriples, MinSum};
use crate::pyramid::Pyramid;
use crate::selection::{SelectionLadder, SelectionProduct};
use crate::trees::{LabeledTrees, TreeEdge};

/// Immutable set of named formulas.
///
/// Built once at start-up and shared by reference; lookups never mutate it.
pub struct FormulaRegistry {
    formulas: BTreeMap<&'static str, Box<dyn Formula>>,
}

impl FormulaRegistry {
    /// Registry holding every built-in formula.
    pub fn standard() -> Self {
        let builtins: Vec<Box<dyn Formula>> = vec![
            Box::new(SelectionProduct),
            Box::new(SelectionLadder),
            Box::new(ConnectedComponents),
            Box::new(MinSum),
            Box::new(BoundedTriples),
            Box::new(Pyramid),
            Box::new(LabeledTrees),
            Box::new(TreeEdge),
        ];
        Self {
            formulas: builtins.into_iter().map(|f| (f.id(), f)).collect(),
        }
    }

    /// Registry built from caller-supplied formulas. Identifiers must be unique.
    pub fn from_formulas(formulas: Vec<Box<dyn Formula>>) -> Result<Self, TallyError> {
        let mut map = BTreeMap::new();
        for formula in formulas {
            let id = formula.id();
            if map.insert(id, formula).is_some() {
                return Err(TallyError::Domain(
                    ErrorInfo::new("duplicate-formula", "formula identifiers must be unique")
                        .with_context("formula", id),
                ));
            }
        }
        Ok(Self { formulas: map })
    }

    /// Registered identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.formulas.keys().copied()
    }

    /// Looks up a formula by identifier.
    pub fn get(&self, id: &str) -> Result<&dyn Formula, TallyError> {
        self.formulas.get(id).map(|f| f.as_ref()).ok_or_else(|| {
            TallyError::Domain(
                ErrorInfo::new("unknown-formula", format!("no formula registered as `{id}`"))
                    .with_context("formula", id)
                    .with_hint(format!(
                        "known formulas: {}",
                        self.ids().collect::<Vec<_>>().join(", ")
                    )),
            )
        })
    }

    /// Evaluates formula `id` at `params` in `mode`.
    ///
    /// Arity mismatches are `Domain` errors; tuples outside the formula's
    /// declared domain are `ParameterDomain` errors.
    pub fn evaluate(&self, id: &str, params: &ParamTuple, mode: EvalMode) -> Result<Count, TallyError> {
        let formula = self.get(id)?;
        formula.arity().check(params)?;
        formula.check_domain(params)?;
        debug!("evaluating {id}{params} ({mode})");
        match mode {
            EvalMode::Exact => Ok(Count::Exact(formula.exact(params)?)),
            EvalMode::Modular => Ok(Count::Modular(formula.modular(params)?.value())),
        }
    }

    /// Brute-force count for formula `id`, computed exactly and reduced once
    /// when `mode` is modular.
    pub fn brute_force(&self, id: &str, params: &ParamTuple, mode: EvalMode) -> Result<Count, TallyError> {
        let formula = self.get(id)?;
        let enumerator = formula.enumerator().ok_or_else(|| {
            TallyError::Domain(
                ErrorInfo::new("no-enumerator", "formula has no brute-force counterpart")
                    .with_context("formula", id),
            )
        })?;
        formula.arity().check(params)?;
        formula.check_domain(params)?;
        Ok(Count::Exact(enumerator.brute_force(params)?).into_mode(mode))
    }
}

impl Default for FormulaRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for FormulaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormulaRegistry")
            .field("formulas", &self.formulas.keys().collect::<Vec<_>>())
            .finish()
    }
}
