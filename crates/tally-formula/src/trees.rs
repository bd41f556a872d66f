use num_bigint::BigUint;
use tally_arith::ModValue;
use tally_core::errors::TallyError;
use tally_core::params::ParamTuple;
use tally_tree::{
    brute_force_count_trees, brute_force_count_trees_with_edge, count_trees, count_trees_mod,
    count_trees_with_edge, count_trees_with_edge_mod, DegreeSequence,
};

use crate::formula::{outside_domain, Arity, Enumerator, Formula};
use crate::ids;

fn require_positive(id: &str, params: &ParamTuple) -> Result<(), TallyError> {
    if params.values().contains(&0) {
        return Err(outside_domain(id, params, "positive degrees"));
    }
    Ok(())
}

fn sequence(id: &str, params: &ParamTuple) -> Result<DegreeSequence, TallyError> {
    require_positive(id, params)?;
    DegreeSequence::new(params.values().to_vec())
}

/// Labeled trees realizing the degree sequence given as parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabeledTrees;

impl Formula for LabeledTrees {
    fn id(&self) -> &'static str {
        ids::LABELED_TREES
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(1)
    }

    fn check_domain(&self, params: &ParamTuple) -> Result<(), TallyError> {
        require_positive(self.id(), params)
    }

    fn exact(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        Ok(count_trees(&sequence(self.id(), params)?))
    }

    fn modular(&self, params: &ParamTuple) -> Result<ModValue, TallyError> {
        count_trees_mod(&sequence(self.id(), params)?)
    }

    fn enumerator(&self) -> Option<&dyn Enumerator> {
        Some(self)
    }
}

impl Enumerator for LabeledTrees {
    fn brute_force(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        brute_force_count_trees(&sequence(self.id(), params)?)
    }
}

/// Labeled trees realizing the sequence that contain the edge between nodes 0 and 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeEdge;

impl Formula for TreeEdge {
    fn id(&self) -> &'static str {
        ids::TREE_EDGE
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(2)
    }

    fn check_domain(&self, params: &ParamTuple) -> Result<(), TallyError> {
        require_positive(self.id(), params)
    }

    fn exact(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        count_trees_with_edge(&sequence(self.id(), params)?, 0, 1)
    }

    fn modular(&self, params: &ParamTuple) -> Result<ModValue, TallyError> {
        count_trees_with_edge_mod(&sequence(self.id(), params)?, 0, 1)
    }

    fn enumerator(&self) -> Option<&dyn Enumerator> {
        Some(self)
    }
}

impl Enumerator for TreeEdge {
    fn brute_force(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        brute_force_count_trees_with_edge(&sequence(self.id(), params)?, 0, 1)
    }
}
