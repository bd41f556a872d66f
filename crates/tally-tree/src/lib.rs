#![deny(missing_docs)]

//! Labeled trees with a prescribed degree sequence.
//!
//! [`count_trees`] is the generalized Cayley formula. [`count_trees_with_edge`]
//! contracts the requested edge, counts trees on the reduced sequence and
//! multiplies by the number of ways to split the merged node again; both
//! rewiring binomials and the simplified closed form are evaluated and must
//! agree. Prüfer sequences provide the brute-force side.

mod cayley;
mod degree;
mod prufer;
mod stickmen;

pub use cayley::{
    count_trees, count_trees_mod, count_trees_with_edge, count_trees_with_edge_mod, normalize,
};
pub use degree::DegreeSequence;
pub use prufer::{
    brute_force_count_trees, brute_force_count_trees_with_edge, decode_prufer, prufer_degrees,
    random_degree_sequence, trees_with_degrees,
};
pub use stickmen::{
    expected_stickmen, expected_stickmen_closed_form, stickmen_at_edge, stickmen_brute_force,
    stickmen_by_edges, stickmen_by_masks, stickmen_in_tree,
};
