#![deny(missing_docs)]
#![doc = "Closed-form counting formulas paired with brute-force enumerators."]

/// Connected runs in fixed-weight 0/1 rows.
pub mod components;
/// Formula and enumerator traits.
pub mod formula;
/// Sums of minima over integer rectangles.
pub mod lattice;
/// Integer pyramids over a fixed top row.
pub mod pyramid;
/// Immutable formula registry.
pub mod registry;
/// Subset products over a partially selected row.
pub mod selection;
/// Degree-sequence tree counts exposed as formulas.
pub mod trees;

pub use components::ConnectedComponents;
pub use formula::{Arity, Enumerator, Formula};
pub use lattice::{BoundedTriples, MinSum};
pub use pyramid::{brute_force_pyramids, count_pyramids, Pyramid};
pub use registry::FormulaRegistry;
pub use selection::{SelectionLadder, SelectionProduct};
pub use trees::{LabeledTrees, TreeEdge};

/// Registry identifiers of the built-in formulas.
pub mod ids {
    /// `(n, m)`: product of `2 + |S ∩ M|` over all subsets `S` of `n` positions.
    pub const SELECTION_PRODUCT: &str = "selection-product";
    /// Repeated-squaring form of [`SELECTION_PRODUCT`], `n >= 1`.
    pub const SELECTION_PRODUCT_LADDER: &str = "selection-product-ladder";
    /// `(n, m, c)`: rows with `n - m` ones in exactly `c` runs.
    pub const CONNECTED_COMPONENTS: &str = "connected-components";
    /// `(m, n)`: sum of `min(i, j)` over the rectangle.
    pub const MIN_SUM: &str = "min-sum";
    /// `(a, b)`: triples bounded by `a`, `b` and the minimum of the first two.
    pub const BOUNDED_TRIPLES: &str = "bounded-triples";
    /// Top row of a pyramid.
    pub const PYRAMID: &str = "pyramid";
    /// Degree sequence of a labeled tree.
    pub const LABELED_TREES: &str = "labeled-trees";
    /// Degree sequence; trees containing the edge `{0, 1}`.
    pub const TREE_EDGE: &str = "tree-edge";
}
