#![deny(missing_docs)]

//! Enumeration of bounded integer lattices.
//!
//! Everything here is brute force on purpose: constrained views are filters
//! over the full mesh so they visit configurations in exactly the order the
//! unconstrained mesh does. Cost is `O(prod(bounds[i] + 1))`; callers keep the
//! bounds small.

mod grid;
mod ranges;

pub use grid::{fixed_sum_mesh, masks, mesh, mesh_size, Mesh};
pub use ranges::{cartesian, InclusiveRange};
