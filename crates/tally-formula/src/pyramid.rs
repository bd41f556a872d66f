//! Integer pyramids over a fixed top row.
//!
//! Row `r` has one cell fewer than row `r - 1`. Each cell is at most the smaller
//! of the two cells above it and, from the second row down, at least
//! `above_left + above_right - two_above`, where `two_above` sits directly
//! above the pair's shared parent.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use tally_core::errors::TallyError;
use tally_core::params::ParamTuple;
use tally_mesh::mesh;

use crate::formula::{Arity, Enumerator, Formula};
use crate::ids;

fn cell_range(above: &[u64], two_above: Option<&[u64]>, j: usize) -> (i64, i64) {
    let hi = above[j].min(above[j + 1]) as i64;
    let lo = match two_above {
        Some(grand) => (above[j] as i64 + above[j + 1] as i64 - grand[j + 1] as i64).max(0),
        None => 0,
    };
    (lo, hi)
}

fn count_below(above: &[u64], two_above: Option<&[u64]>) -> BigUint {
    let width = above.len() - 1;
    let ranges: Vec<(i64, i64)> = (0..width).map(|j| cell_range(above, two_above, j)).collect();
    if ranges.iter().any(|(lo, hi)| lo > hi) {
        return BigUint::zero();
    }
    if width == 1 {
        let (lo, hi) = ranges[0];
        return BigUint::from((hi + 1 - lo) as u64);
    }
    let spans: Vec<u64> = ranges.iter().map(|(lo, hi)| (hi - lo) as u64).collect();
    mesh(&spans)
        .map(|offsets| {
            let row: Vec<u64> = offsets
                .iter()
                .zip(&ranges)
                .map(|(offset, (lo, _))| offset + *lo as u64)
                .collect();
            count_below(&row, Some(above))
        })
        .sum()
}

/// Number of pyramids with top row `top`, built row by row. A single-cell top
/// is its own pyramid.
pub fn count_pyramids(top: &[u64]) -> BigUint {
    if top.len() <= 1 {
        return BigUint::one();
    }
    count_below(top, None)
}

fn rows_from_cells(top: &[u64], cells: &[u64]) -> Vec<Vec<u64>> {
    let mut rows = vec![top.to_vec()];
    let mut offset = 0;
    for width in (1..top.len()).rev() {
        rows.push(cells[offset..offset + width].to_vec());
        offset += width;
    }
    rows
}

fn is_pyramid(rows: &[Vec<u64>]) -> bool {
    for r in 1..rows.len() {
        for j in 0..rows[r].len() {
            let (lo, hi) = cell_range(&rows[r - 1], r.checked_sub(2).map(|g| rows[g].as_slice()), j);
            let cell = rows[r][j] as i64;
            if cell < lo || cell > hi {
                return false;
            }
        }
    }
    true
}

/// Exhaustive counterpart of [`count_pyramids`]: every cell of row `r` and
/// column `j` ranges over `0..=min(top[j..=j+r])`.
pub fn brute_force_pyramids(top: &[u64]) -> BigUint {
    let mut bounds = Vec::new();
    for r in 1..top.len() {
        for j in 0..top.len() - r {
            bounds.push(top[j..=j + r].iter().copied().min().unwrap_or(0));
        }
    }
    let hits = mesh(&bounds)
        .filter(|cells| is_pyramid(&rows_from_cells(top, cells)))
        .count();
    BigUint::from(hits)
}

/// Registry adapter for [`count_pyramids`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Pyramid;

impl Formula for Pyramid {
    fn id(&self) -> &'static str {
        ids::PYRAMID
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(1)
    }

    fn check_domain(&self, _params: &ParamTuple) -> Result<(), TallyError> {
        Ok(())
    }

    fn exact(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        Ok(count_pyramids(params.values()))
    }

    fn enumerator(&self) -> Option<&dyn Enumerator> {
        Some(self)
    }
}

impl Enumerator for Pyramid {
    fn brute_force(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        Ok(brute_force_pyramids(params.values()))
    }
}
