//! Stickman counting.
//!
//! A stickman is an edge `u - v` together with three further neighbours of `u`
//! and two further neighbours of `v`, or the mirror image.

use log::debug;
use num_bigint::BigUint;
use num_traits::Zero;
use tally_arith::{binomial, mod_inverse, ModValue};
use tally_core::errors::TallyError;
use tally_core::MODULUS;
use tally_mesh::masks;

use crate::cayley::{count_trees_with_edge, normalize};
use crate::degree::DegreeSequence;
use crate::prufer::trees_with_degrees;

/// Stickmen sitting on one edge whose endpoints have degrees `du` and `dv`.
pub fn stickmen_at_edge(du: u64, dv: u64) -> BigUint {
    let (a, b) = (du as i64 - 1, dv as i64 - 1);
    binomial(a, 3) * binomial(b, 2) + binomial(a, 2) * binomial(b, 3)
}

/// Stickmen in one tree given its degrees and edge list.
pub fn stickmen_in_tree(degrees: &[u64], edges: &[(usize, usize)]) -> BigUint {
    edges
        .iter()
        .map(|(u, v)| stickmen_at_edge(degrees[*u], degrees[*v]))
        .sum()
}

fn candidate_pairs(sorted: &DegreeSequence) -> impl Iterator<Item = (usize, usize)> + '_ {
    let degrees = sorted.degrees();
    (0..degrees.len())
        .take_while(move |i| degrees[*i] > 3)
        .flat_map(move |i| {
            (i + 1..degrees.len())
                .take_while(move |j| degrees[*j] > 2)
                .map(move |j| (i, j))
        })
}

/// Total number of stickmen over all trees realizing `ds`, summed edge by edge:
/// every ordered-by-degree pair with `d_i > 3` and `d_j > 2` contributes its
/// stickmen per tree times the number of trees containing that edge.
pub fn stickmen_by_edges(ds: &DegreeSequence) -> Result<BigUint, TallyError> {
    let sorted = ds.sorted_descending();
    let mut total = BigUint::zero();
    for (i, j) in candidate_pairs(&sorted) {
        let (di, dj) = sorted.pair(i, j)?;
        total += stickmen_at_edge(di, dj) * count_trees_with_edge(&sorted, i, j)?;
    }
    Ok(total)
}

/// Expected number of stickmen in a uniformly random tree realizing `ds`,
/// modulo the prime.
pub fn expected_stickmen(ds: &DegreeSequence) -> Result<ModValue, TallyError> {
    let total = stickmen_by_edges(ds)?;
    normalize(ModValue::from_biguint(&total), ds)
}

/// Linear-pass closed form of [`expected_stickmen`]:
/// `sum a(a-1) b(b-1) (a+b-4) (a+b) / (12 (n-2))` with `a = d_i - 1`, `b = d_j - 1`
/// over the same pairs. Sequences with fewer than seven nodes hold no stickman.
pub fn expected_stickmen_closed_form(ds: &DegreeSequence) -> Result<ModValue, TallyError> {
    ds.require_realizable()?;
    let n = ds.len();
    if n < 7 {
        return Ok(ModValue::ZERO);
    }
    let sorted = ds.sorted_descending();
    let degrees = sorted.degrees();
    let mut sum = ModValue::ZERO;
    for (i, j) in candidate_pairs(&sorted) {
        let a = ModValue::new(degrees[i] - 1);
        let b = ModValue::new(degrees[j] - 1);
        let a_falling = a * (a - ModValue::ONE);
        let b_falling = b * (b - ModValue::ONE);
        let spread = a + b;
        sum += a_falling * b_falling * (spread - ModValue::new(4)) * spread;
    }
    let inv12 = ModValue::new(mod_inverse(12, MODULUS)?);
    let denom = ModValue::new(n as u64 - 2).inverse()?;
    Ok(sum * inv12 * denom)
}

/// Exact stickman total by decoding every tree realizing `ds`. Cost is
/// `n^(n-2)` decodes; keep `n` small.
pub fn stickmen_brute_force(ds: &DegreeSequence) -> Result<BigUint, TallyError> {
    let trees = trees_with_degrees(ds)?;
    debug!("stickmen brute force over {} trees of {}", trees.len(), ds);
    Ok(trees
        .iter()
        .map(|edges| stickmen_in_tree(ds.degrees(), edges))
        .sum())
}

/// Weight-seven mask predicate, reproduced as found.
///
/// For every choice of seven nodes the selected degrees, reduced by 12, form one
/// extra node appended to the unselected ones. When the result has a tree sum,
/// each ordered pair of distinct selected nodes with degrees above 3 and 2 adds
/// 10; when it is empty of degree, the mask adds 10. The combinatorial meaning is
/// not established and the value is not expected to match the other methods.
pub fn stickmen_by_masks(ds: &DegreeSequence) -> u64 {
    let degrees = ds.degrees();
    let mut answer = 0u64;
    for mask in masks(degrees.len(), 7) {
        let selected: Vec<u64> = degrees
            .iter()
            .zip(&mask)
            .filter(|(_, bit)| **bit == 1)
            .map(|(d, _)| *d)
            .collect();
        let mut rest: Vec<u64> = degrees
            .iter()
            .zip(&mask)
            .filter(|(_, bit)| **bit == 0)
            .map(|(d, _)| *d)
            .collect();
        let extra = selected.iter().sum::<u64>() as i64 - 12;
        if extra > 0 {
            rest.push(extra as u64);
        }
        let rest_sum = rest.iter().sum::<u64>() as i64;
        if rest_sum == 2 * rest.len() as i64 - 2 {
            for (i, di) in selected.iter().enumerate() {
                for (j, dj) in selected.iter().enumerate() {
                    if *di > 3 && *dj > 2 && i != j {
                        answer += 10;
                    }
                }
            }
        } else if rest_sum == 0 {
            answer += 10;
        }
    }
    answer
}
