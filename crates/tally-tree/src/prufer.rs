use num_bigint::BigUint;
use tally_core::errors::{ErrorInfo, TallyError};
use tally_core::rng::RngHandle;
use tally_mesh::mesh;

use crate::degree::DegreeSequence;

/// Degrees of the tree encoded by `code` on `n` nodes: one plus the number of
/// occurrences of each label.
pub fn prufer_degrees(code: &[u64], n: usize) -> Vec<u64> {
    let mut degrees = vec![1u64; n];
    for label in code {
        degrees[*label as usize] += 1;
    }
    degrees
}

/// Edge list of the labeled tree encoded by `code` on `n = code.len() + 2` nodes.
pub fn decode_prufer(code: &[u64], n: usize) -> Result<Vec<(usize, usize)>, TallyError> {
    if n < 2 || code.len() + 2 != n || code.iter().any(|label| *label as usize >= n) {
        return Err(TallyError::Domain(
            ErrorInfo::new("bad-prufer-code", "code length must be n - 2 with labels below n")
                .with_context("n", n.to_string())
                .with_context("length", code.len().to_string()),
        ));
    }
    let mut remaining = prufer_degrees(code, n);
    let mut edges = Vec::with_capacity(n - 1);
    for label in code {
        let label = *label as usize;
        // a code of this shape always leaves a leaf available.
        let leaf = remaining.iter().position(|d| *d == 1).unwrap_or(0);
        edges.push((leaf, label));
        remaining[leaf] -= 1;
        remaining[label] -= 1;
    }
    let mut last = remaining
        .iter()
        .enumerate()
        .filter(|(_, d)| **d == 1)
        .map(|(node, _)| node);
    if let (Some(u), Some(v)) = (last.next(), last.next()) {
        edges.push((u, v));
    }
    Ok(edges)
}

/// Every labeled tree realizing `ds`, found by scanning all `n^(n-2)` Prüfer codes.
pub fn trees_with_degrees(ds: &DegreeSequence) -> Result<Vec<Vec<(usize, usize)>>, TallyError> {
    let n = ds.len();
    if n < 2 {
        return Ok(Vec::new());
    }
    let bounds = vec![n as u64 - 1; n - 2];
    let mut trees = Vec::new();
    for code in mesh(&bounds) {
        if prufer_degrees(&code, n) == ds.degrees() {
            trees.push(decode_prufer(&code, n)?);
        }
    }
    Ok(trees)
}

/// Brute-force counterpart of [`crate::count_trees`].
pub fn brute_force_count_trees(ds: &DegreeSequence) -> Result<BigUint, TallyError> {
    Ok(BigUint::from(trees_with_degrees(ds)?.len()))
}

/// Brute-force counterpart of [`crate::count_trees_with_edge`].
pub fn brute_force_count_trees_with_edge(
    ds: &DegreeSequence,
    i: usize,
    j: usize,
) -> Result<BigUint, TallyError> {
    ds.pair(i, j)?;
    let hits = trees_with_degrees(ds)?
        .iter()
        .filter(|edges| {
            edges
                .iter()
                .any(|(u, v)| (*u == i && *v == j) || (*u == j && *v == i))
        })
        .count();
    Ok(BigUint::from(hits))
}

/// Degree sequence of a uniformly random labeled tree on `n >= 2` nodes.
pub fn random_degree_sequence(n: usize, rng: &mut RngHandle) -> Result<DegreeSequence, TallyError> {
    if n < 2 {
        return Err(TallyError::domain(
            "tree-too-small",
            "random trees need at least two nodes",
        ));
    }
    let code: Vec<u64> = (0..n - 2).map(|_| rng.below(n as u64)).collect();
    Ok(DegreeSequence::from_raw(prufer_degrees(&code, n)))
}
