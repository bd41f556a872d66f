use log::{debug, warn};
use serde::Serialize;
use tally_arith::ModValue;
use tally_core::errors::{ErrorInfo, TallyError};
use tally_tree::{
    expected_stickmen, expected_stickmen_closed_form, stickmen_brute_force, stickmen_by_edges,
    stickmen_by_masks, DegreeSequence,
};

/// Stickman figures for one degree sequence after all methods agreed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StickmenCheck {
    /// Sequence under test.
    pub degrees: DegreeSequence,
    /// Expected stickmen per tree, modulo the prime.
    pub expected: ModValue,
    /// Whether the Prüfer brute force took part.
    pub brute_forced: bool,
    /// Value of the weight-seven mask predicate. Reported, never compared.
    pub mask_predicate: u64,
}

fn stickmen_mismatch(ds: &DegreeSequence, what: &str, lhs: String, rhs: String) -> TallyError {
    warn!("stickmen {what} mismatch for {ds}: {lhs} != {rhs}");
    TallyError::Consistency(
        ErrorInfo::new("stickmen-mismatch", format!("stickman counts disagree ({what})"))
            .with_context("problem", "stickmen")
            .with_context("params", ds.to_string())
            .with_context("lhs", lhs)
            .with_context("rhs", rhs),
    )
}

/// Checks the edge-sum expectation against the closed form for every sequence,
/// and the edge sum against Prüfer brute force when the sequence has at most
/// `brute_force_cap` nodes.
pub fn verify_stickmen(
    sequences: &[DegreeSequence],
    brute_force_cap: usize,
) -> Result<Vec<StickmenCheck>, TallyError> {
    let mut checks = Vec::with_capacity(sequences.len());
    for ds in sequences {
        let by_edges = expected_stickmen(ds)?;
        let closed_form = expected_stickmen_closed_form(ds)?;
        if by_edges != closed_form {
            return Err(stickmen_mismatch(
                ds,
                "edge sum vs closed form",
                by_edges.to_string(),
                closed_form.to_string(),
            ));
        }
        let brute_forced = ds.len() <= brute_force_cap;
        if brute_forced {
            let total = stickmen_by_edges(ds)?;
            let brute = stickmen_brute_force(ds)?;
            if total != brute {
                return Err(stickmen_mismatch(
                    ds,
                    "edge sum vs brute force",
                    total.to_string(),
                    brute.to_string(),
                ));
            }
        }
        debug!("stickmen {ds}: expected {by_edges}");
        checks.push(StickmenCheck {
            degrees: ds.clone(),
            expected: by_edges,
            brute_forced,
            mask_predicate: stickmen_by_masks(ds),
        });
    }
    Ok(checks)
}
