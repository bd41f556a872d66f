use num_bigint::BigUint;
use tally_arith::ModValue;
use tally_check::{verify, verify_formulas, verify_parallel, verify_stickmen};
use tally_core::errors::TallyError;
use tally_core::params::ParamTuple;
use tally_core::EvalMode;
use tally_formula::{ids, Arity, Enumerator, Formula, FormulaRegistry};
use tally_mesh::InclusiveRange;
use tally_tree::DegreeSequence;

/// Closed form that is off by one at every even input above zero.
struct DriftsOnEvens;

impl Formula for DriftsOnEvens {
    fn id(&self) -> &'static str {
        "drifts-on-evens"
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(1)
    }

    fn check_domain(&self, _params: &ParamTuple) -> Result<(), TallyError> {
        Ok(())
    }

    fn exact(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        let x = params.get(0)?;
        let drift = u64::from(x > 0 && x % 2 == 0);
        Ok(BigUint::from(x + drift))
    }

    fn enumerator(&self) -> Option<&dyn Enumerator> {
        Some(self)
    }
}

impl Enumerator for DriftsOnEvens {
    fn brute_force(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        Ok(BigUint::from(params.get(0)?))
    }
}

/// Closed form `x` with no brute-force counterpart.
struct Identity;

impl Formula for Identity {
    fn id(&self) -> &'static str {
        "identity"
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(1)
    }

    fn check_domain(&self, _params: &ParamTuple) -> Result<(), TallyError> {
        Ok(())
    }

    fn exact(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        Ok(BigUint::from(params.get(0)?))
    }
}

fn drifting_registry() -> FormulaRegistry {
    let formulas: Vec<Box<dyn Formula>> = vec![Box::new(DriftsOnEvens), Box::new(Identity)];
    FormulaRegistry::from_formulas(formulas).unwrap()
}

fn ranges() -> [InclusiveRange; 1] {
    [InclusiveRange::new(0, 50).unwrap()]
}

#[test]
fn first_mismatch_carries_repro_data() {
    let registry = drifting_registry();
    let err = verify(&registry, "drifts-on-evens", &ranges(), EvalMode::Exact).unwrap_err();
    assert!(err.is_consistency());
    let info = err.info();
    assert_eq!(info.context.get("problem").map(String::as_str), Some("drifts-on-evens"));
    assert_eq!(info.context.get("params").map(String::as_str), Some("(2)"));
    assert_eq!(info.context.get("brute_force").map(String::as_str), Some("2"));
    assert_eq!(info.context.get("analytical").map(String::as_str), Some("3"));
    assert_eq!(info.context.get("mode").map(String::as_str), Some("exact"));
}

#[test]
fn parallel_run_reports_the_same_first_mismatch() {
    let registry = drifting_registry();
    let sequential = verify(&registry, "drifts-on-evens", &ranges(), EvalMode::Modular).unwrap_err();
    let parallel =
        verify_parallel(&registry, "drifts-on-evens", &ranges(), EvalMode::Modular).unwrap_err();
    assert_eq!(sequential, parallel);
}

#[test]
fn diverging_closed_forms_report_both_values() {
    let registry = drifting_registry();
    let err = verify_formulas(&registry, "identity", "drifts-on-evens", &ranges()).unwrap_err();
    assert!(err.is_consistency());
    let info = err.info();
    assert_eq!(info.code, "formula-mismatch");
    assert_eq!(
        info.context.get("problem").map(String::as_str),
        Some("identity vs drifts-on-evens")
    );
    assert_eq!(info.context.get("params").map(String::as_str), Some("(2)"));
    assert_eq!(info.context.get("lhs").map(String::as_str), Some("2"));
    assert_eq!(info.context.get("rhs").map(String::as_str), Some("3"));
    assert_eq!(info.context.get("mode").map(String::as_str), Some("modular"));

    let short = [InclusiveRange::new(0, 1).unwrap()];
    let outcome = verify_formulas(&registry, "identity", "drifts-on-evens", &short).unwrap();
    assert_eq!(outcome.checked, 2);
    assert_eq!(outcome.skipped, 0);
}

#[test]
fn wrong_range_count_is_a_domain_error() {
    let registry = FormulaRegistry::standard();
    let ranges = [InclusiveRange::new(0, 3).unwrap(); 3];
    let runs = [
        verify(&registry, ids::SELECTION_PRODUCT, &ranges, EvalMode::Exact),
        verify_parallel(&registry, ids::SELECTION_PRODUCT, &ranges, EvalMode::Exact),
        verify_formulas(
            &registry,
            ids::SELECTION_PRODUCT,
            ids::SELECTION_PRODUCT_LADDER,
            &ranges,
        ),
    ];
    for run in runs {
        let err = run.unwrap_err();
        assert!(matches!(err, TallyError::Domain(_)), "{err}");
        assert_eq!(err.info().code, "arity-mismatch");
        assert_eq!(
            err.info().context.get("problem").map(String::as_str),
            Some(ids::SELECTION_PRODUCT)
        );
        assert_eq!(err.info().context.get("found").map(String::as_str), Some("3"));
    }

    let err = verify(&registry, ids::TREE_EDGE, &ranges[..1], EvalMode::Exact).unwrap_err();
    assert_eq!(err.info().code, "arity-mismatch");
}

#[test]
fn stickman_methods_agree() {
    let sequences = vec![
        DegreeSequence::new(vec![4, 3, 1, 1, 1, 1, 1, 2]).unwrap(),
        DegreeSequence::new(vec![4, 4, 1, 1, 1, 1, 1, 1]).unwrap(),
        DegreeSequence::new(vec![5, 4, 3, 1, 1, 1, 1, 1, 1, 1, 1, 1, 4, 1]).unwrap(),
    ];
    let checks = verify_stickmen(&sequences, 8).unwrap();
    assert_eq!(checks.len(), 3);
    assert!(checks[0].brute_forced && checks[1].brute_forced);
    assert!(!checks[2].brute_forced);
    assert_eq!(checks[1].expected, ModValue::new(6));
    assert_eq!(checks[2].expected, ModValue::new(833_333_366));
    assert_eq!(checks[2].mask_predicate, 66_240);
}

#[test]
fn stickmen_reject_unrealizable_sequences() {
    let sequences = vec![DegreeSequence::new(vec![3, 3, 3]).unwrap()];
    assert!(verify_stickmen(&sequences, 8).is_err());
}
