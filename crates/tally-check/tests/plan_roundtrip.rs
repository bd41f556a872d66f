use std::fs;
use std::path::PathBuf;

use tally_check::{load_plan, run_plan, VerificationPlan, VerificationReport, REPORT_FILE};
use tally_core::errors::TallyError;
use tally_core::EvalMode;
use tally_formula::FormulaRegistry;

fn plan_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("plans")
        .join(name)
}

fn write_plan(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("plan.yaml");
    fs::write(&path, body).expect("write plan");
    path
}

#[test]
fn bundled_plans_load() {
    let registry = FormulaRegistry::standard();
    for name in ["selection_small.yaml", "components.yaml", "pyramid.yaml"] {
        let plan = load_plan(plan_path(name)).expect("plan loads");
        plan.validate(&registry).expect("plan is valid");
    }
}

#[test]
fn yaml_round_trip_is_stable() {
    let plan = load_plan(plan_path("components.yaml")).expect("plan loads");
    assert!(plan.parallel);
    let yaml = plan.to_yaml_string().expect("serialize");
    let reparsed = VerificationPlan::from_yaml_slice(yaml.as_bytes()).expect("reparse");
    assert_eq!(plan, reparsed);
    assert_eq!(plan.plan_hash().unwrap(), reparsed.plan_hash().unwrap());
}

#[test]
fn run_writes_hashed_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_plan(
        &dir,
        "problem: min-sum\nmode: modular\nranges:\n  - [0, 6]\n  - [2, 4]\n",
    );
    let registry = FormulaRegistry::standard();
    let plan = load_plan(&path).expect("plan loads");
    let report = run_plan(&plan, &registry).expect("run");
    assert_eq!(report.checked, 21);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.mode, EvalMode::Modular);

    let out = dir.path().join("out");
    let written = report.write_to_dir(&out).expect("write");
    assert_eq!(written, out.join(REPORT_FILE));
    let read_back = VerificationReport::read(&written).expect("read");
    assert_eq!(read_back, report);

    let again = run_plan(&plan, &registry).expect("rerun");
    assert_eq!(again.report_hash, report.report_hash);
    assert_eq!(again.to_bytes().unwrap(), report.to_bytes().unwrap());
}

#[test]
fn defaults_apply() {
    let plan = VerificationPlan::from_yaml_slice(b"problem: pyramid\nranges:\n  - [1, 2]\n")
        .expect("parse");
    assert_eq!(plan.mode, EvalMode::Exact);
    assert!(!plan.parallel);
}

#[test]
fn invalid_plans_are_rejected() {
    let registry = FormulaRegistry::standard();

    let err = VerificationPlan::from_yaml_slice(b"problem: min-sum\nranges:\n  - [5, 1]\n  - [0, 1]\n")
        .unwrap_err();
    assert_eq!(err.info().code, "empty-range");
    assert!(matches!(err, TallyError::Domain(_)));

    let plan = VerificationPlan::from_yaml_slice(b"problem: min-sum\nranges:\n  - [0, 1]\n")
        .expect("parse");
    let err = plan.validate(&registry).unwrap_err();
    assert!(matches!(err, TallyError::Domain(_)));
    assert_eq!(err.info().context.get("problem").map(String::as_str), Some("min-sum"));

    let err = VerificationPlan::from_yaml_slice(b"problem: [unterminated").unwrap_err();
    assert!(matches!(err, TallyError::Serde(_)));

    let err = VerificationPlan::from_yaml_slice(b"problem: min-sum\nranges: []\nthreads: 4\n")
        .unwrap_err();
    assert!(matches!(err, TallyError::Serde(_)));

    let missing = tempfile::tempdir().expect("tempdir");
    let err = load_plan(missing.path().join("absent.yaml")).unwrap_err();
    assert_eq!(err.info().code, "plan_read");
}
