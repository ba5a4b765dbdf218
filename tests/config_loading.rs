use std::error::Error;
use std::fs;

use chrono::NaiveDate;
use cpmdag::config::loader::load_and_validate;
use cpmdag::config::validate_config;
use cpmdag::dag::Scheduler;
use cpmdag::errors::CpmError;
use cpmdag_test_utils::builders::{PlanBuilder, TaskSpecBuilder};
use cpmdag_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn plan_file_round_trip() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Cpmdag.toml");
    fs::write(
        &path,
        r#"
[project]
start_date = "2026-03-02"

[task.A]
duration = 2

[task.B]
duration = 1

[task.D]
duration = 3
after = ["A", "B"]
"#,
    )?;

    let cfg = load_and_validate(&path)?;
    assert_eq!(cfg.task.len(), 3);
    assert_eq!(cfg.task["D"].after, ["A", "B"]);

    let mut scheduler = Scheduler::from_config(&cfg)?;
    scheduler.recompute()?;

    let d0 = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    assert_eq!(scheduler.start_date(), d0);
    assert_eq!(
        scheduler.end_date(),
        NaiveDate::from_ymd_opt(2026, 3, 7) // A(2) -> D(3)
    );
    Ok(())
}

#[test]
fn missing_plan_file_fails() {
    let err = load_and_validate("does/not/exist/Cpmdag.toml").unwrap_err();
    assert!(matches!(err, CpmError::Other(_) | CpmError::IoError(_)));
}

#[test]
fn unparsable_toml_fails() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Cpmdag.toml");
    fs::write(&path, "[project\nstart_date = ")?;

    let err = load_and_validate(&path).unwrap_err();
    assert!(matches!(err, CpmError::TomlError(_)));
    Ok(())
}

#[test]
fn empty_plan_is_rejected() {
    let cfg = PlanBuilder::new("2026-03-02").build();
    let err = validate_config(&cfg).unwrap_err();
    assert!(matches!(err, CpmError::ConfigError(_)));
}

#[test]
fn bad_start_date_is_rejected() {
    let cfg = PlanBuilder::new("02/03/2026").task("A", 1).build();
    let err = validate_config(&cfg).unwrap_err();
    assert!(matches!(err, CpmError::ConfigError(_)));
}

#[test]
fn negative_duration_is_rejected() {
    let cfg = PlanBuilder::new("2026-03-02").task("A", -3).build();
    let err = validate_config(&cfg).unwrap_err();
    assert!(matches!(
        err,
        CpmError::InvalidDuration { days: -3, .. }
    ));
}

#[test]
fn unknown_after_reference_is_rejected() {
    let cfg = PlanBuilder::new("2026-03-02")
        .with_task("A", TaskSpecBuilder::new(1).after("ghost").build())
        .build();
    let err = validate_config(&cfg).unwrap_err();
    assert!(matches!(err, CpmError::ConfigError(_)));
}

#[test]
fn self_dependency_in_plan_is_rejected() {
    let cfg = PlanBuilder::new("2026-03-02")
        .with_task("A", TaskSpecBuilder::new(1).after("A").build())
        .build();
    let err = validate_config(&cfg).unwrap_err();
    assert!(matches!(err, CpmError::SelfDependency(name) if name == "A"));
}

#[test]
fn dependency_cycle_in_plan_is_rejected() {
    let cfg = PlanBuilder::new("2026-03-02")
        .with_task("A", TaskSpecBuilder::new(1).after("C").build())
        .with_task("B", TaskSpecBuilder::new(1).after("A").build())
        .with_task("C", TaskSpecBuilder::new(1).after("B").build())
        .build();
    let err = validate_config(&cfg).unwrap_err();
    assert!(matches!(err, CpmError::CyclicGraph(_)));
}
