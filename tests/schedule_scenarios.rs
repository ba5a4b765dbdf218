use std::error::Error;

use chrono::{Days, NaiveDate};
use cpmdag::dag::Scheduler;
use cpmdag_test_utils::builders::{PlanBuilder, TaskSpecBuilder};

type TestResult = Result<(), Box<dyn Error>>;

fn day0() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn day(offset: u64) -> NaiveDate {
    day0() + Days::new(offset)
}

/// A(2), B(1), C(6), D(3), E(3), F(5) with A->D, B->D, B->E, C->E, D->F, E->F.
fn converging_paths() -> Scheduler {
    let mut scheduler = Scheduler::new(day0());

    for (name, days) in [("A", 2), ("B", 1), ("C", 6), ("D", 3), ("E", 3), ("F", 5)] {
        scheduler.add_task(name, days).unwrap();
    }
    for (pred, succ) in [
        ("A", "D"),
        ("B", "D"),
        ("B", "E"),
        ("C", "E"),
        ("D", "F"),
        ("E", "F"),
    ] {
        scheduler.add_dependency(pred, succ).unwrap();
    }

    scheduler
}

#[test]
fn converging_paths_early_dates_and_end() -> TestResult {
    let mut scheduler = converging_paths();
    scheduler.recompute()?;

    let d = scheduler.find_task("D").unwrap();
    assert_eq!(d.early_start(), Some(day(2)));
    assert_eq!(d.early_finish(), Some(day(5)));

    let e = scheduler.find_task("E").unwrap();
    assert_eq!(e.early_start(), Some(day(6)));
    assert_eq!(e.early_finish(), Some(day(9)));

    let f = scheduler.find_task("F").unwrap();
    assert_eq!(f.early_start(), Some(day(9)));
    assert_eq!(f.early_finish(), Some(day(14)));

    assert_eq!(scheduler.end_date(), Some(day(14)));
    Ok(())
}

#[test]
fn converging_paths_slack_marks_critical_path() -> TestResult {
    let mut scheduler = converging_paths();
    scheduler.recompute()?;

    // C -> E -> F is the longest chain and has no room to slip.
    for name in ["C", "E", "F"] {
        assert_eq!(scheduler.find_task(name).unwrap().slack_days(), Some(0));
    }
    assert_eq!(scheduler.find_task("A").unwrap().slack_days(), Some(4));
    assert_eq!(scheduler.find_task("B").unwrap().slack_days(), Some(5));
    assert_eq!(scheduler.find_task("D").unwrap().slack_days(), Some(4));
    Ok(())
}

#[test]
fn source_tasks_start_at_project_start() -> TestResult {
    let mut scheduler = converging_paths();
    scheduler.recompute()?;

    for name in ["A", "B", "C"] {
        assert!(scheduler.graph().is_source(name));
        assert_eq!(scheduler.find_task(name).unwrap().early_start(), Some(day0()));
    }
    assert!(scheduler.graph().is_sink("F"));
    assert!(!scheduler.graph().is_sink("D"));
    Ok(())
}

#[test]
fn date_invariants_hold_per_task() -> TestResult {
    let mut scheduler = converging_paths();
    scheduler.recompute()?;

    for task in scheduler.tasks() {
        let es = task.early_start().unwrap();
        let ef = task.early_finish().unwrap();
        let ls = task.late_start().unwrap();
        let lf = task.late_finish().unwrap();
        let days = task.duration_days() as i64;

        assert_eq!(ef.signed_duration_since(es).num_days(), days);
        assert_eq!(lf.signed_duration_since(ls).num_days(), days);
        assert!(es <= ls, "task {} scheduled before its late start", task.name());
    }
    Ok(())
}

/// Two independent components: A(10) alone; B(5) -> C(3).
#[test]
fn independent_components_schedule_from_start() -> TestResult {
    let cfg = PlanBuilder::new("2026-03-02")
        .task("A", 10)
        .task("B", 5)
        .with_task("C", TaskSpecBuilder::new(3).after("B").build())
        .build();

    let mut scheduler = Scheduler::from_config(&cfg)?;
    scheduler.recompute()?;

    let a = scheduler.find_task("A").unwrap();
    assert_eq!(a.early_start(), Some(day(0)));
    assert_eq!(a.early_finish(), Some(day(10)));

    let b = scheduler.find_task("B").unwrap();
    assert_eq!(b.early_start(), Some(day(0)));
    assert_eq!(b.early_finish(), Some(day(5)));

    let c = scheduler.find_task("C").unwrap();
    assert_eq!(c.early_start(), Some(day(5)));
    assert_eq!(c.early_finish(), Some(day(8)));

    // A is both source and sink of its component and bounds the project.
    assert_eq!(scheduler.end_date(), Some(day(10)));
    assert_eq!(a.slack_days(), Some(0));
    assert_eq!(b.slack_days(), Some(2));
    assert_eq!(c.slack_days(), Some(2));
    Ok(())
}

#[test]
fn recompute_is_idempotent() -> TestResult {
    let mut scheduler = converging_paths();
    scheduler.recompute()?;

    let snapshot: Vec<_> = scheduler
        .tasks()
        .map(|t| {
            (
                t.name().to_string(),
                t.early_start(),
                t.early_finish(),
                t.late_start(),
                t.late_finish(),
            )
        })
        .collect();
    let end = scheduler.end_date();

    scheduler.recompute()?;

    let again: Vec<_> = scheduler
        .tasks()
        .map(|t| {
            (
                t.name().to_string(),
                t.early_start(),
                t.early_finish(),
                t.late_start(),
                t.late_finish(),
            )
        })
        .collect();

    assert_eq!(snapshot, again);
    assert_eq!(end, scheduler.end_date());
    Ok(())
}

#[test]
fn mutation_invalidates_computed_dates() -> TestResult {
    let mut scheduler = converging_paths();
    scheduler.recompute()?;
    assert!(scheduler.end_date().is_some());

    scheduler.add_task("G", 4)?;

    assert_eq!(scheduler.end_date(), None);
    for task in scheduler.tasks() {
        assert_eq!(task.early_start(), None);
        assert_eq!(task.late_finish(), None);
    }

    scheduler.recompute()?;
    assert_eq!(scheduler.end_date(), Some(day(14)));
    Ok(())
}

#[test]
fn empty_graph_has_no_end_date() -> TestResult {
    let mut scheduler = Scheduler::new(day0());
    scheduler.recompute()?;
    assert_eq!(scheduler.end_date(), None);
    Ok(())
}

#[test]
fn tasks_are_listed_in_insertion_order() -> TestResult {
    let scheduler = converging_paths();
    let names: Vec<&str> = scheduler.tasks().map(|t| t.name()).collect();
    assert_eq!(names, ["A", "B", "C", "D", "E", "F"]);
    Ok(())
}
