// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::dag::Scheduler;
use crate::errors::CpmError;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - plan loading + validation
/// - scheduler construction
/// - schedule recomputation
/// - table rendering
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let mut scheduler = Scheduler::from_config(&cfg)?;
    scheduler.recompute()?;

    print_schedule(&scheduler);

    if let Some(ref name) = args.task {
        print_task_detail(&scheduler, name)?;
    }

    Ok(())
}

/// Render the computed schedule, one row per task in insertion order.
/// Critical-path rows (zero slack) are marked with `*`.
fn print_schedule(scheduler: &Scheduler) {
    println!("project start: {}", fmt_date(Some(scheduler.start_date())));
    println!("project end:   {}", fmt_date(scheduler.end_date()));
    println!();

    println!(
        "  {:<12} {:>4}  {:>10}  {:>10}  {:>10}  {:>10}  {:>5}",
        "task", "days", "early st.", "early fin.", "late st.", "late fin.", "slack"
    );
    for task in scheduler.tasks() {
        let marker = if task.slack_days() == Some(0) { "*" } else { " " };
        let slack = task
            .slack_days()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{} {:<12} {:>4}  {:>10}  {:>10}  {:>10}  {:>10}  {:>5}",
            marker,
            task.name(),
            task.duration_days(),
            fmt_date(task.early_start()),
            fmt_date(task.early_finish()),
            fmt_date(task.late_start()),
            fmt_date(task.late_finish()),
            slack,
        );
    }
}

/// Print the predecessor and successor lists of one task.
fn print_task_detail(scheduler: &Scheduler, name: &str) -> Result<()> {
    let task = scheduler
        .find_task(name)
        .ok_or_else(|| CpmError::TaskNotFound(name.to_string()))?;

    println!();
    println!("task {}", task.name());
    println!("  duration: {} days", task.duration_days());
    println!("  predecessors: {:?}", task.predecessors());
    println!("  successors:   {:?}", task.successors());

    Ok(())
}

/// Simple dry-run output: print tasks and dependencies, no scheduling.
fn print_dry_run(cfg: &ConfigFile) {
    println!("cpmdag dry-run");
    println!("  project.start_date = {}", cfg.project.start_date);
    println!();

    println!("tasks ({}):", cfg.task.len());
    for (name, task) in cfg.task.iter() {
        println!("  - {name}");
        println!("      duration: {} days", task.duration);
        if !task.after.is_empty() {
            println!("      after: {:?}", task.after);
        }
    }

    debug!("dry-run complete (no scheduling)");
}

/// Day/month/year, the format the schedule table uses.
fn fmt_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => "-".to_string(),
    }
}
