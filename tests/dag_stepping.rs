use std::collections::BTreeSet;
use std::error::Error;

use rundag::dag::{DagGraph, Scheduler};
use rundag::spec::{Jobs, normalize};
use rundag::ScheduleError;
use rundag_test_utils::builders::SpecBuilder;
use rundag_test_utils::recorder::Recorder;

type TestResult = Result<(), Box<dyn Error>>;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// A -> B -> C, plus D after A and C.
fn chain() -> Result<Jobs, ScheduleError> {
    let rec = Recorder::new();
    normalize(
        SpecBuilder::new()
            .bare("A", rec.job())
            .after("B", &["A"], rec.job())
            .after("C", &["B"], rec.job())
            .after("D", &["A", "C"], rec.job())
            .build(),
    )
}

#[test]
fn graph_records_dependencies_and_dependents() -> TestResult {
    let graph = DagGraph::from_jobs(&chain()?);

    assert_eq!(graph.len(), 4);
    assert_eq!(graph.dependencies_of("D"), names(&["A", "C"]).as_slice());
    assert_eq!(graph.dependents_of("A"), names(&["B", "D"]).as_slice());
    assert!(graph.dependents_of("D").is_empty());
    assert!(graph.dependencies_of("missing").is_empty());
    assert!(graph.unknown_dependencies().is_empty());
    Ok(())
}

#[test]
fn graph_reports_unknown_dependencies() -> TestResult {
    let rec = Recorder::new();
    let jobs = normalize(
        SpecBuilder::new()
            .bare("a", rec.job())
            .after("b", &["a", "ghost"], rec.job())
            .build(),
    )?;

    let graph = DagGraph::from_jobs(&jobs);

    assert_eq!(graph.unknown_dependencies(), vec![("b", "ghost")]);
    Ok(())
}

#[test]
fn scheduler_steps_one_round_at_a_time() -> TestResult {
    let mut scheduler = Scheduler::new(DagGraph::from_jobs(&chain()?));

    assert_eq!(scheduler.unmet_of("D"), Some(2));

    let r = scheduler.first_frontier()?;
    assert_eq!(r, names(&["A"]));
    scheduler.complete_round(&r);
    assert_eq!(scheduler.unmet_of("B"), Some(0));
    assert_eq!(scheduler.unmet_of("D"), Some(1));

    let r = scheduler.next_frontier()?;
    assert_eq!(r, Some(names(&["B"])));
    scheduler.complete_round(&names(&["B"]));

    let r = scheduler.next_frontier()?;
    assert_eq!(r, Some(names(&["C"])));
    scheduler.complete_round(&names(&["C"]));
    assert_eq!(scheduler.unmet_of("D"), Some(0));

    let r = scheduler.next_frontier()?;
    assert_eq!(r, Some(names(&["D"])));
    scheduler.complete_round(&names(&["D"]));

    assert!(scheduler.is_done());
    assert_eq!(scheduler.next_frontier()?, None);
    assert_eq!(scheduler.rounds(), 4);
    Ok(())
}

#[test]
fn frontier_is_not_recomputed_until_round_completes() -> TestResult {
    let mut scheduler = Scheduler::new(DagGraph::from_jobs(&chain()?));

    let first = scheduler.first_frontier()?;
    assert_eq!(first, names(&["A"]));

    // Nothing reported yet: A is still the only runnable job and nothing
    // downstream has moved.
    assert_eq!(scheduler.pending(), names(&["A", "B", "C", "D"]));
    assert_eq!(scheduler.unmet_of("B"), Some(1));
    Ok(())
}

#[test]
fn scheduler_without_start_fails_before_first_round() -> TestResult {
    let rec = Recorder::new();
    let jobs = normalize(
        SpecBuilder::new()
            .after("a", &["b"], rec.job())
            .after("b", &["a"], rec.job())
            .build(),
    )?;
    let mut scheduler = Scheduler::new(DagGraph::from_jobs(&jobs));

    assert!(matches!(
        scheduler.first_frontier(),
        Err(ScheduleError::NoStart)
    ));
    assert_eq!(scheduler.rounds(), 0);
    Ok(())
}

#[test]
fn cycles_among_finds_only_real_cycles() -> TestResult {
    let rec = Recorder::new();
    let jobs = normalize(
        SpecBuilder::new()
            .after("a", &["b"], rec.job())
            .after("b", &["a"], rec.job())
            .after("c", &["a"], rec.job())
            .after("s", &["s"], rec.job())
            .build(),
    )?;
    let graph = DagGraph::from_jobs(&jobs);

    let cycles = graph.cycles_among(&names(&["a", "b", "c", "s"]));

    assert_eq!(cycles, vec![names(&["a", "b"]), names(&["s"])]);
    Ok(())
}

#[test]
fn required_for_collects_transitive_dependencies() -> TestResult {
    let graph = DagGraph::from_jobs(&chain()?);

    let needed = graph.required_for("C")?;
    let expected: BTreeSet<String> = names(&["A", "B", "C"]).into_iter().collect();
    assert_eq!(needed, expected);

    assert!(matches!(
        graph.required_for("Z"),
        Err(ScheduleError::UnknownJob(_))
    ));
    Ok(())
}
