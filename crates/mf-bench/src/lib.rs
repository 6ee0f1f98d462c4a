//! Benchmark framework for synthetic modelforge workloads.
//!
//! A scenario describes the standard stress model: a shared source feeding
//! parallel branches, each branch a chain of array components, with the
//! last unit of every branch declared as objective and constraint. Running
//! a scenario measures assembly, setup, and execution cost.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::info;

use mf_core::{CostModel, MfResult, Value, WallClock};
use mf_model::{Component, Group, Node, Problem};
use mf_synth::{AbcdArrayComp, build_sequence, child_name};

/// A benchmark scenario definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchScenario {
    /// Unique identifier for this benchmark.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Number of parallel branches.
    pub pts: usize,
    /// Chain length within each branch.
    pub comps_per_branch: usize,
    /// Vector length of every variable.
    pub var_size: usize,
    /// Simulated nonlinear solve cost per component, in milliseconds.
    pub nl_delay_ms: f64,
    /// Simulated linear solve cost per component, in milliseconds.
    pub lin_delay_ms: f64,
    /// Notes about this benchmark.
    pub notes: Option<String>,
}

/// A single run's timing breakdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunMetrics {
    pub total_time_s: f64,
    pub build_time_s: f64,
    pub setup_time_s: f64,
    pub run_time_s: f64,
    pub linear_time_s: f64,
    pub components: usize,
    pub connections: usize,
}

/// Aggregated statistics for multiple runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub run_count: usize,
    pub total_time_median_s: f64,
    pub total_time_min_s: f64,
    pub total_time_max_s: f64,
    pub run_time_median_s: f64,
    pub run_time_min_s: f64,
    pub run_time_max_s: f64,
    pub setup_time_median_s: f64,
}

/// Complete benchmark result for a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchResult {
    pub scenario: BenchScenario,
    pub runs: Vec<RunMetrics>,
    pub aggregate: AggregateMetrics,
}

/// Collection of benchmark results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchSuite {
    pub label: String,
    pub results: Vec<BenchResult>,
}

/// Assemble the scenario's model: source -> parallel chains -> driver decls.
pub fn build_model(scenario: &BenchScenario, cost: Arc<dyn CostModel>) -> MfResult<Problem> {
    let nl = Duration::from_secs_f64(scenario.nl_delay_ms / 1000.0);
    let lin = Duration::from_secs_f64(scenario.lin_delay_ms / 1000.0);
    let comp = AbcdArrayComp::new(scenario.var_size).with_delays(nl, lin);

    let mut root = Group::new();
    root.add("P", Component::source("x", Value::ones(scenario.var_size)));

    let mut problem = Problem::default();
    problem.driver.add_desvar("P.x");

    let mut par = Group::parallel();
    for pt in 0..scenario.pts {
        let (branch, _) = build_sequence(
            || comp.build(Arc::clone(&cost)).into(),
            scenario.comps_per_branch,
            &[("c", "a"), ("d", "b")],
            None,
        )?;
        let node: Node = branch.into();
        let bname = child_name(&node, pt);
        par.add(&bname, node);

        if scenario.comps_per_branch > 0 {
            root.connect("P.x", format!("par.{}.C0.a", bname));

            let last = format!("par.{}.C{}", bname, scenario.comps_per_branch - 1);
            problem.driver.add_objective(format!("{}.c", last));
            problem.driver.add_constraint(format!("{}.d", last), Some(0.0), None);
        }
    }
    root.add("par", par);

    problem.root = root;
    Ok(problem)
}

/// Run a single benchmark scenario N times.
pub fn run_scenario(scenario: &BenchScenario, times: usize) -> MfResult<BenchResult> {
    let mut runs = Vec::with_capacity(times);

    for _ in 0..times {
        let wall_start = Instant::now();

        let build_start = Instant::now();
        let problem = build_model(scenario, Arc::new(WallClock))?;
        let build_time_s = build_start.elapsed().as_secs_f64();

        let setup_start = Instant::now();
        let mut system = problem.setup()?;
        let setup_time_s = setup_start.elapsed().as_secs_f64();

        let run_summary = system.run()?;
        let linear_summary = system.run_linear()?;

        runs.push(RunMetrics {
            total_time_s: wall_start.elapsed().as_secs_f64(),
            build_time_s,
            setup_time_s,
            run_time_s: run_summary.elapsed.as_secs_f64(),
            linear_time_s: linear_summary.elapsed.as_secs_f64(),
            components: run_summary.components,
            connections: run_summary.connections,
        });
    }

    info!(id = %scenario.id, runs = runs.len(), "scenario complete");

    let aggregate = compute_aggregates(&runs);
    Ok(BenchResult {
        scenario: scenario.clone(),
        runs,
        aggregate,
    })
}

fn median_of(mut sorted: Vec<f64>) -> (f64, f64, f64) {
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = sorted.get(sorted.len() / 2).copied().unwrap_or(0.0);
    let min = sorted.first().copied().unwrap_or(0.0);
    let max = sorted.last().copied().unwrap_or(0.0);
    (median, min, max)
}

fn compute_aggregates(runs: &[RunMetrics]) -> AggregateMetrics {
    if runs.is_empty() {
        return AggregateMetrics {
            run_count: 0,
            total_time_median_s: 0.0,
            total_time_min_s: 0.0,
            total_time_max_s: 0.0,
            run_time_median_s: 0.0,
            run_time_min_s: 0.0,
            run_time_max_s: 0.0,
            setup_time_median_s: 0.0,
        };
    }

    let (total_median, total_min, total_max) =
        median_of(runs.iter().map(|r| r.total_time_s).collect());
    let (run_median, run_min, run_max) = median_of(runs.iter().map(|r| r.run_time_s).collect());
    let (setup_median, _, _) = median_of(runs.iter().map(|r| r.setup_time_s).collect());

    AggregateMetrics {
        run_count: runs.len(),
        total_time_median_s: total_median,
        total_time_min_s: total_min,
        total_time_max_s: total_max,
        run_time_median_s: run_median,
        run_time_min_s: run_min,
        run_time_max_s: run_max,
        setup_time_median_s: setup_median,
    }
}

/// Default set of benchmark scenarios.
pub fn default_scenarios() -> Vec<BenchScenario> {
    vec![
        BenchScenario {
            id: "smoke".to_string(),
            name: "Single Short Chain".to_string(),
            pts: 1,
            comps_per_branch: 5,
            var_size: 100,
            nl_delay_ms: 1.0,
            lin_delay_ms: 1.0,
            notes: Some("Minimal sanity baseline".to_string()),
        },
        BenchScenario {
            id: "two_branch".to_string(),
            name: "Two Parallel Chains".to_string(),
            pts: 2,
            comps_per_branch: 50,
            var_size: 100_000,
            nl_delay_ms: 10.0,
            lin_delay_ms: 10.0,
            notes: Some("The standard two-point stress model".to_string()),
        },
        BenchScenario {
            id: "wide".to_string(),
            name: "Wide Shallow Fan".to_string(),
            pts: 8,
            comps_per_branch: 10,
            var_size: 10_000,
            nl_delay_ms: 5.0,
            lin_delay_ms: 5.0,
            notes: Some("Exercises branch-level parallelism".to_string()),
        },
    ]
}
