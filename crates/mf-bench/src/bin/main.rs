//! Standalone benchmark runner for modelforge.

use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use mf_bench::{BenchSuite, default_scenarios, run_scenario};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Determine repo root (two levels up from this crate).
    let crate_root = env!("CARGO_MANIFEST_DIR");
    let crate_path = PathBuf::from(crate_root);
    let repo_root = crate_path
        .parent()
        .and_then(|p| p.parent())
        .ok_or("Could not determine repo root")?
        .to_path_buf();

    println!("Modelforge Benchmark Suite");
    println!("==========================\n");

    let scenarios = default_scenarios();
    println!("Running {} scenarios, 5 runs each...\n", scenarios.len());

    let mut results = Vec::new();

    for (idx, scenario) in scenarios.iter().enumerate() {
        print!("[{}/{}] {} ... ", idx + 1, scenarios.len(), scenario.name);
        std::io::Write::flush(&mut std::io::stdout())?;

        match run_scenario(scenario, 5) {
            Ok(result) => {
                let median = result.aggregate.total_time_median_s;
                println!("OK ({:.3}s median)", median);
                results.push(result);
            }
            Err(e) => {
                println!("FAILED");
                eprintln!("  Error: {}", e);
            }
        }
    }

    println!("\n==========================");
    println!("Benchmark Results Summary");
    println!("==========================\n");

    for result in &results {
        let scenario = &result.scenario;
        let agg = &result.aggregate;

        println!("{}", scenario.name);
        println!(
            "  Shape: {} branches x {} comps, vectors of {}",
            scenario.pts, scenario.comps_per_branch, scenario.var_size
        );
        println!(
            "  Total time:  {:.4}s (median), min: {:.4}s, max: {:.4}s",
            agg.total_time_median_s, agg.total_time_min_s, agg.total_time_max_s
        );
        println!(
            "  Run time:    {:.4}s (median), min: {:.4}s, max: {:.4}s",
            agg.run_time_median_s, agg.run_time_min_s, agg.run_time_max_s
        );
        println!("  Setup time:  {:.4}s (median)", agg.setup_time_median_s);
        println!();
    }

    // Write JSON baseline.
    let timestamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)?
        .as_secs();
    let baseline_json = serde_json::to_string_pretty(&BenchSuite {
        label: format!("baseline_{}", timestamp),
        results,
    })?;

    let baseline_path = repo_root.join("benchmarks").join("baseline.json");
    fs::create_dir_all(baseline_path.parent().unwrap())?;
    fs::write(&baseline_path, baseline_json)?;

    println!("Baseline saved to: {}", baseline_path.display());

    Ok(())
}
