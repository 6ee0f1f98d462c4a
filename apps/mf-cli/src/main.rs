use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use clap::{Parser, Subcommand};
use tracing::info;

use mf_bench::{BenchScenario, BenchSuite, build_model, default_scenarios, run_scenario};
use mf_core::NoCost;

#[derive(Parser)]
#[command(name = "mf-cli")]
#[command(about = "Modelforge CLI - synthetic model benchmarking tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available benchmark scenarios
    List {
        /// Path to a scenario YAML file (defaults to the built-in set)
        #[arg(long)]
        scenarios: Option<PathBuf>,
    },
    /// Run benchmark scenarios and print a summary
    Bench {
        /// Path to a scenario YAML file (defaults to the built-in set)
        #[arg(long)]
        scenarios: Option<PathBuf>,
        /// Only run the scenario with this id
        #[arg(long)]
        id: Option<String>,
        /// Repetitions per scenario
        #[arg(long, default_value_t = 5)]
        times: usize,
        /// Write the full result suite to a JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Set up a scenario's model and print its resolved connections
    Connections {
        /// Scenario id
        id: String,
        /// Path to a scenario YAML file (defaults to the built-in set)
        #[arg(long)]
        scenarios: Option<PathBuf>,
    },
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { scenarios } => cmd_list(scenarios.as_deref()),
        Commands::Bench {
            scenarios,
            id,
            times,
            output,
        } => cmd_bench(scenarios.as_deref(), id.as_deref(), times, output.as_deref()),
        Commands::Connections { id, scenarios } => cmd_connections(&id, scenarios.as_deref()),
    }
}

fn load_scenarios(path: Option<&Path>) -> CliResult<Vec<BenchScenario>> {
    match path {
        Some(p) => {
            let text = fs::read_to_string(p)?;
            let scenarios: Vec<BenchScenario> = serde_yaml::from_str(&text)?;
            info!(count = scenarios.len(), file = %p.display(), "loaded scenarios");
            Ok(scenarios)
        }
        None => Ok(default_scenarios()),
    }
}

fn find_scenario(scenarios: Vec<BenchScenario>, id: &str) -> CliResult<BenchScenario> {
    scenarios
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| format!("No scenario with id '{}'", id).into())
}

fn cmd_list(path: Option<&Path>) -> CliResult<()> {
    let scenarios = load_scenarios(path)?;

    println!("Available scenarios:\n");
    for s in &scenarios {
        println!(
            "  {:12} {} ({} branches x {} comps, vectors of {})",
            s.id, s.name, s.pts, s.comps_per_branch, s.var_size
        );
        if let Some(notes) = &s.notes {
            println!("  {:12} {}", "", notes);
        }
    }
    Ok(())
}

fn cmd_bench(
    path: Option<&Path>,
    id: Option<&str>,
    times: usize,
    output: Option<&Path>,
) -> CliResult<()> {
    let mut scenarios = load_scenarios(path)?;
    if let Some(id) = id {
        scenarios = vec![find_scenario(scenarios, id)?];
    }

    let mut results = Vec::new();
    for (idx, scenario) in scenarios.iter().enumerate() {
        print!("[{}/{}] {} ... ", idx + 1, scenarios.len(), scenario.name);
        std::io::Write::flush(&mut std::io::stdout())?;

        match run_scenario(scenario, times) {
            Ok(result) => {
                println!("OK ({:.3}s median)", result.aggregate.total_time_median_s);
                results.push(result);
            }
            Err(e) => {
                println!("FAILED");
                eprintln!("  Error: {}", e);
            }
        }
    }

    println!();
    for result in &results {
        let agg = &result.aggregate;
        println!("{}", result.scenario.name);
        println!(
            "  Total: {:.4}s median ({:.4}s..{:.4}s over {} runs)",
            agg.total_time_median_s, agg.total_time_min_s, agg.total_time_max_s, agg.run_count
        );
        println!(
            "  Run:   {:.4}s median, setup {:.4}s median",
            agg.run_time_median_s, agg.setup_time_median_s
        );
    }

    if let Some(out) = output {
        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)?
            .as_secs();
        let suite = BenchSuite {
            label: format!("suite_{}", timestamp),
            results,
        };
        fs::write(out, serde_json::to_string_pretty(&suite)?)?;
        println!("\nResults saved to: {}", out.display());
    }

    Ok(())
}

fn cmd_connections(id: &str, path: Option<&Path>) -> CliResult<()> {
    let scenario = find_scenario(load_scenarios(path)?, id)?;

    // Assemble without simulated cost; we only inspect structure here.
    let problem = build_model(&scenario, Arc::new(NoCost))?;
    let system = problem.setup()?;

    println!(
        "{}: {} components, {} variables, {} connections\n",
        scenario.name,
        system.component_count(),
        system.variable_count(),
        system.connection_count()
    );

    for (src, dst) in system.list_connections() {
        println!("  {} -> {}", src, dst);
    }

    let driver = system.driver();
    println!("\nDriver:");
    for path in driver.desvars() {
        println!("  desvar     {}", path);
    }
    for path in driver.objectives() {
        println!("  objective  {}", path);
    }
    for decl in driver.constraints() {
        match (decl.lower, decl.upper) {
            (Some(lo), Some(hi)) => {
                println!("  constraint {} (lower={}, upper={})", decl.path, lo, hi)
            }
            (Some(lo), None) => println!("  constraint {} (lower={})", decl.path, lo),
            (None, Some(hi)) => println!("  constraint {} (upper={})", decl.path, hi),
            (None, None) => println!("  constraint {}", decl.path),
        }
    }

    Ok(())
}
