use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use air_cargo_planner::config::ProblemConfig;
use air_cargo_planner::pddl::heuristic::Heuristic;
use air_cargo_planner::pddl::instances;
use air_cargo_planner::pddl::search::astar;

#[derive(Debug, Parser)]
#[command(name = "air-cargo", version, about = "Plans air cargo deliveries with A* search.")]
struct Cli {
    /// Sample problem to solve: p1, p2 or p3.
    #[arg(long, default_value = "p1", conflicts_with = "file")]
    problem: String,

    /// TOML problem file to solve instead of a sample problem.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Heuristic guiding the search. Overrides the problem file's [search] table.
    #[arg(long, value_enum)]
    heuristic: Option<Heuristic>,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let (problem, configured) = match &cli.file {
        Some(path) => {
            let config = ProblemConfig::load(path).with_context(|| format!("loading {}", path.display()))?;
            let heuristic = config.search.heuristic;
            (config.into_problem().with_context(|| format!("building problem from {}", path.display()))?, heuristic)
        }
        None => (instances::by_name(&cli.problem)?, Heuristic::default()),
    };
    let heuristic = cli.heuristic.unwrap_or(configured);
    info!(%heuristic, literals = problem.state_map().len(), actions = problem.actions_list().len(), "searching");

    match astar(&problem, |node| heuristic.evaluate(&problem, node))? {
        Some(solution) => {
            println!("Plan length: {}  Expansions: {}  Goal tests: {}  New nodes: {}",
                solution.plan.len(), solution.expansions, solution.goal_tests, solution.new_nodes);
            for action in &solution.plan {
                println!("\t{}", action);
            }
            let end = problem.execute(solution.plan.iter().copied())?;
            println!("Final state: {}", problem.decode(&end)?);
        }
        None => println!("No plan reaches the goal."),
    }
    Ok(())
}
