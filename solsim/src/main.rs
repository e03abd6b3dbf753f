use solsim::{ScenarioConfig, Scenario};
use solsim::{load_trajectory, two_body_series};
use solsim::{bench_gravity, bench_step_curve};

use clap::{Parser, Subcommand};
use anyhow::Result;

use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(version, about = "Star/planet gravity simulation")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scenario, writing the trajectory log and final snapshot it names
    Run {
        #[arg(default_value = "scenarios/one_satellite.yaml")]
        scenario: PathBuf,
    },
    /// Print `t r v` columns for the first two bodies of a trajectory log
    Series {
        #[arg(default_value = "stats.txt")]
        stats: PathBuf,
    },
    /// Open the live 2D viewer on a scenario
    #[cfg(feature = "viewer")]
    View {
        #[arg(default_value = "scenarios/one_satellite.yaml")]
        scenario: PathBuf,
    },
    /// Time the force phase and full steps
    Bench,
}

// load here to keep main clean
fn load_scenario(path: &Path) -> Result<Scenario> {
    let cfg = ScenarioConfig::load(path)?;
    log::debug!("{:?}", cfg);
    Scenario::build_scenario(cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Args::parse().command {
        Command::Run { scenario } => {
            let mut scenario = load_scenario(&scenario)?;
            scenario.run()?;
        }
        Command::Series { stats } => {
            let traj = load_trajectory(&stats)?;
            two_body_series(&traj)?.write_columns(io::stdout().lock())?;
        }
        #[cfg(feature = "viewer")]
        Command::View { scenario } => {
            solsim::run_2d(load_scenario(&scenario)?);
        }
        Command::Bench => {
            bench_gravity();
            bench_step_curve();
        }
    }

    Ok(())
}
