//! Build a ready-to-run simulation from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) plus the initial-conditions records
//! and produces a `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - the gravity model (`NewtonianGravity`)
//! - the files the run reads and writes
//!
//! With the `viewer` feature the scenario doubles as a Bevy `Resource`.

use std::path::PathBuf;

use anyhow::Result;
use log::info;

use crate::configuration::config::ScenarioConfig;
use crate::persistence::snapshot::{load_bodies, save_bodies};
use crate::persistence::trajectory::TrajectoryLog;
use crate::simulation::engine::{Engine, NoObserver, Simulation, StepObserver};
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, System};

#[cfg_attr(feature = "viewer", derive(bevy::prelude::Resource))]
pub struct Scenario {
    pub simulation: Simulation,
    pub parameters: Parameters,
    pub stats: Option<PathBuf>,
    pub snapshot: Option<PathBuf>,
}

impl Scenario {
    /// Load the initial-conditions file named in `cfg` and assemble the run.
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let bodies = load_bodies(&cfg.files.initial)?;
        Ok(Self::from_bodies(cfg, bodies))
    }

    pub fn from_bodies(cfg: ScenarioConfig, bodies: Vec<Body>) -> Self {
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            steps: p_cfg.steps,
            G: p_cfg.G,
            log_every: p_cfg.log_every,
        };

        let engine = Engine {
            parallel: cfg.engine.parallel,
        };
        let gravity = NewtonianGravity::new(parameters.G);

        Self {
            simulation: Simulation::new(engine, gravity, System::new(bodies)),
            parameters,
            stats: cfg.files.stats,
            snapshot: cfg.files.snapshot,
        }
    }

    pub fn system(&self) -> &System {
        &self.simulation.system
    }

    /// One step of the configured `dt`.
    pub fn step(&mut self) {
        self.simulation.step(self.parameters.dt);
    }

    /// Run every configured step, logging and snapshotting as configured.
    pub fn run(&mut self) -> Result<()> {
        let p = self.parameters.clone();
        let com_v0 = self.system().center_of_mass_velocity();
        info!(
            "running {} bodies for {} steps of {} s (parallel: {})",
            self.system().bodies.len(),
            p.steps,
            p.dt,
            self.simulation.engine.parallel
        );

        match self.stats.clone() {
            Some(path) => {
                let mut log = TrajectoryLog::create(&path, &self.simulation.system.bodies)?;
                self.run_with(&mut log)?;
                info!("{} trajectory records written", log.records());
                log.finish()?;
            }
            None => self.run_with(&mut NoObserver)?,
        }

        let drift = (self.system().center_of_mass_velocity() - com_v0).norm();
        info!("finished at t = {} s, centre-of-mass velocity drift {drift:e} m/s", self.system().t);

        if let Some(path) = &self.snapshot {
            save_bodies(path, &self.simulation.system.bodies)?;
        }
        Ok(())
    }

    /// Run every configured step, reporting to `observer` on the log stride.
    pub fn run_with(&mut self, observer: &mut dyn StepObserver) -> Result<()> {
        let p = &self.parameters;
        self.simulation.run(p.steps, p.dt, p.log_every, observer)
    }
}
