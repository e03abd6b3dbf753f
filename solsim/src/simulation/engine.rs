//! Runtime engine: settings and the whole-system time step
//!
//! A step is two strictly separated phases:
//! 1. every body's force from the same pre-step snapshot of positions
//! 2. every body moved by the integrator with the shared `dt`
//!
//! No position or velocity is written before all forces are in place, so the
//! result does not depend on the order of the body collection.

use anyhow::Result;
use log::debug;

use super::forces::NewtonianGravity;
use super::integrator::advance;
use super::states::{Body, System};

#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub parallel: bool, // false = sequential force phase, true = rayon
}

/// Advance every body in `bodies` by `dt`.
pub fn step(bodies: &mut [Body], gravity: &NewtonianGravity, dt: f64) {
    gravity.accumulate_forces(bodies);
    move_bodies(bodies, dt);
}

/// [`step`] with the force phase spread over rayon.
pub fn step_parallel(bodies: &mut [Body], gravity: &NewtonianGravity, dt: f64) {
    gravity.accumulate_forces_parallel(bodies);
    move_bodies(bodies, dt);
}

fn move_bodies(bodies: &mut [Body], dt: f64) {
    for b in bodies.iter_mut() {
        advance(b, dt);
    }
}

/// Receives the body collection after a step; the trajectory log is one.
pub trait StepObserver {
    fn observe(&mut self, t: f64, bodies: &[Body]) -> Result<()>;
}

/// Observer that ignores everything
pub struct NoObserver;

impl StepObserver for NoObserver {
    fn observe(&mut self, _t: f64, _bodies: &[Body]) -> Result<()> {
        Ok(())
    }
}

/// A body collection, its clock and the settings that move it
pub struct Simulation {
    pub engine: Engine,
    pub gravity: NewtonianGravity,
    pub system: System,
}

impl Simulation {
    pub fn new(engine: Engine, gravity: NewtonianGravity, system: System) -> Self {
        Self { engine, gravity, system }
    }

    /// One step of `dt`; advances `system.t`.
    pub fn step(&mut self, dt: f64) {
        if self.engine.parallel {
            step_parallel(&mut self.system.bodies, &self.gravity, dt);
        } else {
            step(&mut self.system.bodies, &self.gravity, dt);
        }
        self.system.t += dt;
    }

    /// Run `steps` steps, handing the state to `observer` after every
    /// `every`-th one (and never otherwise). Stops at the first observer error.
    pub fn run(&mut self, steps: u64, dt: f64, every: u64, observer: &mut dyn StepObserver) -> Result<()> {
        let every = every.max(1);
        for n in 1..=steps {
            self.step(dt);
            if n % every == 0 {
                debug!("step {n}: t = {}", self.system.t);
                observer.observe(self.system.t, &self.system.bodies)?;
            }
        }
        Ok(())
    }
}
