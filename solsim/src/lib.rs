pub mod simulation;
pub mod configuration;
pub mod persistence;
pub mod analysis;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, BodyKind, System, NVec2};
pub use simulation::forces::{NewtonianGravity, GRAVITATIONAL_CONSTANT};
pub use simulation::integrator::advance;
pub use simulation::engine::{step, step_parallel, Engine, Simulation, StepObserver};
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, FilesConfig, ScenarioConfig};

pub use persistence::snapshot::{read_bodies, write_bodies, load_bodies, save_bodies};
pub use persistence::trajectory::{read_trajectory, load_trajectory, TrajectoryLog, Trajectory};

pub use analysis::series::{two_body_series, Series};

#[cfg(feature = "viewer")]
pub use visualization::solsim_vis2d::run_2d;

pub use benchmark::benchmark::{bench_gravity, bench_step_curve};
