//! Configuration types for loading simulation runs from YAML.
//!
//! A run is described by:
//!
//! - [`EngineConfig`]     – how the force phase is executed
//! - [`ParametersConfig`] – step size, step count, physical constant, log stride
//! - [`FilesConfig`]      – initial conditions, trajectory log and final snapshot
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   parallel: false         # true -> force phase on rayon
//!
//! parameters:
//!   dt: 1000.0              # seconds per step
//!   steps: 100000           # number of steps
//!   G: 6.67408e-11          # optional, gravitational constant
//!   log_every: 10           # optional, trajectory record stride
//!
//! files:
//!   initial: one_satellite.txt
//!   stats: stats.txt        # optional
//!   snapshot: final.txt     # optional
//! ```
//!
//! Paths under `files` are relative to the YAML file's directory.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::simulation::forces::GRAVITATIONAL_CONSTANT;

/// Engine options
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub parallel: bool, // compute forces on rayon; trajectories are identical either way
}

/// Numerical and physical parameters
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64,    // time step size, seconds
    pub steps: u64, // number of steps to run
    #[serde(default = "default_g")]
    pub G: f64, // gravitational constant
    #[serde(default = "default_log_every")]
    pub log_every: u64, // write a trajectory record every n steps
}

fn default_g() -> f64 {
    GRAVITATIONAL_CONSTANT
}

fn default_log_every() -> u64 {
    1
}

/// Input and output files of a run
#[derive(Deserialize, Debug, Clone)]
pub struct FilesConfig {
    pub initial: PathBuf,          // initial-conditions records
    pub stats: Option<PathBuf>,    // trajectory log
    pub snapshot: Option<PathBuf>, // final state in the initial-conditions format
}

/// Top-level run configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub files: FilesConfig,
}

impl ScenarioConfig {
    /// Parse a YAML document and check the parameters.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load `path` and resolve every relative file entry against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening scenario {}", path.display()))?;
        let mut cfg = Self::from_reader(BufReader::new(file))
            .with_context(|| format!("reading scenario {}", path.display()))?;
        if let Some(dir) = path.parent() {
            cfg.files.resolve_against(dir);
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.parameters;
        if !(p.dt.is_finite() && p.dt > 0.0) {
            bail!("dt must be a positive finite number, got {}", p.dt);
        }
        if p.log_every == 0 {
            bail!("log_every must be at least 1");
        }
        if !p.G.is_finite() {
            bail!("G must be finite, got {}", p.G);
        }
        Ok(())
    }
}

impl FilesConfig {
    fn resolve_against(&mut self, dir: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = dir.join(&*p);
            }
        };
        join(&mut self.initial);
        if let Some(p) = self.stats.as_mut() {
            join(p);
        }
        if let Some(p) = self.snapshot.as_mut() {
            join(p);
        }
    }
}
