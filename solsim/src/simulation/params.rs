//! Numerical and physical parameters for a run
//!
//! `Parameters` holds runtime settings:
//! - step size and number of steps,
//! - gravitational constant `G`,
//! - trajectory log stride

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64,          // step size, seconds
    pub steps: u64,       // number of steps to run
    pub G: f64,           // gravitational constant
    pub log_every: u64,   // record every n-th step
}
