//! Plot series derived from a trajectory log.
//!
//! For every frame: elapsed time, distance between the first two bodies and
//! the magnitude of their relative velocity.

use std::io::Write;

use anyhow::{bail, Result};

use crate::persistence::trajectory::{LegendEntry, Trajectory};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub legend: Vec<LegendEntry>,
    pub t: Vec<f64>, // elapsed time
    pub r: Vec<f64>, // |x2 - x1|
    pub v: Vec<f64>, // |v2 - v1|
}

impl Series {
    /// `t r v` per line, whitespace separated.
    pub fn write_columns<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "# t r v")?;
        for ((t, r), v) in self.t.iter().zip(&self.r).zip(&self.v) {
            writeln!(out, "{t} {r} {v}")?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Frames holding fewer than two body states are skipped.
pub fn two_body_series(traj: &Trajectory) -> Result<Series> {
    if traj.legend.len() < 2 {
        bail!("need at least two bodies, the log lists {}", traj.legend.len());
    }

    let mut series = Series {
        legend: traj.legend.clone(),
        ..Default::default()
    };
    for frame in &traj.frames {
        if let [first, second, ..] = frame.states.as_slice() {
            series.t.push(frame.t);
            series.r.push((second.x - first.x).norm());
            series.v.push((second.v - first.v).norm());
        }
    }
    Ok(series)
}
