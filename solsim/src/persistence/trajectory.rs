//! Trajectory log (`stats.txt`), written incrementally during a run
//!
//! ```text
//! Star 30 red
//! Planet 5 blue
//! #End of the header
//!
//! 1000
//! 0e0 0e0 0e0 0e0
//! 1.496e11 2.98e7 -2.98e1 2.98e4
//!
//! 2000
//! ...
//! ```
//!
//! Header: `<Kind> <radius> <color>` per body. Records: the elapsed time on
//! its own line, then `<x> <y> <vx> <vy>` per body, then a blank line.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;

use crate::simulation::engine::StepObserver;
use crate::simulation::states::{Body, BodyKind, NVec2};

pub const END_OF_HEADER: &str = "#End of the header";

/// Writes the header on creation and one record per observed step.
pub struct TrajectoryLog<W: Write> {
    out: W,
    records: u64,
}

impl<W: Write> TrajectoryLog<W> {
    pub fn new(mut out: W, bodies: &[Body]) -> Result<Self> {
        for b in bodies {
            writeln!(out, "{} {} {}", b.kind, b.radius, b.color)?;
        }
        writeln!(out, "{END_OF_HEADER}")?;
        writeln!(out)?;
        Ok(Self { out, records: 0 })
    }

    pub fn record(&mut self, t: f64, bodies: &[Body]) -> Result<()> {
        writeln!(self.out, "{t}")?;
        for b in bodies {
            writeln!(self.out, "{:e} {:e} {:e} {:e}", b.x.x, b.x.y, b.v.x, b.v.y)?;
        }
        writeln!(self.out)?;
        self.records += 1;
        Ok(())
    }

    pub fn records(&self) -> u64 {
        self.records
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl TrajectoryLog<BufWriter<File>> {
    /// Truncate `path` and write the header.
    pub fn create(path: &Path, bodies: &[Body]) -> Result<Self> {
        let file = File::create(path).with_context(|| format!("creating trajectory log {}", path.display()))?;
        info!("trajectory log: {}", path.display());
        Self::new(BufWriter::new(file), bodies)
    }
}

impl<W: Write> StepObserver for TrajectoryLog<W> {
    fn observe(&mut self, t: f64, bodies: &[Body]) -> Result<()> {
        self.record(t, bodies)
    }
}

/// One header line of a trajectory log
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub kind: BodyKind,
    pub radius: i64,
    pub color: String,
}

/// Position and velocity of one body in one record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub x: NVec2,
    pub v: NVec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub t: f64,
    pub states: Vec<BodyState>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    pub legend: Vec<LegendEntry>,
    pub frames: Vec<Frame>,
}

/// Parse a whole trajectory log.
///
/// A body line before the first time line is an error; a frame may hold
/// fewer body lines than the header announces (a run cut short).
pub fn read_trajectory<R: BufRead>(reader: R) -> Result<Trajectory> {
    let mut traj = Trajectory::default();
    let mut in_header = true;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = idx + 1;

        if in_header {
            if line.trim_end() == END_OF_HEADER {
                in_header = false;
            } else if !line.trim().is_empty() {
                let entry = parse_legend(&line).with_context(|| format!("header line {lineno}: `{line}`"))?;
                traj.legend.push(entry);
            }
            continue;
        }

        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let nums = parse_numbers(&line).with_context(|| format!("line {lineno}: `{line}`"))?;
        match nums.as_slice() {
            [t] => traj.frames.push(Frame { t: *t, states: Vec::new() }),
            [x, y, vx, vy] => match traj.frames.last_mut() {
                Some(frame) => frame.states.push(BodyState {
                    x: NVec2::new(*x, *y),
                    v: NVec2::new(*vx, *vy),
                }),
                None => bail!("line {lineno}: body state before any time line"),
            },
            _ => bail!("line {lineno}: expected 1 or 4 numbers, found {}", nums.len()),
        }
    }

    if in_header {
        bail!("missing `{END_OF_HEADER}` line");
    }
    Ok(traj)
}

pub fn load_trajectory(path: &Path) -> Result<Trajectory> {
    let file = File::open(path).with_context(|| format!("opening trajectory log {}", path.display()))?;
    read_trajectory(BufReader::new(file)).with_context(|| format!("reading {}", path.display()))
}

fn parse_legend(line: &str) -> Result<LegendEntry> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        bail!("expected `<Kind> <radius> <color>`");
    }
    Ok(LegendEntry {
        kind: tokens[0].parse()?,
        radius: tokens[1].parse().with_context(|| format!("invalid radius `{}`", tokens[1]))?,
        color: tokens[2].to_string(),
    })
}

fn parse_numbers(line: &str) -> Result<Vec<f64>> {
    line.split_whitespace()
        .map(|tok| tok.parse::<f64>().with_context(|| format!("invalid number `{tok}`")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bodies() -> Vec<Body> {
        vec![
            Body::new(BodyKind::Star, 30, "red", 2.0e30, NVec2::zeros(), NVec2::zeros()),
            Body::new(BodyKind::Planet, 5, "blue", 6.0e24, NVec2::new(1.5, 0.0), NVec2::new(0.0, -2.25)),
        ]
    }

    #[test]
    fn header_then_records() {
        let bodies = bodies();
        let mut log = TrajectoryLog::new(Vec::new(), &bodies).unwrap();
        log.record(10.0, &bodies).unwrap();
        assert_eq!(log.records(), 1);
        let text = String::from_utf8(log.finish().unwrap()).unwrap();
        assert_eq!(
            text,
            "Star 30 red\nPlanet 5 blue\n#End of the header\n\n10\n0e0 0e0 0e0 0e0\n1.5e0 0e0 0e0 -2.25e0\n\n"
        );
    }

    #[test]
    fn reads_back_what_was_written() {
        let bodies = bodies();
        let mut log = TrajectoryLog::new(Vec::new(), &bodies).unwrap();
        log.record(1.0, &bodies).unwrap();
        log.record(2.5, &bodies).unwrap();
        let bytes = log.finish().unwrap();

        let traj = read_trajectory(bytes.as_slice()).unwrap();
        assert_eq!(traj.legend.len(), 2);
        assert_eq!(traj.legend[1].color, "blue");
        assert_eq!(traj.frames.len(), 2);
        assert_eq!(traj.frames[1].t, 2.5);
        assert_eq!(traj.frames[1].states[1].v, NVec2::new(0.0, -2.25));
    }

    #[test]
    fn body_line_before_time_is_an_error() {
        let text = "Star 1 red\n#End of the header\n\n1 2 3 4\n";
        assert!(read_trajectory(text.as_bytes()).is_err());
    }

    #[test]
    fn body_line_with_extra_numbers_is_an_error() {
        let text = "Star 1 red\n#End of the header\n\n1\n1 2 3 4 5\n";
        let err = read_trajectory(text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("expected 1 or 4 numbers, found 5"));
    }

    #[test]
    fn missing_end_of_header_is_an_error() {
        assert!(read_trajectory("Star 1 red\n".as_bytes()).is_err());
    }
}
