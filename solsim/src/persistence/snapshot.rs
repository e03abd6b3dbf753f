//! Initial-conditions / snapshot records, one body per line:
//!
//! ```text
//! <Kind> <radius:int> <color> <mass> <x> <y> <vx> <vy>
//! Star 30 red 1.98892E30 0 0 0 0
//! ```
//!
//! Mass, position and velocity are written in shortest round-trip `e` notation.
//! Blank lines and lines starting with `#` are skipped. The kind is matched
//! case-insensitively and written back in canonical case.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use log::{info, warn};

use crate::simulation::states::{Body, BodyKind, NVec2};

/// Parse every body record from `reader`, in file order.
pub fn read_bodies<R: BufRead>(reader: R) -> Result<Vec<Body>> {
    let mut bodies = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = idx + 1;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(body) = parse_record(&line).with_context(|| format!("line {lineno}: `{line}`"))? {
            bodies.push(body);
        }
    }
    Ok(bodies)
}

/// `Ok(None)` for a record whose kind is neither star nor planet.
fn parse_record(line: &str) -> Result<Option<Body>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let kind = match tokens[0].parse::<BodyKind>() {
        Ok(kind) => kind,
        Err(_) => {
            warn!("skipping unknown space object `{}`", tokens[0]);
            return Ok(None);
        }
    };
    if tokens.len() < 8 {
        bail!("expected 8 fields, found {}", tokens.len());
    }

    let radius: i64 = field(&tokens, 1, "radius")?;
    let color = tokens[2].to_string();
    let m: f64 = field(&tokens, 3, "mass")?;
    let x = NVec2::new(field(&tokens, 4, "x")?, field(&tokens, 5, "y")?);
    let v = NVec2::new(field(&tokens, 6, "vx")?, field(&tokens, 7, "vy")?);

    Ok(Some(Body::new(kind, radius, color, m, x, v)))
}

fn field<T>(tokens: &[&str], i: usize, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    tokens[i]
        .parse()
        .with_context(|| format!("invalid {name} `{}`", tokens[i]))
}

/// Write one record per body.
pub fn write_bodies<W: Write>(mut out: W, bodies: &[Body]) -> Result<()> {
    for b in bodies {
        writeln!(
            out,
            "{} {} {} {:e} {:e} {:e} {:e} {:e}",
            b.kind, b.radius, b.color, b.m, b.x.x, b.x.y, b.v.x, b.v.y
        )?;
    }
    out.flush()?;
    Ok(())
}

pub fn load_bodies(path: &Path) -> Result<Vec<Body>> {
    let file = File::open(path).with_context(|| format!("opening initial conditions {}", path.display()))?;
    let bodies = read_bodies(BufReader::new(file)).with_context(|| format!("reading {}", path.display()))?;
    info!("loaded {} bodies from {}", bodies.len(), path.display());
    Ok(bodies)
}

pub fn save_bodies(path: &Path, bodies: &[Body]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating snapshot {}", path.display()))?;
    write_bodies(BufWriter::new(file), bodies)?;
    info!("wrote {} bodies to {}", bodies.len(), path.display());
    Ok(())
}
