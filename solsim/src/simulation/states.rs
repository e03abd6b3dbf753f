//! Core state types for the star/planet simulation.
//!
//! - `Body`   one point mass, tagged as a star or a planet
//! - `System` the flat body collection plus the elapsed simulation time `t`
//!
//! Positions, velocities and forces are `NVec2` (SI units).

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Error};
use nalgebra::Vector2;

pub type NVec2 = Vector2<f64>;

/// Display/persistence tag. Physics treats both kinds identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyKind::Star => f.write_str("Star"),
            BodyKind::Planet => f.write_str("Planet"),
        }
    }
}

impl FromStr for BodyKind {
    type Err = Error;

    /// Case-insensitive: `star`, `STAR` and `Star` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("star") {
            Ok(BodyKind::Star)
        } else if s.eq_ignore_ascii_case("planet") {
            Ok(BodyKind::Planet)
        } else {
            bail!("unknown body kind `{s}`")
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub kind: BodyKind,
    pub radius: i64,   // pixels, display only
    pub color: String, // display only
    pub m: f64,        // mass, kg (may be zero)
    pub x: NVec2,      // position
    pub v: NVec2,      // velocity
    pub f: NVec2,      // net force, rewritten every step
}

impl Body {
    pub fn new(kind: BodyKind, radius: i64, color: impl Into<String>, m: f64, x: NVec2, v: NVec2) -> Self {
        Self {
            kind,
            radius,
            color: color.into(),
            m,
            x,
            v,
            f: NVec2::zeros(),
        }
    }

    pub fn star(m: f64, x: NVec2, v: NVec2) -> Self {
        Self::new(BodyKind::Star, 10, "red", m, x, v)
    }

    pub fn planet(m: f64, x: NVec2, v: NVec2) -> Self {
        Self::new(BodyKind::Planet, 5, "blue", m, x, v)
    }

    /// `f / m`, or zero for a massless body.
    pub fn acceleration(&self) -> NVec2 {
        if self.m != 0.0 {
            self.f / self.m
        } else {
            NVec2::zeros()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // flat collection, iteration order is step order
    pub t: f64,            // elapsed simulation time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    pub fn total_momentum(&self) -> NVec2 {
        self.bodies.iter().fold(NVec2::zeros(), |p, b| p + b.m * b.v)
    }

    /// Zero when the system carries no mass at all.
    pub fn center_of_mass_velocity(&self) -> NVec2 {
        let m = self.total_mass();
        if m != 0.0 {
            self.total_momentum() / m
        } else {
            NVec2::zeros()
        }
    }
}
