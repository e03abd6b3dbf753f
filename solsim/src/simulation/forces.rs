//! Pairwise Newtonian gravity for the star/planet system
//!
//! Direct O(n^2) summation, no softening. A body that coincides exactly with
//! any other body gets a zero net force for that step (degeneracy guard); this
//! is a known simplification, not a collision model.

use rayon::prelude::*;

use crate::simulation::states::{Body, NVec2};

/// Newton's gravitational constant, SI units
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67408e-11;

/// Newtonian gravity with an injected constant `G`
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self { G: GRAVITATIONAL_CONSTANT }
    }
}

impl NewtonianGravity {
    #[allow(non_snake_case)]
    pub fn new(G: f64) -> Self {
        Self { G }
    }

    /// Net force on `bodies[target]` from every other body in `bodies`.
    ///
    /// Returns `(0, 0)` if any other body sits at exactly the same position,
    /// discarding the contributions of the non-degenerate pairs as well.
    pub fn compute_force(&self, target: usize, bodies: &[Body]) -> NVec2 {
        let bt = &bodies[target];
        let mut f = NVec2::zeros();
        let mut coincident = false;

        for (j, bo) in bodies.iter().enumerate() {
            if j == target {
                continue; // no self-attraction
            }

            // d points from the target towards the other body
            let d = bo.x - bt.x;
            let r = d.norm();
            if r == 0.0 {
                coincident = true;
                continue;
            }

            // F = G * m_t * m_o * d / r^3, with r^3 as pow(r, 3) rather than r * r * r
            f += self.G * bt.m * bo.m * d / r.powf(3.0);
        }

        if coincident {
            NVec2::zeros()
        } else {
            f
        }
    }

    /// Write the net force on every body into `out`, reading positions only.
    /// - `out[i]` is overwritten, never accumulated into
    pub fn forces_into(&self, bodies: &[Body], out: &mut [NVec2]) {
        for (i, f) in out.iter_mut().enumerate() {
            *f = self.compute_force(i, bodies);
        }
    }

    /// Same as [`forces_into`](Self::forces_into), one rayon task per body
    pub fn forces_into_parallel(&self, bodies: &[Body], out: &mut [NVec2]) {
        out.par_iter_mut()
            .enumerate()
            .for_each(|(i, f)| *f = self.compute_force(i, bodies));
    }

    /// Recompute `f` for every body from one positional snapshot.
    pub fn accumulate_forces(&self, bodies: &mut [Body]) {
        let mut scratch = vec![NVec2::zeros(); bodies.len()];
        self.forces_into(bodies, &mut scratch);
        store_forces(bodies, &scratch);
    }

    /// Parallel force phase; every write lands before this returns.
    pub fn accumulate_forces_parallel(&self, bodies: &mut [Body]) {
        let mut scratch = vec![NVec2::zeros(); bodies.len()];
        self.forces_into_parallel(bodies, &mut scratch);
        store_forces(bodies, &scratch);
    }
}

fn store_forces(bodies: &mut [Body], forces: &[NVec2]) {
    for (b, f) in bodies.iter_mut().zip(forces) {
        b.f = *f;
    }
}
