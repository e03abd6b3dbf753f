//! Fixed-step integrator for a single body
//!
//! Two-stage acceleration averaging: an acceleration is taken before and
//! after a predicted move and the mean of the two drives the final update.
//! The force is not re-evaluated at the predicted position, so both stages
//! read the same start-of-step force and the mean equals the first stage.
//! Trajectories depend on this exact update, keep it as is.

use super::states::Body;

/// Advance `body` by `dt` using the force already stored in `body.f`.
/// Position and velocity are updated in place, `f` is left untouched.
pub fn advance(body: &mut Body, dt: f64) {
    // Start-of-step position
    let x1 = body.x;

    // a1 from the current force (zero for a massless body)
    let a1 = body.acceleration();

    // Predicted end-of-step position
    body.x += body.v * dt + a1 * (dt * dt) / 2.0;

    // a2 at the predicted position, from the same stored force
    let a2 = body.acceleration();

    let a = (a1 + a2) / 2.0;

    // Final position from x1 with the mean velocity over the step
    body.x = x1 + dt * (body.v + (body.v + a * dt)) / 2.0 + a * (dt * dt) / 2.0;

    body.v += a * dt;
}
