//! Fixed-step time integrator for the atom system
//!
//! Semi-implicit (symplectic) Euler: the velocity is kicked by the
//! accumulated force first, then the position drifts with the new velocity

use super::states::Body;

/// Advance one body by `dt` from its already-accumulated force
/// a = F / m, v_n+1 = v_n + dt a, x_n+1 = x_n + dt v_n+1
pub fn semi_implicit_euler(body: &mut Body, dt: f64) {
    let a = body.f / body.m;

    // Kick
    body.v += dt * a;

    // Drift with the updated velocity
    body.x += dt * body.v;
}

/// Integrate every body; forces for all of them must already be summed
pub fn integrate_all(bodies: &mut [Body], dt: f64) {
    for b in bodies.iter_mut() {
        semi_implicit_euler(b, dt);
    }
}
