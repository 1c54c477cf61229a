use crate::dynamics;
use crate::gnc::angle::wrap_angle;
use crate::physics::World;
use crate::vehicle::Lander;

// ---------------------------------------------------------------------------
// Planar RK4 integrator with actuator commands held over the step
// ---------------------------------------------------------------------------

/// Single RK4 step: advance the lander by `dt` in place.
///
/// Orientation is wrapped into [0, 2pi) and fuel clamped at zero; once the
/// tanks run dry the engine flames out and `thrusting` is cleared.
pub fn rk4_step(lander: &mut Lander, world: &World, dt: f64) {
    let state = lander.snapshot(0, 0.0);
    let k1 = dynamics::derivatives(&state, lander, world);
    let k2 = dynamics::derivatives(&state.apply(&k1, dt * 0.5), lander, world);
    let k3 = dynamics::derivatives(&state.apply(&k2, dt * 0.5), lander, world);
    let k4 = dynamics::derivatives(&state.apply(&k3, dt), lander, world);

    lander.pos += (k1.dpos + 2.0 * k2.dpos + 2.0 * k3.dpos + k4.dpos) * (dt / 6.0);
    lander.vel += (k1.dvel + 2.0 * k2.dvel + 2.0 * k3.dvel + k4.dvel) * (dt / 6.0);
    lander.orientation = wrap_angle(
        state.orientation + (k1.dtheta + 2.0 * k2.dtheta + 2.0 * k3.dtheta + k4.dtheta) * (dt / 6.0),
    );
    lander.omega += (k1.domega + 2.0 * k2.domega + 2.0 * k3.domega + k4.domega) * (dt / 6.0);
    lander.fuel = (state.fuel
        + (k1.dfuel + 2.0 * k2.dfuel + 2.0 * k3.dfuel + k4.dfuel) * (dt / 6.0))
        .max(0.0);

    if lander.fuel <= 0.0 && lander.thrusting {
        log::warn!("{}: propellant exhausted, engine flame-out", lander.name);
        lander.thrusting = false;
    }
}
