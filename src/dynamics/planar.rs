use crate::dynamics::state::{Deriv, State};
use crate::physics::forces::{angular_accel, gravity_accel, thrust_accel};
use crate::physics::World;
use crate::vehicle::Lander;

// ---------------------------------------------------------------------------
// Planar (3DOF) equations of motion
// ---------------------------------------------------------------------------

/// Compute planar state derivatives with the lander's actuator commands held
/// constant.
///
/// Forces & moments:
///   1. Gravity (uniform, screen +y)
///   2. Thrust along the body axis while the engine is lit and fuel remains
///   3. Commanded torque about the centre of rotation
pub fn derivatives(state: &State, lander: &Lander, world: &World) -> Deriv {
    let mass = lander.dry_mass + state.fuel;
    let a_thrust = thrust_accel(lander, state.orientation, mass, state.fuel);
    let burning = lander.thrusting && state.fuel > 0.0;

    Deriv {
        dpos: state.vel * lander.pixels_per_meter,
        dvel: gravity_accel(world) + a_thrust,
        dtheta: state.omega,
        domega: angular_accel(lander),
        dfuel: if burning { -lander.mass_flow() } else { 0.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Pad;
    use crate::vehicle::presets;
    use std::f64::consts::FRAC_PI_2;

    fn world() -> World {
        World::new(9.8, Pad::flat(0.0, 500.0, 100.0))
    }

    #[test]
    fn free_fall_only_gravity() {
        let l = presets::eagle();
        let d = derivatives(&l.snapshot(0, 0.0), &l, &world());
        assert_eq!(d.dvel.x, 0.0);
        assert!((d.dvel.y - 9.8).abs() < 1e-12);
        assert_eq!(d.dfuel, 0.0);
        assert_eq!(d.domega, 0.0);
    }

    #[test]
    fn upright_burn_decelerates_descent() {
        let mut l = presets::eagle();
        l.orientation = 3.0 * FRAC_PI_2;
        l.thrusting = true;
        l.thrust = l.max_thrust;
        let d = derivatives(&l.snapshot(0, 0.0), &l, &world());
        assert!(d.dvel.y < 0.0, "TWR > 1 -> net upward, got {}", d.dvel.y);
        assert!(d.dfuel < 0.0);
    }

    #[test]
    fn position_rate_is_scaled_to_pixels() {
        let mut l = presets::eagle();
        l.vel.x = 3.0;
        let d = derivatives(&l.snapshot(0, 0.0), &l, &world());
        assert_eq!(d.dpos.x, 3.0 * l.pixels_per_meter);
    }

    #[test]
    fn torque_spins_up() {
        let mut l = presets::eagle();
        l.torque = l.max_torque;
        let d = derivatives(&l.snapshot(0, 0.0), &l, &world());
        assert!((d.domega - l.max_torque / l.inertia).abs() < 1e-12);
    }
}
