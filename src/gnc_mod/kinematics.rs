use super::error::PilotError;

// ---------------------------------------------------------------------------
// Closed-form kinematic solvers used by the mission sequencer
// ---------------------------------------------------------------------------
//
// Constant mass during a burn, no cross-axis coupling, gravity-only fall.

/// Smallest usable |cos(orientation)| for a horizontal burn.
const MIN_AXIS_COMPONENT: f64 = 1e-6;

/// Time to fall `distance` (m, positive downwards) starting at vertical speed
/// `v0` (m/s, positive downwards) under gravity `g`.
///
/// Positive root of `distance = v0 t + g/2 t^2`.
pub fn fall_time(v0: f64, distance: f64, g: f64) -> Result<f64, PilotError> {
    let a = g / 2.0;
    let b = v0;
    let c = -distance;
    let discriminant = b * b - 4.0 * a * c;
    if distance < 0.0 || g <= 0.0 || discriminant < 0.0 {
        return Err(PilotError::PredictionInfeasible { distance, discriminant });
    }
    Ok((-b + discriminant.sqrt()) / (2.0 * a))
}

/// Burn duration (s) to change horizontal speed by `delta_v` with the engine
/// at `orientation`: `dv = thrust |cos(theta)| t / mass`.
pub fn burn_time(delta_v: f64, thrust: f64, orientation: f64, mass: f64) -> Result<f64, PilotError> {
    let axis = orientation.cos().abs();
    let authority = thrust * axis;
    if thrust <= 0.0 || axis < MIN_AXIS_COMPONENT || !authority.is_finite() {
        return Err(PilotError::BurnUnreachable { orientation });
    }
    Ok(delta_v.abs() * mass / authority)
}

/// Nearest whole number of ticks for a continuous duration. Introduces at
/// most half a tick of timing error.
pub fn burn_ticks(duration: f64, tick: f64) -> u64 {
    if tick <= 0.0 || !duration.is_finite() || duration <= 0.0 {
        return 0;
    }
    (duration / tick).round() as u64
}

/// Vertical braking profile for a full-thrust burn at a fixed orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Braking {
    /// Net vertical acceleration while thrusting, m/s^2 (+ down).
    pub accel: f64,
    /// Time to null the vertical speed, s.
    pub time: f64,
    /// Distance covered while nulling it, m.
    pub distance: f64,
}

/// How long and how far a burn needs to stop a descent at `v_y` (m/s, + down).
pub fn vertical_braking(
    v_y: f64,
    g: f64,
    thrust: f64,
    orientation: f64,
    mass: f64,
) -> Result<Braking, PilotError> {
    // a = g + F sin(theta) / m    (dm/dt << m)
    let accel = g + thrust * orientation.sin() / mass;
    if accel.is_nan() || accel >= 0.0 {
        return Err(PilotError::BurnUnreachable { orientation });
    }
    let time = (v_y / accel).abs();
    let distance = v_y * time + 0.5 * accel * time * time;
    Ok(Braking { accel, time, distance })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn fall_time_from_rest() {
        let t = fall_time(0.0, 49.0, 9.8).unwrap();
        assert_abs_diff_eq!(t, 10.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn fall_time_with_initial_speed() {
        // 10 t + 4.9 t^2 = 14.9 -> t = 1
        let t = fall_time(10.0, 14.9, 9.8).unwrap();
        assert_abs_diff_eq!(t, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn fall_time_below_pad_is_infeasible() {
        assert!(matches!(
            fall_time(0.0, -5.0, 9.8),
            Err(PilotError::PredictionInfeasible { .. })
        ));
    }

    #[test]
    fn climbing_fall_time_is_infeasible_without_gravity() {
        assert!(fall_time(-3.0, 10.0, 0.0).is_err());
    }

    #[test]
    fn burn_time_impulse_relation() {
        let t = burn_time(10.0, 20.0, 0.0, 5.0).unwrap();
        assert_abs_diff_eq!(t, 2.5, epsilon = 1e-12);
        assert_eq!(burn_ticks(t, 1.0 / 60.0), 150);
        assert_eq!(burn_ticks(t, 0.1), 25);
    }

    #[test]
    fn burn_time_uses_axis_magnitude() {
        let forward = burn_time(10.0, 20.0, 0.0, 5.0).unwrap();
        let reverse = burn_time(10.0, 20.0, PI, 5.0).unwrap();
        assert_abs_diff_eq!(forward, reverse, epsilon = 1e-9);
    }

    #[test]
    fn perpendicular_axis_is_unreachable() {
        assert!(matches!(
            burn_time(10.0, 20.0, FRAC_PI_2, 5.0),
            Err(PilotError::BurnUnreachable { .. })
        ));
    }

    #[test]
    fn burn_ticks_rounds_to_nearest() {
        assert_eq!(burn_ticks(0.49, 1.0), 0);
        assert_eq!(burn_ticks(0.51, 1.0), 1);
        assert_eq!(burn_ticks(-2.0, 1.0), 0);
        assert_eq!(burn_ticks(3.0, 0.0), 0);
    }

    #[test]
    fn upright_braking_profile() {
        // 30 kN on 1.5 t under 9.8: a = 9.8 - 20 = -10.2
        let b = vertical_braking(20.4, 9.8, 30_000.0, 3.0 * FRAC_PI_2, 1500.0).unwrap();
        assert_abs_diff_eq!(b.accel, -10.2, epsilon = 1e-9);
        assert_abs_diff_eq!(b.time, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.distance, 20.4, epsilon = 1e-9);
    }

    #[test]
    fn sideways_engine_cannot_brake() {
        assert!(vertical_braking(20.0, 9.8, 30_000.0, 0.0, 1500.0).is_err());
    }
}
