use super::angle::angle_diff;
use crate::vehicle::Lander;

// ---------------------------------------------------------------------------
// Orientation controller: symmetric bang-bang torque impulse
// ---------------------------------------------------------------------------

/// Sub-state of a single rotation maneuver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationState {
    Start,
    /// Full torque towards the target until half the distance is covered.
    TorqueUp { initial: f64, d_theta: f64, ticks: u32 },
    /// Reversed torque for exactly `up_ticks` ticks.
    TorqueDown { ticks: u32, up_ticks: u32 },
    /// Maneuver finished; `residual` is achieved minus target orientation.
    Done { residual: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationStatus {
    InProgress,
    Done { residual: f64 },
}

/// Rotates the lander to an absolute orientation.
///
/// Usage: call [`rotate_to`](Self::rotate_to) once per tick with the same
/// target until it reports `Done`, then [`reset`](Self::reset) before the
/// next maneuver. Angular velocity is assumed linear in time under constant
/// torque, so reversing for the same number of ticks cancels the spin.
#[derive(Debug, Clone)]
pub struct OrientationController {
    state: RotationState,
}

impl OrientationController {
    pub fn new() -> Self {
        Self { state: RotationState::Start }
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, RotationState::Done { .. })
    }

    pub fn reset(&mut self) {
        self.state = RotationState::Start;
    }

    /// Advance the maneuver by one tick, writing `lander.torque`.
    pub fn rotate_to(&mut self, lander: &mut Lander, target: f64) -> RotationStatus {
        self.state = match self.state {
            RotationState::Start => {
                let diff = angle_diff(lander.orientation, target);
                let direction = if diff.delta > 0.0 {
                    1.0
                } else if diff.delta < 0.0 {
                    -1.0
                } else {
                    0.0
                };
                lander.torque = lander.max_torque * direction;
                RotationState::TorqueUp {
                    initial: lander.orientation,
                    d_theta: diff.magnitude(),
                    ticks: 1,
                }
            }
            RotationState::TorqueUp { initial, d_theta, ticks } => {
                let traveled = angle_diff(initial, lander.orientation).magnitude();
                if traveled >= d_theta / 2.0 {
                    lander.torque = -lander.torque;
                    RotationState::TorqueDown { ticks: 1, up_ticks: ticks }
                } else {
                    RotationState::TorqueUp { initial, d_theta, ticks: ticks + 1 }
                }
            }
            RotationState::TorqueDown { ticks, up_ticks } => {
                if ticks >= up_ticks {
                    lander.torque = 0.0;
                    let residual = angle_diff(target, lander.orientation).delta;
                    log::debug!(
                        "rotation to {:.4} rad done after {} + {} ticks, residual {:.5} rad",
                        target,
                        up_ticks,
                        ticks,
                        residual
                    );
                    RotationState::Done { residual }
                } else {
                    RotationState::TorqueDown { ticks: ticks + 1, up_ticks }
                }
            }
            done @ RotationState::Done { .. } => done,
        };

        match self.state {
            RotationState::Done { residual } => RotationStatus::Done { residual },
            _ => RotationStatus::InProgress,
        }
    }
}

impl Default for OrientationController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Pad, World};
    use crate::sim::integrator::rk4_step;
    use crate::vehicle::presets;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    const DT: f64 = 1.0 / 60.0;

    fn world() -> World {
        World::new(9.8, Pad::flat(0.0, 1.0e6, 100.0))
    }

    /// Fly a single maneuver; returns (ticks, +torque steps, -torque steps).
    fn fly(lander: &mut Lander, target: f64) -> (u32, u32, u32) {
        let world = world();
        let mut ctl = OrientationController::new();
        let (mut ticks, mut up, mut down) = (0, 0, 0);
        while !matches!(ctl.rotate_to(lander, target), RotationStatus::Done { .. }) {
            if lander.torque > 0.0 {
                up += 1;
            } else if lander.torque < 0.0 {
                down += 1;
            }
            rk4_step(lander, &world, DT);
            ticks += 1;
            assert!(ticks < 10_000, "rotation did not converge");
        }
        (ticks, up, down)
    }

    #[test]
    fn quarter_turn_converges() {
        let mut l = presets::eagle();
        let (ticks, up, down) = fly(&mut l, FRAC_PI_2);

        let alpha = l.max_torque / l.inertia;
        let ideal_ticks = 2.0 * (FRAC_PI_2 / alpha).sqrt() / DT;
        assert!((ticks as f64) < ideal_ticks + 10.0, "took {ticks} ticks");
        assert_eq!(up, down, "torque-down ticks must mirror torque-up ticks");
        assert_abs_diff_eq!(l.orientation, FRAC_PI_2, epsilon = 0.05);
        assert_abs_diff_eq!(l.omega, 0.0, epsilon = 1e-9);
        assert_eq!(l.torque, 0.0);
    }

    #[test]
    fn takes_the_short_way_through_zero() {
        let mut l = presets::eagle();
        l.orientation = FRAC_PI_4;
        let mut ctl = OrientationController::new();
        ctl.rotate_to(&mut l, 7.0 * FRAC_PI_4);
        assert!(l.torque < 0.0, "should rotate clockwise through zero");

        let mut l = presets::eagle();
        l.orientation = FRAC_PI_4;
        fly(&mut l, 7.0 * FRAC_PI_4);
        assert_abs_diff_eq!(l.orientation, 7.0 * FRAC_PI_4, epsilon = 0.05);
    }

    #[test]
    fn zero_distance_completes_without_torque() {
        let mut l = presets::eagle();
        l.orientation = 1.0;
        let mut ctl = OrientationController::new();
        assert_eq!(ctl.rotate_to(&mut l, 1.0), RotationStatus::InProgress);
        assert_eq!(l.torque, 0.0);
        assert_eq!(ctl.rotate_to(&mut l, 1.0), RotationStatus::InProgress);
        assert_eq!(l.torque, 0.0);
        assert_eq!(ctl.rotate_to(&mut l, 1.0), RotationStatus::Done { residual: 0.0 });
        assert_eq!(l.torque, 0.0);
    }

    #[test]
    fn done_is_sticky_until_reset() {
        let mut l = presets::eagle();
        let mut ctl = OrientationController::new();
        for _ in 0..3 {
            ctl.rotate_to(&mut l, 0.0);
        }
        assert!(ctl.is_done());
        ctl.rotate_to(&mut l, 2.0);
        assert!(ctl.is_done(), "a finished maneuver ignores new targets");
        assert_eq!(l.torque, 0.0);

        ctl.reset();
        assert_eq!(ctl.state(), RotationState::Start);
        ctl.rotate_to(&mut l, 2.0);
        assert!(matches!(ctl.state(), RotationState::TorqueUp { ticks: 1, .. }));
        assert!(l.torque > 0.0);
    }
}
