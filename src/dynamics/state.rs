use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G0: f64 = 9.80665;

// ---------------------------------------------------------------------------
// Planar snapshot: position, velocity, attitude, angular rate, propellant
// ---------------------------------------------------------------------------

/// One recorded sample of the lander at the end of a tick.
///
/// Frame: screen convention, x right and y down. Position is in pixels,
/// velocity in physical units per second.
#[derive(Debug, Clone, Serialize)]
pub struct State {
    pub tick: u64,
    pub time: f64,
    pub pos: Vector2<f64>,          // px
    pub vel: Vector2<f64>,          // m/s
    pub orientation: f64,           // rad, [0, 2pi)
    pub omega: f64,                 // rad/s
    pub fuel: f64,                  // kg
    pub thrusting: bool,
    pub torque: f64,                // N·m, commanded
}

impl State {
    /// Advance by a derivative scaled by dt (RK4 substep). Orientation is not
    /// wrapped here; the integrator wraps once per full step.
    pub fn apply(&self, d: &Deriv, dt: f64) -> State {
        State {
            tick: self.tick,
            time: self.time + dt,
            pos: self.pos + d.dpos * dt,
            vel: self.vel + d.dvel * dt,
            orientation: self.orientation + d.dtheta * dt,
            omega: self.omega + d.domega * dt,
            fuel: (self.fuel + d.dfuel * dt).max(0.0),
            thrusting: self.thrusting,
            torque: self.torque,
        }
    }
}

// ---------------------------------------------------------------------------
// State derivative
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Deriv {
    pub dpos: Vector2<f64>,   // px/s
    pub dvel: Vector2<f64>,   // m/s^2
    pub dtheta: f64,          // rad/s
    pub domega: f64,          // rad/s^2
    pub dfuel: f64,           // kg/s (negative during burn)
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

/// Fixed timing constants shared by the plant and the pilot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Tick duration, s.
    pub tick: f64,
    /// Time budget for a pi flip, s. Sizes the intermediate closing velocity.
    pub flip_time: f64,
    pub max_time: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick: 1.0 / 60.0, // one frame at 60 Hz
            flip_time: 5.0,
            max_time: 300.0,
        }
    }
}
