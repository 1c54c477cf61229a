use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::dynamics::state::{State, G0};

// ---------------------------------------------------------------------------
// Lander: kinematic state, actuator commands and fixed parameters
// ---------------------------------------------------------------------------

/// The landing vehicle.
///
/// The host owns it and integrates it; the pilot reads the kinematics and
/// writes the actuator fields (`torque`, `thrust`, `thrusting`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Lander {
    pub name: String,
    pub pos: Vector2<f64>,              // px, screen frame (y down)
    pub vel: Vector2<f64>,              // m/s
    pub orientation: f64,               // rad, thrust axis, [0, 2pi)
    pub omega: f64,                     // rad/s
    pub torque: f64,                    // N·m, commanded
    pub thrust: f64,                    // N, commanded magnitude
    pub thrusting: bool,
    pub dry_mass: f64,                  // kg
    pub fuel: f64,                      // kg
    pub max_thrust: f64,                // N
    pub max_torque: f64,                // N·m
    pub inertia: f64,                   // kg·m^2
    pub isp: f64,                       // s
    pub pixels_per_meter: f64,
    pub rotation_center: Vector2<f64>,  // px, offset from pos
    pub collision_height: f64,          // px, offset from pos to touchdown point
}

impl Lander {
    pub fn total_mass(&self) -> f64 {
        self.dry_mass + self.fuel
    }

    /// Propellant flow at the commanded thrust.
    pub fn mass_flow(&self) -> f64 {
        if self.isp > 0.0 {
            self.thrust / (self.isp * G0)
        } else {
            0.0
        }
    }

    /// Thrust-to-weight ratio at full thrust under gravity `g`.
    pub fn twr(&self, g: f64) -> f64 {
        self.max_thrust / (self.total_mass() * g)
    }

    /// Ideal delta-v left in the tanks.
    pub fn delta_v(&self) -> f64 {
        self.isp * G0 * (self.total_mass() / self.dry_mass).ln()
    }

    /// Horizontal reference used for aiming (centre of rotation).
    pub fn reference_x(&self) -> f64 {
        self.pos.x + self.rotation_center.x
    }

    /// Screen y of the touchdown point.
    pub fn bottom_y(&self) -> f64 {
        self.pos.y + self.collision_height
    }

    pub fn snapshot(&self, tick: u64, time: f64) -> State {
        State {
            tick,
            time,
            pos: self.pos,
            vel: self.vel,
            orientation: self.orientation,
            omega: self.omega,
            fuel: self.fuel,
            thrusting: self.thrusting,
            torque: self.torque,
        }
    }
}

impl Default for Lander {
    fn default() -> Self {
        LanderBuilder::new("Lander").build()
    }
}

// ---------------------------------------------------------------------------
// Lander builder
// ---------------------------------------------------------------------------

pub struct LanderBuilder {
    lander: Lander,
}

impl LanderBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            lander: Lander {
                name: name.into(),
                pos: Vector2::zeros(),
                vel: Vector2::zeros(),
                orientation: 0.0,
                omega: 0.0,
                torque: 0.0,
                thrust: 0.0,
                thrusting: false,
                dry_mass: 1000.0,
                fuel: 500.0,
                max_thrust: 30_000.0,
                max_torque: 1000.0,
                inertia: 2000.0,
                isp: 300.0,
                pixels_per_meter: 2.0,
                rotation_center: Vector2::zeros(),
                collision_height: 0.0,
            },
        }
    }

    pub fn pos(mut self, x: f64, y: f64) -> Self { self.lander.pos = Vector2::new(x, y); self }
    pub fn vel(mut self, x: f64, y: f64) -> Self { self.lander.vel = Vector2::new(x, y); self }
    pub fn orientation(mut self, v: f64) -> Self { self.lander.orientation = v; self }
    pub fn dry_mass(mut self, v: f64) -> Self { self.lander.dry_mass = v; self }
    pub fn fuel(mut self, v: f64) -> Self { self.lander.fuel = v; self }
    pub fn max_thrust(mut self, v: f64) -> Self { self.lander.max_thrust = v; self }
    pub fn max_torque(mut self, v: f64) -> Self { self.lander.max_torque = v; self }
    pub fn inertia(mut self, v: f64) -> Self { self.lander.inertia = v; self }
    pub fn isp(mut self, v: f64) -> Self { self.lander.isp = v; self }
    pub fn pixels_per_meter(mut self, v: f64) -> Self { self.lander.pixels_per_meter = v; self }
    pub fn rotation_center(mut self, x: f64, y: f64) -> Self { self.lander.rotation_center = Vector2::new(x, y); self }
    pub fn collision_height(mut self, v: f64) -> Self { self.lander.collision_height = v; self }

    pub fn build(self) -> Lander {
        self.lander
    }
}
