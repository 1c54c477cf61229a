use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::dynamics::state::G0;

/// A flat landing pad, given by its two top edges in screen pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pad {
    pub begin: Vector2<f64>,
    pub end: Vector2<f64>,
}

impl Pad {
    pub fn new(begin: Vector2<f64>, end: Vector2<f64>) -> Self {
        Self { begin, end }
    }

    /// Flat pad of `width` px whose leading edge sits at (`x`, `y`).
    pub fn flat(x: f64, y: f64, width: f64) -> Self {
        Self::new(Vector2::new(x, y), Vector2::new(x + width, y))
    }

    pub fn right(&self) -> f64 {
        self.end.x
    }

    pub fn center(&self) -> f64 {
        0.5 * (self.begin.x + self.end.x)
    }

    pub fn width(&self) -> f64 {
        self.end.x - self.begin.x
    }

    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.begin.x && x <= self.right()
    }
}

/// Environment the lander flies in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Gravitational acceleration magnitude, m/s^2, acting towards +y.
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    pub pad: Pad,
}

fn default_gravity() -> f64 {
    G0
}

impl World {
    pub fn new(gravity: f64, pad: Pad) -> Self {
        Self { gravity, pad }
    }

    /// The pad the pilot targets.
    pub fn landing_pad(&self) -> &Pad {
        &self.pad
    }
}
