use nalgebra::Vector2;

use crate::physics::world::World;
use crate::vehicle::Lander;

/// Uniform gravity acceleration (screen frame, +y is down).
pub fn gravity_accel(world: &World) -> Vector2<f64> {
    Vector2::new(0.0, world.gravity)
}

/// Unit thrust axis for a given orientation.
pub fn thrust_axis(orientation: f64) -> Vector2<f64> {
    let (sin, cos) = orientation.sin_cos();
    Vector2::new(cos, sin)
}

/// Engine acceleration at the given orientation and total mass.
/// Zero when the engine is off or the tanks are dry.
pub fn thrust_accel(lander: &Lander, orientation: f64, mass: f64, fuel: f64) -> Vector2<f64> {
    if !lander.thrusting || fuel <= 0.0 || mass <= 0.0 {
        return Vector2::zeros();
    }
    thrust_axis(orientation) * (lander.thrust / mass)
}

/// Angular acceleration from the commanded torque.
pub fn angular_accel(lander: &Lander) -> f64 {
    if lander.inertia > 0.0 {
        lander.torque / lander.inertia
    } else {
        0.0
    }
}
