use crate::physics::World;
use crate::vehicle::Lander;

/// Trait for flight controllers.
///
/// Implement this to plug a custom pilot into the simulation loop. The
/// controller runs once per tick before the plant step and commands the
/// lander through its actuator fields (`torque`, `thrust`, `thrusting`).
pub trait Controller {
    /// Read the lander's kinematics and write its actuator commands.
    fn control(&mut self, lander: &mut Lander, world: &World);

    /// Reset controller internal state for a fresh flight.
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }

    /// Current mode label; the runner records a change event whenever it moves.
    fn mode(&self) -> &str {
        ""
    }
}
