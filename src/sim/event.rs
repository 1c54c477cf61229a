use crate::dynamics::state::State;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// The controller reported a new mode label.
    ModeChange { from: String, to: String },
    Ignition,
    Cutoff,
    FuelExhausted,
    Touchdown,
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub state: State,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive states and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &State, current: &State) -> Option<EventKind>;
}

/// Reports engine ignition and cutoff edges.
pub struct EngineDetector;

impl EventDetector for EngineDetector {
    fn check(&mut self, prev: &State, current: &State) -> Option<EventKind> {
        match (prev.thrusting, current.thrusting) {
            (false, true) => Some(EventKind::Ignition),
            (true, false) => Some(EventKind::Cutoff),
            _ => None,
        }
    }
}

/// Fires once when the tanks run dry.
#[derive(Default)]
pub struct FuelDetector {
    fired: bool,
}

impl FuelDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventDetector for FuelDetector {
    fn check(&mut self, prev: &State, current: &State) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        if prev.fuel > 0.0 && current.fuel <= 0.0 {
            self.fired = true;
            Some(EventKind::FuelExhausted)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    fn make_state(fuel: f64, thrusting: bool) -> State {
        State {
            tick: 0,
            time: 0.0,
            pos: Vector2::zeros(),
            vel: Vector2::zeros(),
            orientation: 0.0,
            omega: 0.0,
            fuel,
            thrusting,
            torque: 0.0,
        }
    }

    #[test]
    fn engine_edges() {
        let mut det = EngineDetector;
        let off = make_state(10.0, false);
        let on = make_state(10.0, true);
        assert_eq!(det.check(&off, &on), Some(EventKind::Ignition));
        assert_eq!(det.check(&on, &on), None);
        assert_eq!(det.check(&on, &off), Some(EventKind::Cutoff));
    }

    #[test]
    fn fuel_exhaustion_fires_once() {
        let mut det = FuelDetector::new();
        let prev = make_state(0.2, true);
        let curr = make_state(0.0, false);
        assert_eq!(det.check(&prev, &curr), Some(EventKind::FuelExhausted));
        // Should not fire again
        assert!(det.check(&prev, &curr).is_none());
    }
}
