use crate::dynamics::state::{SimConfig, State};
use crate::gnc::{Controller, MissionSequencer};
use crate::physics::World;
use crate::vehicle::Lander;
use super::event::{EngineDetector, EventDetector, EventKind, FuelDetector, SimEvent};
use super::integrator::rk4_step;

// ---------------------------------------------------------------------------
// Flight record
// ---------------------------------------------------------------------------

/// Everything a simulated flight produced.
#[derive(Debug, Clone)]
pub struct Flight {
    /// One sample per tick, starting with the initial state.
    pub trajectory: Vec<State>,
    pub events: Vec<SimEvent>,
    pub touched_down: bool,
}

impl Flight {
    /// Last recorded state. Always present: the initial sample is pushed first.
    pub fn final_state(&self) -> &State {
        &self.trajectory[self.trajectory.len() - 1]
    }

    pub fn duration(&self) -> f64 {
        self.final_state().time
    }

    /// Mode labels in the order the controller entered them.
    pub fn modes(&self) -> Vec<&str> {
        let mut modes = Vec::new();
        for e in &self.events {
            if let EventKind::ModeChange { from, to } = &e.kind {
                if modes.is_empty() {
                    modes.push(from.as_str());
                }
                modes.push(to.as_str());
            }
        }
        modes
    }
}

// ---------------------------------------------------------------------------
// Closed-loop simulation
// ---------------------------------------------------------------------------

/// Fly `lander` with a custom controller until touchdown or `max_time`.
///
/// Each tick the controller runs first, then the plant advances one RK4 step
/// with the commanded actuators held. Touchdown is the collision point
/// reaching the pad's surface height.
pub fn simulate_with(
    lander: &Lander,
    world: &World,
    config: &SimConfig,
    controller: &mut dyn Controller,
) -> Flight {
    let mut lander = lander.clone();
    controller.reset();

    if !(config.tick > 0.0) {
        log::warn!("tick must be positive, got {}; nothing simulated", config.tick);
        return Flight { trajectory: vec![lander.snapshot(0, 0.0)], events: Vec::new(), touched_down: false };
    }

    let max_ticks = (config.max_time / config.tick).round() as u64;
    let cap = (max_ticks as usize + 1).min(200_000);
    let mut trajectory = Vec::with_capacity(cap);
    let mut events = Vec::new();
    let mut detectors: Vec<Box<dyn EventDetector>> =
        vec![Box::new(EngineDetector), Box::new(FuelDetector::new())];

    let surface_y = world.landing_pad().begin.y;
    let mut mode = controller.mode().to_string();
    let mut touched_down = false;
    let mut tick = 0_u64;

    trajectory.push(lander.snapshot(0, 0.0));
    log::info!("{}: flying {} for up to {:.0} s", controller.name(), lander.name, config.max_time);

    while tick < max_ticks {
        let time = tick as f64 * config.tick;

        // GNC update
        controller.control(&mut lander, world);
        if controller.mode() != mode {
            let to = controller.mode().to_string();
            events.push(SimEvent {
                time,
                kind: EventKind::ModeChange { from: mode, to: to.clone() },
                state: lander.snapshot(tick, time),
            });
            mode = to;
        }

        // Integrate
        rk4_step(&mut lander, world, config.tick);
        tick += 1;
        let time = tick as f64 * config.tick;
        let state = lander.snapshot(tick, time);

        let prev = &trajectory[trajectory.len() - 1];
        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(prev, &state) {
                events.push(SimEvent { time, kind, state: state.clone() });
            }
        }

        // Pad contact
        if lander.bottom_y() >= surface_y {
            log::info!(
                "touchdown at t={:.2} s, v=({:.2}, {:.2}) m/s",
                time,
                lander.vel.x,
                lander.vel.y
            );
            events.push(SimEvent { time, kind: EventKind::Touchdown, state: state.clone() });
            trajectory.push(state);
            touched_down = true;
            break;
        }

        trajectory.push(state);
    }

    if !touched_down {
        log::warn!("no touchdown within {:.0} s", config.max_time);
    }

    Flight { trajectory, events, touched_down }
}

/// Simulate with the default MissionSequencer (convenience wrapper).
pub fn simulate(lander: &Lander, world: &World, config: &SimConfig) -> Flight {
    let mut pilot = MissionSequencer::new(config);
    simulate_with(lander, world, config, &mut pilot)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Pad;
    use crate::vehicle::LanderBuilder;

    fn over_pad() -> (Lander, World) {
        let lander = LanderBuilder::new("Test")
            .pos(1000.0, 200.0)
            .isp(1.0e7)
            .build();
        let world = World::new(9.8, Pad::flat(900.0, 1000.0, 200.0));
        (lander, world)
    }

    struct Coast;

    impl Controller for Coast {
        fn control(&mut self, lander: &mut Lander, _world: &World) {
            lander.thrusting = false;
            lander.torque = 0.0;
        }
    }

    #[test]
    fn over_pad_mission_touches_down_softly() {
        let (lander, world) = over_pad();
        let flight = simulate(&lander, &world, &SimConfig::default());
        assert!(flight.touched_down);
        let last = flight.final_state();
        assert!(last.vel.y.abs() < 6.0, "touchdown at {:.2} m/s", last.vel.y);
    }

    #[test]
    fn events_follow_the_mission() {
        let (lander, world) = over_pad();
        let flight = simulate(&lander, &world, &SimConfig::default());

        assert_eq!(&flight.modes()[..3], &["BEGIN", "BEFORE_Y_BURN", "Y_BURN"]);
        let ignition = flight.events.iter().position(|e| e.kind == EventKind::Ignition);
        let burn = flight.events.iter().position(|e| {
            matches!(&e.kind, EventKind::ModeChange { to, .. } if to == "Y_BURN")
        });
        assert!(ignition.is_some() && burn.is_some());
        assert!(burn < ignition, "mode change is recorded before the plant step");
        assert_eq!(flight.events.last().map(|e| &e.kind), Some(&EventKind::Touchdown));
    }

    #[test]
    fn stops_at_max_time() {
        let (lander, _) = over_pad();
        let world = World::new(9.8, Pad::flat(0.0, 1.0e9, 100.0));
        let config = SimConfig { max_time: 2.0, ..SimConfig::default() };
        let flight = simulate_with(&lander, &world, &config, &mut Coast);
        assert!(!flight.touched_down);
        assert_eq!(flight.trajectory.len(), 121);
        assert!(flight.events.is_empty());
        assert!((flight.duration() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_tick_returns_initial_state() {
        let (lander, world) = over_pad();
        for tick in [0.0, -0.01, f64::NAN] {
            let config = SimConfig { tick, ..SimConfig::default() };
            let flight = simulate(&lander, &world, &config);
            assert_eq!(flight.trajectory.len(), 1);
            assert!(!flight.touched_down);
            assert!(flight.events.is_empty());
        }
    }

    #[test]
    fn coasting_lander_falls_onto_pad() {
        let (lander, world) = over_pad();
        let flight = simulate_with(&lander, &world, &SimConfig::default(), &mut Coast);
        assert!(flight.touched_down);
        // 400 m free fall at 9.8: ~88.5 m/s
        assert!((flight.final_state().vel.y - 88.5).abs() < 1.0);
        assert!(flight.modes().is_empty());
    }
}
